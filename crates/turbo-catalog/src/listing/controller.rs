//! Listing state machine.
//!
//! [`reduce`] is a pure transition function from `(state, event)` to the next
//! state plus the side effects to run. [`ListingController`] wraps it with the
//! debounced search box.

use super::api::{ProductListItem, ProductPage, ProductsQueryVariables};
use super::debounce::{Clock, Debouncer, SystemClock};
use crate::config::ListingConfig;
use crate::error::CatalogError;
use crate::filter::{self, FilterState, NavigationParams, QueryString};
use crate::pagination::{
    Cursor, CursorTracker, FetchKind, InFlight, PageSummary, PaginationState, RequestId,
};
use std::time::Instant;

/// What the failed fetch was, so it can be issued again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPlan {
    pub kind: FetchKind,
    pub after: Option<Cursor>,
}

/// Listing phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Idle,
    /// A replacing fetch is pending (mount, navigation or filter change).
    FilteringInProgress,
    /// An appending fetch is pending.
    LoadingMore,
    /// The last fetch failed. Items from before the failure are kept.
    Error { message: String, retry: RetryPlan },
}

impl ListPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListPhase::FilteringInProgress | ListPhase::LoadingMore)
    }

    fn for_fetch(kind: FetchKind) -> Self {
        match kind {
            FetchKind::Replace => ListPhase::FilteringInProgress,
            FetchKind::Append => ListPhase::LoadingMore,
        }
    }
}

/// Everything the listing view renders from.
#[derive(Debug, Clone)]
pub struct ListingState {
    pub filters: FilterState,
    /// The URL query the state was last derived from.
    pub query: QueryString,
    pub navigation: NavigationParams,
    pub items: Vec<ProductListItem>,
    pub phase: ListPhase,
    tracker: CursorTracker,
    channel: String,
    page_size: u32,
}

impl ListingState {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            filters: FilterState::default(),
            query: QueryString::new(),
            navigation: NavigationParams::default(),
            items: Vec::new(),
            phase: ListPhase::Idle,
            tracker: CursorTracker::new(),
            channel: config.channel.clone(),
            page_size: config.page_size,
        }
    }

    pub fn pagination(&self) -> &PaginationState {
        self.tracker.state()
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.tracker.in_flight()
    }

    pub fn can_load_more(&self) -> bool {
        self.tracker.can_load_more()
    }

    pub fn summary(&self) -> PageSummary {
        PageSummary::new(
            self.navigation.page,
            self.page_size,
            self.tracker.state().total_count,
        )
    }

    /// Shareable URL for the "load more" continuation, if there is one.
    pub fn load_more_query(&self) -> Option<QueryString> {
        let state = self.tracker.state();
        let cursor = state.cursor.as_ref().filter(|_| state.has_next_page)?;
        Some(filter::load_more_query(&self.query, cursor))
    }

    /// URL for the next numbered page.
    pub fn next_page_query(&self) -> Option<QueryString> {
        let summary = self.summary();
        let cursor = self.tracker.state().cursor.as_ref()?;
        summary
            .has_next
            .then(|| filter::paginate(&self.query, summary.page + 1, Some(cursor)))
    }

    fn fetch(&mut self, kind: FetchKind, after: Option<Cursor>, commands: &mut Vec<Command>) {
        let (request, superseded) = self.tracker.begin(kind, after);
        if let Some(old) = superseded {
            commands.push(Command::Cancel(old.id));
        }
        let variables = ProductsQueryVariables::new(
            self.channel.as_str(),
            self.page_size,
            request.after.clone(),
            &self.filters,
        );
        self.phase = ListPhase::for_fetch(kind);
        commands.push(Command::Fetch(FetchRequest {
            id: request.id,
            kind,
            variables,
        }));
    }

    fn abandon_in_flight(&mut self, commands: &mut Vec<Command>) {
        if let Some(abandoned) = self.tracker.reset() {
            tracing::debug!(request = %abandoned.id, "abandoning in-flight fetch");
            commands.push(Command::Cancel(abandoned.id));
        }
    }
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(&ListingConfig::default())
    }
}

/// Inputs to the listing.
#[derive(Debug, Clone)]
pub enum ListingEvent {
    /// The URL changed, including the initial mount.
    Navigated(QueryString),
    /// The user committed a new filter set.
    FiltersChanged(FilterState),
    /// Search text was submitted.
    ///
    /// [`ListingController`] debounces this; [`reduce`] applies it at once.
    SearchInput(String),
    LoadMore,
    FetchSucceeded { request: RequestId, page: ProductPage },
    FetchFailed { request: RequestId, error: CatalogError },
    Retry,
}

/// A fetch to run against the catalog API.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub kind: FetchKind,
    pub variables: ProductsQueryVariables,
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch(FetchRequest),
    /// The request's result will be ignored; aborting it is optional.
    Cancel(RequestId),
    /// Push this query onto the URL.
    Navigate(QueryString),
}

#[derive(Debug)]
pub struct Transition {
    pub state: ListingState,
    pub commands: Vec<Command>,
}

/// Apply `event` to `state`.
pub fn reduce(mut state: ListingState, event: ListingEvent) -> Transition {
    let mut commands = Vec::new();

    match event {
        ListingEvent::Navigated(query) => {
            state.filters = filter::decode(&query);
            state.navigation = filter::decode_navigation(&query);
            state.query = query;
            state.abandon_in_flight(&mut commands);
            let after = state.navigation.cursor.clone();
            state.fetch(FetchKind::Replace, after, &mut commands);
        }

        ListingEvent::FiltersChanged(filters) => {
            let query = filter::encode(&filters);
            if query == state.query {
                tracing::debug!("filters unchanged, not navigating");
            } else {
                state.filters = filters;
                state.abandon_in_flight(&mut commands);
                state.phase = ListPhase::FilteringInProgress;
                commands.push(Command::Navigate(query));
            }
        }

        ListingEvent::SearchInput(text) => {
            let filters = state.filters.clone().with_search(text);
            return reduce(state, ListingEvent::FiltersChanged(filters));
        }

        ListingEvent::LoadMore => match state.tracker.begin_load_more() {
            Some(request) => {
                state.phase = ListPhase::LoadingMore;
                let variables = ProductsQueryVariables::new(
                    state.channel.as_str(),
                    state.page_size,
                    request.after.clone(),
                    &state.filters,
                );
                commands.push(Command::Fetch(FetchRequest {
                    id: request.id,
                    kind: request.kind,
                    variables,
                }));
            }
            None => tracing::debug!(
                has_next_page = state.tracker.state().has_next_page,
                busy = state.tracker.is_busy(),
                "load more rejected"
            ),
        },

        ListingEvent::FetchSucceeded { request, page } => {
            match state
                .tracker
                .accept(request, &page.page_info, page.total_count)
            {
                Some(FetchKind::Replace) => {
                    state.items = page.items;
                    state.phase = ListPhase::Idle;
                }
                Some(FetchKind::Append) => {
                    state.items.extend(page.items);
                    state.phase = ListPhase::Idle;
                }
                None => tracing::debug!(request = %request, "discarding stale response"),
            }
        }

        ListingEvent::FetchFailed { request, error } => match state.tracker.fail(request) {
            Some(failed) => {
                tracing::warn!(request = %request, error = %error, "catalog fetch failed");
                state.phase = ListPhase::Error {
                    message: error.to_string(),
                    retry: RetryPlan {
                        kind: failed.kind,
                        after: failed.after,
                    },
                };
            }
            None => tracing::debug!(request = %request, "discarding stale failure"),
        },

        ListingEvent::Retry => {
            if let ListPhase::Error { retry, .. } = &state.phase {
                let RetryPlan { kind, after } = retry.clone();
                state.fetch(kind, after, &mut commands);
            }
        }
    }

    Transition { state, commands }
}

/// Owns the listing state and the debounced search box.
pub struct ListingController<C: Clock = SystemClock> {
    state: ListingState,
    search: Debouncer<String>,
    clock: C,
}

impl ListingController<SystemClock> {
    pub fn new(config: &ListingConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> ListingController<C> {
    pub fn with_clock(config: &ListingConfig, clock: C) -> Self {
        Self {
            state: ListingState::new(config),
            search: Debouncer::new(config.search_debounce()),
            clock,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Feed an event, returning the commands to run.
    ///
    /// Search input only restarts the debounce timer; see [`Self::poll_timers`].
    pub fn handle(&mut self, event: ListingEvent) -> Vec<Command> {
        match event {
            ListingEvent::SearchInput(text) => {
                self.search.schedule(self.clock.now(), text);
                Vec::new()
            }
            ListingEvent::FiltersChanged(filters) => {
                if self.search.cancel().is_some() {
                    tracing::debug!("pending search superseded by filter change");
                }
                self.apply(ListingEvent::FiltersChanged(filters))
            }
            other => self.apply(other),
        }
    }

    /// Fire the debounced search if its quiet period has elapsed.
    pub fn poll_timers(&mut self) -> Vec<Command> {
        match self.search.poll(self.clock.now()) {
            Some(text) => self.apply(ListingEvent::SearchInput(text)),
            None => Vec::new(),
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    fn apply(&mut self, event: ListingEvent) -> Vec<Command> {
        let state = std::mem::take(&mut self.state);
        let Transition { state, commands } = reduce(state, event);
        self.state = state;
        commands
    }
}
