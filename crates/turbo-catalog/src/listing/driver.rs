//! Async executor for listing commands.

use super::api::CatalogApi;
use super::controller::{Command, FetchRequest, ListingController, ListingEvent, ListingState};
use super::debounce::{Clock, SystemClock};
use crate::config::ListingConfig;
use crate::error::CatalogError;
use crate::filter::QueryString;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Runs a [`ListingController`] against a [`CatalogApi`].
///
/// Commands run one at a time in the order they were produced. `Navigate`
/// stands in for the router: the URL is pushed onto [`Self::history`] and fed
/// back as `Navigated`.
pub struct ListingDriver<A: CatalogApi, C: Clock = SystemClock> {
    api: A,
    controller: ListingController<C>,
    fetch_timeout: Duration,
    history: Vec<QueryString>,
}

impl<A: CatalogApi> ListingDriver<A, SystemClock> {
    pub fn new(api: A, config: &ListingConfig) -> Self {
        Self::with_clock(api, config, SystemClock)
    }
}

impl<A: CatalogApi, C: Clock> ListingDriver<A, C> {
    pub fn with_clock(api: A, config: &ListingConfig, clock: C) -> Self {
        Self {
            api,
            controller: ListingController::with_clock(config, clock),
            fetch_timeout: config.fetch_timeout(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &ListingState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ListingController<C> {
        &self.controller
    }

    /// URLs pushed by filter changes, oldest first.
    pub fn history(&self) -> &[QueryString] {
        &self.history
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Load the listing for the initial URL.
    pub async fn mount(&mut self, query: QueryString) {
        self.dispatch(ListingEvent::Navigated(query)).await;
    }

    pub async fn dispatch(&mut self, event: ListingEvent) {
        let commands = self.controller.handle(event);
        self.run(commands).await;
    }

    pub async fn search_input(&mut self, text: impl Into<String>) {
        self.dispatch(ListingEvent::SearchInput(text.into())).await;
    }

    /// Fire any debounce timer that has come due.
    pub async fn tick(&mut self) {
        let commands = self.controller.poll_timers();
        self.run(commands).await;
    }

    async fn run(&mut self, commands: Vec<Command>) {
        let mut queue: VecDeque<Command> = commands.into();

        while let Some(command) = queue.pop_front() {
            let follow_up = match command {
                Command::Fetch(request) => {
                    let event = self.fetch(request).await;
                    self.controller.handle(event)
                }
                Command::Cancel(id) => {
                    tracing::debug!(request = %id, "request superseded");
                    Vec::new()
                }
                Command::Navigate(query) => {
                    tracing::debug!(url = %query, "navigate");
                    self.history.push(query.clone());
                    self.controller.handle(ListingEvent::Navigated(query))
                }
            };
            queue.extend(follow_up);
        }
    }

    async fn fetch(&self, request: FetchRequest) -> ListingEvent {
        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.fetch_timeout,
            self.api.fetch_products(&request.variables),
        )
        .await
        .unwrap_or_else(|_| Err(CatalogError::Timeout(self.fetch_timeout)));
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(page) => {
                tracing::info!(
                    request = %request.id,
                    kind = ?request.kind,
                    items = page.items.len(),
                    has_next_page = page.page_info.has_next_page,
                    elapsed_ms,
                    "fetched products"
                );
                ListingEvent::FetchSucceeded {
                    request: request.id,
                    page,
                }
            }
            Err(error) => {
                tracing::debug!(request = %request.id, elapsed_ms, error = %error, "fetch failed");
                ListingEvent::FetchFailed {
                    request: request.id,
                    error,
                }
            }
        }
    }
}
