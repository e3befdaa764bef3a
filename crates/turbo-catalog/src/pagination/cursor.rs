//! Forward cursor tracking with an at-most-one-in-flight guard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server-issued continuation token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Cursor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// `pageInfo` as returned by the catalog API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<Cursor>,
}

/// Pagination as of the last accepted response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// Cursor to continue from; `None` is the start of the list.
    pub cursor: Option<Cursor>,
    pub has_next_page: bool,
    pub total_count: u64,
}

/// Identifies one issued fetch. Ids increase monotonically per tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a fetched page is merged into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    /// New filters or page navigation: the page replaces the list.
    Replace,
    /// "Load more": the page is appended.
    Append,
}

/// A fetch that has been issued and not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub id: RequestId,
    pub kind: FetchKind,
    pub after: Option<Cursor>,
}

/// Tracks the forward cursor and the single outstanding fetch.
///
/// Results are only applied for the request currently in flight; anything
/// else is stale and dropped.
#[derive(Debug, Clone, Default)]
pub struct CursorTracker {
    state: PaginationState,
    in_flight: Option<InFlight>,
    next_id: u64,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.in_flight.as_ref().is_some_and(|f| f.id == id)
    }

    /// Whether a "load more" would be accepted right now.
    pub fn can_load_more(&self) -> bool {
        self.state.has_next_page && self.state.cursor.is_some() && self.in_flight.is_none()
    }

    /// Issue a fetch, superseding whatever was in flight.
    ///
    /// Returns the new request and the superseded one, if any.
    pub fn begin(&mut self, kind: FetchKind, after: Option<Cursor>) -> (InFlight, Option<InFlight>) {
        self.next_id += 1;
        let request = InFlight {
            id: RequestId(self.next_id),
            kind,
            after,
        };
        let superseded = self.in_flight.replace(request.clone());
        (request, superseded)
    }

    /// Issue an append fetch from the current cursor.
    ///
    /// Rejected (not queued) when there is no next page or a fetch is
    /// already in flight.
    pub fn begin_load_more(&mut self) -> Option<InFlight> {
        if !self.can_load_more() {
            return None;
        }
        let after = self.state.cursor.clone();
        Some(self.begin(FetchKind::Append, after).0)
    }

    /// Apply a response. Returns the request's kind, or `None` if stale.
    pub fn accept(&mut self, id: RequestId, page_info: &PageInfo, total_count: u64) -> Option<FetchKind> {
        if !self.is_current(id) {
            return None;
        }
        let request = self.in_flight.take()?;
        self.state = PaginationState {
            cursor: page_info.end_cursor.clone(),
            has_next_page: page_info.has_next_page,
            total_count,
        };
        Some(request.kind)
    }

    /// Record a failure. Pagination is left untouched.
    /// Returns the failed request, or `None` if stale.
    pub fn fail(&mut self, id: RequestId) -> Option<InFlight> {
        if !self.is_current(id) {
            return None;
        }
        self.in_flight.take()
    }

    /// Drop the cursor after a filter change.
    ///
    /// The cursor is only meaningful for the filter set that produced it, so
    /// load-more stays blocked until a fresh first page arrives. Returns the
    /// abandoned in-flight request, whose result will be discarded.
    pub fn reset(&mut self) -> Option<InFlight> {
        self.state.cursor = None;
        self.state.has_next_page = false;
        self.in_flight.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(end: &str, has_next: bool) -> PageInfo {
        PageInfo {
            has_next_page: has_next,
            end_cursor: Some(Cursor::new(end)),
        }
    }

    fn tracker_with_next_page() -> CursorTracker {
        let mut tracker = CursorTracker::new();
        let (req, _) = tracker.begin(FetchKind::Replace, None);
        tracker.accept(req.id, &page("c1", true), 40);
        tracker
    }

    #[test]
    fn test_accept_replaces_state_wholesale() {
        let tracker = tracker_with_next_page();
        assert_eq!(
            tracker.state(),
            &PaginationState {
                cursor: Some(Cursor::new("c1")),
                has_next_page: true,
                total_count: 40,
            }
        );
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_load_more_rejected_without_next_page() {
        let mut tracker = CursorTracker::new();
        let (req, _) = tracker.begin(FetchKind::Replace, None);
        tracker.accept(req.id, &page("c1", false), 3);

        assert!(tracker.begin_load_more().is_none());
        assert!(!tracker.is_busy());
    }

    #[test]
    fn test_load_more_at_most_one_in_flight() {
        let mut tracker = tracker_with_next_page();
        let first = tracker.begin_load_more().unwrap();
        assert_eq!(first.after, Some(Cursor::new("c1")));
        assert_eq!(first.kind, FetchKind::Append);
        assert!(tracker.begin_load_more().is_none());
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut tracker = CursorTracker::new();
        let (a, _) = tracker.begin(FetchKind::Replace, None);
        let (b, superseded) = tracker.begin(FetchKind::Replace, None);
        assert_eq!(superseded.map(|s| s.id), Some(a.id));

        assert_eq!(tracker.accept(a.id, &page("stale", true), 99), None);
        assert_eq!(tracker.accept(b.id, &page("fresh", false), 5), Some(FetchKind::Replace));
        assert_eq!(tracker.state().cursor, Some(Cursor::new("fresh")));
        assert_eq!(tracker.state().total_count, 5);
    }

    #[test]
    fn test_failure_keeps_pagination() {
        let mut tracker = tracker_with_next_page();
        let req = tracker.begin_load_more().unwrap();
        let failed = tracker.fail(req.id).unwrap();
        assert_eq!(failed.after, Some(Cursor::new("c1")));
        assert_eq!(tracker.state().cursor, Some(Cursor::new("c1")));
        assert!(tracker.can_load_more());
        assert!(tracker.fail(req.id).is_none());
    }

    #[test]
    fn test_reset_abandons_in_flight() {
        let mut tracker = tracker_with_next_page();
        let pending = tracker.begin_load_more().unwrap();
        let abandoned = tracker.reset().unwrap();
        assert_eq!(abandoned.id, pending.id);
        assert_eq!(tracker.state().cursor, None);
        assert!(!tracker.can_load_more());
        assert_eq!(tracker.accept(pending.id, &page("late", true), 80), None);
    }
}
