//! Cursor pagination and numbered page navigation.

mod cursor;
mod pages;

pub use cursor::{Cursor, CursorTracker, FetchKind, InFlight, PageInfo, PaginationState, RequestId};
pub use pages::{visible_pages, PageSlot, PageSummary};
