//! Numbered page navigation and item-range summaries.

use serde::Serialize;

/// Page counts for the numbered pager.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageSummary {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageSummary {
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };
        let page = page.max(1);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// First item shown on this page (1-indexed, 0 when there are none).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (u64::from(self.page) - 1) * u64::from(self.per_page) + 1
        }
    }

    /// Last item shown on this page.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }

    /// Whether clicking `page` should navigate.
    pub fn can_select(&self, page: u32) -> bool {
        page != self.page && (1..=self.total_pages).contains(&page)
    }

    pub fn visible_pages(&self, max_visible: usize) -> Vec<PageSlot> {
        visible_pages(self.page, self.total_pages, max_visible)
    }
}

impl Default for PageSummary {
    fn default() -> Self {
        Self::new(1, 12, 0)
    }
}

/// One slot in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

/// Pager layout: the first and last pages are always shown, a window slides
/// around `current`, and skipped runs collapse into an ellipsis.
///
/// Empty when there is at most one page.
pub fn visible_pages(current: u32, total_pages: u32, max_visible: usize) -> Vec<PageSlot> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let total = i64::from(total_pages);
    let max = i64::try_from(max_visible).unwrap_or(i64::MAX);

    if total <= max {
        return (1..=total_pages).map(PageSlot::Page).collect();
    }

    let current = i64::from(current.clamp(1, total_pages));
    let half = max / 2;

    let mut start = (current - half + 1).max(2);
    let mut end = (current + half - 1).min(total - 1);
    if current <= half {
        end = (max - 1).min(total - 1);
    }
    if current > total - half {
        start = (total - max + 2).max(2);
    }

    let mut slots = vec![PageSlot::Page(1)];
    if start > 2 {
        slots.push(PageSlot::Ellipsis);
    }
    // start..=end lies within 2..total, so the casts are lossless.
    slots.extend((start..=end).map(|p| PageSlot::Page(p as u32)));
    if end < total - 1 {
        slots.push(PageSlot::Ellipsis);
    }
    slots.push(PageSlot::Page(total_pages));
    slots
}
