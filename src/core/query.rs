//! Page window and pagination utilities

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound accepted for the page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Number of pages needed for `total` rows; zero when there are no rows
pub fn page_count(total: usize, page_size: usize) -> usize {
    // Ensure page_size is at least 1 to avoid division by zero
    let page_size = page_size.max(1);
    if total == 0 { 0 } else { total.div_ceil(page_size) }
}

/// Bring a page index into `1..=max(page_count, 1)`
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of rows per page
    pub page_size: usize,

    /// Total number of rows (after filters)
    pub total: usize,

    /// Total number of pages, 0 when `total` is 0
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    ///
    /// The page index is taken as given (only lifted to 1); a page past the
    /// end simply has no rows.
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = page_count(total, page_size);
        let start = (page - 1).saturating_mul(page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start.saturating_add(page_size) < total,
            has_prev: page > 1,
        }
    }

    /// No rows matched; display as "no results" rather than "page 1 of 0"
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Page buttons to render
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// The pager is hidden when everything fits on one page
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Half-open row range of the current page, clamped to `total`
    pub fn row_range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.total);
        let end = self.page.saturating_mul(self.page_size).min(self.total);
        start..end
    }
}

/// One page of a sequence together with its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    /// Rows visible on this page
    pub items: &'a [T],

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Cut the visible window of `sequence` for a 1-based `page`
pub fn paginate<T>(sequence: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let pagination = PaginationMeta::new(page, page_size, sequence.len());
    Page {
        items: &sequence[pagination.row_range()],
        pagination,
    }
}

/// Pager input from the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "nav", content = "page", rename_all = "snake_case")]
pub enum PageNav {
    Previous,
    Next,
    Goto(usize),
}

impl PageNav {
    /// Page index after this navigation, always within `1..=max(page_count, 1)`
    pub fn resolve(self, current: usize, page_count: usize) -> usize {
        let target = match self {
            PageNav::Previous => current.saturating_sub(1),
            PageNav::Next => current.saturating_add(1),
            PageNav::Goto(page) => page,
        };
        clamp_page(target, page_count)
    }
}
