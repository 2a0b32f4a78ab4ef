//! Pagination of a filtered and sorted result set

use serde::Serialize;

/// Default number of rows per page on the registration lists
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Number of pages shown for `total_items`, never less than one
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1)).max(1)
}

/// Bring a page number back into `1..=total_pages`
///
/// The paginator never does this on its own; callers that want out-of-range
/// pages corrected after a filter shrinks the results call it explicitly.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of results with its pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    /// The rows of the requested page
    pub items: Vec<T>,

    /// Requested page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages (at least 1)
    pub total_pages: usize,

    /// Number of rows per page
    pub items_per_page: usize,

    /// Total number of rows (after search and filter)
    pub total_items: usize,

    /// Whether pagination controls should be shown at all
    pub has_pagination: bool,
}

impl<T> PageResult<T> {
    /// Whether there is a next page
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether there is a previous page
    pub fn has_prev(&self) -> bool {
        self.current_page > 1 && self.current_page <= self.total_pages
    }
}

/// Slice `items` into the page `current_page`
///
/// An out-of-range page (0 or past the end) yields an empty `items`, it is
/// not corrected. An `items_per_page` of 0 is treated as 1.
pub fn paginate<T: Clone>(items: &[T], current_page: usize, items_per_page: usize) -> PageResult<T> {
    let items_per_page = items_per_page.max(1);
    let total_items = items.len();

    let page_items = current_page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(items_per_page))
        .filter(|start| *start < total_items)
        .map(|start| {
            let end = start.saturating_add(items_per_page).min(total_items);
            items[start..end].to_vec()
        })
        .unwrap_or_default();

    PageResult {
        items: page_items,
        current_page,
        total_pages: total_pages(total_items, items_per_page),
        items_per_page,
        total_items,
        has_pagination: total_items > items_per_page,
    }
}

/// Current page of a list
///
/// Its only transition is an accepted page request; out-of-range requests are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
}

impl Paginator {
    pub fn new() -> Self {
        Self { current_page: 1 }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Move to `page` if `1 <= page <= total_pages`; returns whether it moved
    pub fn handle_page_change(&mut self, page: i64, total_pages: usize) -> bool {
        match usize::try_from(page) {
            Ok(page) if page >= 1 && page <= total_pages => {
                tracing::debug!(from = self.current_page, to = page, "page change");
                self.current_page = page;
                true
            }
            _ => {
                tracing::debug!(page, total_pages, "page change rejected");
                false
            }
        }
    }

    /// Back to page 1
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

/// Page buttons of a table footer
///
/// Always shows `edge` pages at each end and `around` pages on each side of the
/// current one; `None` marks a gap (rendered as an ellipsis).
pub fn page_window(
    total_pages: usize,
    current_page: usize,
    edge: usize,
    around: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = clamp_page(current_page, last_page);
    let mut pages = Vec::new();

    let left_end = (1 + edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(around));
    let mid_end = (current_page + around + 1)
        .min(last_page + 1)
        .max(mid_start);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
