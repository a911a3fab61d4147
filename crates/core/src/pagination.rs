//! Page-based pagination for film listings.
//!
//! The public site paginates with 1-based page numbers (`?page=2&per_page=12`)
//! rather than raw offsets, so this module converts between the two and builds
//! the [`Page`] envelope returned to the UI.

use serde::Serialize;

/// Default number of films per listing page.
pub const DEFAULT_PER_PAGE: i64 = 12;

/// Maximum number of films per listing page.
pub const MAX_PER_PAGE: i64 = 48;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    per_page: i64,
}

impl Pagination {
    /// Build a pagination request from optional query parameters.
    ///
    /// `page` is clamped to `>= 1` and `per_page` to `1..=MAX_PER_PAGE`.
    pub fn from_params(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: clamp_limit(per_page, DEFAULT_PER_PAGE, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_params(None, None)
    }
}

/// One page of results plus the totals the UI needs for its pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination, total: i64) -> Self {
        Self {
            items,
            page: pagination.page(),
            per_page: pagination.per_page(),
            total,
            total_pages: total_pages(total, pagination.per_page()),
        }
    }

    /// Whether a page after this one exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page before this one exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Slice an in-memory list into the requested page.
///
/// A page past the end yields an empty item list with the real totals.
pub fn paginate_slice<T: Clone>(all: &[T], pagination: &Pagination) -> Page<T> {
    let total = all.len() as i64;
    let start = pagination.offset().min(total);
    let end = start.saturating_add(pagination.limit()).min(total);
    let (start, end) = (start as usize, end as usize);
    Page::new(all[start..end].to_vec(), pagination, total)
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}
