//! Pagination utilities for service layer
//!
//! `PageRequest` normalizes caller input; `PageMeta` derives the navigation
//! fields returned alongside a page of rows.

use serde::Serialize;

/// Normalized pagination parameters (1-based page).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_PAGE_SIZE: u64 = 10;
    pub const MAX_PAGE_SIZE: u64 = 100;
    /// Largest row offset the database accepts (a signed BIGINT).
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Clamp raw values. Missing or zero values fall back to the defaults,
    /// negative values clamp to 1 and oversized pages clamp to 100. The page
    /// is capped so its offset never exceeds [`Self::MAX_OFFSET`].
    ///
    /// ```
    /// use service::pagination::PageRequest;
    /// let p = PageRequest::new(Some(-3), Some(500));
    /// assert_eq!((p.page, p.page_size), (1, 100));
    /// assert_eq!(PageRequest::new(None, None).offset(), 0);
    /// ```
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page_size = match page_size {
            None | Some(0) => Self::DEFAULT_PAGE_SIZE,
            Some(s) => s.clamp(1, Self::MAX_PAGE_SIZE as i64) as u64,
        };
        let page = match page {
            None | Some(0) => Self::DEFAULT_PAGE,
            Some(p) => (p.max(1) as u64).min(Self::MAX_OFFSET / page_size + 1),
        };
        Self { page, page_size }
    }

    /// Parse query-string values; anything that is not an integer counts as absent.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        fn parse(raw: Option<&str>) -> Option<i64> {
            raw.and_then(|s| s.trim().parse::<i64>().ok())
        }
        Self::new(parse(page), parse(page_size))
    }

    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(Self::MAX_OFFSET)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: Self::DEFAULT_PAGE, page_size: Self::DEFAULT_PAGE_SIZE }
    }
}

/// Navigation fields for a page of results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl PageMeta {
    pub fn new(total: u64, req: PageRequest) -> Self {
        let total_pages = total.div_ceil(req.page_size);
        let has_next_page = req.page < total_pages;
        let has_previous_page = req.page > 1;
        Self {
            total,
            current_page: req.page,
            total_pages,
            has_next_page,
            has_previous_page,
            next_page: has_next_page.then_some(req.page + 1),
            prev_page: has_previous_page.then_some(req.page - 1),
        }
    }
}
