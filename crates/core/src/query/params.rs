//! Request parameters for the listing and search paths, with validation.

use crate::Error;
use serde::{Deserialize, Serialize};

/// Largest `limit` accepted by the raw listing path.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Largest `page_size` accepted by the search path.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Offset/limit window over the unfiltered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Number of items to skip (>= 0, default 0).
    #[serde(default)]
    pub skip: i64,

    /// Number of items to return (1-500, default 100).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Text query plus 1-based page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query; empty matches everything.
    #[serde(default)]
    pub q: String,

    /// Page number, 1-based (default 1).
    #[serde(default = "default_page")]
    pub page: i64,

    /// Results per page (1-100, default 20).
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_limit() -> i64 {
    100
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for ListParams {
    fn default() -> Self {
        Self { skip: 0, limit: default_limit() }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { q: String::new(), page: default_page(), page_size: default_page_size() }
    }
}

impl ListParams {
    /// Validate the window bounds.
    ///
    /// Returns `Error::InvalidInput` when `skip` is negative or `limit` is outside 1-500.
    pub fn validate(&self) -> Result<(), Error> {
        if self.skip < 0 {
            return Err(Error::InvalidInput("skip must be greater than or equal to 0".into()));
        }
        if !(1..=MAX_LIST_LIMIT).contains(&self.limit) {
            return Err(Error::InvalidInput(format!("limit must be between 1 and {MAX_LIST_LIMIT}")));
        }
        Ok(())
    }

    /// Half-open index range `[skip, skip + limit)`, saturating on overflow.
    pub(crate) fn range(&self) -> (usize, usize) {
        let start = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let len = usize::try_from(self.limit).unwrap_or(0);
        (start, start.saturating_add(len))
    }
}

impl SearchParams {
    /// Validate the page window.
    ///
    /// Returns `Error::InvalidInput` when `page` is below 1 or `page_size` is outside 1-100.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page < 1 {
            return Err(Error::InvalidInput("page must be greater than or equal to 1".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::InvalidInput(format!("page_size must be between 1 and {MAX_PAGE_SIZE}")));
        }
        Ok(())
    }

    /// Half-open index range `[(page-1)*page_size, page*page_size)`, saturating on overflow.
    pub(crate) fn range(&self) -> (usize, usize) {
        let page_size = usize::try_from(self.page_size).unwrap_or(0);
        let page_index = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        let start = page_index.saturating_mul(page_size);
        (start, start.saturating_add(page_size))
    }
}
