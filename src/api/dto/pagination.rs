//! Pagination query parameters.

use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

/// Default number of items per page.
const DEFAULT_PAGE_SIZE: u32 = 25;

/// Largest allowed page size.
const MAX_PAGE_SIZE: u32 = 500;

/// Pagination query parameters for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Resolved page number (1-indexed).
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Resolved page size.
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates parameters and converts to database offset/limit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the page is 0 or the page size
    /// is outside `1..=500`.
    pub fn offset_limit(&self) -> Result<(i64, i64), AppError> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                "Page size must be between 1 and 500",
                json!({ "page_size": page_size }),
            ));
        }

        // Widened before multiplying; u32 arithmetic overflows for large
        // page numbers.
        let offset = (i64::from(page) - 1) * i64::from(page_size);
        let limit = i64::from(page_size);

        Ok((offset, limit))
    }
}
