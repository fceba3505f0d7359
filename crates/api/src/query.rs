//! Shared query parameter types for API handlers.

use serde::Deserialize;
use stockmedia_core::pagination::PageRequest;

/// Page-based pagination parameters (`?page=&limit=`).
///
/// Out-of-range values are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}
