//! DTOs exposed by the customer API endpoints.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::customer::CustomerRecord;
use crate::domain::query::PagedResult;

/// Pagination block of the list envelope.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub total_records: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Successful `/get_customers_list` response.
#[derive(Debug, Serialize)]
pub struct CustomersListResponse {
    pub response: &'static str,
    pub status: u8,
    pub message: String,
    pub pagination: PaginationMeta,
    pub data: Vec<CustomerRecord>,
}

impl From<PagedResult> for CustomersListResponse {
    fn from(result: PagedResult) -> Self {
        Self {
            response: "success",
            status: 1,
            message: "Data retrieved successfully".to_string(),
            pagination: PaginationMeta {
                total_records: result.total_records,
                current_page: result.current_page,
                per_page: result.per_page,
                total_pages: result.total_pages,
            },
            data: result.data,
        }
    }
}

/// Error envelope shared by failed list requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub response: &'static str,
    pub status: u8,
    pub message: String,
    /// Per-parameter messages for rejected requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    pub data: Vec<Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            response: "error",
            status: 0,
            message: message.into(),
            errors: None,
            data: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: BTreeMap<String, Vec<String>>) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Body of `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// ISO-8601 timestamp of the response.
    pub time: String,
}
