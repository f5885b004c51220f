//! Business logic between the HTTP routes and the remote customer source.

use thiserror::Error;

#[cfg(feature = "server")]
pub mod customers;
#[cfg(feature = "server")]
pub mod export;
pub mod query;

/// Errors surfaced by the customer services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Neither the cache nor the remote source produced a dataset.
    #[error("Remote customer source unavailable or invalid.")]
    DataUnavailable,

    /// Writing the CSV document failed.
    #[error("CSV export failed: {0}")]
    Export(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
