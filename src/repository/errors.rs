use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a remote fetch produced no dataset.
///
/// These never leave the repository layer: the fetcher logs them and reports
/// the dataset as absent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Source url is not configured")]
    MissingUrl,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unrecognized response shape: expected a `data` list or a list of objects")]
    UnrecognizedShape,
}

pub type FetchResult<T> = Result<T, FetchError>;
