//! Error conversion glue between third-party crates and the service layer.
//!
//! The service error type is also compiled for `data` feature consumers, so
//! conversions from server-only crates live here.

use crate::services::ServiceError;

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::Export(err.to_string())
    }
}
