//! HTTP access to the remote customer dataset.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::domain::customer::CustomerRecord;
use crate::repository::CustomerSource;
use crate::repository::errors::{FetchError, FetchResult};

/// Timeout applied to the outbound request when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Fetches the customer list with a single GET request.
#[derive(Debug, Clone)]
pub struct HttpCustomerSource {
    client: Client,
}

impl HttpCustomerSource {
    /// Builds a source whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn try_fetch(&self, url: &str) -> FetchResult<Vec<CustomerRecord>> {
        if url.trim().is_empty() {
            return Err(FetchError::MissingUrl);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        let json: Value = serde_json::from_slice(&body)?;

        extract_records(json)
    }
}

impl CustomerSource for HttpCustomerSource {
    async fn fetch(&self, url: &str) -> Option<Vec<CustomerRecord>> {
        match self.try_fetch(url).await {
            Ok(records) => {
                log::debug!("Fetched {} customer records from {url}", records.len());
                Some(records)
            }
            Err(err) => {
                log::warn!("Failed to load customers from {url}: {err}");
                None
            }
        }
    }
}

/// Normalizes the accepted payload shapes into a flat record list.
///
/// `{"data": [...]}` wins over a bare list; a bare list is accepted only when
/// its first element is an object. Elements that are not objects are skipped.
pub fn extract_records(json: Value) -> FetchResult<Vec<CustomerRecord>> {
    let items = match json {
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(FetchError::UnrecognizedShape),
        },
        Value::Array(items) if items.first().is_some_and(Value::is_object) => items,
        _ => return Err(FetchError::UnrecognizedShape),
    };

    let records = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                log::warn!("Skipping customer entry {index}: not an object");
                return None;
            }
            match serde_json::from_value::<CustomerRecord>(item) {
                Ok(record) => Some(record),
                Err(err) => {
                    log::warn!("Skipping customer entry {index}: {err}");
                    None
                }
            }
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::types::Numeric;

    #[test]
    fn wrapped_data_list_is_used() {
        let records = extract_records(json!({
            "meta": {"count": 2},
            "data": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id, Some(Numeric::from(2)));
    }

    #[test]
    fn wrapped_empty_list_is_an_empty_dataset() {
        let records = extract_records(json!({"data": []})).unwrap();

        assert!(records.is_empty());
    }

    #[test]
    fn bare_list_of_objects_is_used() {
        let records = extract_records(json!([{"id": 1, "status": "due"}])).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status.as_deref(), Some("due"));
    }

    #[test]
    fn other_shapes_are_rejected() {
        for body in [
            json!([]),
            json!([1, 2, 3]),
            json!({"data": {"id": 1}}),
            json!({"customers": []}),
            json!("text"),
            json!(null),
        ] {
            assert!(matches!(
                extract_records(body),
                Err(FetchError::UnrecognizedShape)
            ));
        }
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let records = extract_records(json!([{"id": 1}, 5, null, {"id": 2}])).unwrap();

        assert_eq!(records.len(), 2);
    }

    #[actix_web::test]
    async fn blank_url_yields_nothing() {
        let source = HttpCustomerSource::new(DEFAULT_FETCH_TIMEOUT).unwrap();

        assert!(source.fetch("   ").await.is_none());
    }

    #[actix_web::test]
    async fn unreachable_source_yields_nothing() {
        let source = HttpCustomerSource::new(Duration::from_secs(2)).unwrap();

        assert!(source.fetch("http://127.0.0.1:9/customers.json").await.is_none());
    }
}
