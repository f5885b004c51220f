//! Form definitions backing the customer routes.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

pub mod customers;

#[derive(Debug, Error)]
/// Errors that can occur when processing request parameters.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed parameters: {0}")]
    Malformed(String),

    #[error("The selected sort by is invalid.")]
    InvalidSortField,

    #[error("The selected sort order is invalid.")]
    InvalidSortOrder,
}

impl FormError {
    /// Messages grouped by the parameter they refer to.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut fields = BTreeMap::new();
        match self {
            FormError::Validation(errors) => {
                for (field, errors) in errors.field_errors() {
                    let messages = errors
                        .iter()
                        .map(|error| match &error.message {
                            Some(message) => message.to_string(),
                            None => format!("The {field} field is invalid."),
                        })
                        .collect();
                    fields.insert(field.to_string(), messages);
                }
            }
            FormError::Malformed(message) => {
                fields.insert("request".to_string(), vec![message.clone()]);
            }
            FormError::InvalidSortField => {
                fields.insert("sort_by".to_string(), vec![self.to_string()]);
            }
            FormError::InvalidSortOrder => {
                fields.insert("sort_order".to_string(), vec![self.to_string()]);
            }
        }
        fields
    }
}

/// Reads an optional integer parameter sent as a number or a numeric string.
///
/// Blank strings and `null` count as absent.
pub(crate) fn loose_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {number}"))),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("expected an integer, got \"{text}\"")))
        }
        Some(other) => Err(D::Error::custom(format!("expected an integer, got {other}"))),
    }
}
