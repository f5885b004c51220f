//! Loosely-typed value objects used by customer records.
//!
//! The remote source is not schema-checked, so numbers may arrive as strings,
//! dates in several layouts, and text fields as numbers. These wrappers hold the
//! raw value and expose the coercion rules used by filtering, sorting and export.
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided sort field is not a known record field.
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    /// Provided sort direction is neither `asc` nor `desc`.
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),
}

/// Numeric field as sent by the remote source (JSON number or numeric string).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Numeric(Value);

impl Numeric {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Returns the value as `f64` when it is a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => parse_numeric(text),
            _ => None,
        }
    }

    /// Returns the value only when the source sent a JSON integer.
    pub fn as_integer(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// Key used for ordering; anything non-numeric orders as zero.
    pub fn sort_key(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }
}

impl Display for Numeric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Value::String(text) => f.write_str(text),
            Value::Null => Ok(()),
            other => write!(f, "{other}"),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a date-like string into a Unix timestamp (seconds, UTC for naive values).
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.timestamp());
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(datetime.and_utc().timestamp());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc().timestamp())
}

/// Accepts strings, numbers and booleans as text; anything else reads as absent.
pub(crate) fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }))
}

/// How a record field is compared when sorting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKind {
    Date,
    Numeric,
    Text,
}

/// Record field a customer list can be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    OriginateDate,
    LastPayDate,
    Id,
    ShopId,
    Installment,
    TotalAmount,
    Paid,
    Due,
    Applicant,
    Telephone,
    ShopName,
    EmiPackage,
    MonthWeek,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 14] = [
        SortField::OriginateDate,
        SortField::LastPayDate,
        SortField::Id,
        SortField::ShopId,
        SortField::Installment,
        SortField::TotalAmount,
        SortField::Paid,
        SortField::Due,
        SortField::Applicant,
        SortField::Telephone,
        SortField::ShopName,
        SortField::EmiPackage,
        SortField::MonthWeek,
        SortField::Status,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortField::OriginateDate => "originate_date",
            SortField::LastPayDate => "last_pay_date",
            SortField::Id => "id",
            SortField::ShopId => "shop_id",
            SortField::Installment => "installment",
            SortField::TotalAmount => "total_amount",
            SortField::Paid => "paid",
            SortField::Due => "due",
            SortField::Applicant => "applicant",
            SortField::Telephone => "telephone",
            SortField::ShopName => "shop_name",
            SortField::EmiPackage => "emi_package",
            SortField::MonthWeek => "month_week",
            SortField::Status => "status",
        }
    }

    pub const fn kind(self) -> SortKind {
        match self {
            SortField::OriginateDate | SortField::LastPayDate => SortKind::Date,
            SortField::Id
            | SortField::ShopId
            | SortField::Installment
            | SortField::TotalAmount
            | SortField::Paid
            | SortField::Due => SortKind::Numeric,
            _ => SortKind::Text,
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| TypeConstraintError::UnknownSortField(s.to_string()))
    }
}

/// Direction of the ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(TypeConstraintError::InvalidSortOrder(other.to_string())),
        }
    }
}
