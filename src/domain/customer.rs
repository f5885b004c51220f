use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::{Numeric, SortField, SortKind, loose_text, parse_timestamp};

/// Customer entry as published by the remote source.
///
/// Every field is optional: the source is only shape-checked, so a missing or
/// mistyped value must never stop the list from being served. Fields the
/// service does not know about are kept in `extra` and echoed back.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Numeric>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub originate_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub applicant: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<Numeric>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub emi_package: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub month_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Numeric>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub last_pay_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining attributes of the source object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Comparable projection of a single record field.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    /// Unix timestamp; `None` orders before every parsable date.
    Date(Option<i64>),
    Number(f64),
    /// Lower-cased text.
    Text(String),
}

impl SortKey {
    /// Ascending comparison of two keys taken from the same field.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn contains_lowercase(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(needle))
}

impl CustomerRecord {
    /// True when the record's shop id is the given JSON integer.
    pub fn in_shop(&self, shop_id: i64) -> bool {
        self.shop_id
            .as_ref()
            .and_then(Numeric::as_integer)
            .is_some_and(|value| value == shop_id)
    }

    /// Case-insensitive status equality. Records without a status never match.
    pub fn has_status(&self, status: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|value| value.to_lowercase() == status.to_lowercase())
    }

    /// Case-insensitive substring match on applicant or telephone.
    ///
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        contains_lowercase(self.applicant.as_deref(), needle)
            || contains_lowercase(self.telephone.as_deref(), needle)
    }

    fn text(&self, field: SortField) -> Option<&str> {
        match field {
            SortField::OriginateDate => self.originate_date.as_deref(),
            SortField::LastPayDate => self.last_pay_date.as_deref(),
            SortField::Applicant => self.applicant.as_deref(),
            SortField::Telephone => self.telephone.as_deref(),
            SortField::ShopName => self.shop_name.as_deref(),
            SortField::EmiPackage => self.emi_package.as_deref(),
            SortField::MonthWeek => self.month_week.as_deref(),
            SortField::Status => self.status.as_deref(),
            _ => None,
        }
    }

    fn number(&self, field: SortField) -> Option<&Numeric> {
        match field {
            SortField::Id => self.id.as_ref(),
            SortField::ShopId => self.shop_id.as_ref(),
            SortField::Installment => self.installment.as_ref(),
            SortField::TotalAmount => self.total_amount.as_ref(),
            SortField::Paid => self.paid.as_ref(),
            SortField::Due => self.due.as_ref(),
            _ => None,
        }
    }

    /// Projects the record onto the comparison key of `field`.
    pub fn sort_key(&self, field: SortField) -> SortKey {
        match field.kind() {
            SortKind::Date => SortKey::Date(self.text(field).and_then(parse_timestamp)),
            SortKind::Numeric => {
                SortKey::Number(self.number(field).map(Numeric::sort_key).unwrap_or(0.0))
            }
            SortKind::Text => SortKey::Text(self.text(field).unwrap_or_default().to_lowercase()),
        }
    }
}
