use serde::Deserialize;
use validator::Validate;

use crate::domain::query::{CustomerQuery, DEFAULT_PER_PAGE};
use crate::domain::types::{SortField, SortOrder};
use crate::forms::{FormError, loose_integer};

/// Fields the public endpoints allow ordering by.
pub const SORTABLE_FIELDS: [SortField; 4] = [
    SortField::OriginateDate,
    SortField::Applicant,
    SortField::TotalAmount,
    SortField::Id,
];

#[derive(Debug, Default, Deserialize, Validate)]
/// Parameters of the paginated customer list.
pub struct ListCustomersForm {
    #[serde(default, deserialize_with = "loose_integer")]
    #[validate(range(min = 1, message = "The page field must be at least 1."))]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "loose_integer")]
    #[validate(range(
        min = 1,
        max = 100,
        message = "The per page field must be between 1 and 100."
    ))]
    pub per_page: Option<i64>,
    #[serde(default, deserialize_with = "loose_integer")]
    pub shop_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Parameters of the CSV export; same filters as the list, no pagination.
pub struct ExportCustomersForm {
    #[serde(default, deserialize_with = "loose_integer")]
    pub shop_id: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn malformed(err: impl ToString) -> FormError {
    FormError::Malformed(err.to_string())
}

fn sort_field(value: Option<&str>) -> Result<SortField, FormError> {
    match value.filter(|value| !value.is_empty()) {
        None => Ok(SortField::default()),
        Some(value) => value
            .parse::<SortField>()
            .ok()
            .filter(|field| SORTABLE_FIELDS.contains(field))
            .ok_or(FormError::InvalidSortField),
    }
}

fn sort_order(value: Option<&str>) -> Result<SortOrder, FormError> {
    match value.filter(|value| !value.is_empty()) {
        None => Ok(SortOrder::default()),
        Some(value) => value
            .parse::<SortOrder>()
            .map_err(|_| FormError::InvalidSortOrder),
    }
}

fn filters(
    shop_id: Option<i64>,
    status: Option<String>,
    search: Option<String>,
    sort_by: Option<&str>,
    sort_order_value: Option<&str>,
) -> Result<CustomerQuery, FormError> {
    let mut query = CustomerQuery::new().sort(sort_field(sort_by)?, sort_order(sort_order_value)?);
    if let Some(shop_id) = shop_id {
        query = query.shop_id(shop_id);
    }
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(search) = search {
        query = query.search(search);
    }
    Ok(query)
}

impl ListCustomersForm {
    /// Reads the parameters from the request body, or from the query string
    /// when the body is empty.
    ///
    /// JSON bodies are recognised by content type; anything else is decoded as
    /// an url-encoded form.
    pub fn from_request_parts(
        content_type: &str,
        query_string: &str,
        body: &[u8],
    ) -> Result<Self, FormError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            serde_html_form::from_str(query_string).map_err(malformed)
        } else if is_json(content_type) {
            serde_json::from_slice(body).map_err(malformed)
        } else {
            serde_html_form::from_bytes(body).map_err(malformed)
        }
    }

    /// Validates the form and converts it into a query with defaults applied.
    pub fn into_query(self) -> Result<CustomerQuery, FormError> {
        self.validate()?;

        let page = self.page.map_or(Ok(1), usize::try_from).map_err(malformed)?;
        let per_page = self
            .per_page
            .map_or(Ok(DEFAULT_PER_PAGE), usize::try_from)
            .map_err(malformed)?;

        let query = filters(
            self.shop_id,
            self.status,
            self.search,
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
        )?;

        Ok(query.paginate(page, per_page))
    }
}

impl ExportCustomersForm {
    pub fn from_query_string(query_string: &str) -> Result<Self, FormError> {
        serde_html_form::from_str(query_string).map_err(malformed)
    }

    /// Validates the form and converts it into an unpaginated query.
    pub fn into_query(self) -> Result<CustomerQuery, FormError> {
        self.validate()?;

        filters(
            self.shop_id,
            self.status,
            self.search,
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
        )
    }
}
