use crate::domain::customer::CustomerRecord;
use crate::domain::types::{SortField, SortOrder};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: usize = 50;
/// Largest page the list endpoint serves.
pub const MAX_PER_PAGE: usize = 100;
/// Page size used by the export so the whole filtered set fits one page.
pub const EXPORT_PER_PAGE: usize = 100_000;

/// Status value that disables the status filter.
pub const ALL_STATUSES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Number of records skipped before the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Filter, ordering and page selection applied to the customer dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerQuery {
    pub shop_id: Option<i64>,
    pub status: Option<String>,
    /// Lower-cased search term.
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub pagination: Pagination,
}

impl CustomerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shop_id(mut self, shop_id: i64) -> Self {
        self.shop_id = Some(shop_id);
        self
    }

    /// Sets the status filter; blank or `all` clears it.
    pub fn status(mut self, status: impl AsRef<str>) -> Self {
        let status = status.as_ref().trim();
        self.status = if status.is_empty() || status == ALL_STATUSES {
            None
        } else {
            Some(status.to_string())
        };
        self
    }

    /// Sets the search term; whitespace-only terms clear it.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
        self
    }

    pub fn sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Page numbers and sizes below one are raised to one.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination {
            page: page.max(1),
            per_page: per_page.max(1),
        };
        self
    }
}

/// One page of the filtered, ordered dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult {
    /// Number of records left after filtering, before pagination.
    pub total_records: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub data: Vec<CustomerRecord>,
}
