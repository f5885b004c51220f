use crate::domain::query::{CustomerQuery, EXPORT_PER_PAGE, PagedResult};
use crate::repository::CustomerReader;
use crate::services::ServiceResult;
use crate::services::export;
use crate::services::query::run as run_query;

/// Loads the dataset and returns the requested page of customers.
pub async fn list_customers<R>(repo: &R, query: &CustomerQuery) -> ServiceResult<PagedResult>
where
    R: CustomerReader,
{
    let dataset = repo.load_customers().await;

    run_query(dataset.as_deref().map(Vec::as_slice), query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })
}

/// Renders every customer matching the query's filters and ordering as CSV.
///
/// The query's pagination is replaced so the whole filtered set is exported.
pub async fn export_customers<R>(repo: &R, query: CustomerQuery) -> ServiceResult<Vec<u8>>
where
    R: CustomerReader,
{
    let query = query.paginate(1, EXPORT_PER_PAGE);
    let result = list_customers(repo, &query).await?;

    export::write_customers_csv(&result.data).map_err(|err| {
        log::error!("Failed to export customers: {err}");
        err
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::customer::CustomerRecord;
    use crate::domain::types::{Numeric, SortField, SortOrder};
    use crate::services::ServiceError;

    struct StaticReader {
        dataset: Option<Arc<Vec<CustomerRecord>>>,
    }

    impl CustomerReader for StaticReader {
        async fn load_customers(&self) -> Option<Arc<Vec<CustomerRecord>>> {
            self.dataset.clone()
        }
    }

    fn reader(count: i64) -> StaticReader {
        let records = (1..=count)
            .map(|id| CustomerRecord {
                id: Some(Numeric::from(id)),
                applicant: Some(format!("Customer {id}")),
                status: Some(if id % 2 == 0 { "paid" } else { "due" }.to_string()),
                ..Default::default()
            })
            .collect();
        StaticReader {
            dataset: Some(Arc::new(records)),
        }
    }

    #[actix_web::test]
    async fn lists_requested_page() {
        let repo = reader(7);
        let query = CustomerQuery::new()
            .sort(SortField::Id, SortOrder::Asc)
            .paginate(2, 3);

        let result = list_customers(&repo, &query).await.unwrap();

        assert_eq!(result.total_records, 7);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.data.len(), 3);
        assert_eq!(result.data[0].id, Some(Numeric::from(4)));
    }

    #[actix_web::test]
    async fn missing_dataset_is_reported() {
        let repo = StaticReader { dataset: None };

        let result = list_customers(&repo, &CustomerQuery::new()).await;

        assert!(matches!(result, Err(ServiceError::DataUnavailable)));
    }

    #[actix_web::test]
    async fn export_ignores_pagination_and_keeps_filters() {
        let repo = reader(150);
        let query = CustomerQuery::new()
            .status("due")
            .sort(SortField::Id, SortOrder::Desc)
            .paginate(3, 10);

        let bytes = export_customers(&repo, query).await.unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let ids: Vec<String> = reader
            .records()
            .map(|row| row.unwrap()[0].to_string())
            .collect();
        assert_eq!(ids.len(), 75);
        assert_eq!(ids.first().map(String::as_str), Some("149"));
        assert_eq!(ids.last().map(String::as_str), Some("1"));
    }

    #[actix_web::test]
    async fn export_fails_without_dataset() {
        let repo = StaticReader { dataset: None };

        let result = export_customers(&repo, CustomerQuery::new()).await;

        assert!(matches!(result, Err(ServiceError::DataUnavailable)));
    }
}
