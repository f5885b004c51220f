//! In-memory filter, sort and pagination over a customer dataset.

use crate::domain::customer::{CustomerRecord, SortKey};
use crate::domain::query::{CustomerQuery, PagedResult};
use crate::services::{ServiceError, ServiceResult};

fn matches(record: &CustomerRecord, query: &CustomerQuery) -> bool {
    if let Some(shop_id) = query.shop_id {
        if !record.in_shop(shop_id) {
            return false;
        }
    }

    if let Some(status) = &query.status {
        if !record.has_status(status) {
            return false;
        }
    }

    match &query.search {
        Some(term) => record.matches_search(term),
        None => true,
    }
}

/// Records of `dataset` that pass the shop, status and search filters, in
/// their original order.
pub fn filter<'a>(dataset: &'a [CustomerRecord], query: &CustomerQuery) -> Vec<&'a CustomerRecord> {
    dataset
        .iter()
        .filter(|record| matches(record, query))
        .collect()
}

/// Stable sort of `records` by the query's field and direction.
pub fn sort<'a>(
    records: Vec<&'a CustomerRecord>,
    query: &CustomerQuery,
) -> Vec<&'a CustomerRecord> {
    let mut keyed: Vec<(SortKey, &CustomerRecord)> = records
        .into_iter()
        .map(|record| (record.sort_key(query.sort_by), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| query.sort_order.apply(a.compare(b)));

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Runs the query against `dataset`.
///
/// Fails only when no dataset is available; every other input yields a
/// (possibly empty) page.
pub fn run(
    dataset: Option<&[CustomerRecord]>,
    query: &CustomerQuery,
) -> ServiceResult<PagedResult> {
    let dataset = dataset.ok_or(ServiceError::DataUnavailable)?;

    let ordered = sort(filter(dataset, query), query);

    let per_page = query.pagination.per_page.max(1);
    let total_records = ordered.len();
    let total_pages = total_records.div_ceil(per_page);

    let data = ordered
        .into_iter()
        .skip(query.pagination.offset())
        .take(per_page)
        .cloned()
        .collect();

    Ok(PagedResult {
        total_records,
        current_page: query.pagination.page,
        per_page,
        total_pages,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Numeric, SortField, SortOrder};

    fn customer(id: i64, status: &str, applicant: &str) -> CustomerRecord {
        CustomerRecord {
            id: Some(Numeric::from(id)),
            status: Some(status.to_string()),
            applicant: Some(applicant.to_string()),
            ..Default::default()
        }
    }

    fn ids(result: &PagedResult) -> Vec<f64> {
        result
            .data
            .iter()
            .map(|record| record.id.as_ref().map(Numeric::sort_key).unwrap_or(-1.0))
            .collect()
    }

    fn numbered(count: i64) -> Vec<CustomerRecord> {
        (1..=count).map(|id| customer(id, "due", "x")).collect()
    }

    #[test]
    fn missing_dataset_is_data_unavailable() {
        let result = run(None, &CustomerQuery::new());

        assert!(matches!(result, Err(ServiceError::DataUnavailable)));
    }

    #[test]
    fn filters_by_status() {
        let dataset = vec![customer(1, "due", "Alice"), customer(2, "paid", "Bob")];
        let query = CustomerQuery::new().status("due");

        let result = run(Some(&dataset), &query).unwrap();

        assert_eq!(result.total_records, 1);
        assert_eq!(result.data, vec![dataset[0].clone()]);
    }

    #[test]
    fn status_round_trip_matches_case_insensitively() {
        let dataset = vec![
            customer(1, "Due", "a"),
            customer(2, "DUE", "b"),
            customer(3, "paid", "c"),
        ];
        let query = CustomerQuery::new().status("due");

        let result = run(Some(&dataset), &query).unwrap();

        assert_eq!(result.total_records, 2);
        assert!(result.data.iter().all(|record| record.has_status("due")));
    }

    #[test]
    fn last_partial_page_holds_the_remainder() {
        let dataset = numbered(5);
        let query = CustomerQuery::new()
            .sort(SortField::Id, SortOrder::Asc)
            .paginate(3, 2);

        let result = run(Some(&dataset), &query).unwrap();

        assert_eq!(result.total_pages, 3);
        assert_eq!(result.current_page, 3);
        assert_eq!(ids(&result), vec![5.0]);

        let four = numbered(4);
        let result = run(Some(&four), &query).unwrap();
        assert_eq!(result.total_pages, 2);
        assert!(result.data.is_empty());
    }

    #[test]
    fn page_bounds_hold_for_many_sizes() {
        let dataset = numbered(23);
        for per_page in 1..=30 {
            for page in 1..=30 {
                let query = CustomerQuery::new().paginate(page, per_page);
                let result = run(Some(&dataset), &query).unwrap();

                assert_eq!(result.total_records, 23);
                assert_eq!(result.total_pages, 23usize.div_ceil(per_page));
                assert!(result.data.len() <= per_page);
                if page > result.total_pages {
                    assert!(result.data.is_empty());
                }
            }
        }
    }

    #[test]
    fn non_numeric_amounts_sort_as_zero() {
        let dataset = vec![
            CustomerRecord {
                total_amount: Some(Numeric::from("10")),
                ..Default::default()
            },
            CustomerRecord {
                total_amount: Some(Numeric::from("abc")),
                ..Default::default()
            },
            CustomerRecord {
                total_amount: Some(Numeric::from(5)),
                ..Default::default()
            },
        ];
        let query = CustomerQuery::new().sort(SortField::TotalAmount, SortOrder::Asc);

        let result = run(Some(&dataset), &query).unwrap();

        let amounts: Vec<_> = result
            .data
            .iter()
            .map(|record| record.total_amount.clone().unwrap())
            .collect();
        assert_eq!(
            amounts,
            vec![Numeric::from("abc"), Numeric::from(5), Numeric::from("10")]
        );
    }

    #[test]
    fn equal_keys_keep_their_relative_order() {
        let dataset = vec![
            customer(1, "due", "bob"),
            customer(2, "due", "Alice"),
            customer(3, "due", "BOB"),
            customer(4, "due", "alice"),
            customer(5, "due", "Bob"),
        ];

        let asc = CustomerQuery::new().sort(SortField::Applicant, SortOrder::Asc);
        let result = run(Some(&dataset), &asc).unwrap();
        assert_eq!(ids(&result), vec![2.0, 4.0, 1.0, 3.0, 5.0]);

        let desc = CustomerQuery::new().sort(SortField::Applicant, SortOrder::Desc);
        let result = run(Some(&dataset), &desc).unwrap();
        assert_eq!(ids(&result), vec![1.0, 3.0, 5.0, 2.0, 4.0]);
    }

    #[test]
    fn unparsable_dates_sort_earliest() {
        let dated = |id: i64, date: Option<&str>| CustomerRecord {
            id: Some(Numeric::from(id)),
            originate_date: date.map(str::to_string),
            ..Default::default()
        };
        let dataset = vec![
            dated(1, Some("2024-03-01")),
            dated(2, Some("yesterday-ish")),
            dated(3, None),
            dated(4, Some("1969-12-31")),
        ];

        let asc = CustomerQuery::new().sort(SortField::OriginateDate, SortOrder::Asc);
        let result = run(Some(&dataset), &asc).unwrap();
        assert_eq!(ids(&result), vec![2.0, 3.0, 4.0, 1.0]);

        let desc = CustomerQuery::new();
        let result = run(Some(&dataset), &desc).unwrap();
        assert_eq!(ids(&result), vec![1.0, 4.0, 2.0, 3.0]);
    }

    #[test]
    fn search_matches_applicant_or_telephone() {
        let dataset = vec![
            CustomerRecord {
                id: Some(Numeric::from(1)),
                applicant: Some("Karim Uddin".to_string()),
                telephone: Some("01711000000".to_string()),
                ..Default::default()
            },
            CustomerRecord {
                id: Some(Numeric::from(2)),
                applicant: Some("Rahim".to_string()),
                telephone: Some("01822000000".to_string()),
                ..Default::default()
            },
            CustomerRecord {
                id: Some(Numeric::from(3)),
                ..Default::default()
            },
        ];

        let by_name = CustomerQuery::new().search("KARIM");
        assert_eq!(ids(&run(Some(&dataset), &by_name).unwrap()), vec![1.0]);

        let by_phone = CustomerQuery::new().search("0182");
        assert_eq!(ids(&run(Some(&dataset), &by_phone).unwrap()), vec![2.0]);
    }

    #[test]
    fn shop_filter_combines_with_other_filters() {
        let mut first = customer(1, "due", "Alice");
        first.shop_id = Some(Numeric::from(7));
        let mut second = customer(2, "paid", "Alice");
        second.shop_id = Some(Numeric::from(7));
        let mut third = customer(3, "due", "Alice");
        third.shop_id = Some(Numeric::from(8));
        let dataset = vec![first, second, third];

        let query = CustomerQuery::new().shop_id(7).status("due").search("ali");
        let result = run(Some(&dataset), &query).unwrap();

        assert_eq!(ids(&result), vec![1.0]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let dataset = vec![
            customer(1, "due", "Alice"),
            customer(2, "paid", "Alicia"),
            customer(3, "due", "Bob"),
        ];
        let query = CustomerQuery::new().status("due").search("ali");

        let once: Vec<CustomerRecord> = filter(&dataset, &query).into_iter().cloned().collect();
        let twice: Vec<CustomerRecord> = filter(&once, &query).into_iter().cloned().collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_dataset_has_no_pages() {
        let result = run(Some(&[]), &CustomerQuery::new()).unwrap();

        assert_eq!(result.total_records, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.data.is_empty());
    }
}
