//! CSV rendering of customer records.

use crate::domain::customer::CustomerRecord;
use crate::domain::types::Numeric;
use crate::services::{ServiceError, ServiceResult};

/// Column titles of the customer export, in output order.
pub const CSV_HEADER: [&str; 13] = [
    "ID",
    "Originate Date",
    "Applicant",
    "Telephone",
    "Shop Name",
    "EMI Package",
    "Months/Weeks",
    "Installment",
    "Total Amount",
    "Paid",
    "Due",
    "Last Pay Date",
    "Status",
];

/// Longest error message written into an error export.
pub const ERROR_MESSAGE_LIMIT: usize = 200;

/// Cuts `message` to at most [`ERROR_MESSAGE_LIMIT`] characters.
pub fn truncate_message(message: &str) -> String {
    message.chars().take(ERROR_MESSAGE_LIMIT).collect()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn amount(value: &Option<Numeric>) -> String {
    value
        .as_ref()
        .map(|amount| amount.sort_key().to_string())
        .unwrap_or_default()
}

/// Cells of one export row.
pub fn customer_row(record: &CustomerRecord) -> [String; 13] {
    [
        record.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        text(&record.originate_date),
        text(&record.applicant),
        text(&record.telephone),
        text(&record.shop_name),
        text(&record.emi_package),
        text(&record.month_week),
        amount(&record.installment),
        amount(&record.total_amount),
        amount(&record.paid),
        amount(&record.due),
        text(&record.last_pay_date),
        text(&record.status),
    ]
}

fn into_bytes(writer: csv::Writer<Vec<u8>>) -> ServiceResult<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|err| ServiceError::Export(err.into_error().to_string()))
}

/// Writes the header and one row per record.
pub fn write_customers_csv(records: &[CustomerRecord]) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(customer_row(record))?;
    }
    into_bytes(writer)
}

/// Writes a single-column `error` document carrying the truncated message.
pub fn write_error_csv(message: &str) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["error"])?;
    writer.write_record([truncate_message(message)])?;
    into_bytes(writer)
}
