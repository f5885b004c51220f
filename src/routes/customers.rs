//! Customer list and CSV export endpoints.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use chrono::Local;

use crate::dto::api::{CustomersListResponse, ErrorResponse};
use crate::forms::FormError;
use crate::forms::customers::{ExportCustomersForm, ListCustomersForm};
use crate::repository::RemoteRepository;
use crate::services::customers as customers_service;
use crate::services::export::{truncate_message, write_error_csv};

fn validation_failed(err: FormError) -> HttpResponse {
    log::warn!("Rejected customer list parameters: {err}");
    HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new(format!("Invalid parameters: {}", truncate_message(&err.to_string())))
            .with_errors(err.field_errors()),
    )
}

fn csv_download(status: StatusCode, filename: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

fn csv_error(status: StatusCode, message: &str, stamp: &str) -> HttpResponse {
    let body = write_error_csv(message).unwrap_or_else(|err| {
        log::error!("Failed to render error export: {err}");
        b"error\n".to_vec()
    });
    csv_download(status, &format!("customers_error_{stamp}.csv"), body)
}

#[post("/get_customers_list")]
/// Paginated, filtered and ordered customer list wrapped in the JSON envelope.
pub async fn get_customers_list(
    req: HttpRequest,
    body: web::Bytes,
    repo: web::Data<RemoteRepository>,
) -> impl Responder {
    let query = match ListCustomersForm::from_request_parts(
        req.content_type(),
        req.query_string(),
        &body,
    )
    .and_then(ListCustomersForm::into_query)
    {
        Ok(query) => query,
        Err(err) => return validation_failed(err),
    };

    match customers_service::list_customers(repo.get_ref(), &query).await {
        Ok(result) => HttpResponse::Ok().json(CustomersListResponse::from(result)),
        Err(err) => HttpResponse::InternalServerError().json(ErrorResponse::new(format!(
            "Failed to retrieve data: {}",
            truncate_message(&err.to_string())
        ))),
    }
}

#[get("/customers/export")]
/// Downloads every matching customer as CSV. Failures still produce a CSV body.
pub async fn export_customers(
    req: HttpRequest,
    repo: web::Data<RemoteRepository>,
) -> impl Responder {
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let query = match ExportCustomersForm::from_query_string(req.query_string())
        .and_then(ExportCustomersForm::into_query)
    {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected customer export parameters: {err}");
            return csv_error(StatusCode::UNPROCESSABLE_ENTITY, &err.to_string(), &stamp);
        }
    };

    match customers_service::export_customers(repo.get_ref(), query).await {
        Ok(body) => csv_download(StatusCode::OK, &format!("customers_{stamp}.csv"), body),
        Err(err) => csv_error(StatusCode::OK, &err.to_string(), &stamp),
    }
}
