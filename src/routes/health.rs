use actix_web::{HttpResponse, Responder, get};
use chrono::{SecondsFormat, Utc};

use crate::dto::api::HealthResponse;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
    })
}
