//! HTTP routes of the customer API.

use actix_web::web;

pub mod customers;
pub mod health;

/// Registers every endpoint on the given service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(customers::get_customers_list)
        .service(customers::export_customers)
        .service(health::health);
}
