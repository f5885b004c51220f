#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::RemoteRepository;

pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Builds the CORS policy for the configured origins.
#[cfg(feature = "server")]
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(0);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = RemoteRepository::new(
        server_config.source_url.clone(),
        server_config.cache_ttl,
        server_config.fetch_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build HTTP client: {e}")))?;

    log::info!(
        "Serving customers from {} (cache ttl {}s)",
        repo.source_url(),
        repo.cache_ttl()
    );

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&server_config.cors_allowed_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
