#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API gateway for the hazard map.
//!
//! Loads the administrative index once at startup and answers canton-level
//! hazard queries by fanning out one request per parish to the external
//! inference service. The index is shared read-only behind an `Arc`.

pub mod config;
mod handlers;
pub mod query_log;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use hazard_map_geography::{AdministrativeIndex, GeoError, load::load_index};
use hazard_map_prediction::{
    PredictionError, client::HttpPredictionClient, orchestrator::PredictionOrchestrator,
};
use hazard_map_server_models::ApiError;
use thiserror::Error;

pub use config::ServerConfig;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The reference datasets could not be loaded.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The prediction client could not be configured.
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `PORT` was not a valid port number.
    #[error("Invalid value for PORT: {value}")]
    InvalidPort {
        /// Value as found in the environment.
        value: String,
    },
}

/// Shared application state.
pub struct AppState {
    /// Administrative index, built once at startup.
    pub index: Arc<AdministrativeIndex>,
    /// Per-parish fan-out against the prediction service.
    pub orchestrator: PredictionOrchestrator,
    /// Prediction endpoint, reported by the health check.
    pub ai_service_url: String,
}

/// Registers every route and the JSON body configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let body = ApiError::with_details("Invalid input data", err.to_string());
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .route("/", web::get().to(handlers::root))
    .route("/health", web::get().to(handlers::health))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/provincias", web::get().to(handlers::provincias))
            .route("/predict", web::post().to(handlers::predict)),
    );
}

/// Starts the hazard map API server.
///
/// Loads the administrative index, builds the prediction client, and serves
/// until shutdown. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if either dataset fails to load, the prediction
/// client cannot be built, or the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    log::info!(
        "Loading administrative index from {} and {}",
        config.divisions_path.display(),
        config.coordinates_path.display()
    );
    let index = Arc::new(load_index(
        &config.divisions_path,
        &config.coordinates_path,
    )?);

    let client = HttpPredictionClient::from_config(&config.service)?;
    let ai_service_url = client.url().to_string();
    log::info!(
        "Prediction service {} at {ai_service_url} (timeout={}s, max_concurrent={})",
        config.service.id,
        config.service.timeout_secs,
        config.service.max_concurrent_requests
    );

    let state = web::Data::new(AppState {
        index,
        orchestrator: PredictionOrchestrator::new(
            Arc::new(client),
            config.service.max_concurrent_requests,
        ),
        ai_service_url,
    });

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
