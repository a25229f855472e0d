//! Server configuration from environment variables.

use std::path::PathBuf;

use hazard_map_geography::load::{DEFAULT_COORDINATES_PATH, DEFAULT_DIVISIONS_PATH};
use hazard_map_prediction::service_config::ServiceConfig;

use crate::ServerError;

/// Everything the server needs before it can bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind (`BIND_ADDR`, default `0.0.0.0`).
    pub bind_addr: String,
    /// Port to bind (`PORT`, default `8080`).
    pub port: u16,
    /// Division tree JSON (`DIVISIONS_PATH`).
    pub divisions_path: PathBuf,
    /// Parish coordinates JSON (`COORDINATES_PATH`).
    pub coordinates_path: PathBuf,
    /// Prediction service settings.
    pub service: ServiceConfig,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if `PORT` is not a valid port or the
    /// prediction service configuration is invalid.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ServerError::InvalidPort { value })?,
            None => 8080,
        };

        let mut service = ServiceConfig::embedded()?;
        service.apply_overrides(&lookup)?;

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            divisions_path: get("DIVISIONS_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_DIVISIONS_PATH), PathBuf::from),
            coordinates_path: get("COORDINATES_PATH")
                .map_or_else(|| PathBuf::from(DEFAULT_COORDINATES_PATH), PathBuf::from),
            service,
        })
    }
}
