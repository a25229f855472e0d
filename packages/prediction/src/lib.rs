#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-parish prediction fan-out and result aggregation.
//!
//! A query for a canton becomes one request per parish against the external
//! inference service:
//!
//! 1. [`orchestrator::PredictionOrchestrator`] sends the requests through a
//!    [`client::PredictionClient`] with bounded concurrency and waits for
//!    all of them.
//! 2. Failed parishes are logged and left out; they never fail the query.
//! 3. [`aggregate::aggregate`] turns the surviving results into the
//!    response payload.
//!
//! The service endpoint, timeout and concurrency limit come from
//! [`service_config`].

pub mod aggregate;
pub mod client;
pub mod orchestrator;
pub mod service_config;

use thiserror::Error;

/// Errors from a single prediction call or from loading the service
/// configuration.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The request could not be sent, timed out, or the body could not be
    /// read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something other than `200 OK`.
    #[error("Prediction service returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body was not a valid prediction response.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The service reported `success: false`.
    #[error("Prediction service reported an unsuccessful prediction")]
    Unsuccessful,

    /// The embedded service configuration is malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration override had an invalid value.
    #[error("Invalid value for {variable}: {value}")]
    InvalidOverride {
        /// Environment variable name.
        variable: String,
        /// The value that failed to parse.
        value: String,
    },
}
