#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the hazard map server.
//!
//! These types are serialized to JSON for the REST API. Field names follow
//! the contract the frontend already speaks (`provincia`, `canton`,
//! `parroquias_data`), so they stay in `snake_case`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hazard_map_prediction_models::AggregatedResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `POST /api/predict` as received.
///
/// Every field is optional at the serde level so that missing or
/// out-of-range values are reported by [`ApiPredictRequest::validate`]
/// with a descriptive message instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiPredictRequest {
    /// Province name (free text).
    pub provincia: Option<String>,
    /// Canton name (free text).
    pub canton: Option<String>,
    /// Day of month, 1-31.
    pub day: Option<i64>,
    /// Month, 1-12.
    pub month: Option<i64>,
}

/// A prediction request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPredictRequest {
    /// Province name, untouched.
    pub provincia: String,
    /// Canton name, untouched.
    pub canton: String,
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
}

/// Reasons a prediction request is rejected before any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or `null`.
    #[error("Missing required field '{0}'")]
    Missing(&'static str),

    /// A text field was empty or whitespace.
    #[error("Field '{0}' must not be blank")]
    Blank(&'static str),

    /// A numeric field was outside its range.
    #[error("Field '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Value received.
        value: i64,
        /// Inclusive lower bound.
        min: u8,
        /// Inclusive upper bound.
        max: u8,
    },
}

impl ApiPredictRequest {
    /// Checks presence and ranges of every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking fields in the
    /// order `provincia`, `canton`, `day`, `month`.
    pub fn validate(&self) -> Result<ValidPredictRequest, ValidationError> {
        let provincia = required_text("provincia", self.provincia.as_deref())?;
        let canton = required_text("canton", self.canton.as_deref())?;
        let day = ranged("day", self.day, 1, 31)?;
        let month = ranged("month", self.month, 1, 12)?;

        Ok(ValidPredictRequest {
            provincia: provincia.to_string(),
            canton: canton.to_string(),
            day,
            month,
        })
    }
}

fn required_text<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(field))?;
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(value)
}

fn ranged(
    field: &'static str,
    value: Option<i64>,
    min: u8,
    max: u8,
) -> Result<u8, ValidationError> {
    let value = value.ok_or(ValidationError::Missing(field))?;
    u8::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
}

/// Successful body of `POST /api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiPredictResponse {
    /// Identifier of this query, also written to the query log.
    pub request_id: String,
    /// The aggregated per-parish predictions.
    #[serde(flatten)]
    pub response: AggregatedResponse,
}

/// Error body for every `4xx`/`5xx` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Always `false`.
    pub success: bool,
    /// Human-readable summary.
    pub error: String,
    /// Optional extra information (e.g. the validation failure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// `"healthy"` whenever the server is answering.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Current server time.
    pub timestamp: DateTime<Utc>,
    /// Prediction endpoint the server fans out to.
    pub ai_service_url: String,
    /// Number of provinces in the index.
    pub provinces: usize,
    /// Number of cantons in the index.
    pub cantons: usize,
    /// Number of parishes in the index.
    pub parishes: usize,
}

/// Response of `GET /api/provincias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProvinces {
    /// Always `true`.
    pub success: bool,
    /// Normalized province key → normalized canton keys, both sorted.
    pub provincias: BTreeMap<String, Vec<String>>,
    /// Normalized province key → display names for the province and its
    /// cantons.
    pub nombres: BTreeMap<String, ApiProvinceNames>,
}

/// Display names for one province, as spelled in the division tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProvinceNames {
    /// Title-cased province name, accents kept.
    pub nombre: String,
    /// Normalized canton key → title-cased canton name.
    pub cantones: BTreeMap<String, String>,
}

/// Response of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiServiceInfo {
    /// Service banner.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Endpoint name → `METHOD /path`.
    pub endpoints: BTreeMap<String, String>,
}
