#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wire types for the hazard prediction service and aggregated responses.
//!
//! Field names follow the JSON contract shared with the inference service
//! and the frontend (`provincia`, `parroquia`, `max_risk`), so these types
//! serialize in `snake_case` rather than the `camelCase` used elsewhere.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outbound request for a single parish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Parish latitude (WGS84).
    pub latitude: f64,
    /// Parish longitude (WGS84).
    pub longitude: f64,
    /// Day of month (1-31) requested by the caller.
    pub day: u8,
    /// Month (1-12) requested by the caller.
    pub month: u8,
    /// Province exactly as the caller wrote it.
    pub provincia: String,
    /// Canton exactly as the caller wrote it.
    pub canton: String,
    /// Parish display name.
    pub parroquia: String,
}

/// Probability of one hazard type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProbability {
    /// Hazard type (e.g. "Inundación", "Deslizamiento").
    pub event_type: String,
    /// Probability reported by the model.
    pub probability: f64,
    /// Risk label (e.g. "bajo", "medio", "alto", "crítico").
    pub risk_level: String,
}

/// Body returned by the inference service.
///
/// Only `success` and `predictions` are read; anything else the service
/// sends (`timestamp`, `location`, `model_version`, `is_mock`) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Whether the service produced a prediction.
    pub success: bool,
    /// Predictions sorted by descending probability.
    #[serde(default)]
    pub predictions: Vec<EventProbability>,
}

/// A successful prediction for one parish, kept until aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Parish latitude used for the request.
    pub latitude: f64,
    /// Parish longitude used for the request.
    pub longitude: f64,
    /// Predictions in the order the service returned them.
    pub predictions: Vec<EventProbability>,
}

/// Per-parish entry of the aggregated response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParishPrediction {
    /// Parish latitude.
    pub lat: f64,
    /// Parish longitude.
    pub lng: f64,
    /// Predictions in service order.
    pub predictions: Vec<EventProbability>,
    /// Risk level of the first (most probable) prediction. `None` when the
    /// service returned an empty list.
    pub max_risk: Option<String>,
}

/// The response for one inbound prediction query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// Always `true` once the fan-out has completed, even if some or all
    /// parishes failed.
    pub success: bool,
    /// Province as the caller wrote it.
    pub provincia: String,
    /// Canton as the caller wrote it.
    pub canton: String,
    /// When the response was assembled (RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Parish display name → prediction.
    pub parroquias_data: BTreeMap<String, ParishPrediction>,
}
