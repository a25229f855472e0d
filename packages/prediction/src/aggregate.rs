//! Reduction of per-parish results into the query response.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hazard_map_prediction_models::{AggregatedResponse, ParishPrediction, PredictionResult};

/// Builds the response for a completed fan-out, stamped with the current
/// time.
///
/// `success` is always `true`: individual parish failures were already
/// dropped from `results` and do not fail the query.
#[must_use]
pub fn aggregate(
    provincia: &str,
    canton: &str,
    results: BTreeMap<String, PredictionResult>,
) -> AggregatedResponse {
    aggregate_at(provincia, canton, results, Utc::now())
}

/// [`aggregate`] with an explicit timestamp.
#[must_use]
pub fn aggregate_at(
    provincia: &str,
    canton: &str,
    results: BTreeMap<String, PredictionResult>,
    timestamp: DateTime<Utc>,
) -> AggregatedResponse {
    let parroquias_data = results
        .into_iter()
        .map(|(name, result)| {
            // The service sorts by descending probability; the first entry
            // is taken as-is.
            let max_risk = result.predictions.first().map(|p| p.risk_level.clone());
            (
                name,
                ParishPrediction {
                    lat: result.latitude,
                    lng: result.longitude,
                    predictions: result.predictions,
                    max_risk,
                },
            )
        })
        .collect();

    AggregatedResponse {
        success: true,
        provincia: provincia.to_string(),
        canton: canton.to_string(),
        timestamp,
        parroquias_data,
    }
}
