//! Fan-out of one prediction request per parish.
//!
//! Requests run concurrently up to `max_concurrent_requests` and the
//! orchestrator returns only after every one of them has finished. Each
//! request produces its own result; results are merged into the map after
//! the join, so no state is shared between in-flight requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt as _};
use hazard_map_geography_models::ParishDetail;
use hazard_map_prediction_models::{PredictionRequest, PredictionResult};

use crate::client::PredictionClient;

/// Caller-supplied fields shared by every parish request of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionQuery {
    /// Day of month (1-31).
    pub day: u8,
    /// Month (1-12).
    pub month: u8,
    /// Province as the caller wrote it.
    pub provincia: String,
    /// Canton as the caller wrote it.
    pub canton: String,
}

impl PredictionQuery {
    /// Builds the outbound request for one parish.
    #[must_use]
    pub fn request_for(&self, parish: &ParishDetail) -> PredictionRequest {
        PredictionRequest {
            latitude: parish.latitude,
            longitude: parish.longitude,
            day: self.day,
            month: self.month,
            provincia: self.provincia.clone(),
            canton: self.canton.clone(),
            parroquia: parish.display_name.clone(),
        }
    }
}

/// Dispatches per-parish prediction requests against a client.
#[derive(Clone)]
pub struct PredictionOrchestrator {
    client: Arc<dyn PredictionClient>,
    max_concurrent_requests: usize,
}

impl PredictionOrchestrator {
    /// Creates an orchestrator. A limit of zero is treated as one.
    #[must_use]
    pub fn new(client: Arc<dyn PredictionClient>, max_concurrent_requests: usize) -> Self {
        Self {
            client,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    #[must_use]
    pub const fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }

    /// Requests a prediction for every parish and waits for all of them.
    ///
    /// Returns parish display name → result for the parishes that
    /// succeeded. Failures are logged and omitted, so the map holds between
    /// zero and `parishes.len()` entries.
    pub async fn dispatch(
        &self,
        parishes: &[ParishDetail],
        query: &PredictionQuery,
    ) -> BTreeMap<String, PredictionResult> {
        log::debug!(
            "Dispatching {} parish predictions for {}/{} (concurrency={})",
            parishes.len(),
            query.provincia,
            query.canton,
            self.max_concurrent_requests
        );

        let outcomes: Vec<_> = stream::iter(parishes.iter().map(|parish| {
            let request = query.request_for(parish);
            let client = Arc::clone(&self.client);
            async move {
                let result = client.predict(&request).await;
                (request, result)
            }
        }))
        .buffer_unordered(self.max_concurrent_requests)
        .collect()
        .await;

        let mut results = BTreeMap::new();
        for (request, outcome) in outcomes {
            match outcome {
                Ok(response) => {
                    log::debug!(
                        "Prediction for parish '{}' returned {} events",
                        request.parroquia,
                        response.predictions.len()
                    );
                    let previous = results.insert(
                        request.parroquia.clone(),
                        PredictionResult {
                            latitude: request.latitude,
                            longitude: request.longitude,
                            predictions: response.predictions,
                        },
                    );
                    if previous.is_some() {
                        log::warn!(
                            "Duplicate parish name '{}' in {}/{}; keeping the last result",
                            request.parroquia,
                            query.provincia,
                            query.canton
                        );
                    }
                }
                Err(e) => {
                    log::warn!(
                        "Prediction failed for parish '{}' ({}/{}): {e}",
                        request.parroquia,
                        query.provincia,
                        query.canton
                    );
                }
            }
        }

        log::info!(
            "Predictions for {}/{}: {} of {} parishes succeeded",
            query.provincia,
            query.canton,
            results.len(),
            parishes.len()
        );

        results
    }
}
