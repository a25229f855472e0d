//! Client for the external inference service.
//!
//! The service exposes `POST /predict`, taking a [`PredictionRequest`] and
//! answering with a [`PredictionResponse`]. Only a `200 OK` with a parseable
//! body and `success: true` counts as a prediction; everything else is a
//! [`PredictionError`]. Calls are made once, never retried.

use std::time::Duration;

use hazard_map_prediction_models::{PredictionRequest, PredictionResponse};

use crate::{PredictionError, service_config::ServiceConfig};

/// Something that can produce a prediction for one parish.
#[async_trait::async_trait]
pub trait PredictionClient: Send + Sync {
    /// Requests a prediction for a single parish.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] on transport failure, timeout, non-200
    /// status, malformed body, or `success: false`.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError>;
}

/// [`PredictionClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpPredictionClient {
    /// Creates a client posting to `url` with a fixed per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Http`] if the HTTP client cannot be
    /// constructed (e.g. the TLS backend fails to initialize).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates a client from a [`ServiceConfig`].
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &ServiceConfig) -> Result<Self, PredictionError> {
        Self::new(config.predict_url(), config.timeout())
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, PredictionError> {
        let resp = self.client.post(&self.url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        parse_response(status, &body)
    }
}

/// Interprets a raw service response.
fn parse_response(
    status: reqwest::StatusCode,
    body: &str,
) -> Result<PredictionResponse, PredictionError> {
    if status != reqwest::StatusCode::OK {
        return Err(PredictionError::Status {
            status: status.as_u16(),
            body: body.chars().take(512).collect(),
        });
    }

    let parsed: PredictionResponse = serde_json::from_str(body)?;
    if !parsed.success {
        return Err(PredictionError::Unsuccessful);
    }

    Ok(parsed)
}
