//! HTTP handler functions for the hazard map API.

use std::collections::BTreeMap;
use std::time::Instant;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use hazard_map_geography::resolve;
use hazard_map_prediction::{aggregate::aggregate, orchestrator::PredictionQuery};
use hazard_map_server_models::{
    ApiError, ApiHealth, ApiPredictRequest, ApiPredictResponse, ApiProvinceNames, ApiProvinces,
    ApiServiceInfo,
};

use crate::AppState;
use crate::query_log::{QueryLog, new_request_id};

/// `GET /`
pub async fn root() -> HttpResponse {
    let endpoints = [
        ("health", "GET /health"),
        ("api_health", "GET /api/health"),
        ("provincias", "GET /api/provincias"),
        ("predict", "POST /api/predict"),
    ]
    .into_iter()
    .map(|(name, route)| (name.to_string(), route.to_string()))
    .collect();

    HttpResponse::Ok().json(ApiServiceInfo {
        service: "Hazard Map Backend API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// `GET /health` and `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        status: "healthy".to_string(),
        service: "backend-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        ai_service_url: state.ai_service_url.clone(),
        provinces: state.index.province_count(),
        cantons: state.index.canton_count(),
        parishes: state.index.parish_count(),
    })
}

/// `GET /api/provincias`
///
/// Lists the normalized province keys with their canton keys, plus the
/// display spelling of each for building forms.
pub async fn provincias(state: web::Data<AppState>) -> HttpResponse {
    let index = &state.index;
    let mut provincias: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut nombres = BTreeMap::new();

    for (province, cantons) in index.provinces() {
        let cantones = cantons
            .keys()
            .map(|canton| {
                let display = index
                    .canton_display_name(province, canton)
                    .unwrap_or(canton.as_str());
                (canton.clone(), display.to_string())
            })
            .collect();
        nombres.insert(
            province.to_string(),
            ApiProvinceNames {
                nombre: index
                    .province_display_name(province)
                    .unwrap_or(province)
                    .to_string(),
                cantones,
            },
        );
        provincias.insert(province.to_string(), cantons.keys().cloned().collect());
    }

    HttpResponse::Ok().json(ApiProvinces {
        success: true,
        provincias,
        nombres,
    })
}

/// `POST /api/predict`
///
/// Resolves the canton, requests a prediction for each of its parishes, and
/// returns the parishes that succeeded.
pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<ApiPredictRequest>,
) -> HttpResponse {
    let started = Instant::now();
    let request_id = new_request_id();

    let request = match body.validate() {
        Ok(request) => request,
        Err(e) => {
            log::warn!("[{request_id}] Rejected prediction request: {e}");
            return HttpResponse::BadRequest()
                .json(ApiError::with_details("Invalid input data", e.to_string()));
        }
    };

    let resolution = match resolve(&state.index, &request.provincia, &request.canton) {
        Ok(resolution) => resolution,
        Err(e) => {
            log::warn!("[{request_id}] {e}");
            return HttpResponse::BadRequest().json(ApiError::new(e.to_string()));
        }
    };

    log::info!(
        "[{request_id}] {}/{} resolved to {}/{} ({:?}, {} parishes)",
        request.provincia,
        request.canton,
        resolution.province_key,
        resolution.canton_key,
        resolution.match_kind,
        resolution.parishes.len()
    );

    let query = PredictionQuery {
        day: request.day,
        month: request.month,
        provincia: request.provincia.clone(),
        canton: request.canton.clone(),
    };
    let results = state
        .orchestrator
        .dispatch(resolution.parishes, &query)
        .await;
    let response = aggregate(&request.provincia, &request.canton, results);

    QueryLog {
        request_id: request_id.clone(),
        timestamp: response.timestamp,
        provincia: request.provincia,
        canton: request.canton,
        day: request.day,
        month: request.month,
        success: response.success,
        parishes_requested: resolution.parishes.len(),
        parishes_succeeded: response.parroquias_data.len(),
        response_time_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
    .record();

    HttpResponse::Ok().json(ApiPredictResponse {
        request_id,
        response,
    })
}
