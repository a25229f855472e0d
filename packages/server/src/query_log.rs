//! Structured per-query log records.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One line of the query log, emitted as JSON at `info` level.
#[derive(Debug, Clone, Serialize)]
pub struct QueryLog {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub provincia: String,
    pub canton: String,
    pub day: u8,
    pub month: u8,
    pub success: bool,
    pub parishes_requested: usize,
    pub parishes_succeeded: usize,
    pub response_time_ms: u64,
}

impl QueryLog {
    pub fn record(&self) {
        match serde_json::to_string(self) {
            Ok(line) => log::info!("query_log {line}"),
            Err(e) => log::warn!("Failed to serialize query log {}: {e}", self.request_id),
        }
    }
}

/// Returns a request identifier of the form `req_<unix nanos>`.
#[must_use]
pub fn new_request_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    format!("req_{nanos}")
}
