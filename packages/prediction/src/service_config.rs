//! Prediction service configuration.
//!
//! Defaults are embedded at compile time from `services/prediction.toml`
//! and may be overridden by environment variables at startup:
//!
//! | Variable | Field |
//! |---|---|
//! | `AI_SERVICE_URL` | `base_url` |
//! | `AI_SERVICE_TIMEOUT_SECS` | `timeout_secs` |
//! | `AI_SERVICE_MAX_CONCURRENT` | `max_concurrent_requests` |

use std::time::Duration;

use serde::Deserialize;

use crate::PredictionError;

const SERVICE_TOML: &str = include_str!("../services/prediction.toml");

/// Connection settings for the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Base URL without trailing slash (e.g. `"http://ai-service:8000"`).
    pub base_url: String,
    /// Path of the prediction endpoint.
    #[serde(default = "default_predict_path")]
    pub predict_path: String,
    /// Per-call timeout in seconds. Calls are never retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum number of parish requests in flight for one query.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

fn default_predict_path() -> String {
    "/predict".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_concurrent() -> usize {
    16
}

impl ServiceConfig {
    /// Parses the compile-time embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Config`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, PredictionError> {
        Self::from_toml(SERVICE_TOML)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Config`] if the TOML is malformed or
    /// missing required fields.
    pub fn from_toml(text: &str) -> Result<Self, PredictionError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Embedded defaults with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError`] if the embedded TOML is malformed or an
    /// override does not parse.
    pub fn from_env() -> Result<Self, PredictionError> {
        let mut config = Self::embedded()?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value. Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::InvalidOverride`] if a numeric override
    /// does not parse or is zero.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), PredictionError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("AI_SERVICE_URL") {
            self.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(value) = get("AI_SERVICE_TIMEOUT_SECS") {
            self.timeout_secs = parse_positive("AI_SERVICE_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = get("AI_SERVICE_MAX_CONCURRENT") {
            self.max_concurrent_requests = parse_positive("AI_SERVICE_MAX_CONCURRENT", &value)?;
        }

        Ok(())
    }

    /// Full URL of the prediction endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.predict_path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_positive<T>(variable: &str, value: &str) -> Result<T, PredictionError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(PredictionError::InvalidOverride {
            variable: variable.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn embedded_config_parses() {
        let config = ServiceConfig::embedded().unwrap();
        assert!(!config.id.is_empty());
        assert!(!config.base_url.is_empty());
        assert_eq!(config.timeout_secs, 10);
        assert!(config.max_concurrent_requests > 0);
        assert_eq!(config.predict_url(), "http://ai-service:8000/predict");
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = ServiceConfig::from_toml(
            r#"
            id = "local"
            name = "Local"
            base_url = "http://localhost:8000"
            "#,
        )
        .unwrap();
        assert_eq!(config.predict_path, "/predict");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_concurrent_requests, 16);
    }

    #[test]
    fn missing_base_url_is_rejected() {
        assert!(matches!(
            ServiceConfig::from_toml("id = \"x\"\nname = \"y\""),
            Err(PredictionError::Config(_))
        ));
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut config = ServiceConfig::embedded().unwrap();
        config
            .apply_overrides(lookup(&[
                ("AI_SERVICE_URL", "http://127.0.0.1:9000/"),
                ("AI_SERVICE_TIMEOUT_SECS", "3"),
                ("AI_SERVICE_MAX_CONCURRENT", "4"),
            ]))
            .unwrap();
        assert_eq!(config.predict_url(), "http://127.0.0.1:9000/predict");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.max_concurrent_requests, 4);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = ServiceConfig::embedded().unwrap();
        let before = config.clone();
        config
            .apply_overrides(lookup(&[("AI_SERVICE_URL", "  ")]))
            .unwrap();
        assert_eq!(config, before);
    }

    #[test]
    fn zero_or_garbage_overrides_are_rejected() {
        let mut config = ServiceConfig::embedded().unwrap();
        assert!(matches!(
            config.apply_overrides(lookup(&[("AI_SERVICE_MAX_CONCURRENT", "0")])),
            Err(PredictionError::InvalidOverride { .. })
        ));
        assert!(matches!(
            config.apply_overrides(lookup(&[("AI_SERVICE_TIMEOUT_SECS", "ten")])),
            Err(PredictionError::InvalidOverride { .. })
        ));
    }
}
