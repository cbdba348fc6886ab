//! Runtime configuration for the scoring API
//!
//! Scoring thresholds are constant tables (see `core::catalog`) and are not
//! configurable here; only the serving surface reads the environment.

use std::time::Duration;
use tracing::info;

use super::errors::{AppError, AppResult};
use crate::utils::constants::{
    DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_MAX_BATCH,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Configuration for the scoring API server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Maximum inputs accepted by the batch endpoint
    pub max_batch: usize,
    /// Maximum in-flight requests
    pub concurrency_limit: usize,
    /// Per-request deadline
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
            max_batch: DEFAULT_MAX_BATCH,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load from environment, falling back to defaults for unset keys.
    ///
    /// Hosting platforms set `PORT`; `SCAM_RADAR_PORT` is the local override.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let host = lookup("SCAM_RADAR_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("PORT").or_else(|| lookup("SCAM_RADAR_PORT")) {
            Some(raw) => parse_value("PORT", &raw)?,
            None => defaults.port,
        };

        let max_batch = match lookup("SCAM_RADAR_MAX_BATCH") {
            Some(raw) => positive("SCAM_RADAR_MAX_BATCH", &raw)?,
            None => defaults.max_batch,
        };

        let concurrency_limit = match lookup("SCAM_RADAR_CONCURRENCY") {
            Some(raw) => positive("SCAM_RADAR_CONCURRENCY", &raw)?,
            None => defaults.concurrency_limit,
        };

        let request_timeout = match lookup("SCAM_RADAR_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(positive::<u64>("SCAM_RADAR_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        let config = Self {
            host,
            port,
            max_batch,
            concurrency_limit,
            request_timeout,
        };
        info!(
            host = %config.host,
            port = config.port,
            max_batch = config.max_batch,
            concurrency = config.concurrency_limit,
            "API configuration loaded"
        );
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::invalid_config(key, raw))
}

fn positive<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let value: T = parse_value(key, raw)?;
    if value <= T::default() {
        return Err(AppError::invalid_config(key, raw));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_platform_port_wins() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("SCAM_RADAR_PORT", "7000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ApiConfig::from_lookup(lookup_from(&[("SCAM_RADAR_PORT", "eighty")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);

        let err = ApiConfig::from_lookup(lookup_from(&[("SCAM_RADAR_MAX_BATCH", "0")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }
}
