//! API Request/Response Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::CategoryIndex;
use crate::models::{AppError, AssetClass, ScoringResult};
use crate::utils::telemetry::{SignalCount, TelemetryStats};

/// API Response wrapper
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            latency_ms,
            timestamp: Utc::now().timestamp(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(error: ApiError, latency_ms: f64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            latency_ms,
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// API Error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ApiError {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code_str().to_string(),
            message: err.message.clone(),
            details: std::error::Error::source(err).map(|s| s.to_string()),
        }
    }
}

// ============================================
// Scoring
// ============================================

/// One scored evaluation, keyed for downstream persistence
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreData {
    pub evaluation_id: Uuid,
    pub symbol: String,
    pub asset_class: AssetClass,
    pub evaluated_at: DateTime<Utc>,
    pub result: ScoringResult,
    pub categories: CategoryIndex,
}

/// Raw items so one malformed entry does not fail the whole batch
#[derive(Debug, Deserialize)]
pub struct BatchScoreRequest {
    pub inputs: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScoreData {
    pub total_requested: usize,
    pub total_scored: usize,
    pub total_rejected: usize,
    pub total_high: usize,
    pub total_medium: usize,
    pub total_low: usize,
    pub total_insufficient: usize,
    pub results: Vec<BatchItemResult>,
    pub processing_time_ms: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    /// "success" | "error"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ScoreData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

// ============================================
// Stats / Telemetry
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_evaluated: u64,
    pub total_rejected: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub insufficient: u64,
    pub critical_verdicts: u64,
    pub presumed_legitimate: u64,
    pub avg_latency_us: f64,
    pub top_signals: Vec<SignalCount>,
    pub uptime_seconds: u64,
    pub api_version: String,
}

impl StatsData {
    pub fn new(stats: TelemetryStats, uptime_seconds: u64) -> Self {
        Self {
            total_evaluated: stats.total_evaluated,
            total_rejected: stats.total_rejected,
            high: stats.high,
            medium: stats.medium,
            low: stats.low,
            insufficient: stats.insufficient,
            critical_verdicts: stats.critical_verdicts,
            presumed_legitimate: stats.presumed_legitimate,
            avg_latency_us: stats.avg_latency_us,
            top_signals: stats.top_signals,
            uptime_seconds,
            api_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
