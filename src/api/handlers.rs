//! API Request Handlers

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::types::*;
use crate::core::{evaluate, group_by_category};
use crate::models::{ApiConfig, AppError, AppResult, ErrorCode, RiskLevel, ScoringInput};
use crate::utils::telemetry::TelemetryCollector;

type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

/// Shared application state
pub struct AppState {
    pub telemetry: Arc<TelemetryCollector>,
    pub config: ApiConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(telemetry: Arc<TelemetryCollector>, config: ApiConfig) -> Self {
        Self {
            telemetry,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Validate and score one input, recording telemetry either way
    fn score(&self, input: &ScoringInput) -> AppResult<ScoreData> {
        let start = Instant::now();
        match evaluate(input) {
            Ok(result) => {
                self.telemetry
                    .record_result(&result, start.elapsed().as_micros() as u64);
                Ok(ScoreData {
                    evaluation_id: Uuid::new_v4(),
                    symbol: input.symbol.clone(),
                    asset_class: input.asset_class,
                    evaluated_at: Utc::now(),
                    categories: group_by_category(&result.signals, input.asset_class),
                    result,
                })
            }
            Err(e) => {
                self.telemetry.record_rejection();
                Err(e)
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn failure(err: &AppError, start: Instant) -> ApiFailure {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ApiResponse::error(ApiError::from(err), elapsed_ms(start))),
    )
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Scoring
// ============================================

pub async fn score(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<ScoreData>>, ApiFailure> {
    let start = Instant::now();

    let input: ScoringInput = serde_json::from_slice(&body).map_err(|e| {
        let err = AppError::from(e);
        warn!(code = err.code_str(), "Malformed scoring request");
        state.telemetry.record_rejection();
        failure(&err, start)
    })?;

    let data = state.score(&input).map_err(|e| failure(&e, start))?;

    info!(
        evaluation_id = %data.evaluation_id,
        symbol = %data.symbol,
        level = data.result.risk_level.as_str(),
        score = data.result.total_score,
        "Scored"
    );

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Batch Scoring
// ============================================

pub async fn batch_score(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse<BatchScoreData>>, ApiFailure> {
    let start = Instant::now();

    let req: BatchScoreRequest =
        serde_json::from_slice(&body).map_err(|e| failure(&AppError::from(e), start))?;

    if req.inputs.is_empty() {
        return Err(failure(&AppError::batch_limit("No inputs provided"), start));
    }
    if req.inputs.len() > state.config.max_batch {
        return Err(failure(
            &AppError::batch_limit(format!(
                "Maximum {} inputs per batch, got {}",
                state.config.max_batch,
                req.inputs.len()
            )),
            start,
        ));
    }

    let total_requested = req.inputs.len();
    info!(count = total_requested, "📦 Batch scoring started");

    let mut results = Vec::with_capacity(total_requested);
    let (mut high, mut medium, mut low, mut insufficient) = (0, 0, 0, 0);

    for (index, raw) in req.inputs.into_iter().enumerate() {
        let scored = serde_json::from_value::<ScoringInput>(raw)
            .map_err(AppError::from)
            .and_then(|input| state.score(&input));

        match scored {
            Ok(data) => {
                match data.result.risk_level {
                    RiskLevel::High => high += 1,
                    RiskLevel::Medium => medium += 1,
                    RiskLevel::Low => low += 1,
                    RiskLevel::Insufficient => insufficient += 1,
                }
                results.push(BatchItemResult {
                    index,
                    status: "success".to_string(),
                    data: Some(data),
                    error: None,
                });
            }
            Err(e) => {
                if e.code == ErrorCode::ApiBadRequest {
                    state.telemetry.record_rejection();
                }
                results.push(BatchItemResult {
                    index,
                    status: "error".to_string(),
                    data: None,
                    error: Some(ApiError::from(&e)),
                });
            }
        }
    }

    let total_scored = high + medium + low + insufficient;
    let data = BatchScoreData {
        total_requested,
        total_scored,
        total_rejected: total_requested - total_scored,
        total_high: high,
        total_medium: medium,
        total_low: low,
        total_insufficient: insufficient,
        results,
        processing_time_ms: elapsed_ms(start),
    };

    info!(
        total = total_requested,
        high = high,
        rejected = data.total_rejected,
        latency_ms = data.processing_time_ms,
        "📦 Batch scoring complete"
    );

    Ok(Json(ApiResponse::success(data, elapsed_ms(start))))
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();
    let data = StatsData::new(state.telemetry.get_stats(), state.uptime_seconds());
    Json(ApiResponse::success(data, elapsed_ms(start)))
}
