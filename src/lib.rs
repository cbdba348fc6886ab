//! Scam Radar Library
//!
//! Deterministic fraud-risk scoring for equities and tokens:
//! - Structural and price/volume pattern signals from market data
//! - Contract, liquidity and holder signals from token security reports
//! - Behavioral signals from the pitch and its circumstances
//! - Weighted verdict: LOW / MEDIUM / HIGH / INSUFFICIENT

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{compute_risk_score, evaluate, group_by_category, CategoryIndex};
pub use models::{
    AppError, AppResult, AssetClass, BehavioralContext, Category, ErrorCode, MarketData,
    PricePoint, PriceSeries, Quote, RiskLevel, ScoringInput, ScoringResult, SecurityMetadata,
    Signal,
};
pub use utils::telemetry::{TelemetryCollector, TelemetryStats};
