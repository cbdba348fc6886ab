//! Scam Radar API Server
//!
//! REST API over the scoring engine
//!
//! Usage:
//!   cargo run --bin scam_radar_api
//!
//! Environment:
//!   PORT / SCAM_RADAR_PORT   - Server port (default: 8080)
//!   SCAM_RADAR_HOST          - Server host (default: 0.0.0.0)
//!   SCAM_RADAR_MAX_BATCH     - Max inputs per batch request (default: 100)
//!   SCAM_RADAR_CONCURRENCY   - Max in-flight requests (default: 256)
//!   SCAM_RADAR_TIMEOUT_SECS  - Per-request deadline (default: 10)
//!   RUST_LOG                 - Log filter (default: info)

use scam_radar::api::{create_router, AppState};
use scam_radar::models::ApiConfig;
use scam_radar::utils::constants::{APP_NAME, APP_VERSION};
use scam_radar::TelemetryCollector;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ApiConfig::from_env()?;
    let addr: SocketAddr = config.bind_address().parse()?;
    let max_batch = config.max_batch;

    let telemetry = Arc::new(TelemetryCollector::new());
    let telemetry_for_shutdown = telemetry.clone();

    let state = Arc::new(AppState::new(telemetry, config));
    let app = create_router(state);

    info!("🚀 {} API starting on http://{}", APP_NAME, addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /v1/score          - Score one instrument");
    info!("  POST /v1/score/batch    - Score up to {} instruments", max_batch);
    info!("  GET  /v1/stats          - Evaluation statistics");
    info!("  GET  /v1/health         - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("");
    info!("🛑 Shutdown signal received");
    print!("{}", telemetry_for_shutdown.get_stats().summary());
    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ╔══════════════════════════════════════════════╗
    ║                                              ║
    ║          🛡️  S C A M   R A D A R              ║
    ║                                              ║
    ║      Fraud-risk scoring · API v{:<13} ║
    ║                                              ║
    ╚══════════════════════════════════════════════╝
    "#,
        APP_VERSION
    );
}
