//! Scam Radar - deterministic fraud-risk scoring for equities and tokens
//!
//! Usage:
//!   scam_radar input.json [more.json ...]
//!   cat input.json | scam_radar
//!
//! Each file holds one scoring input or an array of them. Prints a summary
//! line per input to stderr and the JSON verdicts to stdout.
//!
//! Environment:
//!   RUST_LOG  - Log filter (default: info)

use scam_radar::core::{evaluate, group_by_category, CategoryIndex};
use scam_radar::models::{AppError, AppResult, ScoringInput, ScoringResult};
use scam_radar::utils::constants::{APP_NAME, APP_VERSION};
use scam_radar::TelemetryCollector;

use eyre::{eyre, Result, WrapErr};
use serde::Serialize;
use std::io::Read;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Verdict {
    source: String,
    symbol: String,
    result: ScoringResult,
    categories: CategoryIndex,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    FmtSubscriber::builder()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.iter().any(|p| p == "-h" || p == "--help") {
        print_usage();
        return Ok(());
    }

    let sources = if paths.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .wrap_err("Failed to read stdin")?;
        vec![("<stdin>".to_string(), buf)]
    } else {
        paths
            .into_iter()
            .map(|path| -> Result<(String, String)> {
                let text = std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("Failed to read {}", path))?;
                Ok((path, text))
            })
            .collect::<Result<Vec<_>>>()?
    };

    let telemetry = TelemetryCollector::new();
    let mut verdicts = Vec::new();

    for (source, text) in sources {
        let inputs = parse_inputs(&text).map_err(|e| eyre!("{}: {}", source, e))?;
        for (i, input) in inputs.iter().enumerate() {
            let start = Instant::now();
            let result = evaluate(input).map_err(|e| {
                telemetry.record_rejection();
                eyre!("{} (input {}): {}", source, i, e)
            })?;
            telemetry.record_result(&result, start.elapsed().as_micros() as u64);

            eprintln!("{}", result.summary(&input.symbol));
            verdicts.push(Verdict {
                source: source.clone(),
                symbol: input.symbol.clone(),
                categories: group_by_category(&result.signals, input.asset_class),
                result,
            });
        }
    }

    println!("{}", serde_json::to_string_pretty(&verdicts)?);

    let stats = telemetry.get_stats();
    info!(evaluated = stats.total_evaluated, high = stats.high, "Done");
    if stats.total_evaluated > 1 {
        eprint!("{}", stats.summary());
    }

    Ok(())
}

/// `RUST_LOG` directives when they parse, INFO otherwise
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// One input object or an array of them
fn parse_inputs(text: &str) -> AppResult<Vec<ScoringInput>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(AppError::from))
            .collect(),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

fn print_usage() {
    eprintln!("{} v{}", APP_NAME, APP_VERSION);
    eprintln!();
    eprintln!("Usage: scam_radar [input.json ...]");
    eprintln!("Reads scoring inputs (one object or an array) from the given files, or stdin.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_log_filter_honors_directives() {
        let filter = log_filter(Some("debug".to_string()));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_parse_inputs_accepts_object_or_array() {
        let one = r#"{"assetClass": "TOKEN", "symbol": "MOON", "marketData": {}}"#;
        assert_eq!(parse_inputs(one).unwrap().len(), 1);

        let many = format!("[{}, {}]", one, one);
        assert_eq!(parse_inputs(&many).unwrap().len(), 2);

        assert!(parse_inputs("[1]").is_err());
    }
}
