//! Telemetry Module
//!
//! Anonymous counters about evaluations: how many, which verdicts, which
//! signals fire most. Only codes and levels are recorded, never symbols or
//! pitch text.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{RiskLevel, ScoringResult};

/// How often one signal code fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalCount {
    pub code: String,
    pub count: u64,
}

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryStats {
    /// Evaluations that produced a verdict
    pub total_evaluated: u64,
    /// Inputs rejected at the boundary
    pub total_rejected: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub insufficient: u64,
    /// Verdicts forced by a critical signal
    pub critical_verdicts: u64,
    pub presumed_legitimate: u64,
    pub avg_latency_us: f64,
    /// Most frequent first, ties by code
    pub top_signals: Vec<SignalCount>,
    pub period_start: u64,
    pub period_end: u64,
}

impl TelemetryStats {
    /// Plain-text report for the terminal
    pub fn summary(&self) -> String {
        let mut report = format!(
            r#"
╔══════════════════════════════════════════════╗
║           🛡️ SCAM RADAR - RISK REPORT         ║
╠══════════════════════════════════════════════╣
   🔍 Evaluated:        {:>8}
   ⛔ Rejected inputs:  {:>8}
   🔴 High:             {:>8}  (critical: {})
   🟠 Medium:           {:>8}
   🟢 Low:              {:>8}
   ❔ Insufficient:     {:>8}
   ✅ Legitimate:       {:>8}
   ⚡ Avg latency:      {:>8.1}µs
"#,
            self.total_evaluated,
            self.total_rejected,
            self.high,
            self.critical_verdicts,
            self.medium,
            self.low,
            self.insufficient,
            self.presumed_legitimate,
            self.avg_latency_us,
        );
        for signal in self.top_signals.iter().take(5) {
            report.push_str(&format!("   • {:<28} {:>6}\n", signal.code, signal.count));
        }
        report.push_str("╚══════════════════════════════════════════════╝\n");
        report
    }
}

/// Lock-free telemetry collector, shared between request handlers
pub struct TelemetryCollector {
    total_evaluated: AtomicU64,
    total_rejected: AtomicU64,
    high: AtomicU64,
    medium: AtomicU64,
    low: AtomicU64,
    insufficient: AtomicU64,
    critical_verdicts: AtomicU64,
    presumed_legitimate: AtomicU64,
    total_latency_us: AtomicU64,
    signal_counts: DashMap<&'static str, u64>,
    session_start: u64,
}

impl TelemetryCollector {
    pub fn new() -> Self {
        Self {
            total_evaluated: AtomicU64::new(0),
            total_rejected: AtomicU64::new(0),
            high: AtomicU64::new(0),
            medium: AtomicU64::new(0),
            low: AtomicU64::new(0),
            insufficient: AtomicU64::new(0),
            critical_verdicts: AtomicU64::new(0),
            presumed_legitimate: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            signal_counts: DashMap::new(),
            session_start: current_timestamp(),
        }
    }

    /// Record a completed evaluation
    pub fn record_result(&self, result: &ScoringResult, latency_us: u64) {
        self.total_evaluated.fetch_add(1, Ordering::Relaxed);
        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);

        let level_counter = match result.risk_level {
            RiskLevel::High => &self.high,
            RiskLevel::Medium => &self.medium,
            RiskLevel::Low => &self.low,
            RiskLevel::Insufficient => &self.insufficient,
        };
        level_counter.fetch_add(1, Ordering::Relaxed);

        if result.has_critical() {
            self.critical_verdicts.fetch_add(1, Ordering::Relaxed);
        }
        if result.is_legitimate {
            self.presumed_legitimate.fetch_add(1, Ordering::Relaxed);
        }

        for signal in &result.signals {
            *self.signal_counts.entry(signal.code).or_insert(0) += 1;
        }
    }

    /// Record an input rejected before scoring
    pub fn record_rejection(&self) {
        self.total_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let total_evaluated = self.total_evaluated.load(Ordering::Relaxed);
        let total_latency = self.total_latency_us.load(Ordering::Relaxed);

        let avg_latency_us = if total_evaluated > 0 {
            total_latency as f64 / total_evaluated as f64
        } else {
            0.0
        };

        let mut top_signals: Vec<SignalCount> = self
            .signal_counts
            .iter()
            .map(|entry| SignalCount {
                code: entry.key().to_string(),
                count: *entry.value(),
            })
            .collect();
        top_signals.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));

        TelemetryStats {
            total_evaluated,
            total_rejected: self.total_rejected.load(Ordering::Relaxed),
            high: self.high.load(Ordering::Relaxed),
            medium: self.medium.load(Ordering::Relaxed),
            low: self.low.load(Ordering::Relaxed),
            insufficient: self.insufficient.load(Ordering::Relaxed),
            critical_verdicts: self.critical_verdicts.load(Ordering::Relaxed),
            presumed_legitimate: self.presumed_legitimate.load(Ordering::Relaxed),
            avg_latency_us,
            top_signals,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Reset counters (new reporting period)
    pub fn reset(&self) {
        for counter in [
            &self.total_evaluated,
            &self.total_rejected,
            &self.high,
            &self.medium,
            &self.low,
            &self.insufficient,
            &self.critical_verdicts,
            &self.presumed_legitimate,
            &self.total_latency_us,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.signal_counts.clear();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
