//! Aggregator & Classifier
//!
//! Reduces the signal list of one evaluation to a verdict:
//! - total score = sum of weights
//! - any critical signal forces HIGH
//! - otherwise class thresholds pick HIGH / MEDIUM / LOW
//! - INSUFFICIENT overrides the level when there is nothing to judge
//!
//! Never fails. Missing data only means fewer signals.

use super::catalog::{self, LevelThresholds};
use crate::models::{AssetClass, Category, RiskLevel, ScoringResult, Signal};

/// Any signal at or above this weight rules out the legitimacy annotation
pub const LEGITIMACY_MAX_WEIGHT: u32 = 3;

/// Facts about the instrument the classifier needs besides the signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstrumentProfile {
    /// A quote from the data provider was usable
    pub has_market_data: bool,
    /// Equity only: large cap, deep liquidity, regulated venue
    pub large_cap_liquid: bool,
    /// On the allow-list or matching the class' blue-chip profile
    pub established: bool,
}

/// Builder collecting generator output in emission order
pub struct ScoringResultBuilder {
    class: AssetClass,
    signals: Vec<Signal>,
    profile: InstrumentProfile,
}

impl ScoringResultBuilder {
    pub fn new(class: AssetClass) -> Self {
        Self {
            class,
            signals: Vec::new(),
            profile: InstrumentProfile::default(),
        }
    }

    pub fn with_signals(mut self, signals: Vec<Signal>) -> Self {
        self.signals.extend(signals);
        self
    }

    pub fn with_profile(mut self, profile: InstrumentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn build(self) -> ScoringResult {
        classify(self.class, self.signals, self.profile)
    }
}

/// Score thresholds of an asset class
pub fn thresholds(class: AssetClass) -> LevelThresholds {
    match class {
        AssetClass::Equity => catalog::equity::LEVELS,
        AssetClass::Token => catalog::token::LEVELS,
    }
}

/// Threshold comparison alone, before any override
pub fn level_for_score(score: u32, levels: LevelThresholds) -> RiskLevel {
    if score >= levels.high {
        RiskLevel::High
    } else if score >= levels.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Turn the full signal list into a verdict
pub fn classify(class: AssetClass, signals: Vec<Signal>, profile: InstrumentProfile) -> ScoringResult {
    let total_score: u32 = signals.iter().map(|s| s.weight).sum();
    let has_critical = signals.iter().any(|s| s.critical);
    let has_behavioral = signals.iter().any(|s| s.category == Category::Behavioral);

    let level = if has_critical {
        RiskLevel::High
    } else {
        level_for_score(total_score, thresholds(class))
    };

    // a critical finding is always a verdict
    let no_data = !profile.has_market_data;
    let safe_large_cap =
        class == AssetClass::Equity && profile.large_cap_liquid && !has_behavioral;
    let is_insufficient = !has_critical && (no_data || safe_large_cap);

    let is_legitimate =
        profile.established && signals.iter().all(|s| s.weight < LEGITIMACY_MAX_WEIGHT);

    ScoringResult {
        signals,
        total_score,
        risk_level: if is_insufficient {
            RiskLevel::Insufficient
        } else {
            level
        },
        is_insufficient,
        is_legitimate,
    }
}
