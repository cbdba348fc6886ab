//! Scoring engine
//!
//! Runs every generator of the input's asset class in a fixed order
//! (structural, pattern, alert, contract, liquidity, distribution, behavioral)
//! and hands the concatenated list to the classifier.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::behavioral::behavioral_signals;
use super::catalog;
use super::classifier::{InstrumentProfile, ScoringResultBuilder};
use super::patterns::pattern_signals;
use super::{equity, security, token};
use crate::models::{AppResult, AssetClass, ScoringInput, ScoringResult, Signal};

/// Validate the input, then score it
pub fn evaluate(input: &ScoringInput) -> AppResult<ScoringResult> {
    if let Err(e) = input.validate() {
        warn!(
            symbol = %input.symbol,
            class = input.asset_class.as_str(),
            code = e.code_str(),
            "❌ Input rejected: {}",
            e.message
        );
        return Err(e);
    }
    Ok(compute_risk_score(input))
}

/// Score an already validated input. Pure and deterministic.
pub fn compute_risk_score(input: &ScoringInput) -> ScoringResult {
    let start = Instant::now();

    let (signals, profile) = match input.asset_class {
        AssetClass::Equity => equity_signals(input),
        AssetClass::Token => token_signals(input),
    };

    let result = ScoringResultBuilder::new(input.asset_class)
        .with_signals(signals)
        .with_profile(profile)
        .build();

    info!(
        symbol = %input.symbol,
        class = input.asset_class.as_str(),
        score = result.total_score,
        level = result.risk_level.as_str(),
        signals = result.signals.len(),
        legitimate = result.is_legitimate,
        elapsed_us = start.elapsed().as_micros() as u64,
        "{} Evaluation complete",
        result.risk_level.emoji()
    );
    result
}

fn equity_signals(input: &ScoringInput) -> (Vec<Signal>, InstrumentProfile) {
    let market = &input.market_data;
    let quote = market.usable_quote();

    let mut signals = equity::structural_signals(market);
    signals.extend(pattern_signals(
        &catalog::equity::PATTERNS,
        quote,
        &market.price_series,
    ));
    signals.extend(equity::alert_signals(market));
    signals.extend(behavioral_signals(
        AssetClass::Equity,
        &input.context,
        &input.pitch_text,
    ));

    let profile = InstrumentProfile {
        has_market_data: quote.is_some(),
        large_cap_liquid: equity::is_large_cap_liquid(market),
        established: equity::is_established(&input.symbol, market),
    };
    (signals, profile)
}

fn token_signals(input: &ScoringInput) -> (Vec<Signal>, InstrumentProfile) {
    let market = &input.market_data;
    let quote = market.usable_quote();

    let mut signals = token::structural_signals(market);
    signals.extend(pattern_signals(
        &catalog::token::PATTERNS,
        quote,
        &market.price_series,
    ));
    signals.extend(token::ath_signals(market));

    match &input.security_data {
        Some(sec) => {
            signals.extend(security::contract_signals(sec));
            signals.extend(security::liquidity_signals(sec));
            signals.extend(security::distribution_signals(sec));
        }
        None => debug!(symbol = %input.symbol, "no security report, skipping contract checks"),
    }

    signals.extend(behavioral_signals(
        AssetClass::Token,
        &input.context,
        &input.pitch_text,
    ));

    let profile = InstrumentProfile {
        has_market_data: quote.is_some(),
        large_cap_liquid: false,
        established: token::is_established(&input.symbol, market),
    };
    (signals, profile)
}
