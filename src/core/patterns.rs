//! Pattern Signal Generator
//!
//! One set of detectors for both asset classes: price moves, volume surges,
//! spike-then-drop, volatility and RSI. The class only changes the
//! `PatternProfile` table handed in.

use tracing::debug;

use super::analytics::{self, SpikeDropRule, RSI_PERIOD, VOLUME_BASELINE_DAYS};
use super::catalog::{PatternProfile, PriceMoveRule, QuoteChange};
use crate::models::{PriceSeries, Quote, Signal};

/// Emit PATTERN signals for one instrument
pub fn pattern_signals(
    profile: &PatternProfile,
    quote: Option<&Quote>,
    series: &PriceSeries,
) -> Vec<Signal> {
    let mut signals = Vec::new();

    for rule in profile.price_moves {
        if let Some(change) = price_move(rule, quote, series) {
            if let Some(def) = rule.tiers.pick(change) {
                signals.push(def.emit_with(format!("{:+.1}%", change)));
            }
        }
    }

    if let Some(ratio) = volume_surge_ratio(profile, quote, series) {
        if let Some(def) = profile.volume_surge.pick(ratio) {
            signals.push(def.emit_with(format!("{:.1}x", ratio)));
        }
    }

    if analytics::detect_spike_then_drop(series, SpikeDropRule::default()) == Some(true) {
        signals.push(profile.spike_then_drop.emit());
    }

    if let Some(rule) = &profile.volatility {
        if let Some(vol) = analytics::volatility(series) {
            if let Some(def) = rule.pick(vol) {
                signals.push(def.emit_with(format!("{:.1}% daily", vol)));
            }
        }
    }

    if let Some(rule) = &profile.rsi {
        if let Some(rsi) = analytics::relative_strength_index(series, RSI_PERIOD) {
            if let Some(def) = rule.pick(rsi) {
                signals.push(def.emit_with(format!("RSI {:.0}", rsi)));
            }
        }
    }

    debug!(count = signals.len(), points = series.len(), "pattern signals");
    signals
}

/// Series change first, then the provider's own change field
fn price_move(rule: &PriceMoveRule, quote: Option<&Quote>, series: &PriceSeries) -> Option<f64> {
    analytics::price_change_percent(series, rule.lookback).or_else(|| {
        let quote = quote?;
        match rule.fallback {
            QuoteChange::Day => quote.change_24h_pct,
            QuoteChange::Week => quote.change_7d_pct,
        }
    })
}

/// Series ratio first, then latest volume over the quote's 30-day average
fn volume_surge_ratio(
    profile: &PatternProfile,
    quote: Option<&Quote>,
    series: &PriceSeries,
) -> Option<f64> {
    analytics::volume_ratio(series, profile.volume_recent_days, VOLUME_BASELINE_DAYS).or_else(|| {
        let quote = quote?;
        match (quote.volume_24h, quote.avg_volume_30d) {
            (Some(latest), Some(avg)) if avg > 0.0 => Some(latest / avg),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::test_support::{flat, series};
    use crate::core::catalog::{equity, token};

    fn codes(signals: &[Signal]) -> Vec<&'static str> {
        signals.iter().map(|s| s.code).collect()
    }

    #[test]
    fn test_flat_series_emits_nothing() {
        let s = flat(60, 10.0, 1_000.0);
        assert!(pattern_signals(&equity::PATTERNS, None, &s).is_empty());
        assert!(pattern_signals(&token::PATTERNS, None, &s).is_empty());
    }

    #[test]
    fn test_only_highest_price_tier_fires() {
        // +150% over 7 days
        let mut closes = vec![2.0; 10];
        closes.extend([2.5, 3.0, 3.5, 4.0, 4.5, 4.8, 5.0]);
        let s = series(&closes, &[]);
        let found = codes(&pattern_signals(&equity::PATTERNS, None, &s));
        assert!(found.contains(&"PRICE_SURGE_7D_EXTREME"));
        assert!(!found.contains(&"PRICE_SURGE_7D"));
    }

    #[test]
    fn test_quote_change_fallback_on_short_series() {
        let mut quote = Quote::new("PEPE2", "ethereum", 0.001);
        quote.change_24h_pct = Some(35.0);
        quote.change_7d_pct = Some(250.0);
        let found = codes(&pattern_signals(&token::PATTERNS, Some(&quote), &PriceSeries::empty()));
        assert_eq!(found, vec!["PRICE_SPIKE_24H", "PRICE_SPIKE_7D_EXTREME"]);
    }

    #[test]
    fn test_series_change_beats_quote_change() {
        let mut quote = Quote::new("ACME", "NYSE", 10.0);
        quote.change_7d_pct = Some(300.0);
        let s = flat(10, 10.0, 1_000.0);
        assert!(pattern_signals(&equity::PATTERNS, Some(&quote), &s).is_empty());
    }

    #[test]
    fn test_volume_surge_tiers_per_class() {
        // last day about 4x the baseline: token surge, equity well below 5x
        let mut volumes = vec![1_000.0; 30];
        volumes[29] = 4_500.0;
        let s = series(&[1.0; 30], &volumes);
        let ratio = analytics::volume_ratio(&s, 1, 30).unwrap();
        assert!(ratio >= 3.0 && ratio < 5.0);

        let token_codes = codes(&pattern_signals(&token::PATTERNS, None, &s));
        assert_eq!(token_codes, vec!["VOLUME_SURGE"]);
        assert!(pattern_signals(&equity::PATTERNS, None, &s).is_empty());
    }

    #[test]
    fn test_spike_weight_differs_per_class() {
        let mut closes = vec![2.0; 20];
        closes.extend([2.5, 3.0, 3.5, 4.0, 3.2, 2.6, 2.2]);
        let s = series(&closes, &[]);

        let eq = pattern_signals(&equity::PATTERNS, None, &s);
        let spike = eq.iter().find(|s| s.code == "SPIKE_THEN_DROP").unwrap();
        assert_eq!(spike.weight, 3);

        let tk = pattern_signals(&token::PATTERNS, None, &s);
        let spike = tk.iter().find(|s| s.code == "SPIKE_THEN_DROP").unwrap();
        assert_eq!(spike.weight, 4);
    }

    #[test]
    fn test_rsi_only_for_tokens() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let s = series(&closes, &[]);
        let tk = codes(&pattern_signals(&token::PATTERNS, None, &s));
        assert!(tk.contains(&"EXTREME_RSI"));
        let eq = codes(&pattern_signals(&equity::PATTERNS, None, &s));
        assert!(!eq.contains(&"EXTREME_RSI"));
    }
}
