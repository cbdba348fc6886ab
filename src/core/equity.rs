//! Equity structural and alert signals
//!
//! Penny price, small cap, thin dollar volume, OTC venue and regulatory
//! alert-list hits. Also the large-cap profile used by the classifier.

use tracing::debug;

use super::analytics;
use super::catalog::equity::{
    DOLLAR_VOLUME_DAYS, HIGH_DOLLAR_VOLUME, LARGE_CAP, MICROCAP_PRICE, MICRO_DOLLAR_VOLUME,
    MICRO_LIQUIDITY, OTC_EXCHANGE, PENNY_PRICE, REGULATORY_ALERT, SMALL_CAP, SMALL_MARKET_CAP,
    TOP_RANK,
};
use crate::models::{MarketData, Quote, Signal};
use crate::utils::constants::{is_listed, is_otc_venue, ESTABLISHED_EQUITIES};

/// Emit STRUCTURAL signals. Nothing without a usable quote.
pub fn structural_signals(market: &MarketData) -> Vec<Signal> {
    let mut signals = Vec::new();
    let Some(quote) = market.usable_quote() else {
        return signals;
    };

    if quote.price < PENNY_PRICE {
        signals.push(MICROCAP_PRICE.emit_with(format!("${:.2}", quote.price)));
    }

    if let Some(cap) = quote.market_cap {
        if cap < SMALL_CAP {
            signals.push(SMALL_MARKET_CAP.emit_with(format_usd(cap)));
        }
    }

    if let Some(dollar_volume) = dollar_volume(quote, market) {
        if dollar_volume < MICRO_DOLLAR_VOLUME {
            signals.push(MICRO_LIQUIDITY.emit_with(format!("{}/day", format_usd(dollar_volume))));
        }
    }

    if is_otc(market) {
        signals.push(OTC_EXCHANGE.emit_with(venue_label(quote)));
    }

    debug!(count = signals.len(), symbol = %quote.symbol, "equity structural signals");
    signals
}

/// Emit ALERT signals from the regulatory alert-list lookup
pub fn alert_signals(market: &MarketData) -> Vec<Signal> {
    match market.regulatory_alert.as_deref().map(str::trim) {
        Some(reason) if !reason.is_empty() => vec![REGULATORY_ALERT.emit_with(reason)],
        _ => Vec::new(),
    }
}

/// OTC flag from the data provider, or an OTC venue name on the quote
pub fn is_otc(market: &MarketData) -> bool {
    market.is_otc
        || market
            .usable_quote()
            .map(|q| is_otc_venue(&q.venue))
            .unwrap_or(false)
}

/// Average daily traded value in USD.
///
/// Share volume from the quote's 30-day average, else the series' 30-day mean,
/// else the last session's volume; times the last price.
pub fn dollar_volume(quote: &Quote, market: &MarketData) -> Option<f64> {
    let shares = quote
        .avg_volume_30d
        .or_else(|| analytics::average_volume(&market.price_series, DOLLAR_VOLUME_DAYS))
        .or(quote.volume_24h)?;
    Some(shares * quote.price)
}

/// Large cap, deep liquidity and a regulated venue
pub fn is_large_cap_liquid(market: &MarketData) -> bool {
    let Some(quote) = market.usable_quote() else {
        return false;
    };
    let large = quote.market_cap.map(|c| c >= LARGE_CAP).unwrap_or(false);
    let liquid = dollar_volume(quote, market)
        .map(|v| v >= HIGH_DOLLAR_VOLUME)
        .unwrap_or(false);
    large && liquid && !is_otc(market)
}

/// Established name, or large-cap profile that is top ranked when a rank is known
pub fn is_established(symbol: &str, market: &MarketData) -> bool {
    if is_listed(&ESTABLISHED_EQUITIES, symbol) {
        return true;
    }
    let top_ranked = market
        .usable_quote()
        .and_then(|q| q.rank)
        .map(|r| r <= TOP_RANK)
        .unwrap_or(true);
    is_large_cap_liquid(market) && top_ranked
}

fn venue_label(quote: &Quote) -> String {
    if quote.venue.trim().is_empty() {
        "OTC".to_string()
    } else {
        quote.venue.trim().to_string()
    }
}

pub(crate) fn format_usd(amount: f64) -> String {
    if amount >= 1_000_000_000.0 {
        format!("${:.2}B", amount / 1_000_000_000.0)
    } else if amount >= 1_000_000.0 {
        format!("${:.2}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${:.2}", amount)
    }
}
