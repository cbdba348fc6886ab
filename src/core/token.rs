//! Token structural and all-time-high signals

use tracing::debug;

use super::catalog::token::{
    FAR_BELOW_ATH, FAR_BELOW_ATH_RATIO, HIGH_VOLUME_24H, LARGE_CAP, LOW_RANK, LOW_VOLUME, MAX_RANK,
    MICRO_CAP, MICRO_MARKET_CAP, MIN_VOLUME_24H, NEAR_ATH, NEAR_ATH_RATIO, TOP_RANK,
};
use super::equity::format_usd;
use crate::models::{MarketData, Quote, Signal};
use crate::utils::constants::{is_listed, ESTABLISHED_TOKENS};

/// Emit STRUCTURAL signals. Nothing without a usable quote.
pub fn structural_signals(market: &MarketData) -> Vec<Signal> {
    let mut signals = Vec::new();
    let Some(quote) = market.usable_quote() else {
        return signals;
    };

    if let Some(cap) = quote.market_cap {
        if cap < MICRO_CAP {
            signals.push(MICRO_MARKET_CAP.emit_with(format_usd(cap)));
        }
    }

    if let Some(volume) = quote.volume_24h {
        if volume < MIN_VOLUME_24H {
            signals.push(LOW_VOLUME.emit_with(format_usd(volume)));
        }
    }

    match quote.rank {
        Some(rank) if rank > MAX_RANK => signals.push(LOW_RANK.emit_with(format!("#{}", rank))),
        None => signals.push(LOW_RANK.emit_with("unranked")),
        _ => {}
    }

    debug!(count = signals.len(), symbol = %quote.symbol, "token structural signals");
    signals
}

/// Emit PATTERN signals from the distance to the all-time high
pub fn ath_signals(market: &MarketData) -> Vec<Signal> {
    let Some(quote) = market.usable_quote() else {
        return Vec::new();
    };
    let Some(ath) = quote.all_time_high.filter(|a| *a > 0.0) else {
        return Vec::new();
    };

    let ratio = quote.price / ath;
    if ratio >= NEAR_ATH_RATIO {
        vec![NEAR_ATH.emit_with(format!("{:.0}% of ATH", ratio * 100.0))]
    } else if ratio < FAR_BELOW_ATH_RATIO {
        vec![FAR_BELOW_ATH.emit_with(format!("{:.1}% below ATH", (1.0 - ratio) * 100.0))]
    } else {
        Vec::new()
    }
}

/// Large cap, high volume and top ranked
pub fn is_blue_chip(quote: &Quote) -> bool {
    let large = quote.market_cap.map(|c| c >= LARGE_CAP).unwrap_or(false);
    let liquid = quote.volume_24h.map(|v| v >= HIGH_VOLUME_24H).unwrap_or(false);
    let ranked = quote.rank.map(|r| r <= TOP_RANK).unwrap_or(false);
    large && liquid && ranked
}

/// Established name or blue-chip profile
pub fn is_established(symbol: &str, market: &MarketData) -> bool {
    is_listed(&ESTABLISHED_TOKENS, symbol) || market.usable_quote().map(is_blue_chip).unwrap_or(false)
}
