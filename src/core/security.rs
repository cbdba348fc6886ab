//! Token Security Signal Generators
//!
//! Contract flags and taxes, liquidity-lock state and holder distribution, read
//! from the on-chain security report. No report, no signals.

use tracing::debug;

use super::catalog::token::{
    BLACKLIST_FUNCTION, BUY_TAX, CREATOR_HOLDS_LARGE_SHARE, FEW_HOLDERS, HIDDEN_OWNER, HONEYPOT,
    HONEYPOT_SELL_TAX, LARGE_HOLDER_PERCENT, LOW_LIQUIDITY, MINTABLE, MIN_HOLDERS,
    MIN_LIQUIDITY_USD, NOT_OPEN_SOURCE, OWNER_CHANGE_BALANCE, OWNER_HOLDS_LARGE_SHARE,
    PARTIAL_LIQUIDITY_LOCK, PARTIAL_LOCK_PERCENT, PROXY_CONTRACT, RECLAIM_OWNERSHIP, SELF_DESTRUCT,
    SELL_TAX, TOP10_CONCENTRATION, TRADING_COOLDOWN, UNLOCKED_LIQUIDITY,
};
use super::equity::format_usd;
use crate::models::{SecurityMetadata, Signal};

/// Emit CONTRACT signals: honeypot, privileged functions, taxes
pub fn contract_signals(security: &SecurityMetadata) -> Vec<Signal> {
    let mut signals = Vec::new();

    if let Some(reason) = honeypot_reason(security) {
        signals.push(HONEYPOT.emit_with(reason));
    }
    if security.owner_change_balance {
        signals.push(OWNER_CHANGE_BALANCE.emit());
    }

    let flags = [
        (security.hidden_owner, &HIDDEN_OWNER),
        (security.is_mintable, &MINTABLE),
        (security.self_destruct, &SELF_DESTRUCT),
        (security.is_open_source == Some(false), &NOT_OPEN_SOURCE),
        (security.is_proxy, &PROXY_CONTRACT),
        (security.can_take_back_ownership, &RECLAIM_OWNERSHIP),
        (security.is_blacklisted, &BLACKLIST_FUNCTION),
        (security.trading_cooldown, &TRADING_COOLDOWN),
    ];
    signals.extend(flags.iter().filter(|(set, _)| *set).map(|(_, def)| def.emit()));

    if let Some(tax) = security.buy_tax {
        if let Some(def) = BUY_TAX.pick(tax) {
            signals.push(def.emit_with(format!("{:.1}%", tax)));
        }
    }
    // a sell tax this high is already reported as a honeypot
    if let Some(tax) = security.sell_tax.filter(|t| *t < HONEYPOT_SELL_TAX) {
        if let Some(def) = SELL_TAX.pick(tax) {
            signals.push(def.emit_with(format!("{:.1}%", tax)));
        }
    }

    debug!(count = signals.len(), "contract signals");
    signals
}

/// Emit LIQUIDITY signals
pub fn liquidity_signals(security: &SecurityMetadata) -> Vec<Signal> {
    let mut signals = Vec::new();
    let liquidity = &security.liquidity;
    let Some(total) = liquidity.total_usd() else {
        return signals;
    };

    // lock state only matters while a pool is actually trading
    if total > 0.0 {
        match liquidity.locked_percent {
            Some(pct) if pct <= 0.0 => signals.push(UNLOCKED_LIQUIDITY.emit_with("0% locked")),
            Some(pct) if pct < PARTIAL_LOCK_PERCENT => {
                signals.push(PARTIAL_LIQUIDITY_LOCK.emit_with(format!("{:.1}% locked", pct)))
            }
            Some(_) => {}
            None if liquidity.locked == Some(false) => signals.push(UNLOCKED_LIQUIDITY.emit()),
            None => {}
        }
    }

    if total < MIN_LIQUIDITY_USD {
        signals.push(LOW_LIQUIDITY.emit_with(format!(
            "{} across {} venue(s)",
            format_usd(total),
            liquidity.venues.len()
        )));
    }

    debug!(count = signals.len(), total_usd = total, "liquidity signals");
    signals
}

/// Emit DISTRIBUTION signals
pub fn distribution_signals(security: &SecurityMetadata) -> Vec<Signal> {
    let mut signals = Vec::new();
    let holders = &security.holders;

    if let Some(top10) = holders.top10_percent() {
        if let Some(def) = TOP10_CONCENTRATION.pick(top10) {
            signals.push(def.emit_with(format!("{:.1}%", top10)));
        }
    }
    if let Some(pct) = holders.creator_percent.filter(|p| *p >= LARGE_HOLDER_PERCENT) {
        signals.push(CREATOR_HOLDS_LARGE_SHARE.emit_with(format!("{:.1}%", pct)));
    }
    if let Some(pct) = holders.owner_percent.filter(|p| *p >= LARGE_HOLDER_PERCENT) {
        signals.push(OWNER_HOLDS_LARGE_SHARE.emit_with(format!("{:.1}%", pct)));
    }
    if let Some(count) = holders.holder_count.filter(|c| *c < MIN_HOLDERS) {
        signals.push(FEW_HOLDERS.emit_with(format!("{} holders", count)));
    }

    debug!(count = signals.len(), "distribution signals");
    signals
}

fn honeypot_reason(security: &SecurityMetadata) -> Option<String> {
    if security.is_honeypot {
        Some("flagged by scanner".to_string())
    } else if security.cannot_sell_all {
        Some("sells are blocked".to_string())
    } else {
        security
            .sell_tax
            .filter(|t| *t >= HONEYPOT_SELL_TAX)
            .map(|t| format!("sell tax {:.0}%", t))
    }
}
