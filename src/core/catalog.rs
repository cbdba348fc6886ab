//! Signal Catalogs
//!
//! Read-only tables, one per asset class: every signal the engine can raise
//! (code, category, weight, description) and the numeric thresholds that
//! trigger them. Generators hold no constants of their own.

use crate::models::{Category, Signal};

/// Catalog entry for one signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDef {
    pub code: &'static str,
    pub category: Category,
    pub weight: u32,
    pub description: &'static str,
    pub critical: bool,
}

impl SignalDef {
    const fn new(code: &'static str, category: Category, weight: u32, description: &'static str) -> Self {
        Self {
            code,
            category,
            weight,
            description,
            critical: false,
        }
    }

    const fn critical(mut self) -> Self {
        self.critical = true;
        self
    }

    /// Raise with the catalog description
    pub fn emit(&self) -> Signal {
        Signal::new(self.code, self.category, self.weight, self.description, self.critical)
    }

    /// Raise with the catalog description followed by the observed value
    pub fn emit_with(&self, detail: impl AsRef<str>) -> Signal {
        Signal::new(
            self.code,
            self.category,
            self.weight,
            format!("{} ({})", self.description, detail.as_ref()),
            self.critical,
        )
    }
}

/// How a metric is compared against a tier threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// metric >= threshold
    AtLeast,
    /// metric > threshold
    Above,
}

impl Bound {
    fn reached(&self, value: f64, threshold: f64) -> bool {
        match self {
            Bound::AtLeast => value >= threshold,
            Bound::Above => value > threshold,
        }
    }
}

/// Two-tier rule over one metric. Only the highest tier reached fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    pub bound: Bound,
    pub significant: f64,
    pub extreme: f64,
    pub significant_signal: SignalDef,
    pub extreme_signal: SignalDef,
}

impl TierRule {
    pub fn pick(&self, value: f64) -> Option<&SignalDef> {
        if self.bound.reached(value, self.extreme) {
            Some(&self.extreme_signal)
        } else if self.bound.reached(value, self.significant) {
            Some(&self.significant_signal)
        } else {
            None
        }
    }
}

/// Score thresholds of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelThresholds {
    pub high: u32,
    pub medium: u32,
}

/// Provider-supplied quote field used when the series is too short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteChange {
    Day,
    Week,
}

/// Price move over a lookback, tiered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMoveRule {
    pub lookback: usize,
    pub fallback: QuoteChange,
    pub tiers: TierRule,
}

/// Pattern detectors shared by both classes, parameterized per class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternProfile {
    pub price_moves: &'static [PriceMoveRule],
    pub volume_recent_days: usize,
    pub volume_surge: TierRule,
    pub spike_then_drop: SignalDef,
    pub volatility: Option<TierRule>,
    pub rsi: Option<TierRule>,
}

// ============================================
// EQUITY
// ============================================

pub mod equity {
    use super::*;

    pub const MICROCAP_PRICE: SignalDef = SignalDef::new(
        "MICROCAP_PRICE",
        Category::Structural,
        2,
        "Penny-stock price below $5",
    );
    pub const SMALL_MARKET_CAP: SignalDef = SignalDef::new(
        "SMALL_MARKET_CAP",
        Category::Structural,
        2,
        "Market capitalization below $300M",
    );
    pub const MICRO_LIQUIDITY: SignalDef = SignalDef::new(
        "MICRO_LIQUIDITY",
        Category::Structural,
        2,
        "Average daily dollar volume below $150K",
    );
    pub const OTC_EXCHANGE: SignalDef = SignalDef::new(
        "OTC_EXCHANGE",
        Category::Structural,
        3,
        "Traded over the counter with lighter disclosure rules",
    );
    pub const PRICE_SURGE_7D: SignalDef = SignalDef::new(
        "PRICE_SURGE_7D",
        Category::Pattern,
        3,
        "Price up 50% or more in 7 days",
    );
    pub const PRICE_SURGE_7D_EXTREME: SignalDef = SignalDef::new(
        "PRICE_SURGE_7D_EXTREME",
        Category::Pattern,
        4,
        "Price up 100% or more in 7 days",
    );
    pub const VOLUME_SURGE: SignalDef = SignalDef::new(
        "VOLUME_SURGE",
        Category::Pattern,
        2,
        "Recent volume 5x or more above the 30-day average",
    );
    pub const VOLUME_SURGE_EXTREME: SignalDef = SignalDef::new(
        "VOLUME_SURGE_EXTREME",
        Category::Pattern,
        3,
        "Recent volume 10x or more above the 30-day average",
    );
    pub const SPIKE_THEN_DROP: SignalDef = SignalDef::new(
        "SPIKE_THEN_DROP",
        Category::Pattern,
        3,
        "Sharp run-up followed by a steep pullback, typical of pump-and-dump",
    );
    pub const REGULATORY_ALERT: SignalDef = SignalDef::new(
        "REGULATORY_ALERT",
        Category::Alert,
        5,
        "Listed on a regulatory alert or trading-suspension list",
    );

    pub const PENNY_PRICE: f64 = 5.0;
    pub const SMALL_CAP: f64 = 300_000_000.0;
    pub const MICRO_DOLLAR_VOLUME: f64 = 150_000.0;
    pub const DOLLAR_VOLUME_DAYS: usize = 30;

    /// Large-cap floor for the insufficient-data and legitimacy rules
    pub const LARGE_CAP: f64 = 10_000_000_000.0;
    /// High-liquidity floor (daily dollar volume) for the same rules
    pub const HIGH_DOLLAR_VOLUME: f64 = 10_000_000.0;
    /// Legitimacy only; quotes without a rank are not penalized
    pub const TOP_RANK: u32 = 500;

    pub const LEVELS: LevelThresholds = LevelThresholds { high: 7, medium: 3 };

    pub const PATTERNS: PatternProfile = PatternProfile {
        price_moves: &[PriceMoveRule {
            lookback: 7,
            fallback: QuoteChange::Week,
            tiers: TierRule {
                bound: Bound::AtLeast,
                significant: 50.0,
                extreme: 100.0,
                significant_signal: PRICE_SURGE_7D,
                extreme_signal: PRICE_SURGE_7D_EXTREME,
            },
        }],
        volume_recent_days: 5,
        volume_surge: TierRule {
            bound: Bound::AtLeast,
            significant: 5.0,
            extreme: 10.0,
            significant_signal: VOLUME_SURGE,
            extreme_signal: VOLUME_SURGE_EXTREME,
        },
        spike_then_drop: SPIKE_THEN_DROP,
        volatility: None,
        rsi: None,
    };

    pub const ALL: [SignalDef; 10] = [
        MICROCAP_PRICE,
        SMALL_MARKET_CAP,
        MICRO_LIQUIDITY,
        OTC_EXCHANGE,
        PRICE_SURGE_7D,
        PRICE_SURGE_7D_EXTREME,
        VOLUME_SURGE,
        VOLUME_SURGE_EXTREME,
        SPIKE_THEN_DROP,
        REGULATORY_ALERT,
    ];
}

// ============================================
// TOKEN
// ============================================

pub mod token {
    use super::*;

    // Structural
    pub const MICRO_MARKET_CAP: SignalDef = SignalDef::new(
        "MICRO_MARKET_CAP",
        Category::Structural,
        3,
        "Market capitalization below $10M",
    );
    pub const LOW_VOLUME: SignalDef = SignalDef::new(
        "LOW_VOLUME",
        Category::Structural,
        2,
        "24h trading volume below $100K",
    );
    pub const LOW_RANK: SignalDef = SignalDef::new(
        "LOW_RANK",
        Category::Structural,
        1,
        "Unranked or ranked below the top 2000",
    );

    // Pattern
    pub const PRICE_SPIKE_24H: SignalDef = SignalDef::new(
        "PRICE_SPIKE_24H",
        Category::Pattern,
        2,
        "Price up 30% or more in 24 hours",
    );
    pub const PRICE_SPIKE_24H_EXTREME: SignalDef = SignalDef::new(
        "PRICE_SPIKE_24H_EXTREME",
        Category::Pattern,
        3,
        "Price up 50% or more in 24 hours",
    );
    pub const PRICE_SPIKE_7D: SignalDef = SignalDef::new(
        "PRICE_SPIKE_7D",
        Category::Pattern,
        3,
        "Price up 100% or more in 7 days",
    );
    pub const PRICE_SPIKE_7D_EXTREME: SignalDef = SignalDef::new(
        "PRICE_SPIKE_7D_EXTREME",
        Category::Pattern,
        4,
        "Price up 200% or more in 7 days",
    );
    pub const NEAR_ATH: SignalDef = SignalDef::new(
        "NEAR_ATH",
        Category::Pattern,
        2,
        "Trading within 5% of its all-time high",
    );
    pub const FAR_BELOW_ATH: SignalDef = SignalDef::new(
        "FAR_BELOW_ATH",
        Category::Pattern,
        2,
        "More than 90% below its all-time high",
    );
    pub const VOLUME_SURGE: SignalDef = SignalDef::new(
        "VOLUME_SURGE",
        Category::Pattern,
        2,
        "24h volume 3x or more above the 30-day average",
    );
    pub const VOLUME_SURGE_EXTREME: SignalDef = SignalDef::new(
        "VOLUME_SURGE_EXTREME",
        Category::Pattern,
        3,
        "24h volume 5x or more above the 30-day average",
    );
    pub const SPIKE_THEN_DROP: SignalDef = SignalDef::new(
        "SPIKE_THEN_DROP",
        Category::Pattern,
        4,
        "Sharp run-up followed by a steep pullback, typical of pump-and-dump",
    );
    pub const HIGH_VOLATILITY: SignalDef = SignalDef::new(
        "HIGH_VOLATILITY",
        Category::Pattern,
        1,
        "Daily volatility of 10% or more",
    );
    pub const EXTREME_VOLATILITY: SignalDef = SignalDef::new(
        "EXTREME_VOLATILITY",
        Category::Pattern,
        2,
        "Daily volatility of 20% or more",
    );
    pub const OVERBOUGHT_RSI: SignalDef = SignalDef::new(
        "OVERBOUGHT_RSI",
        Category::Pattern,
        1,
        "RSI above 70 (overbought)",
    );
    pub const EXTREME_RSI: SignalDef = SignalDef::new(
        "EXTREME_RSI",
        Category::Pattern,
        2,
        "RSI above 80 (extremely overbought)",
    );

    // Contract
    pub const HONEYPOT: SignalDef = SignalDef::new(
        "HONEYPOT",
        Category::Contract,
        10,
        "Honeypot: holders can buy but cannot sell",
    )
    .critical();
    pub const OWNER_CHANGE_BALANCE: SignalDef = SignalDef::new(
        "OWNER_CHANGE_BALANCE",
        Category::Contract,
        8,
        "Owner can modify holder balances",
    )
    .critical();
    pub const HIDDEN_OWNER: SignalDef = SignalDef::new(
        "HIDDEN_OWNER",
        Category::Contract,
        6,
        "Contract has a hidden owner",
    );
    pub const MINTABLE: SignalDef = SignalDef::new(
        "MINTABLE",
        Category::Contract,
        5,
        "Owner can mint new tokens",
    );
    pub const SELF_DESTRUCT: SignalDef = SignalDef::new(
        "SELF_DESTRUCT",
        Category::Contract,
        4,
        "Contract can self-destruct",
    );
    pub const NOT_OPEN_SOURCE: SignalDef = SignalDef::new(
        "NOT_OPEN_SOURCE",
        Category::Contract,
        4,
        "Contract source is not verified",
    );
    pub const PROXY_CONTRACT: SignalDef = SignalDef::new(
        "PROXY_CONTRACT",
        Category::Contract,
        3,
        "Upgradeable proxy: code can be swapped",
    );
    pub const RECLAIM_OWNERSHIP: SignalDef = SignalDef::new(
        "RECLAIM_OWNERSHIP",
        Category::Contract,
        3,
        "Renounced ownership can be reclaimed",
    );
    pub const BLACKLIST_FUNCTION: SignalDef = SignalDef::new(
        "BLACKLIST_FUNCTION",
        Category::Contract,
        3,
        "Owner can blacklist addresses from trading",
    );
    pub const TRADING_COOLDOWN: SignalDef = SignalDef::new(
        "TRADING_COOLDOWN",
        Category::Contract,
        1,
        "Trading cooldown between transactions",
    );
    pub const HIGH_BUY_TAX: SignalDef = SignalDef::new(
        "HIGH_BUY_TAX",
        Category::Contract,
        2,
        "Buy tax of 10% or more",
    );
    pub const EXTREME_BUY_TAX: SignalDef = SignalDef::new(
        "EXTREME_BUY_TAX",
        Category::Contract,
        3,
        "Buy tax of 25% or more",
    );
    pub const HIGH_SELL_TAX: SignalDef = SignalDef::new(
        "HIGH_SELL_TAX",
        Category::Contract,
        3,
        "Sell tax of 10% or more",
    );
    pub const EXTREME_SELL_TAX: SignalDef = SignalDef::new(
        "EXTREME_SELL_TAX",
        Category::Contract,
        4,
        "Sell tax of 25% or more",
    );

    // Liquidity
    pub const UNLOCKED_LIQUIDITY: SignalDef = SignalDef::new(
        "UNLOCKED_LIQUIDITY",
        Category::Liquidity,
        5,
        "Liquidity is not locked and can be pulled",
    );
    pub const PARTIAL_LIQUIDITY_LOCK: SignalDef = SignalDef::new(
        "PARTIAL_LIQUIDITY_LOCK",
        Category::Liquidity,
        3,
        "Less than half of the liquidity is locked",
    );
    pub const LOW_LIQUIDITY: SignalDef = SignalDef::new(
        "LOW_LIQUIDITY",
        Category::Liquidity,
        2,
        "Total liquidity below $50K",
    );

    // Distribution
    pub const WHALE_CONCENTRATION: SignalDef = SignalDef::new(
        "WHALE_CONCENTRATION",
        Category::Distribution,
        3,
        "Top 10 holders own 50% or more",
    );
    pub const WHALE_CONCENTRATION_EXTREME: SignalDef = SignalDef::new(
        "WHALE_CONCENTRATION_EXTREME",
        Category::Distribution,
        4,
        "Top 10 holders own 70% or more",
    );
    pub const CREATOR_HOLDS_LARGE_SHARE: SignalDef = SignalDef::new(
        "CREATOR_HOLDS_LARGE_SHARE",
        Category::Distribution,
        3,
        "Creator wallet holds 20% or more",
    );
    pub const OWNER_HOLDS_LARGE_SHARE: SignalDef = SignalDef::new(
        "OWNER_HOLDS_LARGE_SHARE",
        Category::Distribution,
        2,
        "Owner wallet holds 20% or more",
    );
    pub const FEW_HOLDERS: SignalDef = SignalDef::new(
        "FEW_HOLDERS",
        Category::Distribution,
        2,
        "Fewer than 500 holders",
    );

    pub const MICRO_CAP: f64 = 10_000_000.0;
    pub const MIN_VOLUME_24H: f64 = 100_000.0;
    pub const MAX_RANK: u32 = 2000;
    /// Price at or above this fraction of the ATH counts as near it
    pub const NEAR_ATH_RATIO: f64 = 0.95;
    /// Price below this fraction of the ATH counts as far below it
    pub const FAR_BELOW_ATH_RATIO: f64 = 0.10;

    /// Sell tax at or above this makes the token a honeypot
    pub const HONEYPOT_SELL_TAX: f64 = 50.0;
    pub const PARTIAL_LOCK_PERCENT: f64 = 50.0;
    pub const MIN_LIQUIDITY_USD: f64 = 50_000.0;
    pub const LARGE_HOLDER_PERCENT: f64 = 20.0;
    pub const MIN_HOLDERS: u64 = 500;

    /// Legitimacy profile: large cap, high volume, top ranked
    pub const LARGE_CAP: f64 = 1_000_000_000.0;
    pub const HIGH_VOLUME_24H: f64 = 10_000_000.0;
    pub const TOP_RANK: u32 = 100;

    pub const LEVELS: LevelThresholds = LevelThresholds { high: 10, medium: 5 };

    pub const BUY_TAX: TierRule = TierRule {
        bound: Bound::AtLeast,
        significant: 10.0,
        extreme: 25.0,
        significant_signal: HIGH_BUY_TAX,
        extreme_signal: EXTREME_BUY_TAX,
    };

    pub const SELL_TAX: TierRule = TierRule {
        bound: Bound::AtLeast,
        significant: 10.0,
        extreme: 25.0,
        significant_signal: HIGH_SELL_TAX,
        extreme_signal: EXTREME_SELL_TAX,
    };

    pub const TOP10_CONCENTRATION: TierRule = TierRule {
        bound: Bound::AtLeast,
        significant: 50.0,
        extreme: 70.0,
        significant_signal: WHALE_CONCENTRATION,
        extreme_signal: WHALE_CONCENTRATION_EXTREME,
    };

    pub const PATTERNS: PatternProfile = PatternProfile {
        price_moves: &[
            PriceMoveRule {
                lookback: 1,
                fallback: QuoteChange::Day,
                tiers: TierRule {
                    bound: Bound::AtLeast,
                    significant: 30.0,
                    extreme: 50.0,
                    significant_signal: PRICE_SPIKE_24H,
                    extreme_signal: PRICE_SPIKE_24H_EXTREME,
                },
            },
            PriceMoveRule {
                lookback: 7,
                fallback: QuoteChange::Week,
                tiers: TierRule {
                    bound: Bound::AtLeast,
                    significant: 100.0,
                    extreme: 200.0,
                    significant_signal: PRICE_SPIKE_7D,
                    extreme_signal: PRICE_SPIKE_7D_EXTREME,
                },
            },
        ],
        volume_recent_days: 1,
        volume_surge: TierRule {
            bound: Bound::AtLeast,
            significant: 3.0,
            extreme: 5.0,
            significant_signal: VOLUME_SURGE,
            extreme_signal: VOLUME_SURGE_EXTREME,
        },
        spike_then_drop: SPIKE_THEN_DROP,
        volatility: Some(TierRule {
            bound: Bound::AtLeast,
            significant: 10.0,
            extreme: 20.0,
            significant_signal: HIGH_VOLATILITY,
            extreme_signal: EXTREME_VOLATILITY,
        }),
        rsi: Some(TierRule {
            bound: Bound::Above,
            significant: 70.0,
            extreme: 80.0,
            significant_signal: OVERBOUGHT_RSI,
            extreme_signal: EXTREME_RSI,
        }),
    };

    pub const ALL: [SignalDef; 38] = [
        MICRO_MARKET_CAP,
        LOW_VOLUME,
        LOW_RANK,
        PRICE_SPIKE_24H,
        PRICE_SPIKE_24H_EXTREME,
        PRICE_SPIKE_7D,
        PRICE_SPIKE_7D_EXTREME,
        NEAR_ATH,
        FAR_BELOW_ATH,
        VOLUME_SURGE,
        VOLUME_SURGE_EXTREME,
        SPIKE_THEN_DROP,
        HIGH_VOLATILITY,
        EXTREME_VOLATILITY,
        OVERBOUGHT_RSI,
        EXTREME_RSI,
        HONEYPOT,
        OWNER_CHANGE_BALANCE,
        HIDDEN_OWNER,
        MINTABLE,
        SELF_DESTRUCT,
        NOT_OPEN_SOURCE,
        PROXY_CONTRACT,
        RECLAIM_OWNERSHIP,
        BLACKLIST_FUNCTION,
        TRADING_COOLDOWN,
        HIGH_BUY_TAX,
        EXTREME_BUY_TAX,
        HIGH_SELL_TAX,
        EXTREME_SELL_TAX,
        UNLOCKED_LIQUIDITY,
        PARTIAL_LIQUIDITY_LOCK,
        LOW_LIQUIDITY,
        WHALE_CONCENTRATION,
        WHALE_CONCENTRATION_EXTREME,
        CREATOR_HOLDS_LARGE_SHARE,
        OWNER_HOLDS_LARGE_SHARE,
        FEW_HOLDERS,
    ];
}

// ============================================
// BEHAVIORAL (shared codes and weights)
// ============================================

pub mod behavioral {
    use super::*;

    pub const UNSOLICITED_CONTACT: SignalDef = SignalDef::new(
        "UNSOLICITED_CONTACT",
        Category::Behavioral,
        1,
        "Pitch arrived through unsolicited contact",
    );
    pub const PROMISED_RETURNS: SignalDef = SignalDef::new(
        "PROMISED_RETURNS",
        Category::Behavioral,
        2,
        "Promises of high or guaranteed returns",
    );
    pub const URGENCY_PRESSURE: SignalDef = SignalDef::new(
        "URGENCY_PRESSURE",
        Category::Behavioral,
        2,
        "Pressure to act immediately",
    );
    pub const SECRECY_CLAIMS: SignalDef = SignalDef::new(
        "SECRECY_CLAIMS",
        Category::Behavioral,
        2,
        "Claims of secret or insider information",
    );
    pub const SPECIFIC_RETURN_CLAIM: SignalDef = SignalDef::new(
        "SPECIFIC_RETURN_CLAIM",
        Category::Behavioral,
        1,
        "Specific return promised within a short timeframe",
    );

    pub const ALL: [SignalDef; 5] = [
        UNSOLICITED_CONTACT,
        PROMISED_RETURNS,
        URGENCY_PRESSURE,
        SECRECY_CLAIMS,
        SPECIFIC_RETURN_CLAIM,
    ];
}
