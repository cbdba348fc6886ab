//! Type definitions for scoring inputs
//!
//! Everything the caller hands to the engine for one evaluation. Values are
//! validated once at the boundary (`ScoringInput::validate`, `PriceSeries::new`)
//! and treated as immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{AppError, AppResult};

/// Instrument family. Thresholds, catalogs and categories differ per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    #[serde(alias = "equity", alias = "stock", alias = "STOCK")]
    Equity,
    #[serde(alias = "token", alias = "crypto", alias = "CRYPTO")]
    Token,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "EQUITY",
            AssetClass::Token => "TOKEN",
        }
    }
}

/// One observation of a price series.
///
/// Volumes are share counts for equities and quote-currency (USD) amounts for
/// tokens, the same units the quote uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            close,
            volume,
        }
    }
}

/// Strictly chronological price/volume series.
///
/// Construction rejects out-of-order or duplicate timestamps and negative or
/// non-finite values, so every analytics function can rely on ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> AppResult<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() || point.close < 0.0 {
                return Err(AppError::invalid_price_point(format!(
                    "point {} has invalid close {}",
                    i, point.close
                )));
            }
            if !point.volume.is_finite() || point.volume < 0.0 {
                return Err(AppError::invalid_price_point(format!(
                    "point {} has invalid volume {}",
                    i, point.volume
                )));
            }
        }

        if let Some(i) = points
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(AppError::non_chronological(format!(
                "point {} ({}) does not follow point {} ({})",
                i + 1,
                points[i + 1].timestamp.to_rfc3339(),
                i,
                points[i].timestamp.to_rfc3339()
            )));
        }

        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.volume).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = AppError;

    fn try_from(points: Vec<PricePoint>) -> AppResult<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// Point-in-time market snapshot from the data provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exchange name (equity) or chain identifier (token)
    #[serde(default)]
    pub venue: String,
    pub price: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default, alias = "volume")]
    pub volume_24h: Option<f64>,
    /// Average daily volume over the last 30 days
    #[serde(default)]
    pub avg_volume_30d: Option<f64>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub change_24h_pct: Option<f64>,
    #[serde(default)]
    pub change_7d_pct: Option<f64>,
    #[serde(default, alias = "ath")]
    pub all_time_high: Option<f64>,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, venue: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            venue: venue.into(),
            price,
            ..Default::default()
        }
    }

    fn validate(&self) -> AppResult<()> {
        check_amount("price", Some(self.price)).map_err(AppError::invalid_quote)?;
        check_amount("marketCap", self.market_cap).map_err(AppError::invalid_quote)?;
        check_amount("volume24h", self.volume_24h).map_err(AppError::invalid_quote)?;
        check_amount("avgVolume30d", self.avg_volume_30d).map_err(AppError::invalid_quote)?;
        check_amount("allTimeHigh", self.all_time_high).map_err(AppError::invalid_quote)?;

        for (name, change) in [
            ("change24hPct", self.change_24h_pct),
            ("change7dPct", self.change_7d_pct),
        ] {
            if let Some(v) = change {
                if !v.is_finite() || v < -100.0 {
                    return Err(AppError::invalid_quote(format!("{} out of range: {}", name, v)));
                }
            }
        }

        if self.rank == Some(0) {
            return Err(AppError::invalid_quote("rank starts at 1"));
        }

        Ok(())
    }
}

/// Liquidity held on one trading venue (pool / DEX)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLiquidity {
    pub venue: String,
    pub liquidity_usd: f64,
}

/// Holder distribution of a token. Percentages are 0-100 of total supply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HolderData {
    pub top_holder_percents: Vec<f64>,
    pub creator_percent: Option<f64>,
    pub owner_percent: Option<f64>,
    pub holder_count: Option<u64>,
}

impl HolderData {
    /// Share of supply held by the ten largest holders
    pub fn top10_percent(&self) -> Option<f64> {
        if self.top_holder_percents.is_empty() {
            return None;
        }
        let mut sorted = self.top_holder_percents.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        Some(sorted.iter().take(10).sum())
    }
}

/// Liquidity pool state of a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiquidityData {
    pub venues: Vec<VenueLiquidity>,
    pub locked_percent: Option<f64>,
    pub locked: Option<bool>,
}

impl LiquidityData {
    pub fn total_usd(&self) -> Option<f64> {
        if self.venues.is_empty() {
            None
        } else {
            Some(self.venues.iter().map(|v| v.liquidity_usd).sum())
        }
    }
}

/// On-chain contract security report for a token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityMetadata {
    /// `None` when the scanner could not tell
    pub is_open_source: Option<bool>,
    pub is_mintable: bool,
    pub is_proxy: bool,
    pub hidden_owner: bool,
    pub self_destruct: bool,
    pub can_take_back_ownership: bool,
    pub owner_change_balance: bool,
    pub is_blacklisted: bool,
    pub trading_cooldown: bool,
    pub is_honeypot: bool,
    pub cannot_sell_all: bool,
    /// Percent, 0-100
    pub buy_tax: Option<f64>,
    /// Percent, 0-100
    pub sell_tax: Option<f64>,
    pub holders: HolderData,
    pub liquidity: LiquidityData,
}

impl SecurityMetadata {
    fn validate(&self) -> AppResult<()> {
        let percents = [
            ("buyTax", self.buy_tax),
            ("sellTax", self.sell_tax),
            ("creatorPercent", self.holders.creator_percent),
            ("ownerPercent", self.holders.owner_percent),
            ("lockedPercent", self.liquidity.locked_percent),
        ];
        for (name, value) in percents {
            check_percent(name, value).map_err(AppError::invalid_security_data)?;
        }
        for value in &self.holders.top_holder_percents {
            check_percent("topHolderPercents", Some(*value))
                .map_err(AppError::invalid_security_data)?;
        }
        for venue in &self.liquidity.venues {
            check_amount("liquidityUsd", Some(venue.liquidity_usd))
                .map_err(AppError::invalid_security_data)?;
        }
        Ok(())
    }
}

/// Caller-declared circumstances of the pitch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehavioralContext {
    pub unsolicited: bool,
    pub promises_high_returns: bool,
    pub urgency_pressure: bool,
    pub secrecy_inside_info: bool,
}

impl BehavioralContext {
    pub fn all() -> Self {
        Self {
            unsolicited: true,
            promises_high_returns: true,
            urgency_pressure: true,
            secrecy_inside_info: true,
        }
    }
}

/// Market data as resolved by the fetching layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketData {
    pub quote: Option<Quote>,
    pub price_series: PriceSeries,
    #[serde(rename = "isOTC", alias = "isOtc")]
    pub is_otc: bool,
    pub data_available: bool,
    /// Reason string from the regulatory alert-list lookup, when listed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_alert: Option<String>,
}

impl MarketData {
    pub fn available(quote: Quote, price_series: PriceSeries) -> Self {
        Self {
            quote: Some(quote),
            price_series,
            data_available: true,
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Quote that may be used for scoring
    pub fn usable_quote(&self) -> Option<&Quote> {
        if self.data_available {
            self.quote.as_ref()
        } else {
            None
        }
    }
}

/// Everything needed for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    pub asset_class: AssetClass,
    pub symbol: String,
    #[serde(default)]
    pub market_data: MarketData,
    #[serde(default)]
    pub security_data: Option<SecurityMetadata>,
    #[serde(default)]
    pub pitch_text: String,
    #[serde(default)]
    pub context: BehavioralContext,
}

impl ScoringInput {
    pub fn new(asset_class: AssetClass, symbol: impl Into<String>, market_data: MarketData) -> Self {
        Self {
            asset_class,
            symbol: symbol.into(),
            market_data,
            security_data: None,
            pitch_text: String::new(),
            context: BehavioralContext::default(),
        }
    }

    pub fn with_security(mut self, security: SecurityMetadata) -> Self {
        self.security_data = Some(security);
        self
    }

    pub fn with_pitch(mut self, pitch_text: impl Into<String>) -> Self {
        self.pitch_text = pitch_text.into();
        self
    }

    pub fn with_context(mut self, context: BehavioralContext) -> Self {
        self.context = context;
        self
    }

    /// Reject malformed input before any generator runs.
    ///
    /// The series is already checked by `PriceSeries::new`.
    pub fn validate(&self) -> AppResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(AppError::missing_symbol());
        }
        if let Some(quote) = &self.market_data.quote {
            quote.validate()?;
        }
        if let Some(security) = &self.security_data {
            if self.asset_class != AssetClass::Token {
                return Err(AppError::unexpected_security_data());
            }
            security.validate()?;
        }
        Ok(())
    }
}

fn check_amount(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(format!("{} must be a non-negative number, got {}", name, v)),
        _ => Ok(()),
    }
}

fn check_percent(name: &str, value: Option<f64>) -> Result<(), String> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=100.0).contains(&v) => {
            Err(format!("{} must be within 0-100, got {}", name, v))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use chrono::{Duration, TimeZone};

    fn day(i: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(i)
    }

    #[test]
    fn test_series_rejects_out_of_order_points() {
        let points = vec![
            PricePoint::new(day(0), 1.0, 10.0),
            PricePoint::new(day(2), 1.1, 10.0),
            PricePoint::new(day(1), 1.2, 10.0),
        ];
        let err = PriceSeries::new(points).unwrap_err();
        assert_eq!(err.code, ErrorCode::InputNonChronologicalSeries);
    }

    #[test]
    fn test_series_rejects_duplicate_timestamps() {
        let points = vec![
            PricePoint::new(day(0), 1.0, 10.0),
            PricePoint::new(day(0), 1.1, 10.0),
        ];
        assert!(PriceSeries::new(points).is_err());
    }

    #[test]
    fn test_series_rejects_negative_close() {
        let points = vec![PricePoint::new(day(0), -1.0, 10.0)];
        let err = PriceSeries::new(points).unwrap_err();
        assert_eq!(err.code, ErrorCode::InputInvalidPricePoint);
    }

    #[test]
    fn test_series_deserialize_validates() {
        let json = r#"[
            {"timestamp": "2024-01-02T00:00:00Z", "close": 1.0, "volume": 5.0},
            {"timestamp": "2024-01-01T00:00:00Z", "close": 1.0, "volume": 5.0}
        ]"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());

        let json = r#"[
            {"timestamp": "2024-01-01T00:00:00Z", "close": 1.0, "volume": 5.0},
            {"timestamp": "2024-01-02T00:00:00Z", "close": 2.0}
        ]"#;
        let series: PriceSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_close(), Some(2.0));
    }

    #[test]
    fn test_top10_percent_sums_largest_holders() {
        let holders = HolderData {
            top_holder_percents: vec![1.0, 20.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 30.0],
            ..Default::default()
        };
        assert_eq!(holders.top10_percent(), Some(90.0));
        assert_eq!(HolderData::default().top10_percent(), None);
    }

    #[test]
    fn test_validate_rejects_bad_percent() {
        let input = ScoringInput::new(AssetClass::Token, "MOON", MarketData::unavailable())
            .with_security(SecurityMetadata {
                sell_tax: Some(120.0),
                ..Default::default()
            });
        let err = input.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InputInvalidSecurityData);
    }

    #[test]
    fn test_validate_rejects_security_on_equity() {
        let input = ScoringInput::new(AssetClass::Equity, "ACME", MarketData::unavailable())
            .with_security(SecurityMetadata::default());
        let err = input.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InputUnexpectedSecurityData);
    }

    #[test]
    fn test_validate_rejects_negative_market_cap() {
        let mut quote = Quote::new("ACME", "NYSE", 10.0);
        quote.market_cap = Some(-5.0);
        let input = ScoringInput::new(
            AssetClass::Equity,
            "ACME",
            MarketData::available(quote, PriceSeries::empty()),
        );
        assert_eq!(input.validate().unwrap_err().code, ErrorCode::InputInvalidQuote);
    }

    #[test]
    fn test_input_wire_format() {
        let json = r#"{
            "assetClass": "equity",
            "symbol": "ACME",
            "marketData": {
                "quote": {"symbol": "ACME", "venue": "OTC", "price": 2.5, "marketCap": 50000000},
                "priceSeries": [],
                "isOTC": true,
                "dataAvailable": true
            },
            "pitchText": "act now",
            "context": {"unsolicited": true, "secrecyInsideInfo": true}
        }"#;
        let input: ScoringInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.asset_class, AssetClass::Equity);
        assert!(input.market_data.is_otc);
        assert!(input.context.unsolicited);
        assert!(!input.context.urgency_pressure);
        assert!(input.market_data.usable_quote().is_some());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_unavailable_market_data_hides_quote() {
        let data = MarketData {
            quote: Some(Quote::new("ACME", "NYSE", 1.0)),
            data_available: false,
            ..Default::default()
        };
        assert!(data.usable_quote().is_none());
    }
}
