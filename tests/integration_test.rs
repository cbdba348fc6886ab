//! Integration tests for the scoring engine

use chrono::{Duration, TimeZone, Utc};
use scam_radar::{
    compute_risk_score, evaluate, group_by_category, AssetClass, BehavioralContext, Category,
    ErrorCode, MarketData, PricePoint, PriceSeries, Quote, RiskLevel, ScoringInput,
    SecurityMetadata,
};

fn daily_series(closes: &[f64], volume: f64) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, close)| PricePoint::new(start + Duration::days(i as i64), *close, volume))
        .collect();
    PriceSeries::new(points).unwrap()
}

fn pump_series() -> PriceSeries {
    let mut closes = vec![2.0; 20];
    closes.extend([2.5, 3.0, 3.5, 4.0, 3.2, 2.6, 2.2]);
    daily_series(&closes, 200_000.0)
}

fn equity_input(price: f64, market_cap: f64, venue: &str) -> ScoringInput {
    let mut quote = Quote::new("ACME", venue, price);
    quote.market_cap = Some(market_cap);
    quote.avg_volume_30d = Some(2_000_000.0);
    ScoringInput::new(
        AssetClass::Equity,
        "ACME",
        MarketData::available(quote, PriceSeries::empty()),
    )
}

fn token_input(market_cap: f64) -> ScoringInput {
    let mut quote = Quote::new("MOON", "bsc", 0.02);
    quote.market_cap = Some(market_cap);
    quote.volume_24h = Some(400_000.0);
    quote.rank = Some(900);
    ScoringInput::new(
        AssetClass::Token,
        "MOON",
        MarketData::available(quote, PriceSeries::empty()),
    )
}

fn equity_pump_pitch() -> ScoringInput {
    let mut quote = Quote::new("PUMPY", "OTC", 2.5);
    quote.market_cap = Some(50_000_000.0);
    let mut market = MarketData::available(quote, pump_series());
    market.is_otc = true;

    ScoringInput::new(AssetClass::Equity, "PUMPY", market)
        .with_context(BehavioralContext::all())
        .with_pitch("This is guaranteed to run. Act now, my insider contact says merger news is coming.")
}

fn large_cap_equity() -> ScoringInput {
    let mut quote = Quote::new("AAPL", "NASDAQ", 178.5);
    quote.market_cap = Some(2_800_000_000_000.0);
    ScoringInput::new(
        AssetClass::Equity,
        "AAPL",
        MarketData::available(quote, daily_series(&[178.5; 60], 50_000_000.0)),
    )
}

fn honeypot_token() -> ScoringInput {
    let mut quote = Quote::new("HONEY", "ethereum", 1.25);
    quote.market_cap = Some(1_000_000_000.0);
    quote.volume_24h = Some(50_000_000.0);
    quote.rank = Some(50);
    ScoringInput::new(
        AssetClass::Token,
        "HONEY",
        MarketData::available(quote, PriceSeries::empty()),
    )
    .with_security(SecurityMetadata {
        is_honeypot: true,
        is_open_source: Some(true),
        ..Default::default()
    })
}

fn scenarios() -> Vec<ScoringInput> {
    vec![
        equity_pump_pitch(),
        large_cap_equity(),
        honeypot_token(),
        equity_input(4.99, 100_000_000.0, "NYSE"),
        token_input(9_999_999.0),
        ScoringInput::new(AssetClass::Token, "GHOST", MarketData::unavailable()),
    ]
}

#[test]
fn test_equity_pump_pitch_is_high() {
    let result = evaluate(&equity_pump_pitch()).unwrap();
    for code in [
        "OTC_EXCHANGE",
        "MICROCAP_PRICE",
        "SMALL_MARKET_CAP",
        "SPIKE_THEN_DROP",
        "UNSOLICITED_CONTACT",
        "PROMISED_RETURNS",
        "URGENCY_PRESSURE",
        "SECRECY_CLAIMS",
    ] {
        assert!(result.has_code(code), "missing {}: {:?}", code, result.codes());
    }
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(!result.is_insufficient);
    assert!(!result.is_legitimate);
}

#[test]
fn test_legitimate_large_cap_is_insufficient() {
    let result = evaluate(&large_cap_equity()).unwrap();
    assert!(result.signals.is_empty(), "{:?}", result.codes());
    assert_eq!(result.total_score, 0);
    assert!(result.is_insufficient);
    assert_eq!(result.risk_level, RiskLevel::Insufficient);
    assert!(result.is_legitimate);
}

#[test]
fn test_honeypot_token_is_high_and_not_legitimate() {
    let result = evaluate(&honeypot_token()).unwrap();
    assert!(result.has_code("HONEYPOT"));
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(!result.is_legitimate);
}

#[test]
fn test_critical_override_below_threshold() {
    let input = token_input(500_000_000.0).with_security(SecurityMetadata {
        owner_change_balance: true,
        ..Default::default()
    });
    let result = evaluate(&input).unwrap();
    assert_eq!(result.codes(), vec!["OWNER_CHANGE_BALANCE"]);
    assert!(result.total_score < 10);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_equity_price_boundary() {
    let at = evaluate(&equity_input(5.00, 100_000_000.0, "NYSE")).unwrap();
    assert!(!at.has_code("MICROCAP_PRICE"));

    let below = evaluate(&equity_input(4.99, 100_000_000.0, "NYSE")).unwrap();
    assert!(below.has_code("MICROCAP_PRICE"));
}

#[test]
fn test_token_market_cap_boundary() {
    let at = evaluate(&token_input(10_000_000.0)).unwrap();
    assert!(!at.has_code("MICRO_MARKET_CAP"));

    let below = evaluate(&token_input(9_999_999.0)).unwrap();
    assert!(below.has_code("MICRO_MARKET_CAP"));
}

#[test]
fn test_determinism() {
    for input in scenarios() {
        let first = serde_json::to_string(&compute_risk_score(&input)).unwrap();
        let second = serde_json::to_string(&compute_risk_score(&input)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_score_additivity() {
    for input in scenarios() {
        let result = compute_risk_score(&input);
        let sum: u32 = result.signals.iter().map(|s| s.weight).sum();
        assert_eq!(result.total_score, sum);
        assert!(result.signals.iter().all(|s| s.weight >= 1));
    }
}

#[test]
fn test_category_partition() {
    for input in scenarios() {
        let result = compute_risk_score(&input);
        let index = group_by_category(&result.signals, input.asset_class);

        assert_eq!(index.signal_count(), result.signals.len());
        let class_categories = Category::for_class(input.asset_class);
        assert_eq!(index.groups.len(), class_categories.len());
        for group in &index.groups {
            assert!(group.signals.iter().all(|s| s.category == group.category));
        }
        assert_eq!(index, group_by_category(&result.signals, input.asset_class));
    }
}

#[test]
fn test_behavioral_flags_are_monotonic() {
    type Flag = fn(&mut BehavioralContext);
    let flags: [Flag; 4] = [
        |c| c.unsolicited = true,
        |c| c.promises_high_returns = true,
        |c| c.urgency_pressure = true,
        |c| c.secrecy_inside_info = true,
    ];

    for base in scenarios() {
        let before = compute_risk_score(&base);
        for set_flag in flags {
            let mut context = base.context;
            set_flag(&mut context);
            let after = compute_risk_score(&base.clone().with_context(context));
            assert!(after.total_score >= before.total_score, "{}", base.symbol);
            assert!(after.risk_level >= before.risk_level, "{}", base.symbol);
        }
    }
}

#[test]
fn test_unavailable_data_is_insufficient_even_with_signals() {
    let pitched = ScoringInput::new(AssetClass::Equity, "GHOST", MarketData::unavailable())
        .with_context(BehavioralContext::all())
        .with_pitch("Ape in now, this is alpha from the dev. 100x in 14 days guaranteed");
    let result = evaluate(&pitched).unwrap();
    assert!(result.has_code("SPECIFIC_RETURN_CLAIM"));
    assert!(result.total_score >= 7);
    assert!(result.is_insufficient);
    assert_eq!(result.risk_level, RiskLevel::Insufficient);

    let flagged = ScoringInput::new(AssetClass::Token, "GHOST", MarketData::unavailable())
        .with_security(SecurityMetadata {
            is_mintable: true,
            hidden_owner: true,
            ..Default::default()
        });
    let result = evaluate(&flagged).unwrap();
    assert_eq!(result.total_score, 11);
    assert!(result.is_insufficient);
    assert_eq!(result.risk_level, RiskLevel::Insufficient);

    let honeypot = ScoringInput::new(AssetClass::Token, "GHOST", MarketData::unavailable())
        .with_security(SecurityMetadata {
            is_honeypot: true,
            ..Default::default()
        });
    let result = evaluate(&honeypot).unwrap();
    assert!(!result.is_insufficient);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_wire_input_round_trip() {
    let json = r#"{
        "assetClass": "TOKEN",
        "symbol": "RUG",
        "marketData": {
            "quote": {"symbol": "RUG", "venue": "bsc", "price": 0.0001, "marketCap": 80000, "volume24h": 1500, "rank": null},
            "priceSeries": [],
            "isOTC": false,
            "dataAvailable": true
        },
        "securityData": {
            "isOpenSource": false,
            "isMintable": true,
            "sellTax": 30,
            "holders": {"topHolderPercents": [60, 15], "holderCount": 42},
            "liquidity": {"venues": [{"venue": "pancakeswap", "liquidityUsd": 9000}], "lockedPercent": 0}
        },
        "pitchText": "",
        "context": {}
    }"#;
    let input: ScoringInput = serde_json::from_str(json).unwrap();
    let result = evaluate(&input).unwrap();

    assert_eq!(result.risk_level, RiskLevel::High);
    for code in [
        "MICRO_MARKET_CAP",
        "LOW_VOLUME",
        "LOW_RANK",
        "MINTABLE",
        "NOT_OPEN_SOURCE",
        "EXTREME_SELL_TAX",
        "UNLOCKED_LIQUIDITY",
        "LOW_LIQUIDITY",
        "WHALE_CONCENTRATION_EXTREME",
        "FEW_HOLDERS",
    ] {
        assert!(result.has_code(code), "missing {}", code);
    }

    let out = serde_json::to_value(&result).unwrap();
    assert_eq!(out["riskLevel"], "HIGH");
    assert_eq!(out["signals"][0]["category"], "STRUCTURAL");
    assert!(out["totalScore"].as_u64().unwrap() >= 10);
}

#[test]
fn test_rejects_malformed_input() {
    let json = r#"{
        "assetClass": "EQUITY",
        "symbol": "ACME",
        "marketData": {
            "priceSeries": [
                {"timestamp": "2024-03-02T00:00:00Z", "close": 1.0},
                {"timestamp": "2024-03-01T00:00:00Z", "close": 1.1}
            ]
        }
    }"#;
    assert!(serde_json::from_str::<ScoringInput>(json).is_err());

    let input = equity_input(10.0, 1e9, "NYSE").with_security(SecurityMetadata::default());
    assert_eq!(
        evaluate(&input).unwrap_err().code,
        ErrorCode::InputUnexpectedSecurityData
    );
}
