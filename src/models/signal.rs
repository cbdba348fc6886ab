//! Signal and verdict types produced by the engine

use serde::Serialize;

use super::types::AssetClass;

/// Signal family. Each asset class uses a fixed subset (see [`Category::for_class`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Structural,
    Pattern,
    /// Regulatory alert lists (equity)
    Alert,
    /// Contract security (token)
    Contract,
    Liquidity,
    Distribution,
    Behavioral,
}

const EQUITY_CATEGORIES: [Category; 4] = [
    Category::Structural,
    Category::Pattern,
    Category::Alert,
    Category::Behavioral,
];

const TOKEN_CATEGORIES: [Category; 6] = [
    Category::Structural,
    Category::Pattern,
    Category::Contract,
    Category::Liquidity,
    Category::Distribution,
    Category::Behavioral,
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structural => "STRUCTURAL",
            Category::Pattern => "PATTERN",
            Category::Alert => "ALERT",
            Category::Contract => "CONTRACT",
            Category::Liquidity => "LIQUIDITY",
            Category::Distribution => "DISTRIBUTION",
            Category::Behavioral => "BEHAVIORAL",
        }
    }

    /// Categories of an asset class, in report order
    pub fn for_class(class: AssetClass) -> &'static [Category] {
        match class {
            AssetClass::Equity => &EQUITY_CATEGORIES,
            AssetClass::Token => &TOKEN_CATEGORIES,
        }
    }

    pub fn belongs_to(&self, class: AssetClass) -> bool {
        Self::for_class(class).contains(self)
    }
}

/// A single triggered risk indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signal {
    pub code: &'static str,
    pub category: Category,
    pub weight: u32,
    pub description: String,
    /// Presence alone forces a HIGH verdict
    #[serde(skip)]
    pub critical: bool,
}

impl Signal {
    pub fn new(
        code: &'static str,
        category: Category,
        weight: u32,
        description: impl Into<String>,
        critical: bool,
    ) -> Self {
        assert!(weight >= 1, "signal {} must carry a positive weight", code);
        Self {
            code,
            category,
            weight,
            description: description.into(),
            critical,
        }
    }
}

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Not enough signal to judge
    Insufficient,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Insufficient => "INSUFFICIENT",
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RiskLevel::Insufficient => "❔",
            RiskLevel::Low => "🟢",
            RiskLevel::Medium => "🟠",
            RiskLevel::High => "🔴",
        }
    }
}

/// Verdict of one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub signals: Vec<Signal>,
    pub total_score: u32,
    pub risk_level: RiskLevel,
    pub is_insufficient: bool,
    pub is_legitimate: bool,
}

impl ScoringResult {
    pub fn has_critical(&self) -> bool {
        self.signals.iter().any(|s| s.critical)
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.signals.iter().map(|s| s.code).collect()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.signals.iter().any(|s| s.code == code)
    }

    /// One-line human summary
    pub fn summary(&self, symbol: &str) -> String {
        let mut output = format!(
            "{} {} | {} | score {} | {} signal(s)",
            self.risk_level.emoji(),
            self.risk_level.as_str(),
            symbol,
            self.total_score,
            self.signals.len()
        );
        if self.is_legitimate {
            output.push_str(" | presumed legitimate");
        }
        output
    }
}
