//! Behavioral Signal Generator
//!
//! Caller-declared flags and pitch text. Independent of market data, so it is
//! the only generator that still speaks when the quote is unavailable.

use regex::Regex;
use tracing::debug;

use super::catalog::behavioral::{
    PROMISED_RETURNS, SECRECY_CLAIMS, SPECIFIC_RETURN_CLAIM, UNSOLICITED_CONTACT, URGENCY_PRESSURE,
};
use super::catalog::SignalDef;
use crate::models::{AssetClass, BehavioralContext, Signal};
use crate::utils::constants::{PhraseBook, EQUITY_PHRASES, TOKEN_PHRASES};

lazy_static::lazy_static! {
    /// "50% in 7 days", "10x within 2 weeks", "300% returns in 30 days"
    static ref RETURN_CLAIM: Option<Regex> = Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:%|x)(?:\s+\w+){0,3}?\s+(?:in|within)\s+\d+\s*(?:days?|weeks?)\b"
    )
    .ok();
}

/// Emit BEHAVIORAL signals. Each category fires at most once.
pub fn behavioral_signals(
    class: AssetClass,
    context: &BehavioralContext,
    pitch_text: &str,
) -> Vec<Signal> {
    let book = phrase_book(class);
    let text = pitch_text.to_lowercase();

    let categories: [(bool, &[&str], &SignalDef); 4] = [
        (context.unsolicited, book.unsolicited, &UNSOLICITED_CONTACT),
        (context.promises_high_returns, book.promised_returns, &PROMISED_RETURNS),
        (context.urgency_pressure, book.urgency, &URGENCY_PRESSURE),
        (context.secrecy_inside_info, book.secrecy, &SECRECY_CLAIMS),
    ];

    let mut signals = Vec::new();
    for (declared, phrases, def) in categories {
        if declared {
            signals.push(def.emit_with("reported"));
        } else if let Some(phrase) = first_match(&text, phrases) {
            signals.push(def.emit_with(format!("pitch says \"{}\"", phrase)));
        }
    }

    if let Some(claim) = return_claim(pitch_text) {
        signals.push(SPECIFIC_RETURN_CLAIM.emit_with(format!("\"{}\"", claim)));
    }

    debug!(count = signals.len(), class = class.as_str(), "behavioral signals");
    signals
}

fn phrase_book(class: AssetClass) -> &'static PhraseBook {
    match class {
        AssetClass::Equity => &EQUITY_PHRASES,
        AssetClass::Token => &TOKEN_PHRASES,
    }
}

fn first_match(text: &str, phrases: &[&'static str]) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }
    phrases.iter().copied().find(|p| text.contains(p))
}

fn return_claim(pitch_text: &str) -> Option<&str> {
    RETURN_CLAIM
        .as_ref()
        .and_then(|re| re.find(pitch_text))
        .map(|m| m.as_str())
}
