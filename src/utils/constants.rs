//! Constants Module - Single Source of Truth
//!
//! Venue lists, allow-lists, pitch phrase lists and service defaults live here.
//! Numeric scoring thresholds live next to the signal catalog in `core::catalog`.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "ScamRadar";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// API DEFAULTS
// ============================================

pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_MAX_BATCH: usize = 100;
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 256;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================
// VENUES
// ============================================

/// Over-the-counter venue names (compared case-insensitively)
pub const OTC_VENUES: [&str; 7] = [
    "OTC",
    "OTCBB",
    "OTCQX",
    "OTCQB",
    "PINK",
    "GREY",
    "OTC MARKETS",
];

/// Check whether a venue name denotes an OTC market
pub fn is_otc_venue(venue: &str) -> bool {
    let venue = venue.trim();
    OTC_VENUES.iter().any(|v| v.eq_ignore_ascii_case(venue))
}

// ============================================
// ESTABLISHED ALLOW-LISTS
// ============================================

pub const ESTABLISHED_EQUITIES: [&str; 20] = [
    "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "NVDA", "META", "TSLA", "BRK.A", "BRK.B", "JPM",
    "V", "MA", "JNJ", "WMT", "PG", "XOM", "UNH", "HD", "KO",
];

pub const ESTABLISHED_TOKENS: [&str; 15] = [
    "BTC", "ETH", "USDT", "USDC", "BNB", "XRP", "SOL", "ADA", "DOGE", "TRX", "DOT", "LTC", "LINK",
    "AVAX", "MATIC",
];

/// Check a symbol against an allow-list (case-insensitive)
pub fn is_listed(list: &[&str], symbol: &str) -> bool {
    let symbol = symbol.trim();
    list.iter().any(|s| s.eq_ignore_ascii_case(symbol))
}

// ============================================
// PITCH PHRASES (lowercase; matched as substrings)
// ============================================

/// Phrase lists for the four behavioral categories of one asset class
pub struct PhraseBook {
    pub unsolicited: &'static [&'static str],
    pub promised_returns: &'static [&'static str],
    pub urgency: &'static [&'static str],
    pub secrecy: &'static [&'static str],
}

pub const EQUITY_PHRASES: PhraseBook = PhraseBook {
    unsolicited: &[
        "cold call",
        "reached out to you",
        "random text",
        "texted me",
        "messaged me",
        "whatsapp group",
        "investment club",
        "stock group",
        "newsletter pick",
    ],
    promised_returns: &[
        "guaranteed",
        "guarantee",
        "can't lose",
        "cannot lose",
        "risk-free",
        "risk free",
        "double your money",
        "triple your money",
        "huge returns",
        "easy money",
        "next big thing",
    ],
    urgency: &[
        "act now",
        "act fast",
        "limited time",
        "don't miss",
        "dont miss",
        "last chance",
        "before it's too late",
        "today only",
        "buy now",
        "hurry",
    ],
    secrecy: &[
        "insider",
        "inside info",
        "secret",
        "confidential",
        "don't tell",
        "before the announcement",
        "merger news",
        "not public yet",
        "exclusive tip",
    ],
};

pub const TOKEN_PHRASES: PhraseBook = PhraseBook {
    unsolicited: &[
        "dm me",
        "dm'd",
        "messaged me",
        "telegram group",
        "discord invite",
        "join our telegram",
        "airdrop",
        "random text",
    ],
    promised_returns: &[
        "guaranteed",
        "to the moon",
        "100x",
        "1000x",
        "lambo",
        "can't lose",
        "risk-free",
        "risk free",
        "free money",
        "next shiba",
        "passive income",
    ],
    urgency: &[
        "ape in",
        "act now",
        "presale ending",
        "presale ends",
        "last chance",
        "fomo",
        "launching now",
        "stealth launch",
        "before it pumps",
        "don't miss",
    ],
    secrecy: &[
        "alpha",
        "insider",
        "whale group",
        "secret",
        "dev is a friend",
        "private group",
        "not public yet",
        "confidential",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otc_venue_detection() {
        assert!(is_otc_venue("otc markets"));
        assert!(is_otc_venue(" PINK "));
        assert!(!is_otc_venue("NASDAQ"));
        assert!(!is_otc_venue(""));
    }

    #[test]
    fn test_allow_lists() {
        assert!(is_listed(&ESTABLISHED_EQUITIES, "aapl"));
        assert!(is_listed(&ESTABLISHED_TOKENS, "ETH"));
        assert!(!is_listed(&ESTABLISHED_TOKENS, "SAFEMOON"));
    }

    #[test]
    fn test_phrases_are_lowercase() {
        for book in [&EQUITY_PHRASES, &TOKEN_PHRASES] {
            let all = book
                .unsolicited
                .iter()
                .chain(book.promised_returns)
                .chain(book.urgency)
                .chain(book.secrecy);
            for phrase in all {
                assert_eq!(*phrase, phrase.to_lowercase());
            }
        }
    }
}
