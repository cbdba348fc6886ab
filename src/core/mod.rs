//! Core Module - Scoring Engine
//!
//! Series analytics, signal catalogs, the signal generators per asset class
//! and the classifier. Pure code: no I/O, no shared state.

pub mod analytics;
pub mod behavioral;
pub mod catalog;
pub mod category_index;
pub mod classifier;
pub mod engine;
pub mod equity;
pub mod patterns;
pub mod security;
pub mod token;

pub use catalog::SignalDef;
pub use category_index::{group_by_category, CategoryGroup, CategoryIndex};
pub use classifier::{classify, InstrumentProfile, ScoringResultBuilder};
pub use engine::{compute_risk_score, evaluate};
