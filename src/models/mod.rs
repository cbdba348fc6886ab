//! Models Module - Data Structures & Configuration
//!
//! Input and verdict types, errors and runtime configuration.

pub mod config;
pub mod errors;
pub mod signal;
pub mod types;

pub use config::*;
pub use errors::*;
pub use signal::*;
pub use types::*;
