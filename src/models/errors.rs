//! Centralized Error Handling Module
//!
//! Every rejected input or failed request carries a unique error code so that
//! API clients and log searches can tell failures apart.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - INPUT_xxx: malformed scoring input rejected at the boundary
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Input Errors (1xx)
    // ============================================
    /// Symbol is empty
    InputMissingSymbol,
    /// Quote carries a negative or non-finite number
    InputInvalidQuote,
    /// Price point carries a negative or non-finite number
    InputInvalidPricePoint,
    /// Price series is not strictly chronological
    InputNonChronologicalSeries,
    /// Security metadata carries an out-of-range percentage or amount
    InputInvalidSecurityData,
    /// Security metadata supplied for an asset class that has none
    InputUnexpectedSecurityData,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Batch is empty or too large
    ApiBatchLimit,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors (9xx)
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            // Input Errors
            Self::InputMissingSymbol => "INPUT_MISSING_SYMBOL",
            Self::InputInvalidQuote => "INPUT_INVALID_QUOTE",
            Self::InputInvalidPricePoint => "INPUT_INVALID_PRICE_POINT",
            Self::InputNonChronologicalSeries => "INPUT_NON_CHRONOLOGICAL_SERIES",
            Self::InputInvalidSecurityData => "INPUT_INVALID_SECURITY_DATA",
            Self::InputUnexpectedSecurityData => "INPUT_UNEXPECTED_SECURITY_DATA",

            // API Errors
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiBatchLimit => "API_BATCH_LIMIT",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            // Configuration Errors
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            // Generic
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InputMissingSymbol
            | Self::InputInvalidQuote
            | Self::InputInvalidPricePoint
            | Self::InputNonChronologicalSeries
            | Self::InputInvalidSecurityData
            | Self::InputUnexpectedSecurityData
            | Self::ApiBadRequest
            | Self::ApiBatchLimit => 400,
            _ => 500,
        }
    }

    /// Check if the failure came from the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InputMissingSymbol
                | Self::InputInvalidQuote
                | Self::InputInvalidPricePoint
                | Self::InputNonChronologicalSeries
                | Self::InputInvalidSecurityData
                | Self::InputUnexpectedSecurityData
        )
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Empty symbol
    pub fn missing_symbol() -> Self {
        Self::new(ErrorCode::InputMissingSymbol, "Symbol must not be empty")
    }

    /// Quote rejected
    pub fn invalid_quote(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputInvalidQuote, msg)
    }

    /// Price point rejected
    pub fn invalid_price_point(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputInvalidPricePoint, msg)
    }

    /// Series out of order
    pub fn non_chronological(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputNonChronologicalSeries, msg)
    }

    /// Security metadata rejected
    pub fn invalid_security_data(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputInvalidSecurityData, msg)
    }

    /// Security metadata on an equity
    pub fn unexpected_security_data() -> Self {
        Self::new(
            ErrorCode::InputUnexpectedSecurityData,
            "Security metadata is only accepted for tokens",
        )
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Batch size outside the accepted range
    pub fn batch_limit(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBatchLimit, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {:?}", key, value),
        )
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let message = format!("JSON parse error: {}", err);
        Self::with_source(ErrorCode::ApiBadRequest, message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::non_chronological("point 3 precedes point 2");
        assert_eq!(err.code, ErrorCode::InputNonChronologicalSeries);
        assert_eq!(err.code_str(), "INPUT_NON_CHRONOLOGICAL_SERIES");
        assert!(err.to_string().starts_with("[INPUT_NON_CHRONOLOGICAL_SERIES]"));
    }

    #[test]
    fn test_input_errors() {
        assert!(ErrorCode::InputInvalidQuote.is_input_error());
        assert!(ErrorCode::InputInvalidSecurityData.is_input_error());
        assert!(!ErrorCode::ApiInternalError.is_input_error());
        assert!(!ErrorCode::ConfigInvalidValue.is_input_error());
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::InputInvalidPricePoint.http_status(), 400);
        assert_eq!(ErrorCode::ApiInternalError.http_status(), 500);
    }

    #[test]
    fn test_json_error_maps_to_bad_request() {
        let err: AppError = serde_json::from_str::<u32>("not a number")
            .map_err(AppError::from)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ApiBadRequest);
        assert!(std::error::Error::source(&err).is_some());
    }
}
