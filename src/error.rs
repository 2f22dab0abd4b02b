//! Error types for the advisory engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The computation engines themselves are infallible; every variant here is
//! raised either while loading and validating configuration, or by the HTTP
//! adapter while validating a request.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the advisory engine.
///
/// # Example
///
/// ```
/// use advisory_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The tax constant table failed construction-time validation.
    #[error("Invalid tax constants: {message}")]
    InvalidTaxConstants {
        /// A description of the violated invariant.
        message: String,
    },

    /// The configured exchange rate is not a positive number.
    #[error("Invalid exchange rate: {rate} (must be greater than zero)")]
    InvalidExchangeRate {
        /// The rejected rate.
        rate: Decimal,
    },

    /// Budget tier thresholds are not strictly ascending or are negative.
    #[error("Invalid tier thresholds: {message}")]
    InvalidTierThresholds {
        /// A description of the violated invariant.
        message: String,
    },

    /// A client profile field failed request validation.
    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
