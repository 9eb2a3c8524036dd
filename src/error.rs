//! Error types for the Tax Position Estimator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rate tables,
//! evaluating a taxpayer profile, or persisting a session.

use thiserror::Error;

use crate::models::AssessmentYear;

/// The main error type for the Tax Position Estimator.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/2023-24.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/2023-24.yaml");
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
        /// The path (or embedded source name) of the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rate table parsed but its contents are inconsistent.
    #[error("Invalid rate table for {year}: {message}")]
    InvalidRateTable {
        /// The assessment year token of the offending table.
        year: String,
        /// A description of what made the table invalid.
        message: String,
    },

    /// No rate table is loaded for the requested assessment year.
    #[error("No rate table configured for assessment year {year}")]
    RateTableNotFound {
        /// The assessment year that was requested.
        year: AssessmentYear,
    },

    /// An assessment year token is not one of the supported years.
    #[error("Unsupported assessment year: {value}")]
    UnsupportedAssessmentYear {
        /// The token that could not be parsed.
        value: String,
    },

    /// A currency amount is larger than the engine accepts.
    #[error("Amount for {field} exceeds the maximum of {max}: {value}")]
    AmountOutOfRange {
        /// Dotted path of the offending field.
        field: String,
        /// The amount that was supplied.
        value: String,
        /// The largest accepted amount.
        max: String,
    },

    /// A profile could not be saved to or loaded from a profile store.
    #[error("Profile store error: {message}")]
    ProfileStore {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
