//! Error types for the Nurse Pay Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The pay calculation core itself never fails; these errors come from
//! configuration loading, tax table lookups and input validation at the
//! API boundary.

use thiserror::Error;

/// The main error type for the Nurse Pay Engine.
///
/// # Example
///
/// ```
/// use nurse_pay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// No federal bracket schedule is configured for the filing status.
    #[error("Tax schedule not found for filing status: {filing_status}")]
    TaxScheduleNotFound {
        /// The filing status that was requested.
        filing_status: String,
    },

    /// The state is not present in the state rate table.
    #[error("State not found: {state}")]
    StateNotFound {
        /// The state name that was requested.
        state: String,
    },

    /// A work period was invalid.
    #[error("Invalid work period at index {index}: {message}")]
    InvalidWorkPeriod {
        /// Position of the period in the submitted list.
        index: usize,
        /// A description of what made the period invalid.
        message: String,
    },

    /// Two work periods overlap.
    #[error("Work periods at index {first} and {second} overlap")]
    OverlappingWorkPeriods {
        /// Index of the earlier-submitted period.
        first: usize,
        /// Index of the later-submitted period.
        second: usize,
    },

    /// A rate or differential value was invalid.
    #[error("Invalid differential field '{field}': {message}")]
    InvalidDifferential {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A tax option in a request was invalid.
    #[error("Invalid tax field '{field}': {message}")]
    InvalidTaxInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A tax bracket schedule had gaps, overlaps or a bounded top bracket.
    #[error("Invalid tax bracket schedule: {message}")]
    InvalidBracketSchedule {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
