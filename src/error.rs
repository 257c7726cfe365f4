//! Error types for the Work Hours Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading a schedule,
//! reading a daily log, or writing a report.

use thiserror::Error;

/// The main error type for the Work Hours Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use work_hours::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/work_schedule_config.json".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/work_schedule_config.json"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Schedule configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Schedule configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Schedule configuration file could not be written.
    #[error("Failed to write configuration file '{path}': {message}")]
    ConfigWriteError {
        /// The path of the configuration file.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// A clock time could not be parsed.
    #[error("Invalid time '{value}': expected {expected}")]
    InvalidTime {
        /// The text that failed to parse.
        value: String,
        /// The expected format.
        expected: String,
    },

    /// An interval was malformed or did not satisfy `start < end`.
    #[error("Invalid interval '{value}': {message}")]
    InvalidInterval {
        /// The interval text.
        value: String,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// There were no day records to process.
    #[error("No records to process: {source_name}")]
    NoRecords {
        /// Where the records were expected to come from.
        source_name: String,
    },

    /// The daily log could not be read.
    #[error("Failed to read daily log '{path}': {message}")]
    LogReadError {
        /// The path of the log file.
        path: String,
        /// A description of the I/O error.
        message: String,
    },

    /// A report artifact could not be written.
    #[error("Failed to write report '{path}': {message}")]
    ReportWriteError {
        /// The path of the report artifact.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// The HTTP server could not bind or stopped with an error.
    #[error("Server error on '{address}': {message}")]
    ServerError {
        /// The bind address.
        address: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the process exit code used by the command line front end.
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::ConfigWriteError { .. } => 2,
            EngineError::InvalidTime { .. } | EngineError::InvalidInterval { .. } => 3,
            EngineError::NoRecords { .. } => 0,
            EngineError::LogReadError { .. }
            | EngineError::ReportWriteError { .. }
            | EngineError::ServerError { .. } => 1,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
