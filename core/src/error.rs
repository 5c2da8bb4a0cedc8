//! Error types for sort-bench-core

use thiserror::Error;

use crate::traits::SinkError;

/// Core error type
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A required builder field was never set
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// The report sink rejected a write or close
    #[error("report sink error: {0}")]
    Sink(#[from] SinkError),

    /// A trial could not produce a record
    #[error("trial error: {0}")]
    Trial(String),

    /// The trial observed a shutdown signal and stopped early
    #[error("trial cancelled")]
    Cancelled,

    /// Record formatting error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl BenchError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing-configuration error for the named field
    pub fn missing_config(field: &'static str) -> Self {
        Self::MissingConfig(field)
    }

    /// Create a trial error
    pub fn trial(msg: impl Into<String>) -> Self {
        Self::Trial(msg.into())
    }

    /// Create a cancellation error
    pub fn cancelled() -> Self {
        Self::Cancelled
    }

    /// Whether this error came from the report sink
    pub fn is_sink(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;
