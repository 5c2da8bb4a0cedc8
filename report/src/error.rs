//! Error types for report I/O

use std::path::PathBuf;

use sort_bench_core::BenchError;

/// Report errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// File could not be opened or written
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Report path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Malformed report content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record could not be formatted
    #[error("record error: {0}")]
    Record(#[from] BenchError),

    /// Report has a header but no rows
    #[error("report {0} contains no trial records")]
    Empty(PathBuf),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
