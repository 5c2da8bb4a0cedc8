//! Experiment configuration types

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::record::TrialSpec;

/// Trial sizes used when none are configured
pub const DEFAULT_SIZES: [usize; 5] = [10, 100, 1_000, 10_000, 100_000];

/// Repetitions per size used when none are configured
pub const DEFAULT_REPETITIONS: usize = 20;

/// Progress polling interval used when none is configured
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

/// Experiment configuration
///
/// Defines the trial matrix (sizes × repetitions), how often progress is
/// polled, and an optional bound on how many trials run at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Dataset sizes; each one gets `repetitions` trials
    pub sizes: Vec<usize>,

    /// Trials per size, repetition `j` uses seed `j`
    pub repetitions: usize,

    /// Milliseconds between progress polls
    pub poll_interval_ms: u64,

    /// Maximum trials running at the same time, unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            repetitions: DEFAULT_REPETITIONS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_concurrency: None,
        }
    }
}

impl ExperimentConfig {
    /// Create a new config for the given sizes and repetitions
    pub fn new(sizes: Vec<usize>, repetitions: usize) -> Self {
        Self {
            sizes,
            repetitions,
            ..Default::default()
        }
    }

    /// Load a config from a JSON file
    ///
    /// Fields missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Set the polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the concurrency bound
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Polling interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Total number of trials in the matrix
    pub fn total_trials(&self) -> usize {
        self.sizes.len() * self.repetitions
    }

    /// Enumerate the trial matrix, size-major
    pub fn trial_specs(&self) -> Vec<TrialSpec> {
        self.sizes
            .iter()
            .flat_map(|&size| (0..self.repetitions).map(move |j| TrialSpec::new(size, j as i64)))
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::InvalidSizes(
                "at least one size is required".into(),
            ));
        }

        if self.sizes.contains(&0) {
            return Err(ConfigError::InvalidSizes("sizes must be positive".into()));
        }

        if self.repetitions == 0 {
            return Err(ConfigError::InvalidRepetitions(
                "repetitions must be at least 1".into(),
            ));
        }

        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval(
                "poll interval must be positive".into(),
            ));
        }

        if self.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidConcurrency(
                "max concurrency must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size list
    #[error("Invalid sizes: {0}")]
    InvalidSizes(String),

    /// Invalid repetition count
    #[error("Invalid repetitions: {0}")]
    InvalidRepetitions(String),

    /// Invalid polling interval
    #[error("Invalid poll interval: {0}")]
    InvalidPollInterval(String),

    /// Invalid concurrency bound
    #[error("Invalid max concurrency: {0}")]
    InvalidConcurrency(String),

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Offending path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid JSON for this schema
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        /// Offending path
        path: String,
        /// Underlying error
        source: serde_json::Error,
    },
}
