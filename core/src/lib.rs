//! sort-bench-core: Core types for concurrent sort and search benchmarking
//!
//! This crate provides the foundational pieces used across all sort-bench
//! components, including:
//!
//! - Strategy and sink traits (SortStrategy, SearchStrategy, ReportSink)
//! - Seeded dataset generation
//! - Trial execution and running statistics
//! - The scheduler that fans trials out and reports progress
//! - Report record format and error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod record;
pub mod scheduler;
pub mod traits;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, ExperimentConfig};
pub use error::*;
pub use record::{TrialRecord, TrialSpec, HEADER};
pub use scheduler::{
    ProgressObserver, ProgressSnapshot, RunSummary, Scheduler, SchedulerBuilder, TrialOutcome,
};
pub use traits::*;
pub use worker::{StatSummary, TrialExecutor, TrialExecutorBuilder};
