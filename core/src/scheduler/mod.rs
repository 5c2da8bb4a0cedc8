//! Scheduler for experiment lifecycle management
//!
//! The Scheduler coordinates the complete benchmark experiment:
//! - Enumerating the trial matrix (sizes × repetitions, seed = repetition)
//! - Dispatching one worker per trial, optionally bounded by a semaphore
//! - Polling worker liveness for progress reporting
//! - Closing the report sink once every worker has terminated
//!
//! # Example
//!
//! ```ignore
//! use sort_bench_core::scheduler::SchedulerBuilder;
//!
//! let scheduler = SchedulerBuilder::new()
//!     .sizes(vec![10, 100, 1000])
//!     .repetitions(20)
//!     .strategies(strategies)
//!     .sink(sink)
//!     .build()?;
//!
//! let mut print = |p: ProgressSnapshot| println!("{p}");
//! let summary = scheduler.run_with_signal_handling(&mut print).await?;
//! ```

mod aggregator;
mod builder;
mod executor;
mod progress;

pub use aggregator::{aggregate_outcomes, RunSummary, TrialOutcome};
pub use builder::SchedulerBuilder;
pub use executor::Scheduler;
pub use progress::{ProgressObserver, ProgressSnapshot};
