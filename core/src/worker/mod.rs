//! Trial execution
//!
//! A trial is the unit of work the scheduler fans out. Each
//! [`TrialExecutor`] owns one (seed, size) pair and runs the fixed pipeline:
//!
//! 1. Generates a dataset from `seed`
//! 2. Sorts two independent copies with the baseline and optimized strategies
//! 3. Runs `size` searches with both search strategies over the sorted copy,
//!    drawing targets from `seed + 1`
//! 4. Folds every search cost into [`SearchTrialStats`]
//! 5. Writes one [`TrialRecord`](crate::record::TrialRecord) to the report sink
//!
//! Executors never wait on each other and share no mutable state except the
//! sink.
//!
//! # Example
//!
//! ```ignore
//! use sort_bench_core::worker::TrialExecutorBuilder;
//!
//! let executor = TrialExecutorBuilder::new(0)
//!     .spec(TrialSpec::new(1000, 4))
//!     .strategies(strategies)
//!     .sink(sink)
//!     .build()?;
//!
//! let record = executor.run(shutdown_rx)?;
//! println!("not found: {}", record.searches_not_found);
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::TrialExecutorBuilder;
pub use executor::{SortedDatasets, TrialExecutor};
pub use stats::{RunningStats, SearchTrialStats, StatSummary};

#[cfg(test)]
mod tests;
