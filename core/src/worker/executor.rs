//! Trial execution: generate -> sort -> search loop -> write

use crate::dataset::{self, DatasetGenerator};
use crate::error::{BenchError, BenchResult};
use crate::record::{TrialRecord, TrialSpec};
use crate::traits::{ReportSink, StrategySet};

use super::stats::SearchTrialStats;

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Both sorted copies of a trial's dataset and what sorting them cost
#[derive(Debug, Clone)]
pub struct SortedDatasets {
    /// Copy sorted by the baseline strategy
    pub baseline: Vec<i32>,

    /// Copy sorted by the optimized strategy, lent read-only to the searches
    pub optimized: Vec<i32>,

    /// Operations spent by the baseline sort
    pub baseline_ops: u64,

    /// Operations spent by the optimized sort
    pub optimized_ops: u64,
}

/// TrialExecutor runs exactly one trial end to end
///
/// Everything a trial mutates (datasets, generator, statistics) is created
/// inside the executor and dropped with it. The strategies are shared
/// read-only; the sink is the only shared mutable resource and is touched
/// once, by a single `append`.
pub struct TrialExecutor {
    /// Unique trial identifier (dispatch order)
    id: usize,

    /// Which cell of the matrix this trial covers
    spec: TrialSpec,

    /// Strategies (shared across trials via Arc)
    strategies: StrategySet,

    /// Report sink (shared across trials via Arc)
    sink: Arc<dyn ReportSink>,
}

impl TrialExecutor {
    /// Create a new trial executor
    pub fn new(
        id: usize,
        spec: TrialSpec,
        strategies: StrategySet,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self {
            id,
            spec,
            strategies,
            sink,
        }
    }

    /// Run the trial and write its record to the sink
    ///
    /// A failed write is logged and returned; the record is lost. Nothing
    /// here can affect another trial.
    pub fn run(self, mut shutdown: broadcast::Receiver<()>) -> BenchResult<TrialRecord> {
        tracing::debug!(
            trial_id = self.id,
            size = self.spec.size,
            seed = self.spec.seed,
            "Trial started"
        );

        let record = self.measure(&mut shutdown)?;
        let line = record.to_csv_line()?;

        if let Err(e) = self.sink.append(&line) {
            tracing::error!(
                trial_id = self.id,
                size = self.spec.size,
                seed = self.spec.seed,
                error = %e,
                "Failed to write trial record"
            );
            return Err(e.into());
        }

        tracing::debug!(
            trial_id = self.id,
            size = self.spec.size,
            seed = self.spec.seed,
            not_found = record.searches_not_found,
            "Trial finished"
        );

        Ok(record)
    }

    /// Run the trial without writing anything
    ///
    /// Returns [`BenchError::Cancelled`] if `shutdown` fires before sorting or
    /// between search repetitions. A sort in progress is not interrupted.
    pub fn measure(&self, shutdown: &mut broadcast::Receiver<()>) -> BenchResult<TrialRecord> {
        if shutdown_requested(shutdown) {
            return Err(BenchError::cancelled());
        }

        let sorted = self.sort_datasets();
        let view: &[i32] = &sorted.optimized;

        let mut targets = DatasetGenerator::new(self.spec.target_seed());
        let mut stats = SearchTrialStats::new();

        for _ in 0..self.spec.size {
            if shutdown_requested(shutdown) {
                tracing::debug!(
                    trial_id = self.id,
                    completed = stats.repetitions(),
                    "Trial received shutdown signal"
                );
                return Err(BenchError::cancelled());
            }

            let target = targets.next_value();
            let linear = self.strategies.linear_search.search(view, target);
            let binary = self.strategies.binary_search.search(view, target);

            stats.record(
                linear.operations,
                linear.is_found(),
                binary.operations,
                binary.is_found(),
            );
        }

        if !stats.strategies_agree() {
            tracing::warn!(
                trial_id = self.id,
                linear_not_found = stats.linear_not_found,
                binary_not_found = stats.binary_not_found,
                "Search strategies disagree on missing targets"
            );
        }

        let linear = stats
            .linear
            .summary()
            .ok_or_else(|| BenchError::trial(format!("{}: no search repetitions ran", self.spec)))?;
        let binary = stats
            .binary
            .summary()
            .ok_or_else(|| BenchError::trial(format!("{}: no search repetitions ran", self.spec)))?;

        Ok(TrialRecord::new(
            self.spec,
            stats.binary_not_found,
            (sorted.baseline_ops, sorted.optimized_ops),
            linear,
            binary,
        ))
    }

    /// Generate the dataset and sort two independent copies of it
    pub fn sort_datasets(&self) -> SortedDatasets {
        let mut optimized = dataset::generate(self.spec.seed, self.spec.size);
        let mut baseline = optimized.clone();

        let baseline_ops = self.strategies.baseline_sort.sort(&mut baseline);
        let optimized_ops = self.strategies.optimized_sort.sort(&mut optimized);

        SortedDatasets {
            baseline,
            optimized,
            baseline_ops,
            optimized_ops,
        }
    }

    /// Get the trial ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get the trial spec
    pub fn spec(&self) -> TrialSpec {
        self.spec
    }
}

/// Non-blocking check of the shutdown channel
///
/// A closed channel means nobody can cancel any more, not a cancellation.
fn shutdown_requested(shutdown: &mut broadcast::Receiver<()>) -> bool {
    match shutdown.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => false,
    }
}

impl std::fmt::Debug for TrialExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialExecutor")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .field("strategies", &self.strategies)
            .finish()
    }
}
