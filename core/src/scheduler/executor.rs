//! Scheduler execution logic

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::ExperimentConfig;
use crate::error::{BenchError, BenchResult};
use crate::record::{TrialRecord, TrialSpec};
use crate::traits::{ReportSink, StrategySet};
use crate::worker::{TrialExecutor, TrialExecutorBuilder};

use super::aggregator::{aggregate_outcomes, RunSummary, TrialOutcome};
use super::progress::{ProgressObserver, ProgressSnapshot};

/// Scheduler manages the experiment lifecycle
///
/// Responsible for enumerating the trial matrix, dispatching one worker per
/// trial, polling worker liveness for progress, and closing the sink once
/// every worker has terminated.
pub struct Scheduler {
    /// Experiment configuration
    pub(crate) config: ExperimentConfig,

    /// Strategies (shared across trials)
    pub(crate) strategies: StrategySet,

    /// Report sink (shared across trials)
    pub(crate) sink: Arc<dyn ReportSink>,

    /// Optional concurrency limiter
    pub(crate) semaphore: Option<Arc<Semaphore>>,

    /// Shutdown signal sender
    pub(crate) shutdown_tx: broadcast::Sender<()>,
}

impl Scheduler {
    /// Create a new scheduler
    ///
    /// Use `SchedulerBuilder` for a more ergonomic construction.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::Config`] if `config` fails validation.
    pub fn new(
        config: ExperimentConfig,
        strategies: StrategySet,
        sink: Arc<dyn ReportSink>,
    ) -> BenchResult<Self> {
        config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        let semaphore = config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit)));
        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Self {
            config,
            strategies,
            sink,
            semaphore,
            shutdown_tx,
        })
    }

    /// Get a handle that can cancel outstanding trials
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Get the experiment configuration
    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the experiment
    ///
    /// Dispatches every trial, publishes a [`ProgressSnapshot`] at each poll,
    /// waits for all workers to terminate, then closes the sink exactly once.
    /// Failed or panicked trials count as terminated and never abort the run.
    /// Only a setup failure (before any trial is dispatched) returns `Err`.
    pub async fn run(self, observer: &mut dyn ProgressObserver) -> BenchResult<RunSummary> {
        let started_at = Utc::now();
        let start = Instant::now();

        // Build every executor up front so a bad spec fails before dispatch
        let executors = self
            .config
            .trial_specs()
            .into_iter()
            .enumerate()
            .map(|(id, spec)| {
                TrialExecutorBuilder::new(id)
                    .spec(spec)
                    .strategies(self.strategies.clone())
                    .sink(Arc::clone(&self.sink))
                    .build()
            })
            .collect::<BenchResult<Vec<_>>>()?;
        let total = executors.len();

        tracing::info!(
            trials = total,
            sizes = ?self.config.sizes,
            repetitions = self.config.repetitions,
            max_concurrency = ?self.config.max_concurrency,
            strategies = ?self.strategies,
            "Starting experiment"
        );

        let handles: Vec<(TrialSpec, JoinHandle<BenchResult<TrialRecord>>)> = executors
            .into_iter()
            .map(|executor| (executor.spec(), self.dispatch(executor)))
            .collect();

        // Progress comes from worker liveness alone
        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let completed = handles.iter().filter(|(_, h)| h.is_finished()).count();
            let snapshot = ProgressSnapshot::new(completed, total);
            tracing::debug!(completed, remaining = snapshot.remaining(), "Progress poll");
            observer.on_progress(snapshot);
            if snapshot.is_done() {
                break;
            }
        }

        let mut outcomes = Vec::with_capacity(total);
        for (spec, handle) in handles {
            outcomes.push(collect_outcome(spec, handle).await);
        }

        for outcome in outcomes.iter().filter(|o| !o.is_written()) {
            let spec = outcome.spec();
            tracing::debug!(size = spec.size, seed = spec.seed, ?outcome, "Record not written");
        }

        let mut summary = aggregate_outcomes(&outcomes);

        if let Err(e) = self.sink.close() {
            tracing::error!(
                error = %e,
                "Failed to close report sink, buffered records may be lost"
            );
            summary.teardown_error = Some(e.to_string());
        }

        summary.started_at = Some(started_at);
        summary.finished_at = Some(Utc::now());
        summary.elapsed = start.elapsed();

        tracing::info!(
            elapsed_secs = summary.elapsed.as_secs_f64(),
            written = summary.written,
            write_failures = summary.write_failures,
            cancelled = summary.cancelled,
            failed = summary.failed,
            panicked = summary.panicked,
            "Experiment completed"
        );

        Ok(summary)
    }

    /// Run with Ctrl+C signal handling
    ///
    /// Ctrl+C cancels outstanding trials cooperatively: each stops at its
    /// next check and writes nothing. Sorts already in progress finish first.
    pub async fn run_with_signal_handling(
        self,
        observer: &mut dyn ProgressObserver,
    ) -> BenchResult<RunSummary> {
        let shutdown_tx = self.shutdown_tx.clone();

        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::warn!("Received Ctrl+C, cancelling outstanding trials...");
                    let _ = shutdown_tx.send(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        });

        let result = self.run(observer).await;

        signal_handle.abort();

        result
    }

    /// Run with a timeout
    ///
    /// When the deadline passes, outstanding trials are cancelled the same
    /// way as on Ctrl+C.
    pub async fn run_with_timeout(
        self,
        timeout: Duration,
        observer: &mut dyn ProgressObserver,
    ) -> BenchResult<RunSummary> {
        let shutdown_tx = self.shutdown_tx.clone();

        let timeout_handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::warn!(
                timeout_secs = timeout.as_secs_f64(),
                "Timeout reached, cancelling outstanding trials..."
            );
            let _ = shutdown_tx.send(());
        });

        let result = self.run(observer).await;

        timeout_handle.abort();

        result
    }

    /// Launch one trial on the blocking pool
    ///
    /// Trials are CPU-bound, so they never run on the async workers. With a
    /// concurrency bound, the trial's task waits for a permit first.
    fn dispatch(&self, executor: TrialExecutor) -> JoinHandle<BenchResult<TrialRecord>> {
        let shutdown_rx = self.shutdown_tx.subscribe();

        match &self.semaphore {
            None => tokio::task::spawn_blocking(move || executor.run(shutdown_rx)),
            Some(semaphore) => {
                let semaphore = Arc::clone(semaphore);
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| BenchError::trial("concurrency limiter closed"))?;

                    match tokio::task::spawn_blocking(move || executor.run(shutdown_rx)).await {
                        Ok(result) => result,
                        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                        Err(e) => Err(BenchError::trial(e.to_string())),
                    }
                })
            }
        }
    }
}

/// Turn a terminated worker into an outcome
async fn collect_outcome(
    spec: TrialSpec,
    handle: JoinHandle<BenchResult<TrialRecord>>,
) -> TrialOutcome {
    match handle.await {
        Ok(Ok(_)) => TrialOutcome::Written(spec),
        Ok(Err(BenchError::Cancelled)) => {
            tracing::debug!(size = spec.size, seed = spec.seed, "Trial cancelled");
            TrialOutcome::Cancelled(spec)
        }
        Ok(Err(e)) if e.is_sink() => TrialOutcome::WriteFailed {
            spec,
            error: e.to_string(),
        },
        Ok(Err(e)) => {
            tracing::error!(size = spec.size, seed = spec.seed, error = %e, "Trial failed");
            TrialOutcome::Failed {
                spec,
                error: e.to_string(),
            }
        }
        Err(e) => {
            tracing::error!(size = spec.size, seed = spec.seed, error = %e, "Trial task panicked");
            TrialOutcome::Panicked(spec)
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("strategies", &self.strategies)
            .finish()
    }
}
