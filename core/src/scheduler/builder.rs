//! Builder pattern for Scheduler construction

use std::sync::Arc;
use std::time::Duration;

use crate::config::ExperimentConfig;
use crate::error::{BenchError, BenchResult};
use crate::traits::{ReportSink, StrategySet};

use super::executor::Scheduler;

/// Builder for creating a Scheduler with proper configuration
///
/// # Example
///
/// ```ignore
/// let scheduler = SchedulerBuilder::new()
///     .sizes(vec![10, 100])
///     .repetitions(20)
///     .poll_interval(Duration::from_secs(5))
///     .strategies(strategies)
///     .sink(sink)
///     .build()?;
/// ```
pub struct SchedulerBuilder {
    config: ExperimentConfig,
    strategies: Option<StrategySet>,
    sink: Option<Arc<dyn ReportSink>>,
}

impl SchedulerBuilder {
    /// Create a new scheduler builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ExperimentConfig::default(),
            strategies: None,
            sink: None,
        }
    }

    /// Set the full experiment configuration
    pub fn config(mut self, config: ExperimentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the dataset sizes
    pub fn sizes(mut self, sizes: Vec<usize>) -> Self {
        self.config.sizes = sizes;
        self
    }

    /// Set the number of repetitions per size
    pub fn repetitions(mut self, repetitions: usize) -> Self {
        self.config.repetitions = repetitions;
        self
    }

    /// Set the progress polling interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Bound the number of trials running at once
    pub fn max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.config.max_concurrency = limit;
        self
    }

    /// Set the strategies to measure
    pub fn strategies(mut self, strategies: StrategySet) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Set the report sink
    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the scheduler
    ///
    /// # Errors
    ///
    /// Returns an error if strategies or sink are not set, or if configuration
    /// validation fails.
    pub fn build(self) -> BenchResult<Scheduler> {
        let strategies = self
            .strategies
            .ok_or_else(|| BenchError::missing_config("strategies"))?;

        let sink = self.sink.ok_or_else(|| BenchError::missing_config("sink"))?;

        Scheduler::new(self.config, strategies, sink)
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
