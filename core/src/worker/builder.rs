//! Builder pattern for TrialExecutor construction

use crate::error::{BenchError, BenchResult};
use crate::record::TrialSpec;
use crate::traits::{ReportSink, StrategySet};

use super::executor::TrialExecutor;

use std::sync::Arc;

/// Builder for creating TrialExecutor instances
///
/// # Example
/// ```ignore
/// let executor = TrialExecutorBuilder::new(0)
///     .spec(TrialSpec::new(100, 3))
///     .strategies(strategies)
///     .sink(sink)
///     .build()?;
/// ```
pub struct TrialExecutorBuilder {
    id: usize,
    spec: Option<TrialSpec>,
    strategies: Option<StrategySet>,
    sink: Option<Arc<dyn ReportSink>>,
}

impl TrialExecutorBuilder {
    /// Create a new builder with the given trial ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            spec: None,
            strategies: None,
            sink: None,
        }
    }

    /// Set the trial spec
    pub fn spec(mut self, spec: TrialSpec) -> Self {
        self.spec = Some(spec);
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

    /// Build the TrialExecutor
    ///
    /// # Errors
    /// Returns an error if any required field is missing or the spec has a
    /// zero size.
    pub fn build(self) -> BenchResult<TrialExecutor> {
        let spec = self.spec.ok_or(BenchError::missing_config("spec"))?;
        let strategies = self
            .strategies
            .ok_or(BenchError::missing_config("strategies"))?;
        let sink = self.sink.ok_or(BenchError::missing_config("sink"))?;

        if spec.size == 0 {
            return Err(BenchError::config(format!(
                "trial {} has size 0, sizes must be positive",
                self.id
            )));
        }

        Ok(TrialExecutor::new(self.id, spec, strategies, sink))
    }
}
