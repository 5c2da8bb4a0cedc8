//! Tally of how each trial worker terminated

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::record::TrialSpec;

/// How one trial worker ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Record written to the sink
    Written(TrialSpec),

    /// Trial finished but the sink rejected its record
    WriteFailed {
        /// Trial that lost its record
        spec: TrialSpec,
        /// Sink error message
        error: String,
    },

    /// Trial stopped on a shutdown signal
    Cancelled(TrialSpec),

    /// Trial failed before producing a record
    Failed {
        /// Trial that failed
        spec: TrialSpec,
        /// Error message
        error: String,
    },

    /// Trial worker panicked
    Panicked(TrialSpec),
}

impl TrialOutcome {
    /// Trial this outcome belongs to
    pub fn spec(&self) -> TrialSpec {
        match self {
            Self::Written(spec) | Self::Cancelled(spec) | Self::Panicked(spec) => *spec,
            Self::WriteFailed { spec, .. } | Self::Failed { spec, .. } => *spec,
        }
    }

    /// Whether the trial's record reached the sink
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Summary of a finished run
///
/// Counts terminations only. Trial statistics live in the report, never
/// here.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Trials dispatched
    pub total_trials: usize,

    /// Records written to the sink
    pub written: usize,

    /// Records the sink rejected
    pub write_failures: usize,

    /// Trials stopped by a shutdown signal
    pub cancelled: usize,

    /// Trials that failed before producing a record
    pub failed: usize,

    /// Trial workers that panicked
    pub panicked: usize,

    /// When dispatch started
    pub started_at: Option<DateTime<Utc>>,

    /// When the last worker terminated and the sink was closed
    pub finished_at: Option<DateTime<Utc>>,

    /// Wall time of the whole run
    pub elapsed: Duration,

    /// Close error, if the sink failed to flush
    pub teardown_error: Option<String>,
}

impl RunSummary {
    /// Trials that terminated for any reason
    pub fn terminated(&self) -> usize {
        self.written + self.write_failures + self.cancelled + self.failed + self.panicked
    }

    /// Trials whose record never reached the sink
    pub fn lost_records(&self) -> usize {
        self.total_trials - self.written
    }

    /// Every record written and the sink closed cleanly
    ///
    /// A failed close may still have lost buffered records even when every
    /// append succeeded.
    pub fn is_complete(&self) -> bool {
        self.written == self.total_trials && self.teardown_error.is_none()
    }
}

/// Count outcomes by kind
pub fn aggregate_outcomes(outcomes: &[TrialOutcome]) -> RunSummary {
    let mut summary = RunSummary {
        total_trials: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        match outcome {
            TrialOutcome::Written(_) => summary.written += 1,
            TrialOutcome::WriteFailed { .. } => summary.write_failures += 1,
            TrialOutcome::Cancelled(_) => summary.cancelled += 1,
            TrialOutcome::Failed { .. } => summary.failed += 1,
            TrialOutcome::Panicked(_) => summary.panicked += 1,
        }
    }

    summary
}
