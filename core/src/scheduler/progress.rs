//! Progress snapshots published while trials run

/// How many dispatched trials have terminated
///
/// Derived purely from worker liveness. Trials never write to a shared
/// counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Trials whose worker has terminated, for any reason
    pub completed: usize,

    /// Trials dispatched
    pub total: usize,
}

impl ProgressSnapshot {
    /// Create a new snapshot
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Trials still running or waiting for a slot
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Whether every trial has terminated
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

impl std::fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Progress: {:3}/{:3}", self.completed, self.total)
    }
}

/// Receives a snapshot at every poll
///
/// Observers are strictly passive: nothing they do feeds back into the
/// scheduler.
pub trait ProgressObserver: Send {
    /// Called once per poll, first poll immediately after dispatch
    fn on_progress(&mut self, snapshot: ProgressSnapshot);
}

impl<F> ProgressObserver for F
where
    F: FnMut(ProgressSnapshot) + Send,
{
    fn on_progress(&mut self, snapshot: ProgressSnapshot) {
        self(snapshot)
    }
}
