//! Core traits for algorithm strategies and the report sink
//!
//! These traits are defined in core so the scheduler and trial executor never
//! depend on concrete algorithms or on a particular output file.
//! Implementations live in their respective crates (strategies/, report/).

use std::sync::Arc;

// ============================================================================
// Sort Strategy Trait
// ============================================================================

/// A sorting algorithm whose work is measured in operations
///
/// Implementations must be stateless so one instance can be shared by every
/// concurrent trial through an `Arc`.
pub trait SortStrategy: Send + Sync {
    /// Strategy identifier (e.g., "bubble", "fast-bubble")
    fn name(&self) -> &str;

    /// Sort `data` in place into non-decreasing order
    ///
    /// Returns the number of operations performed. The counter starts at zero
    /// on every call.
    fn sort(&self, data: &mut [i32]) -> u64;
}

// ============================================================================
// Search Strategy Trait
// ============================================================================

/// Result of a single search run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Index of a matching element, `None` when the target is absent
    pub index: Option<usize>,

    /// Operations spent on this run
    pub operations: u64,
}

impl SearchOutcome {
    /// Outcome for a target that was located at `index`
    pub fn found(index: usize, operations: u64) -> Self {
        Self {
            index: Some(index),
            operations,
        }
    }

    /// Outcome for a target that is not present
    pub fn not_found(operations: u64) -> Self {
        Self {
            index: None,
            operations,
        }
    }

    /// Whether the search located the target
    pub fn is_found(&self) -> bool {
        self.index.is_some()
    }
}

/// A search algorithm over non-decreasing data
///
/// Each call starts from a zero operation counter; no target or count carries
/// over between calls.
pub trait SearchStrategy: Send + Sync {
    /// Strategy identifier (e.g., "linear", "binary")
    fn name(&self) -> &str;

    /// Look for `target` in `sorted`
    fn search(&self, sorted: &[i32], target: i32) -> SearchOutcome;
}

// ============================================================================
// Report Sink Trait
// ============================================================================

/// Shared append-only destination for finalized trial records
///
/// A single `append` call must never be byte-interleaved with a concurrent
/// call. There is no ordering guarantee across calls.
pub trait ReportSink: Send + Sync {
    /// Append one pre-formatted record, including its line terminator
    fn append(&self, line: &str) -> Result<(), SinkError>;

    /// Flush and close the sink
    ///
    /// Called exactly once, after every trial has terminated. Any append after
    /// this returns [`SinkError::Closed`].
    fn close(&self) -> Result<(), SinkError>;
}

/// Report sink errors
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Underlying writer failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink was already closed
    #[error("sink is closed")]
    Closed,

    /// A writer panicked while holding the sink lock
    #[error("sink lock poisoned")]
    Poisoned,
}

// ============================================================================
// Strategy Set
// ============================================================================

/// The four strategies every trial measures, shared read-only across trials
#[derive(Clone)]
pub struct StrategySet {
    /// Reference sort, runs on its own copy of the dataset
    pub baseline_sort: Arc<dyn SortStrategy>,

    /// Sort whose output the searches run over
    pub optimized_sort: Arc<dyn SortStrategy>,

    /// Search whose cost scales with position
    pub linear_search: Arc<dyn SearchStrategy>,

    /// Search whose result decides the not-found count
    pub binary_search: Arc<dyn SearchStrategy>,
}

impl StrategySet {
    /// Bundle four strategies
    pub fn new(
        baseline_sort: Arc<dyn SortStrategy>,
        optimized_sort: Arc<dyn SortStrategy>,
        linear_search: Arc<dyn SearchStrategy>,
        binary_search: Arc<dyn SearchStrategy>,
    ) -> Self {
        Self {
            baseline_sort,
            optimized_sort,
            linear_search,
            binary_search,
        }
    }
}

impl std::fmt::Debug for StrategySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategySet")
            .field("baseline_sort", &self.baseline_sort.name())
            .field("optimized_sort", &self.optimized_sort.name())
            .field("linear_search", &self.linear_search.name())
            .field("binary_search", &self.binary_search.name())
            .finish()
    }
}
