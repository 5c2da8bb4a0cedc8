//! sort-bench-strategies: Sort and search strategies measured by sort-bench
//!
//! Every strategy counts its own elementary operations and returns the count
//! alongside its result. All strategies are stateless, so one instance can be
//! shared by every trial of a run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod search;
pub mod sort;

pub use search::{BinarySearch, LinearSearch};
pub use sort::{BubbleSort, FasterBubbleSort};

use std::sync::Arc;

use sort_bench_core::StrategySet;

/// The strategy set a run measures unless told otherwise
///
/// Baseline is [`BubbleSort`], optimized is [`FasterBubbleSort`].
pub fn default_strategies() -> StrategySet {
    StrategySet::new(
        Arc::new(BubbleSort),
        Arc::new(FasterBubbleSort),
        Arc::new(LinearSearch),
        Arc::new(BinarySearch),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_names() {
        let strategies = default_strategies();
        assert_eq!(strategies.baseline_sort.name(), "bubble");
        assert_eq!(strategies.optimized_sort.name(), "faster-bubble");
        assert_eq!(strategies.linear_search.name(), "linear");
        assert_eq!(strategies.binary_search.name(), "binary");
    }
}
