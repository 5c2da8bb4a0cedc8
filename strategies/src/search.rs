//! Searches over sorted data with operation counting

use std::cmp::Ordering;

use sort_bench_core::{SearchOutcome, SearchStrategy};

/// Left-to-right scan
///
/// Ignores sortedness: it stops only at an equal element or at the end.
/// One operation per element compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

impl SearchStrategy for LinearSearch {
    fn name(&self) -> &str {
        "linear"
    }

    fn search(&self, sorted: &[i32], target: i32) -> SearchOutcome {
        let mut ops = 0u64;
        for (index, &value) in sorted.iter().enumerate() {
            ops += 1;
            if value == target {
                return SearchOutcome::found(index, ops);
            }
        }
        SearchOutcome::not_found(ops)
    }
}

/// Half-interval search, one operation per probe
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl SearchStrategy for BinarySearch {
    fn name(&self) -> &str {
        "binary"
    }

    fn search(&self, sorted: &[i32], target: i32) -> SearchOutcome {
        let mut low = 0usize;
        let mut high = sorted.len();
        let mut ops = 0u64;

        while low < high {
            ops += 1;
            let mid = low + (high - low) / 2;
            match sorted[mid].cmp(&target) {
                Ordering::Equal => return SearchOutcome::found(mid, ops),
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
            }
        }

        SearchOutcome::not_found(ops)
    }
}
