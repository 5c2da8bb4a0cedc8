//! Bubble sorts with operation counting
//!
//! Both sorts count one operation per element comparison and one per swap.

use sort_bench_core::SortStrategy;

/// Plain bubble sort: `n - 1` full passes, never exits early
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl SortStrategy for BubbleSort {
    fn name(&self) -> &str {
        "bubble"
    }

    fn sort(&self, data: &mut [i32]) -> u64 {
        let n = data.len();
        let mut ops = 0u64;

        for pass in 1..n {
            for i in 0..n - pass {
                ops += 1;
                if data[i] > data[i + 1] {
                    data.swap(i, i + 1);
                    ops += 1;
                }
            }
        }

        ops
    }
}

/// Bubble sort that stops scanning past the last swap
///
/// Each pass only scans up to where the previous pass last swapped, and the
/// sort ends after the first pass with no swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct FasterBubbleSort;

impl SortStrategy for FasterBubbleSort {
    fn name(&self) -> &str {
        "faster-bubble"
    }

    fn sort(&self, data: &mut [i32]) -> u64 {
        let mut ops = 0u64;
        // Everything at or past `bound` is in final position
        let mut bound = data.len();

        while bound > 1 {
            let mut last_swap = 0;
            for i in 0..bound - 1 {
                ops += 1;
                if data[i] > data[i + 1] {
                    data.swap(i, i + 1);
                    ops += 1;
                    last_swap = i + 1;
                }
            }
            bound = last_swap;
        }

        ops
    }
}
