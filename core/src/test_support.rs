//! Mock strategies and sinks shared by the core test modules

use crate::traits::{ReportSink, SearchOutcome, SearchStrategy, SinkError, SortStrategy, StrategySet};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Mock Strategies
// ============================================================================

/// Sort that delegates to the standard library and counts comparisons
pub struct CountingSort {
    name: String,
    delay: Option<Duration>,
}

impl CountingSort {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl SortStrategy for CountingSort {
    fn name(&self) -> &str {
        &self.name
    }

    fn sort(&self, data: &mut [i32]) -> u64 {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let mut ops = 0u64;
        data.sort_by(|a, b| {
            ops += 1;
            a.cmp(b)
        });
        ops
    }
}

/// Sort that panics on datasets of a given size
pub struct PanickingSort {
    pub panic_on_size: usize,
}

impl SortStrategy for PanickingSort {
    fn name(&self) -> &str {
        "panicking"
    }

    fn sort(&self, data: &mut [i32]) -> u64 {
        if data.len() == self.panic_on_size {
            panic!("simulated strategy failure");
        }
        data.sort_unstable();
        0
    }
}

/// Front-to-back scan
pub struct ScanSearch;

impl SearchStrategy for ScanSearch {
    fn name(&self) -> &str {
        "scan"
    }

    fn search(&self, sorted: &[i32], target: i32) -> SearchOutcome {
        let mut ops = 0;
        for (i, &value) in sorted.iter().enumerate() {
            ops += 1;
            if value == target {
                return SearchOutcome::found(i, ops);
            }
        }
        SearchOutcome::not_found(ops)
    }
}

/// Half-interval search
pub struct HalvingSearch;

impl SearchStrategy for HalvingSearch {
    fn name(&self) -> &str {
        "halving"
    }

    fn search(&self, sorted: &[i32], target: i32) -> SearchOutcome {
        let (mut lo, mut hi) = (0usize, sorted.len());
        let mut ops = 0;
        while lo < hi {
            ops += 1;
            let mid = lo + (hi - lo) / 2;
            match sorted[mid].cmp(&target) {
                std::cmp::Ordering::Equal => return SearchOutcome::found(mid, ops),
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        SearchOutcome::not_found(ops)
    }
}

pub fn mock_strategies() -> StrategySet {
    StrategySet::new(
        Arc::new(CountingSort::new("baseline")),
        Arc::new(CountingSort::new("optimized")),
        Arc::new(ScanSearch),
        Arc::new(HalvingSearch),
    )
}

// ============================================================================
// Mock Sinks
// ============================================================================

/// In-memory sink that records every append
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    closed: Mutex<bool>,
    close_calls: AtomicUsize,
    fail_every: Option<usize>,
    appends: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `n`th append (1-based)
    pub fn with_fail_every(mut self, n: usize) -> Self {
        self.fail_every = Some(n);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl ReportSink for MemorySink {
    fn append(&self, line: &str) -> Result<(), SinkError> {
        if *self.closed.lock().unwrap() {
            return Err(SinkError::Closed);
        }
        let count = self.appends.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(n) = self.fail_every {
            if count % n == 0 {
                return Err(SinkError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "simulated write failure",
                )));
            }
        }
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }

    fn close(&self) -> Result<(), SinkError> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

/// Sink whose close always fails
#[derive(Default)]
pub struct FailingCloseSink {
    pub inner: MemorySink,
}

impl ReportSink for FailingCloseSink {
    fn append(&self, line: &str) -> Result<(), SinkError> {
        self.inner.append(line)
    }

    fn close(&self) -> Result<(), SinkError> {
        self.inner.close()?;
        Err(SinkError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "simulated flush failure",
        )))
    }
}
