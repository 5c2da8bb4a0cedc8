//! Tests for the trial executor

use super::*;
use crate::dataset;
use crate::error::BenchError;
use crate::record::TrialSpec;
use crate::test_support::{mock_strategies, HalvingSearch, MemorySink, ScanSearch};
use crate::traits::{ReportSink, SearchStrategy};

use std::sync::Arc;
use tokio::sync::broadcast;

fn executor(spec: TrialSpec, sink: Arc<dyn ReportSink>) -> TrialExecutor {
    TrialExecutorBuilder::new(0)
        .spec(spec)
        .strategies(mock_strategies())
        .sink(sink)
        .build()
        .unwrap()
}

fn idle_shutdown() -> (broadcast::Sender<()>, broadcast::Receiver<()>) {
    broadcast::channel(1)
}

fn is_non_decreasing(values: &[i32]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

// ============================================================================
// Sorting phase
// ============================================================================

#[test]
fn test_sorted_copies_are_sorted_permutations() {
    for (size, seed) in [(1, 0), (10, 1), (257, 9), (1000, 42)] {
        let sink = Arc::new(MemorySink::new());
        let sorted = executor(TrialSpec::new(size, seed), sink).sort_datasets();

        let mut expected = dataset::generate(seed, size);
        expected.sort_unstable();

        assert!(is_non_decreasing(&sorted.baseline));
        assert!(is_non_decreasing(&sorted.optimized));
        assert_eq!(sorted.baseline, expected);
        assert_eq!(&sorted.optimized[..], expected.as_slice());
    }
}

#[test]
fn test_sort_counts_are_reported() {
    let sink = Arc::new(MemorySink::new());
    let sorted = executor(TrialSpec::new(100, 3), sink).sort_datasets();

    assert!(sorted.baseline_ops > 0);
    // Both mocks are the same algorithm on identical input
    assert_eq!(sorted.baseline_ops, sorted.optimized_ops);
}

#[test]
fn test_optimized_copy_is_the_sorted_buffer() {
    let spec = TrialSpec::new(64, 3);
    let sorted = executor(spec, Arc::new(MemorySink::new())).sort_datasets();

    assert_eq!(sorted.optimized.len(), spec.size);
    assert_eq!(sorted.optimized, sorted.baseline);
    assert!(is_non_decreasing(sorted.optimized.as_slice()));
}

// ============================================================================
// Search phase
// ============================================================================

#[test]
fn test_measure_is_deterministic() {
    let spec = TrialSpec::new(200, 5);
    let (_tx, mut rx) = idle_shutdown();

    let first = executor(spec, Arc::new(MemorySink::new()))
        .measure(&mut rx)
        .unwrap();
    let second = executor(spec, Arc::new(MemorySink::new()))
        .measure(&mut rx)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_not_found_matches_binary_and_linear_misses() {
    let spec = TrialSpec::new(500, 11);
    let (_tx, mut rx) = idle_shutdown();
    let record = executor(spec, Arc::new(MemorySink::new()))
        .measure(&mut rx)
        .unwrap();

    let mut sorted = dataset::generate(spec.seed, spec.size);
    sorted.sort_unstable();
    let mut targets = dataset::DatasetGenerator::new(spec.target_seed());

    let mut binary_misses = 0;
    let mut linear_misses = 0;
    for _ in 0..spec.size {
        let target = targets.next_value();
        if HalvingSearch.search(&sorted, target).index.is_none() {
            binary_misses += 1;
        }
        if ScanSearch.search(&sorted, target).index.is_none() {
            linear_misses += 1;
        }
    }

    assert_eq!(record.searches_not_found, binary_misses);
    assert_eq!(binary_misses, linear_misses);
}

#[test]
fn test_search_stats_bounds() {
    let spec = TrialSpec::new(300, 2);
    let (_tx, mut rx) = idle_shutdown();
    let record = executor(spec, Arc::new(MemorySink::new()))
        .measure(&mut rx)
        .unwrap();

    assert!(record.linear_min as f64 <= record.linear_avg);
    assert!(record.linear_avg <= record.linear_max as f64);
    assert!(record.binary_min as f64 <= record.binary_avg);
    assert!(record.binary_avg <= record.binary_max as f64);
    // A scan never costs more than one operation per element
    assert!(record.linear_max <= spec.size as u64);
}

#[test]
fn test_size_one_trial() {
    let spec = TrialSpec::new(1, 0);
    let (_tx, mut rx) = idle_shutdown();
    let record = executor(spec, Arc::new(MemorySink::new()))
        .measure(&mut rx)
        .unwrap();

    assert_eq!(record.size, 1);
    assert_eq!(record.linear_min, record.linear_max);
    assert_eq!(record.linear_avg, record.linear_min as f64);
    assert_eq!(record.binary_min, record.binary_max);
    assert_eq!(record.binary_avg, record.binary_min as f64);
    assert!(record.searches_not_found <= 1);
}

// ============================================================================
// Writing and failure containment
// ============================================================================

#[test]
fn test_run_writes_exactly_one_line() {
    let sink = Arc::new(MemorySink::new());
    let spec = TrialSpec::new(50, 7);
    let (_tx, rx) = idle_shutdown();

    let record = executor(spec, sink.clone()).run(rx).unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], record.to_csv_line().unwrap());
    assert!(lines[0].starts_with("7,50,"));
    assert!(lines[0].ends_with(",\n"));
}

#[test]
fn test_run_reports_write_failure() {
    let sink = Arc::new(MemorySink::new().with_fail_every(1));
    let (_tx, rx) = idle_shutdown();

    let result = executor(TrialSpec::new(10, 0), sink.clone()).run(rx);

    assert!(matches!(result, Err(BenchError::Sink(_))));
    assert!(sink.lines().is_empty());
}

#[test]
fn test_run_after_sink_closed() {
    let sink = Arc::new(MemorySink::new());
    sink.close().unwrap();
    let (_tx, rx) = idle_shutdown();

    let result = executor(TrialSpec::new(10, 0), sink).run(rx);
    assert!(result.unwrap_err().is_sink());
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_shutdown_before_start_cancels() {
    let sink = Arc::new(MemorySink::new());
    let (tx, rx) = idle_shutdown();
    tx.send(()).unwrap();

    let result = executor(TrialSpec::new(100, 0), sink.clone()).run(rx);

    assert!(matches!(result, Err(BenchError::Cancelled)));
    assert!(sink.lines().is_empty());
}

#[test]
fn test_dropped_shutdown_sender_does_not_cancel() {
    let sink = Arc::new(MemorySink::new());
    let (tx, rx) = idle_shutdown();
    drop(tx);

    let record = executor(TrialSpec::new(20, 1), sink.clone()).run(rx).unwrap();
    assert_eq!(record.size, 20);
    assert_eq!(sink.lines().len(), 1);
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_missing_spec() {
    let result = TrialExecutorBuilder::new(0)
        .strategies(mock_strategies())
        .sink(Arc::new(MemorySink::new()))
        .build();

    assert!(matches!(result, Err(BenchError::MissingConfig("spec"))));
}

#[test]
fn test_builder_missing_sink() {
    let result = TrialExecutorBuilder::new(0)
        .spec(TrialSpec::new(10, 0))
        .strategies(mock_strategies())
        .build();

    assert!(matches!(result, Err(BenchError::MissingConfig("sink"))));
}

#[test]
fn test_builder_missing_strategies() {
    let result = TrialExecutorBuilder::new(0)
        .spec(TrialSpec::new(10, 0))
        .sink(Arc::new(MemorySink::new()))
        .build();

    assert!(matches!(result, Err(BenchError::MissingConfig("strategies"))));
}

#[test]
fn test_builder_rejects_zero_size() {
    let result = TrialExecutorBuilder::new(3)
        .spec(TrialSpec::new(0, 0))
        .strategies(mock_strategies())
        .sink(Arc::new(MemorySink::new()))
        .build();

    assert!(matches!(result, Err(BenchError::Config(_))));
}

#[test]
fn test_builder_success() {
    let executor = TrialExecutorBuilder::new(4)
        .spec(TrialSpec::new(10, 2))
        .strategies(mock_strategies())
        .sink(Arc::new(MemorySink::new()))
        .build()
        .unwrap();

    assert_eq!(executor.id(), 4);
    assert_eq!(executor.spec(), TrialSpec::new(10, 2));
}
