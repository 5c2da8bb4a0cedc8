//! Per-size averages of a finished report

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use sort_bench_core::TrialRecord;

use crate::error::ReportError;

/// Mean of every metric column over the trials of one dataset size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeSummary {
    /// Dataset size
    pub size: usize,
    /// Number of trials averaged
    pub trials: usize,
    /// Mean not-found searches
    pub searches_not_found: f64,
    /// Mean baseline sort operations
    pub baseline_sort_ops: f64,
    /// Mean optimized sort operations
    pub optimized_sort_ops: f64,
    /// Mean linear-search minimum
    pub linear_min: f64,
    /// Mean linear-search average
    pub linear_avg: f64,
    /// Mean linear-search maximum
    pub linear_max: f64,
    /// Mean binary-search minimum
    pub binary_min: f64,
    /// Mean binary-search average
    pub binary_avg: f64,
    /// Mean binary-search maximum
    pub binary_max: f64,
}

#[derive(Default)]
struct Totals {
    trials: usize,
    sums: [f64; 9],
}

impl Totals {
    fn add(&mut self, record: &TrialRecord) {
        let values = [
            record.searches_not_found as f64,
            record.baseline_sort_ops as f64,
            record.optimized_sort_ops as f64,
            record.linear_min as f64,
            record.linear_avg,
            record.linear_max as f64,
            record.binary_min as f64,
            record.binary_avg,
            record.binary_max as f64,
        ];
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.trials += 1;
    }

    fn into_summary(self, size: usize) -> SizeSummary {
        let n = self.trials as f64;
        let [not_found, baseline, optimized, lin_min, lin_avg, lin_max, bin_min, bin_avg, bin_max] =
            self.sums.map(|sum| sum / n);

        SizeSummary {
            size,
            trials: self.trials,
            searches_not_found: not_found,
            baseline_sort_ops: baseline,
            optimized_sort_ops: optimized,
            linear_min: lin_min,
            linear_avg: lin_avg,
            linear_max: lin_max,
            binary_min: bin_min,
            binary_avg: bin_avg,
            binary_max: bin_max,
        }
    }
}

/// Read a report and average it per dataset size, smallest size first
pub fn summarize(path: impl AsRef<Path>) -> Result<Vec<SizeSummary>, ReportError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)?;

    let mut by_size: BTreeMap<usize, Totals> = BTreeMap::new();
    for row in reader.deserialize::<TrialRecord>() {
        let record = row?;
        by_size.entry(record.size).or_default().add(&record);
    }

    if by_size.is_empty() {
        return Err(ReportError::Empty(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), sizes = by_size.len(), "Summarized report");

    Ok(by_size
        .into_iter()
        .map(|(size, totals)| totals.into_summary(size))
        .collect())
}

/// Render summaries as an aligned text table
pub fn format_table(summaries: &[SizeSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>8} {:>6} {:>10} {:>14} {:>14} {:>8} {:>10} {:>8} {:>8} {:>10} {:>8}",
        "nValue",
        "trials",
        "notFound",
        "bubSort",
        "fastBubSort",
        "linMin",
        "linAvg",
        "linMax",
        "binMin",
        "binAvg",
        "binMax"
    );
    for s in summaries {
        let _ = writeln!(
            out,
            "{:>8} {:>6} {:>10.2} {:>14.1} {:>14.1} {:>8.2} {:>10.2} {:>8.2} {:>8.2} {:>10.2} {:>8.2}",
            s.size,
            s.trials,
            s.searches_not_found,
            s.baseline_sort_ops,
            s.optimized_sort_ops,
            s.linear_min,
            s.linear_avg,
            s.linear_max,
            s.binary_min,
            s.binary_avg,
            s.binary_max
        );
    }
    out
}
