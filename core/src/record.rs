//! Trial identity and the finalized output row

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};
use crate::worker::StatSummary;

/// Column names of the report, in output order
pub const HEADER: [&str; 11] = [
    "randomSeed",
    "nValue",
    "searchesNotFound",
    "bubSort",
    "fastBubSort",
    "linSearchMin",
    "linSearchAvg",
    "linSearchMax",
    "binSearchMin",
    "binSearchAvg",
    "binSearchMax",
];

/// One cell of the trial matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialSpec {
    /// Dataset length, also the number of search repetitions
    pub size: usize,

    /// Seed for the dataset; search targets use `seed + 1`
    pub seed: i64,
}

impl TrialSpec {
    /// Create a new trial spec
    pub fn new(size: usize, seed: i64) -> Self {
        Self { size, seed }
    }

    /// Seed of the search-target stream
    pub fn target_seed(&self) -> i64 {
        self.seed.wrapping_add(1)
    }
}

impl std::fmt::Display for TrialSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "size={} seed={}", self.size, self.seed)
    }
}

/// Finalized result of one trial, one report row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Dataset seed
    #[serde(rename = "randomSeed")]
    pub seed: i64,

    /// Dataset size
    #[serde(rename = "nValue")]
    pub size: usize,

    /// Repetitions where the binary search found nothing
    #[serde(rename = "searchesNotFound")]
    pub searches_not_found: usize,

    /// Operations spent by the baseline sort
    #[serde(rename = "bubSort")]
    pub baseline_sort_ops: u64,

    /// Operations spent by the optimized sort
    #[serde(rename = "fastBubSort")]
    pub optimized_sort_ops: u64,

    /// Fewest operations of a linear search
    #[serde(rename = "linSearchMin")]
    pub linear_min: u64,

    /// Running mean of linear search operations
    #[serde(rename = "linSearchAvg")]
    pub linear_avg: f64,

    /// Most operations of a linear search
    #[serde(rename = "linSearchMax")]
    pub linear_max: u64,

    /// Fewest operations of a binary search
    #[serde(rename = "binSearchMin")]
    pub binary_min: u64,

    /// Running mean of binary search operations
    #[serde(rename = "binSearchAvg")]
    pub binary_avg: f64,

    /// Most operations of a binary search
    #[serde(rename = "binSearchMax")]
    pub binary_max: u64,
}

impl TrialRecord {
    /// Assemble a record from a trial's measurements
    pub fn new(
        spec: TrialSpec,
        searches_not_found: usize,
        sort_ops: (u64, u64),
        linear: StatSummary,
        binary: StatSummary,
    ) -> Self {
        Self {
            seed: spec.seed,
            size: spec.size,
            searches_not_found,
            baseline_sort_ops: sort_ops.0,
            optimized_sort_ops: sort_ops.1,
            linear_min: linear.min,
            linear_avg: linear.average,
            linear_max: linear.max,
            binary_min: binary.min,
            binary_avg: binary.average,
            binary_max: binary.max,
        }
    }

    /// The spec this record was produced for
    pub fn spec(&self) -> TrialSpec {
        TrialSpec::new(self.size, self.seed)
    }

    /// Header line, trailing comma and newline included
    pub fn header_line() -> BenchResult<String> {
        csv_line(HEADER.iter().map(|h| h.to_string()))
    }

    /// This record as one report line, trailing comma and newline included
    pub fn to_csv_line(&self) -> BenchResult<String> {
        csv_line([
            self.seed.to_string(),
            self.size.to_string(),
            self.searches_not_found.to_string(),
            self.baseline_sort_ops.to_string(),
            self.optimized_sort_ops.to_string(),
            self.linear_min.to_string(),
            format_average(self.linear_avg),
            self.linear_max.to_string(),
            self.binary_min.to_string(),
            format_average(self.binary_avg),
            self.binary_max.to_string(),
        ])
    }
}

/// Averages always carry a decimal point ("5.0", not "5")
fn format_average(value: f64) -> String {
    format!("{:?}", value)
}

/// Render fields as a single CSV line
///
/// An empty final field produces the trailing comma every report line ends
/// with.
fn csv_line(fields: impl IntoIterator<Item = String>) -> BenchResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut record: Vec<String> = fields.into_iter().collect();
    record.push(String::new());
    wtr.write_record(&record)?;

    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| BenchError::trial(e.to_string()))
}
