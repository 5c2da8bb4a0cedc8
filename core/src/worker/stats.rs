//! Per-trial search statistics

/// Finalized min/average/max of one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSummary {
    /// Smallest observation
    pub min: u64,

    /// Incremental mean of all observations
    pub average: f64,

    /// Largest observation
    pub max: u64,
}

/// Running min, max and mean of an operation count, in constant memory
///
/// The mean is updated as `(average * i + value) / (i + 1)` in `f64`. Over
/// very long runs this accumulates rounding error, which is left uncorrected.
#[derive(Debug, Default, Clone)]
pub struct RunningStats {
    observations: u64,
    min: u64,
    max: u64,
    average: f64,
}

impl RunningStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one observation in
    pub fn record(&mut self, value: u64) {
        if self.observations == 0 {
            self.min = value;
            self.max = value;
            self.average = value as f64;
        } else {
            let i = self.observations as f64;
            self.min = self.min.min(value);
            self.max = self.max.max(value);
            self.average = (self.average * i + value as f64) / (i + 1.0);
        }
        self.observations += 1;
    }

    /// Number of observations so far
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Current summary, `None` before the first observation
    pub fn summary(&self) -> Option<StatSummary> {
        (self.observations > 0).then_some(StatSummary {
            min: self.min,
            average: self.average,
            max: self.max,
        })
    }
}

/// Statistics a trial gathers across its search repetitions
///
/// Owned by exactly one trial executor and never shared.
#[derive(Debug, Default, Clone)]
pub struct SearchTrialStats {
    /// Linear search operation counts
    pub linear: RunningStats,

    /// Binary search operation counts
    pub binary: RunningStats,

    /// Repetitions where the binary search found nothing
    pub binary_not_found: usize,

    /// Repetitions where the linear search found nothing
    pub linear_not_found: usize,
}

impl SearchTrialStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one repetition
    pub fn record(&mut self, linear_ops: u64, linear_found: bool, binary_ops: u64, binary_found: bool) {
        self.linear.record(linear_ops);
        self.binary.record(binary_ops);
        if !linear_found {
            self.linear_not_found += 1;
        }
        if !binary_found {
            self.binary_not_found += 1;
        }
    }

    /// Number of repetitions recorded
    pub fn repetitions(&self) -> u64 {
        self.binary.observations()
    }

    /// Whether both strategies agreed on every miss count
    pub fn strategies_agree(&self) -> bool {
        self.linear_not_found == self.binary_not_found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_stats_empty() {
        let stats = RunningStats::new();
        assert_eq!(stats.observations(), 0);
        assert!(stats.summary().is_none());
    }

    #[test]
    fn test_running_stats_single_value() {
        let mut stats = RunningStats::new();
        stats.record(17);

        let summary = stats.summary().unwrap();
        assert_eq!(summary.min, 17);
        assert_eq!(summary.max, 17);
        assert_eq!(summary.average, 17.0);
    }

    #[test]
    fn test_running_stats_sequence() {
        let mut stats = RunningStats::new();
        for v in [4, 2, 9] {
            stats.record(v);
        }

        let summary = stats.summary().unwrap();
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 9);
        assert_eq!(summary.average, 5.0);
        assert_eq!(stats.observations(), 3);
    }

    #[test]
    fn test_running_stats_first_value_not_seeded_from_zero() {
        let mut stats = RunningStats::new();
        stats.record(50);
        stats.record(70);

        let summary = stats.summary().unwrap();
        assert_eq!(summary.min, 50);
        assert_eq!(summary.average, 60.0);
    }

    #[test]
    fn test_running_stats_tracks_mean_closely() {
        let mut stats = RunningStats::new();
        let values: Vec<u64> = (1..=10_000).collect();
        for &v in &values {
            stats.record(v);
        }

        let exact = values.iter().sum::<u64>() as f64 / values.len() as f64;
        let summary = stats.summary().unwrap();
        assert!((summary.average - exact).abs() < 1e-6);
    }

    #[test]
    fn test_search_trial_stats_counts_misses() {
        let mut stats = SearchTrialStats::new();
        stats.record(10, false, 4, false);
        stats.record(3, true, 2, true);
        stats.record(10, false, 4, false);

        assert_eq!(stats.repetitions(), 3);
        assert_eq!(stats.binary_not_found, 2);
        assert_eq!(stats.linear_not_found, 2);
        assert!(stats.strategies_agree());

        let linear = stats.linear.summary().unwrap();
        assert_eq!((linear.min, linear.max), (3, 10));
        let binary = stats.binary.summary().unwrap();
        assert_eq!((binary.min, binary.max), (2, 4));
    }

    #[test]
    fn test_search_trial_stats_disagreement() {
        let mut stats = SearchTrialStats::new();
        stats.record(10, true, 4, false);
        assert!(!stats.strategies_agree());
    }
}
