//! Statistics snapshot types.

use serde::Serialize;
use sstats_slurm::QueryScope;

/// Job counts by state.
///
/// `failed` is the remainder after the observed states, so
/// `total == running + eligible + completed + cancelled + timed_out + failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub total: usize,
    pub running: usize,
    /// Pending jobs.
    pub eligible: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub timed_out: usize,
    pub failed: usize,
}

impl StateCounts {
    /// Denominator for rate calculations: finished jobs that either succeeded or failed.
    pub fn comparison_total(&self) -> usize {
        self.failed + self.completed
    }
}

/// Failure and completion rates as percentages of the comparison total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rates {
    pub comparison_total: usize,
    pub failure: f64,
    pub completion: f64,
    /// False when the comparison total is zero; both rates are then 0.
    pub defined: bool,
}

impl Rates {
    pub fn from_counts(counts: &StateCounts) -> Self {
        let comparison_total = counts.comparison_total();
        if comparison_total == 0 {
            return Self {
                comparison_total,
                failure: 0.0,
                completion: 0.0,
                defined: false,
            };
        }
        let denominator = comparison_total as f64;
        Self {
            comparison_total,
            failure: counts.failed as f64 / denominator * 100.0,
            completion: counts.completed as f64 / denominator * 100.0,
            defined: true,
        }
    }
}

/// Most common user, group, and exit code, plus counts of the two common failure codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    pub top_user: Option<String>,
    pub top_group: Option<String>,
    pub top_exit_code: Option<String>,
    /// Occurrences of exit code `1:0`.
    pub exit_1_count: usize,
    /// Occurrences of exit code `7:0`.
    pub exit_7_count: usize,
}

/// Elapsed-time buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElapsedBuckets {
    pub under_minute: usize,
    pub under_thirty_minutes: usize,
    /// Jobs whose elapsed string contains `00:`.
    ///
    /// This is a textual check and also matches strings such as `1-00:10:00`
    /// or `02:00:15`. See `under_hour_exact` for the numeric count.
    pub under_hour: usize,
    /// Jobs with fewer than 3600 elapsed seconds.
    pub under_hour_exact: usize,
    /// `total - under_hour`.
    pub long_jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramEntry {
    pub value: String,
    pub count: usize,
}

/// Unique values of one dimension, sorted ascending, with occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DimensionHistogram {
    entries: Vec<HistogramEntry>,
}

impl DimensionHistogram {
    pub(crate) fn new(entries: Vec<HistogramEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[HistogramEntry] {
        &self.entries
    }

    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.value.as_str()).collect()
    }

    pub fn count(&self, value: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map_or(0, |e| e.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-node job distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeBreakdown {
    pub histogram: DimensionHistogram,
    pub most_used: Option<String>,
    /// Total jobs divided by unique node count, truncated. None without nodes.
    pub average_jobs_per_node: Option<usize>,
}

/// Everything derived from one run's record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    /// Upstream state filter the records were queried with.
    pub scope: QueryScope,
    pub counts: StateCounts,
    pub rates: Rates,
    pub failures: FailureSummary,
    /// Present only when every record has the extended columns.
    pub elapsed: Option<ElapsedBuckets>,
    pub partitions: Option<DimensionHistogram>,
    pub nodes: Option<NodeBreakdown>,
}

impl StatisticsSnapshot {
    /// Whether the extended (node/partition/elapsed) statistics were computed.
    pub fn has_extended(&self) -> bool {
        self.nodes.is_some()
    }

    /// Whether `counts.failed` reflects the full population of the window.
    pub fn residual_is_exact(&self) -> bool {
        self.scope.residual_is_exact()
    }
}
