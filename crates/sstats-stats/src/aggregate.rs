//! Aggregation of accounting records into a statistics snapshot.

use crate::frequency::{histogram, most_frequent};
use crate::snapshot::{
    ElapsedBuckets, FailureSummary, NodeBreakdown, Rates, StateCounts, StatisticsSnapshot,
};
use sstats_slurm::{AccountingRecord, ExtendedFields, JobState, QueryScope};

const EXIT_GENERAL_ERROR: &str = "1:0";
const EXIT_CODE_SEVEN: &str = "7:0";

/// Compute every statistic for one run's records.
///
/// `scope` is the state filter the records were fetched with. It is carried
/// on the snapshot; the failed count is only a true failure count under
/// [`QueryScope::AllStates`].
pub fn aggregate(records: &[AccountingRecord], scope: QueryScope) -> StatisticsSnapshot {
    let counts = count_states(records);
    tracing::debug!(
        total = counts.total,
        running = counts.running,
        eligible = counts.eligible,
        completed = counts.completed,
        cancelled = counts.cancelled,
        timed_out = counts.timed_out,
        failed = counts.failed,
        "counted job states"
    );

    let rates = Rates::from_counts(&counts);
    let failures = summarize_failures(records);

    // Extended statistics need the extra columns on every record.
    let extended: Option<Vec<&ExtendedFields>> = if records.is_empty() {
        None
    } else {
        records.iter().map(|r| r.extended.as_ref()).collect()
    };

    let (elapsed, partitions, nodes) = match extended {
        Some(ext) => {
            let elapsed = bucket_elapsed(&ext);
            tracing::debug!(
                under_minute = elapsed.under_minute,
                under_thirty_minutes = elapsed.under_thirty_minutes,
                under_hour = elapsed.under_hour,
                long_jobs = elapsed.long_jobs,
                "bucketed elapsed times"
            );
            let partitions = histogram(ext.iter().map(|e| e.partition.as_str()));
            (Some(elapsed), Some(partitions), Some(node_breakdown(&ext)))
        }
        None => (None, None, None),
    };

    StatisticsSnapshot {
        scope,
        counts,
        rates,
        failures,
        elapsed,
        partitions,
        nodes,
    }
}

fn count_states(records: &[AccountingRecord]) -> StateCounts {
    let mut counts = StateCounts {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        match record.state {
            JobState::Running => counts.running += 1,
            JobState::Pending => counts.eligible += 1,
            JobState::Completed => counts.completed += 1,
            JobState::Cancelled => counts.cancelled += 1,
            JobState::Timeout => counts.timed_out += 1,
            JobState::Other(_) => {}
        }
    }

    counts.failed = counts.total
        - counts.completed
        - counts.running
        - counts.eligible
        - counts.cancelled
        - counts.timed_out;
    counts
}

fn summarize_failures(records: &[AccountingRecord]) -> FailureSummary {
    let users: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
    let groups: Vec<&str> = records.iter().map(|r| r.account.as_str()).collect();
    let exits: Vec<&str> = records.iter().map(|r| r.exit_code.as_str()).collect();

    FailureSummary {
        top_user: most_frequent(&users).map(|s| s.to_string()),
        top_group: most_frequent(&groups).map(|s| s.to_string()),
        top_exit_code: most_frequent(&exits).map(|s| s.to_string()),
        exit_1_count: exits.iter().filter(|&&e| e == EXIT_GENERAL_ERROR).count(),
        exit_7_count: exits.iter().filter(|&&e| e == EXIT_CODE_SEVEN).count(),
    }
}

fn bucket_elapsed(ext: &[&ExtendedFields]) -> ElapsedBuckets {
    let total = ext.len();
    let under_hour = ext.iter().filter(|e| e.elapsed.contains("00:")).count();

    ElapsedBuckets {
        under_minute: ext.iter().filter(|e| e.elapsed_raw < 60).count(),
        under_thirty_minutes: ext.iter().filter(|e| e.elapsed_raw < 1800).count(),
        under_hour,
        under_hour_exact: ext.iter().filter(|e| e.elapsed_raw < 3600).count(),
        long_jobs: total.saturating_sub(under_hour),
    }
}

fn node_breakdown(ext: &[&ExtendedFields]) -> NodeBreakdown {
    let nodes: Vec<&str> = ext.iter().map(|e| e.node_list.as_str()).collect();
    let histogram = histogram(nodes.iter().copied());
    let average_jobs_per_node = if histogram.is_empty() {
        None
    } else {
        Some(histogram.total() / histogram.len())
    };

    NodeBreakdown {
        most_used: most_frequent(&nodes).map(|s| s.to_string()),
        average_jobs_per_node,
        histogram,
    }
}
