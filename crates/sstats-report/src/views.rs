//! Report views.

use sstats_stats::{DimensionHistogram, StatisticsSnapshot};

const RULE: &str = "____________________________________________";
const BANNER: &str = "############################################";
const MISSING: &str = "-";

/// Which part of the snapshot to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    /// Completed, then Failed, then Nodes when node data is present.
    All,
    /// State counts, totals, and rates.
    Completed,
    /// Failure count, rate, and most common user/group/exit code.
    Failed,
    /// Per-partition and per-node job counts with elapsed-time buckets.
    Nodes,
}

/// Render a view of the snapshot as plain text.
pub fn render(view: ReportView, snapshot: &StatisticsSnapshot) -> String {
    let lines = match view {
        ReportView::All => {
            let mut lines = completed_lines(snapshot);
            lines.extend(failed_lines(snapshot));
            if snapshot.has_extended() {
                lines.extend(node_lines(snapshot));
            }
            lines
        }
        ReportView::Completed => completed_lines(snapshot),
        ReportView::Failed => failed_lines(snapshot),
        ReportView::Nodes => node_lines(snapshot),
    };
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render the whole snapshot as pretty-printed JSON.
pub fn render_json(snapshot: &StatisticsSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Percentages are printed truncated to a whole number.
fn percent(rate: f64) -> u64 {
    rate as u64
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn completed_lines(snapshot: &StatisticsSnapshot) -> Vec<String> {
    let counts = &snapshot.counts;
    let rates = &snapshot.rates;
    vec![
        RULE.to_string(),
        "############### JOB STATUS #################".to_string(),
        format!("Running jobs:    {}", counts.running),
        format!("Eligible jobs:   {}", counts.eligible),
        format!("Successful jobs: {}", counts.completed),
        format!("Cancelled jobs:  {}", counts.cancelled),
        format!("Overtime jobs:   {}", counts.timed_out),
        format!("Failed jobs:     {}", counts.failed),
        RULE.to_string(),
        format!("Total jobs:      {}", counts.total),
        RULE.to_string(),
        format!("Failure Rate:    {}%", percent(rates.failure)),
        format!("Success Rate:    {}%", percent(rates.completion)),
        RULE.to_string(),
    ]
}

fn failed_lines(snapshot: &StatisticsSnapshot) -> Vec<String> {
    let failures = &snapshot.failures;
    vec![
        RULE.to_string(),
        "########### JOB FAIL INFORMATION ###########".to_string(),
        format!("Failed jobs:                 {}", snapshot.counts.failed),
        format!(
            "Failure rate:                {}",
            percent(snapshot.rates.failure)
        ),
        RULE.to_string(),
        format!(
            "User with most Failures:     {}",
            or_missing(failures.top_user.as_deref())
        ),
        format!(
            "Group with most Failures:    {}",
            or_missing(failures.top_group.as_deref())
        ),
        format!(
            "Most common exit code:       {}",
            or_missing(failures.top_exit_code.as_deref())
        ),
        RULE.to_string(),
        format!("Number of Exit 1 Failures:   {}", failures.exit_1_count),
        format!("Number of Exit 7 Failures:   {}", failures.exit_7_count),
        RULE.to_string(),
    ]
}

fn histogram_lines(title: &str, histogram: &DimensionHistogram, gap: &str) -> Vec<String> {
    let mut lines = vec![
        BANNER.to_string(),
        format!("Job count by {}", title),
        format!("If count is zero, {} will not appear in this list", title),
        RULE.to_string(),
    ];
    lines.extend(
        histogram
            .entries()
            .iter()
            .map(|e| format!("{}{}{}", e.value, gap, e.count)),
    );
    lines
}

fn node_lines(snapshot: &StatisticsSnapshot) -> Vec<String> {
    let (Some(partitions), Some(nodes), Some(elapsed)) =
        (&snapshot.partitions, &snapshot.nodes, &snapshot.elapsed)
    else {
        return vec!["Node breakdown unavailable: records lack node and partition columns".to_string()];
    };

    let mut lines = histogram_lines("partition", partitions, "      ");
    lines.push(String::new());
    lines.extend(histogram_lines("node", &nodes.histogram, "    "));

    let average = nodes
        .average_jobs_per_node
        .map_or_else(|| MISSING.to_string(), |a| a.to_string());
    lines.extend([
        format!("Number of nodes: {}", nodes.histogram.len()),
        RULE.to_string(),
        format!("Total jobs:            {}", nodes.histogram.total()),
        format!(
            "Most used node:        {}",
            or_missing(nodes.most_used.as_deref())
        ),
        format!("Average jobs per node: {}", average),
        format!("Amount of jobs <1min:  {}", elapsed.under_minute),
        format!("Amount of jobs <30min: {}", elapsed.under_thirty_minutes),
        format!("Amount of jobs <1hr:   {}", elapsed.under_hour),
        format!("Amount of jobs >1hr:   {}", elapsed.long_jobs),
        String::new(),
    ]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use sstats_slurm::{AccountingRecord, ExtendedFields, JobState, QueryScope};
    use sstats_stats::aggregate;

    fn record(state: &str, exit_code: &str) -> AccountingRecord {
        AccountingRecord {
            job_id: "1".to_string(),
            user: "alice".to_string(),
            account: "lab".to_string(),
            state: JobState::classify(state),
            raw_state: state.to_string(),
            exit_code: exit_code.to_string(),
            extended: None,
        }
    }

    fn on_node(state: &str, node: &str, partition: &str, raw: u64) -> AccountingRecord {
        let elapsed = format!("{:02}:{:02}:{:02}", raw / 3600, (raw % 3600) / 60, raw % 60);
        AccountingRecord {
            extended: Some(ExtendedFields {
                start: None,
                end: None,
                elapsed,
                node_list: node.to_string(),
                elapsed_raw: raw,
                partition: partition.to_string(),
            }),
            ..record(state, "0:0")
        }
    }

    fn mixed_snapshot() -> StatisticsSnapshot {
        let mut records: Vec<AccountingRecord> =
            (0..6).map(|_| record("COMPLETED", "0:0")).collect();
        records.push(record("FAILED", "1:0"));
        records.push(record("FAILED", "7:0"));
        records.push(record("RUNNING", "0:0"));
        records.push(record("PENDING", "0:0"));
        aggregate(&records, QueryScope::AllStates)
    }

    #[test]
    fn test_completed_view() {
        let text = render(ReportView::Completed, &mixed_snapshot());
        assert!(text.contains("Successful jobs: 6"));
        assert!(text.contains("Failed jobs:     2"));
        assert!(text.contains("Total jobs:      10"));
        assert!(text.contains("Failure Rate:    25%"));
        assert!(text.contains("Success Rate:    75%"));
        assert!(!text.contains("JOB FAIL INFORMATION"));
    }

    #[test]
    fn test_failed_view() {
        let text = render(ReportView::Failed, &mixed_snapshot());
        assert!(text.contains("Failed jobs:                 2"));
        assert!(text.contains("Failure rate:                25"));
        assert!(text.contains("User with most Failures:     alice"));
        assert!(text.contains("Most common exit code:       0:0"));
        assert!(text.contains("Number of Exit 1 Failures:   1"));
        assert!(text.contains("Number of Exit 7 Failures:   1"));
        assert!(!text.contains("JOB STATUS"));
    }

    #[test]
    fn test_all_view_orders_completed_before_failed() {
        let text = render(ReportView::All, &mixed_snapshot());
        let status = text.find("JOB STATUS").unwrap();
        let fail = text.find("JOB FAIL INFORMATION").unwrap();
        assert!(status < fail);
        assert!(!text.contains("Job count by node"));
    }

    #[test]
    fn test_zero_comparison_total_renders_zero_rates() {
        let snapshot = aggregate(
            &[record("RUNNING", "0:0"), record("PENDING", "0:0")],
            QueryScope::AllStates,
        );
        let text = render(ReportView::All, &snapshot);
        assert!(text.contains("Failure Rate:    0%"));
        assert!(text.contains("Success Rate:    0%"));
    }

    #[test]
    fn test_empty_snapshot_renders_every_view() {
        let snapshot = aggregate(&[], QueryScope::AllStates);
        for view in [
            ReportView::All,
            ReportView::Completed,
            ReportView::Failed,
            ReportView::Nodes,
        ] {
            let text = render(view, &snapshot);
            assert!(text.ends_with('\n'));
        }
        let text = render(ReportView::Failed, &snapshot);
        assert!(text.contains("User with most Failures:     -"));
    }

    #[test]
    fn test_nodes_view() {
        let records = vec![
            on_node("COMPLETED", "n1", "short", 30),
            on_node("COMPLETED", "n2", "short", 900),
            on_node("COMPLETED", "n1", "gpu", 2400),
            on_node("COMPLETED", "n3", "short", 7300),
            on_node("COMPLETED", "n1", "short", 50),
        ];
        let snapshot = aggregate(&records, QueryScope::AllStates);
        let text = render(ReportView::Nodes, &snapshot);

        let gpu = text.find("gpu      1").unwrap();
        let short = text.find("short      4").unwrap();
        assert!(gpu < short);
        assert!(text.contains("n1    3\nn2    1\nn3    1\nNumber of nodes: 3"));
        assert!(text.contains("Total jobs:            5"));
        assert!(text.contains("Most used node:        n1"));
        assert!(text.contains("Average jobs per node: 1"));
        assert!(text.contains("Amount of jobs <1min:  2"));
        assert!(text.contains("Amount of jobs <30min: 3"));
        assert!(text.contains("Amount of jobs <1hr:   4"));
        assert!(text.contains("Amount of jobs >1hr:   1"));
    }

    #[test]
    fn test_all_view_includes_nodes_when_extended() {
        let snapshot = aggregate(&[on_node("COMPLETED", "n1", "short", 10)], QueryScope::AllStates);
        let text = render(ReportView::All, &snapshot);
        let fail = text.find("JOB FAIL INFORMATION").unwrap();
        let nodes = text.find("Job count by node").unwrap();
        assert!(fail < nodes);
    }

    #[test]
    fn test_nodes_view_without_extended_data() {
        let text = render(ReportView::Nodes, &mixed_snapshot());
        assert!(text.starts_with("Node breakdown unavailable"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&mixed_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["counts"]["completed"], 6);
        assert_eq!(value["counts"]["failed"], 2);
        assert_eq!(value["rates"]["failure"], 25.0);
        assert_eq!(value["scope"]["kind"], "all_states");
        assert!(value["nodes"].is_null());
    }
}
