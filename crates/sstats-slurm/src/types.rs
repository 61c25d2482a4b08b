//! SLURM accounting record types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Terminal or current state of a job as reported by sacct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Running,
    Pending,
    Completed,
    Cancelled,
    Timeout,
    /// Anything else. These jobs make up the residual "failed" count.
    Other(String),
}

impl JobState {
    /// Classify a raw sacct state string.
    ///
    /// Matching is exact and case-sensitive. Any state containing `by` counts
    /// as cancelled so that `CANCELLED by <uid>` is recognized.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "RUNNING" => Self::Running,
            "PENDING" => Self::Pending,
            "COMPLETED" => Self::Completed,
            "CANCELLED" => Self::Cancelled,
            "TIMEOUT" => Self::Timeout,
            other if other.contains("by") => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Columns only present in the extended schema.
#[derive(Debug, Clone)]
pub struct ExtendedFields {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    /// Human-readable elapsed time, e.g. `01:23:45` or `2-03:00:00`.
    pub elapsed: String,
    /// Allocated node list, possibly a compressed range like `n[01-04]`.
    pub node_list: String,
    /// Elapsed time in seconds.
    pub elapsed_raw: u64,
    pub partition: String,
}

/// One job's accounting line.
#[derive(Debug, Clone)]
pub struct AccountingRecord {
    pub job_id: String,
    pub user: String,
    /// Group/account the job was charged to.
    pub account: String,
    pub state: JobState,
    /// State string exactly as sacct printed it.
    pub raw_state: String,
    /// Exit code in `<major>:<minor>` form.
    pub exit_code: String,
    pub extended: Option<ExtendedFields>,
}

/// State filter applied upstream when the records were queried.
///
/// The residual failed count assumes every state in the window was returned.
/// Under a filtered scope that assumption does not hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "states", rename_all = "snake_case")]
pub enum QueryScope {
    #[default]
    AllStates,
    States(Vec<String>),
}

impl QueryScope {
    /// Build a scope from user-supplied state names. An empty list means no filter.
    pub fn from_states(states: Vec<String>) -> Self {
        if states.is_empty() {
            Self::AllStates
        } else {
            Self::States(states)
        }
    }

    /// Whether the derived failed count reflects the full population.
    pub fn residual_is_exact(&self) -> bool {
        matches!(self, Self::AllStates)
    }

    /// Value for `sacct --state=`, if any.
    pub fn state_arg(&self) -> Option<String> {
        match self {
            Self::AllStates => None,
            Self::States(states) => Some(states.join(",")),
        }
    }
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllStates => write!(f, "all states"),
            Self::States(states) => write!(f, "states {}", states.join(",")),
        }
    }
}
