//! Time window selection for accounting queries.

use chrono::{NaiveDateTime, TimeDelta};
use sstats_parsers::format_slurm_timestamp;

/// How far back to query accounting history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WindowSelector {
    /// Past 12 hours.
    #[default]
    Default,
    /// Past 24 hours.
    Day,
    /// Past 7 days.
    Week,
    /// Caller-supplied start time, passed through unchanged.
    ///
    /// The value is not validated; sacct rejects malformed timestamps itself.
    Explicit(String),
}

impl WindowSelector {
    /// Pick a selector from CLI-style flags.
    ///
    /// An explicit value wins over the presets, and week wins over day.
    pub fn from_flags(day: bool, week: bool, explicit: Option<String>) -> Self {
        match explicit {
            Some(value) => Self::Explicit(value),
            None if week => Self::Week,
            None if day => Self::Day,
            None => Self::Default,
        }
    }
}

/// Resolve a selector to a `YYYY-MM-DDTHH:MM:SS` start timestamp relative to `now`.
pub fn resolve(selector: &WindowSelector, now: NaiveDateTime) -> String {
    let span = match selector {
        WindowSelector::Explicit(value) => return value.clone(),
        WindowSelector::Default => TimeDelta::hours(12),
        WindowSelector::Day => TimeDelta::hours(24),
        WindowSelector::Week => TimeDelta::days(7),
    };
    format_slurm_timestamp(now - span)
}
