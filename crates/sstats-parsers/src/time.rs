//! Timestamp utilities for sacct input and output.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Timestamp layout used by sacct for `Start`/`End` and accepted by `--starttime`.
pub const SLURM_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a SLURM timestamp (YYYY-MM-DDTHH:MM:SS or placeholder values).
///
/// Returns None for empty strings or placeholder values like "N/A", "Unknown", "None".
pub fn parse_slurm_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() || s == "N/A" || s == "Unknown" || s == "None" {
        return None;
    }
    NaiveDateTime::parse_from_str(s, SLURM_TIMESTAMP_FORMAT)
        .ok()
        .and_then(|dt| Utc.from_local_datetime(&dt).single())
}

/// Format a timestamp the way `sacct --starttime` expects it.
pub fn format_slurm_timestamp(dt: NaiveDateTime) -> String {
    dt.format(SLURM_TIMESTAMP_FORMAT).to_string()
}
