//! Shared parsing utilities for scheduler accounting output.
//!
//! Field splitting, timestamp handling, and external command
//! execution used by the record parser and data sources.

pub mod command;
pub mod time;

pub use command::{CommandError, run_command};
pub use time::{SLURM_TIMESTAMP_FORMAT, format_slurm_timestamp, parse_slurm_timestamp};

/// Field delimiter used by `sacct --parsable2`.
pub const DELIMITER: char = '|';

/// Split a pipe-delimited line and validate field count.
///
/// Extra trailing fields are kept; only a short line is an error.
pub fn split_delimited(line: &str, min_fields: usize) -> Result<Vec<&str>, String> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() < min_fields {
        return Err(format!(
            "Expected {} fields, got {}: {}",
            min_fields,
            fields.len(),
            line
        ));
    }
    Ok(fields)
}
