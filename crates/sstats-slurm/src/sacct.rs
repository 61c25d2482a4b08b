//! Query and parse SLURM accounting history via sacct.

use crate::schema::RecordSchema;
use crate::source::{AccountingSource, FetchError};
use crate::types::{AccountingRecord, ExtendedFields, JobState, QueryScope};
use sstats_parsers::{parse_slurm_timestamp, run_command, split_delimited};
use std::str::Lines;
use thiserror::Error;
use tokio::process::Command;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line_number}: {message}")]
    FieldCount {
        line_number: usize,
        message: String,
    },
    #[error("line {line_number}: invalid ElapsedRaw value {value:?}: {line}")]
    ElapsedRaw {
        line_number: usize,
        value: String,
        line: String,
    },
}

/// Lazy iterator over the records in raw sacct output.
///
/// Trailing blank lines are ignored. Any other line that does not have
/// enough fields for the schema yields an error.
pub struct SacctRecords<'a> {
    lines: Lines<'a>,
    schema: RecordSchema,
    line_number: usize,
}

impl<'a> SacctRecords<'a> {
    pub fn new(raw: &'a str, schema: RecordSchema) -> Self {
        let body = raw.trim_end_matches(['\n', '\r']);
        Self {
            lines: body.lines(),
            schema,
            line_number: 0,
        }
    }
}

impl Iterator for SacctRecords<'_> {
    type Item = Result<AccountingRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(parse_sacct_line(line, self.line_number, self.schema))
    }
}

/// Parse a single line of sacct output.
fn parse_sacct_line(
    line: &str,
    line_number: usize,
    schema: RecordSchema,
) -> Result<AccountingRecord, ParseError> {
    let fields =
        split_delimited(line, schema.field_count()).map_err(|message| ParseError::FieldCount {
            line_number,
            message,
        })?;

    let extended = if schema.is_extended() {
        let elapsed_raw = fields[9]
            .trim()
            .parse::<u64>()
            .map_err(|_| ParseError::ElapsedRaw {
                line_number,
                value: fields[9].to_string(),
                line: line.to_string(),
            })?;
        Some(ExtendedFields {
            start: parse_slurm_timestamp(fields[5]),
            end: parse_slurm_timestamp(fields[6]),
            elapsed: fields[7].to_string(),
            node_list: fields[8].to_string(),
            elapsed_raw,
            partition: fields[10].to_string(),
        })
    } else {
        None
    };

    Ok(AccountingRecord {
        job_id: fields[0].to_string(),
        user: fields[1].to_string(),
        account: fields[2].to_string(),
        state: JobState::classify(fields[3]),
        raw_state: fields[3].to_string(),
        exit_code: fields[4].to_string(),
        extended,
    })
}

/// Parse complete sacct output, failing the whole batch on the first bad line.
pub fn parse_sacct_output(
    raw: &str,
    schema: RecordSchema,
) -> Result<Vec<AccountingRecord>, ParseError> {
    SacctRecords::new(raw, schema).collect()
}

/// Runs sacct for every allocation of every user since a start time.
#[derive(Debug, Clone)]
pub struct SacctSource {
    program: String,
    schema: RecordSchema,
    scope: QueryScope,
}

impl SacctSource {
    pub fn new(program: impl Into<String>, schema: RecordSchema, scope: QueryScope) -> Self {
        Self {
            program: program.into(),
            schema,
            scope,
        }
    }

    /// Arguments passed to sacct for a given start time.
    pub fn args(&self, start_time: &str) -> Vec<String> {
        let mut args = vec![
            "--allusers".to_string(),
            "--allocations".to_string(),
            "--noheader".to_string(),
            format!("--format={}", self.schema.format_arg()),
            "--parsable2".to_string(),
        ];
        if let Some(states) = self.scope.state_arg() {
            args.push(format!("--state={}", states));
        }
        args.push(format!("--starttime={}", start_time));
        args.push("--endtime=now".to_string());
        args
    }
}

impl AccountingSource for SacctSource {
    fn describe(&self) -> String {
        self.program.clone()
    }

    async fn fetch(&self, start_time: &str) -> Result<String, FetchError> {
        let args = self.args(start_time);
        tracing::debug!(program = %self.program, args = ?args, "querying sacct");

        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        let stdout = run_command(&mut cmd, &self.program).await?;

        tracing::debug!(bytes = stdout.len(), "sacct command success");
        Ok(stdout)
    }
}
