//! One accounting summary run: window, fetch, parse, aggregate, render.

use chrono::NaiveDateTime;
use miette::Diagnostic;
use sstats_cli::Args;
use sstats_report::{ReportView, render, render_json};
use sstats_slurm::{
    AccountingSource, FetchError, ParseError, QueryScope, RecordSchema, WindowSelector,
    parse_sacct_output, resolve,
};
use sstats_stats::aggregate;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PipelineError {
    #[error("No Slurm accounting data available")]
    #[diagnostic(
        code(sstats::source_unavailable),
        help("Check that sacct is installed and on PATH, or set --sacct / SSTATS_SACCT")
    )]
    SourceUnavailable(#[source] FetchError),

    #[error("Unable to get job status")]
    #[diagnostic(code(sstats::fetch_failed))]
    FetchFailed(#[source] FetchError),

    #[error("Unable to parse accounting output as {schema:?} records")]
    #[diagnostic(
        code(sstats::parse),
        help("The sacct output does not match the requested columns; check --schema")
    )]
    Parse {
        #[source]
        source: ParseError,
        schema: RecordSchema,
    },

    #[error("Failed to encode report as JSON")]
    #[diagnostic(code(sstats::json))]
    Json(#[from] serde_json::Error),
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::SourceUnavailable { .. } => Self::SourceUnavailable(err),
            FetchError::FetchFailed { .. } => Self::FetchFailed(err),
        }
    }
}

impl PipelineError {
    /// Process exit status for this error.
    ///
    /// A failing data source's own status is passed through.
    pub fn exit_code(&self) -> u8 {
        let code = match self {
            Self::FetchFailed(err) => err.exit_code(),
            _ => 1,
        };
        u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1)
    }
}

/// Everything a run needs besides the data source and the clock.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub window: WindowSelector,
    pub schema: RecordSchema,
    pub scope: QueryScope,
    pub view: ReportView,
    pub json: bool,
}

impl PipelineConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            window: args.window(),
            schema: args.schema(),
            scope: args.scope(),
            view: args.view(),
            json: args.json,
        }
    }
}

/// Run the pipeline once and return the rendered report.
pub async fn run_pipeline<S: AccountingSource>(
    source: &S,
    config: &PipelineConfig,
    now: NaiveDateTime,
) -> Result<String, PipelineError> {
    let start_time = resolve(&config.window, now);
    tracing::info!(%start_time, source = %source.describe(), "requested time interval");

    let raw = source.fetch(&start_time).await?;

    let records = parse_sacct_output(&raw, config.schema).map_err(|err| PipelineError::Parse {
        source: err,
        schema: config.schema,
    })?;
    tracing::debug!(records = records.len(), "parsed accounting records");

    if !config.scope.residual_is_exact() {
        tracing::warn!(
            scope = %config.scope,
            "query was filtered by state; the failed count is a residual and may not reflect real failures"
        );
    }

    let snapshot = aggregate(&records, config.scope.clone());

    if config.json {
        let mut json = render_json(&snapshot)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render(config.view, &snapshot))
    }
}
