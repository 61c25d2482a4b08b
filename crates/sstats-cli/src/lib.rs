//! CLI argument parsing for sstats.

use camino::Utf8PathBuf;
use clap::{ArgGroup, Parser, ValueEnum};
use sstats_report::ReportView;
use sstats_slurm::{QueryScope, RecordSchema, WindowSelector};

/// Column layout to request from sacct.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaArg {
    /// JobID, User, Account, State, ExitCode
    #[default]
    Short,
    /// Adds Start, End, Elapsed, NodeList, ElapsedRaw, Partition
    Extended,
}

#[derive(Parser, Debug)]
#[command(name = "sstats")]
#[command(about = "Summarize SLURM accounting records for a recent time window")]
#[command(version)]
#[command(group(
    ArgGroup::new("report")
        .required(true)
        .multiple(true)
        .args(["all", "completed", "failed", "nodes"])
))]
pub struct Args {
    /// Display every report this tool gathers
    #[arg(short, long)]
    pub all: bool,

    /// Display state counts and success/failure rates
    #[arg(short, long)]
    pub completed: bool,

    /// Display failure details: top user, group, and exit codes
    #[arg(short, long)]
    pub failed: bool,

    /// Display per-partition and per-node job counts (implies --schema extended)
    #[arg(short, long)]
    pub nodes: bool,

    /// Get stats for the past 24 hours
    #[arg(short, long)]
    pub day: bool,

    /// Get stats for the past 7 days
    #[arg(short, long)]
    pub week: bool,

    /// Explicit start time in sacct format (YYYY-MM-DDTHH:MM:SS); overrides --day/--week
    #[arg(short, long, value_name = "START")]
    pub time: Option<String>,

    /// Columns to request from sacct
    #[arg(long, value_enum, default_value_t = SchemaArg::Short)]
    pub schema: SchemaArg,

    /// Only query jobs in these states (passed to sacct --state)
    #[arg(long = "state", value_name = "STATE", value_delimiter = ',')]
    pub states: Vec<String>,

    /// sacct executable
    #[arg(long, env = "SSTATS_SACCT", default_value = "sacct")]
    pub sacct: String,

    /// Read captured `sacct --parsable2` output from a file instead of running sacct
    #[arg(long, value_name = "FILE")]
    pub input: Option<Utf8PathBuf>,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Selected report; all beats completed beats failed beats nodes.
    pub fn view(&self) -> ReportView {
        if self.all {
            ReportView::All
        } else if self.completed {
            ReportView::Completed
        } else if self.failed {
            ReportView::Failed
        } else {
            ReportView::Nodes
        }
    }

    pub fn window(&self) -> WindowSelector {
        WindowSelector::from_flags(self.day, self.week, self.time.clone())
    }

    pub fn schema(&self) -> RecordSchema {
        if self.nodes || self.schema == SchemaArg::Extended {
            RecordSchema::Extended
        } else {
            RecordSchema::Short
        }
    }

    pub fn scope(&self) -> QueryScope {
        QueryScope::from_states(self.states.clone())
    }
}
