//! sstats - SLURM accounting summary for a recent time window.

mod logging;
mod pipeline;

use chrono::Local;
use clap::Parser;
use pipeline::{PipelineConfig, run_pipeline};
use sstats_cli::Args;
use sstats_slurm::{FileSource, SacctSource};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = PipelineConfig::from_args(&args);
    // sacct interprets --starttime in local time
    let now = Local::now().naive_local();

    let result = match &args.input {
        Some(path) => run_pipeline(&FileSource::new(path.clone()), &config, now).await,
        None => {
            let source = SacctSource::new(args.sacct.clone(), config.schema, config.scope.clone());
            run_pipeline(&source, &config, now).await
        }
    };

    match result {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
