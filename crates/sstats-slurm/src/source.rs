//! Data sources that produce raw accounting text for a time window.

use camino::Utf8PathBuf;
use sstats_parsers::CommandError;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The tool or input could not be reached at all.
    #[error("{source_name} is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
    /// The tool ran but reported failure.
    #[error("{source_name} failed with status {}: {stderr}", describe_code(.code))]
    FetchFailed {
        source_name: String,
        /// Exit status, `None` when killed by a signal.
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl FetchError {
    /// Process exit code to report for this failure.
    ///
    /// A nonzero status from the data source is propagated unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl From<CommandError> for FetchError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Execution { command, error } => Self::SourceUnavailable {
                source_name: command,
                reason: error,
            },
            CommandError::Failed {
                command,
                code,
                stderr,
            } => Self::FetchFailed {
                source_name: command,
                code,
                stderr,
            },
        }
    }
}

/// Anything that can return raw `|`-delimited accounting text starting at a timestamp.
///
/// A fetch is a single call with a success/failure outcome. Callers do not retry.
pub trait AccountingSource {
    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    fn fetch(&self, start_time: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Replays previously captured `sacct --parsable2` output from a file.
///
/// The start time is not applied; the file is assumed to already cover the window.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Utf8PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountingSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path)
    }

    async fn fetch(&self, start_time: &str) -> Result<String, FetchError> {
        tracing::debug!(path = %self.path, start_time, "reading captured accounting output");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::SourceUnavailable {
                source_name: self.path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_source_reads_contents() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();
        let path = dir.join("sacct.txt");
        fs::write(&path, "1|alice|lab|COMPLETED|0:0\n").unwrap();

        let source = FileSource::new(path);
        let raw = source.fetch("2024-01-01T00:00:00").await.unwrap();
        assert_eq!(raw, "1|alice|lab|COMPLETED|0:0\n");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/sacct_12345.txt");
        let err = source.fetch("2024-01-01T00:00:00").await.unwrap_err();
        assert!(matches!(err, FetchError::SourceUnavailable { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_propagates_status() {
        let err = FetchError::from(CommandError::Failed {
            command: "sacct".to_string(),
            code: Some(7),
            stderr: "slurmdbd down".to_string(),
        });
        assert_eq!(err.exit_code(), 7);
        assert_eq!(err.to_string(), "sacct failed with status 7: slurmdbd down");

        let killed = FetchError::from(CommandError::Failed {
            command: "sacct".to_string(),
            code: None,
            stderr: String::new(),
        });
        assert_eq!(killed.exit_code(), 1);
    }

    #[test]
    fn test_execution_error_is_unavailable() {
        let err = FetchError::from(CommandError::Execution {
            command: "sacct".to_string(),
            error: "No such file or directory".to_string(),
        });
        assert!(matches!(err, FetchError::SourceUnavailable { .. }));
    }
}
