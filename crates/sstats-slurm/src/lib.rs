//! SLURM accounting integration for sstats.
//!
//! Typed accounting records, the `sacct --parsable2` record parser, time
//! window resolution, and the data sources that produce raw accounting text.

pub mod sacct;
pub mod schema;
pub mod source;
pub mod types;
pub mod window;

pub use sacct::{ParseError, SacctRecords, SacctSource, parse_sacct_output};
pub use schema::RecordSchema;
pub use source::{AccountingSource, FetchError, FileSource};
pub use types::{AccountingRecord, ExtendedFields, JobState, QueryScope};
pub use window::{WindowSelector, resolve};
