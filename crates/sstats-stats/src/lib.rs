//! Aggregate statistics over a set of accounting records.
//!
//! A [`StatisticsSnapshot`] is computed once per run by [`aggregate`] and is
//! read-only afterwards.

pub mod aggregate;
pub mod frequency;
pub mod snapshot;

pub use aggregate::aggregate;
pub use frequency::{histogram, most_frequent};
pub use snapshot::{
    DimensionHistogram, ElapsedBuckets, FailureSummary, HistogramEntry, NodeBreakdown, Rates,
    StateCounts, StatisticsSnapshot,
};
