//! Text and JSON reports for a statistics snapshot.
//!
//! Rendering is pure: every function takes the snapshot and returns a string.

mod views;

pub use views::{ReportView, render, render_json};
