//! Report rendering and writing for Scopewise.
//!
//! Turns a [`ScoringResult`](scopewise_shared::ScoringResult) into a
//! Markdown summary and writes finished reports to disk atomically.

pub mod render;
pub mod writer;

pub use render::{ReportMeta, ReportOptions, render_markdown};
pub use writer::{ReportArtifact, report_filename, write_report};
