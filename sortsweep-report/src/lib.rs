#![warn(missing_docs)]
//! Sortsweep Reporting
//!
//! Shapes aggregated sweep results into the inputs of the rendering
//! collaborators and renders the artifacts themselves:
//! - One standalone SVG chart per input file (threaded curve vs. baseline)
//! - One HTML document embedding the charts and tabulated timings
//! - JSON (machine-readable) and human-readable terminal output
//!
//! This crate performs no statistics of its own; it consumes
//! [`sortsweep_stats::AggregateStat`] values and only reshapes them.

mod bridge;
mod chart;
mod html;
mod human;
mod json;
mod metadata;
mod report;

pub use bridge::build_report;
pub use chart::{chart_file_name, render_chart};
pub use html::generate_document;
pub use human::format_human_output;
pub use json::generate_json_report;
pub use metadata::build_report_meta;
pub use report::{
    ConfigurationRow, FileReport, FileSeries, PlanInfo, ReportMeta, RunSummary, SweepReport,
    SystemInfo,
};
