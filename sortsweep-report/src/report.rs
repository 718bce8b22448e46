//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sortsweep_core::Mode;
use sortsweep_stats::AggregateStat;

/// Complete report of one sweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Run metadata: when, where, and with what plan
    pub meta: ReportMeta,
    /// One section per input file, in sweep order
    pub files: Vec<FileReport>,
    /// Run totals
    pub summary: RunSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Harness version
    pub version: String,
    /// UTC time the report was generated
    pub timestamp: DateTime<Utc>,
    /// Host the sweep ran on
    pub system: SystemInfo,
    /// Echo of the sweep shape
    pub plan: PlanInfo,
}

/// Host information captured into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// CPU model name, when discoverable
    pub cpu: String,
    /// Available logical cores
    pub cpu_cores: u32,
}

/// Echo of the sweep plan the run was shaped by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    /// Input files, in sweep order
    pub inputs: Vec<String>,
    /// Upper bound of the thread range
    pub max_threads: u32,
    /// Invocations per configuration
    pub repeats: u32,
}

/// Everything reported for one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// The input file's label
    pub label: String,
    /// Tabulated outcome per configuration, in sweep order
    pub rows: Vec<ConfigurationRow>,
    /// Comparative series handed to the chart renderer
    pub series: FileSeries,
}

/// Tabulated outcome of one configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationRow {
    /// Threading mode measured
    pub mode: Mode,
    /// Repeats attempted
    pub attempted: usize,
    /// Repeats that failed
    pub failed: usize,
    /// Summary statistics; absent when every repeat failed
    pub stat: Option<AggregateStat>,
}

/// Comparative series for one input file's chart: the per-thread-count mean
/// real-time curve against the baseline reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSeries {
    /// The input file's label
    pub label: String,
    /// Thread counts with at least one successful sample, ascending
    pub thread_counts: Vec<u32>,
    /// Mean real seconds, parallel with `thread_counts`
    pub mean_real_s: Vec<f64>,
    /// Baseline mean real seconds; absent when baseline aggregation failed
    pub baseline_real_s: Option<f64>,
}

impl FileSeries {
    /// Whether there is anything to draw for this file.
    pub fn has_data(&self) -> bool {
        !self.thread_counts.is_empty() || self.baseline_real_s.is_some()
    }
}

/// Run totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Input files swept
    pub files: usize,
    /// Configurations attempted
    pub configurations: usize,
    /// Process invocations issued
    pub invocations: usize,
    /// Samples recorded as failed
    pub failed_samples: usize,
    /// Configurations where every repeat failed
    pub empty_configurations: usize,
    /// Wall-clock duration of the whole run, in seconds
    pub total_duration_s: f64,
}
