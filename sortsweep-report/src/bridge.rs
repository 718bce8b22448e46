//! Report Shaping
//!
//! Folds a raw [`SweepResult`] into the report model: per-configuration
//! aggregate rows plus the per-file comparative series consumed by the chart
//! renderer. Configurations where every repeat failed contribute nothing to
//! series or tables; they are kept as rows so the document can show why a
//! point is missing.

use crate::report::{ConfigurationRow, FileReport, FileSeries, ReportMeta, RunSummary, SweepReport};
use sortsweep_core::{Mode, SweepResult};
use sortsweep_stats::aggregate;
use tracing::warn;

/// Shape a collected sweep into the full report.
///
/// Entries are grouped by input label, preserving sweep order. A file whose
/// baseline aggregation failed entirely still gets its chart series, with
/// the reference value absent; the gap is reported as a warning rather than
/// aborting the run.
pub fn build_report(result: &SweepResult, meta: ReportMeta, total_duration_s: f64) -> SweepReport {
    let mut files: Vec<FileReport> = Vec::new();
    let mut summary = RunSummary {
        total_duration_s,
        ..Default::default()
    };

    for entry in &result.entries {
        let stat = aggregate(&entry.samples);

        summary.configurations += 1;
        summary.invocations += entry.samples.len();
        summary.failed_samples += entry.samples.failed_count();
        if stat.is_none() {
            summary.empty_configurations += 1;
        }

        let label = &entry.configuration.label;
        let file = match files.iter_mut().find(|f| &f.label == label) {
            Some(file) => file,
            None => {
                files.push(FileReport {
                    label: label.clone(),
                    rows: Vec::new(),
                    series: FileSeries {
                        label: label.clone(),
                        thread_counts: Vec::new(),
                        mean_real_s: Vec::new(),
                        baseline_real_s: None,
                    },
                });
                files.last_mut().expect("just pushed")
            }
        };

        match (entry.configuration.mode, &stat) {
            (Mode::Threaded(threads), Some(stat)) => {
                file.series.thread_counts.push(threads);
                file.series.mean_real_s.push(stat.mean.real_s);
            }
            (Mode::Baseline, Some(stat)) => {
                file.series.baseline_real_s = Some(stat.mean.real_s);
            }
            (mode, None) => {
                warn!(
                    label = %label,
                    mode = %mode,
                    "every repeat failed; omitting from chart and tables"
                );
            }
        }

        file.rows.push(ConfigurationRow {
            mode: entry.configuration.mode,
            attempted: entry.samples.len(),
            failed: entry.samples.failed_count(),
            stat,
        });
    }

    for file in &files {
        if file.series.baseline_real_s.is_none() {
            warn!(
                label = %file.label,
                "no baseline aggregate; chart will have no reference line"
            );
        }
    }

    summary.files = files.len();

    SweepReport {
        meta,
        files,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_report_meta;
    use sortsweep_core::{Configuration, Sample, SweepEntry, SweepPlan, TimingTriple};
    use std::path::PathBuf;

    fn ok(real: f64, user: f64, sys: f64) -> Sample {
        Sample::Ok(TimingTriple::new(real, user, sys))
    }

    fn failed() -> Sample {
        Sample::Failed {
            reason: "exit 1".to_string(),
        }
    }

    fn entry(input: &str, mode: Mode, samples: Vec<Sample>) -> SweepEntry {
        SweepEntry {
            configuration: Configuration::new(input, mode),
            samples: samples.into_iter().collect(),
        }
    }

    fn meta() -> ReportMeta {
        build_report_meta(&SweepPlan {
            inputs: vec![PathBuf::from("10mb.dat")],
            max_threads: 3,
            repeats: 2,
        })
    }

    fn fixture() -> SweepResult {
        SweepResult {
            entries: vec![
                entry(
                    "10mb.dat",
                    Mode::Threaded(1),
                    vec![ok(1.0, 0.9, 0.1), ok(1.1, 0.95, 0.1)],
                ),
                entry(
                    "10mb.dat",
                    Mode::Threaded(2),
                    vec![ok(0.6, 0.9, 0.2), ok(0.6, 0.9, 0.2)],
                ),
                entry(
                    "10mb.dat",
                    Mode::Threaded(3),
                    vec![ok(0.5, 0.9, 0.3), failed()],
                ),
                entry(
                    "10mb.dat",
                    Mode::Baseline,
                    vec![ok(2.0, 1.9, 0.1), ok(2.0, 1.9, 0.1)],
                ),
            ],
        }
    }

    #[test]
    fn series_carries_means_against_baseline() {
        let report = build_report(&fixture(), meta(), 12.5);

        assert_eq!(report.files.len(), 1);
        let file = &report.files[0];
        assert_eq!(file.label, "10mb");
        assert_eq!(file.series.thread_counts, vec![1, 2, 3]);

        assert!((file.series.mean_real_s[0] - 1.05).abs() < 1e-12);
        assert!((file.series.mean_real_s[1] - 0.6).abs() < 1e-12);
        assert!((file.series.mean_real_s[2] - 0.5).abs() < 1e-12);
        assert_eq!(file.series.baseline_real_s, Some(2.0));
    }

    #[test]
    fn rows_keep_failure_counts() {
        let report = build_report(&fixture(), meta(), 0.0);
        let rows = &report.files[0].rows;

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].mode, Mode::Threaded(3));
        assert_eq!(rows[2].attempted, 2);
        assert_eq!(rows[2].failed, 1);
        assert_eq!(rows[2].stat.as_ref().unwrap().samples, 1);

        let baseline = &rows[3];
        assert_eq!(baseline.mode, Mode::Baseline);
        assert_eq!(baseline.stat.as_ref().unwrap().std_dev.real_s, 0.0);
    }

    #[test]
    fn all_failed_configuration_is_omitted_from_series() {
        let result = SweepResult {
            entries: vec![
                entry("10mb.dat", Mode::Threaded(1), vec![ok(1.0, 0.9, 0.1)]),
                entry("10mb.dat", Mode::Threaded(2), vec![failed(), failed()]),
                entry("10mb.dat", Mode::Baseline, vec![ok(2.0, 1.9, 0.1)]),
            ],
        };

        let report = build_report(&result, meta(), 0.0);
        let file = &report.files[0];

        // Thread 2 never succeeded: no chart point, but the row remains.
        assert_eq!(file.series.thread_counts, vec![1]);
        assert_eq!(file.rows.len(), 3);
        assert!(file.rows[1].stat.is_none());
        assert_eq!(report.summary.empty_configurations, 1);
    }

    #[test]
    fn missing_baseline_leaves_reference_absent() {
        let result = SweepResult {
            entries: vec![
                entry("10mb.dat", Mode::Threaded(1), vec![ok(1.0, 0.9, 0.1)]),
                entry("10mb.dat", Mode::Baseline, vec![failed(), failed()]),
            ],
        };

        let report = build_report(&result, meta(), 0.0);
        let file = &report.files[0];

        assert_eq!(file.series.baseline_real_s, None);
        assert!(file.series.has_data());
    }

    #[test]
    fn files_stay_in_sweep_order() {
        let result = SweepResult {
            entries: vec![
                entry("64mb.dat", Mode::Baseline, vec![ok(4.0, 3.9, 0.1)]),
                entry("10mb.dat", Mode::Baseline, vec![ok(2.0, 1.9, 0.1)]),
            ],
        };

        let report = build_report(&result, meta(), 0.0);
        let labels: Vec<&str> = report.files.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["64mb", "10mb"]);
    }

    #[test]
    fn summary_totals_add_up() {
        let report = build_report(&fixture(), meta(), 12.5);

        assert_eq!(report.summary.files, 1);
        assert_eq!(report.summary.configurations, 4);
        assert_eq!(report.summary.invocations, 8);
        assert_eq!(report.summary.failed_samples, 1);
        assert_eq!(report.summary.empty_configurations, 0);
        assert!((report.summary.total_duration_s - 12.5).abs() < f64::EPSILON);
    }
}
