//! Document Rendering
//!
//! Produces the single HTML performance report: one section per input file
//! with tabulated mean timings and the embedded comparison chart. Charts are
//! referenced by their deterministic file names, so the document and the SVG
//! artifacts must land in the same directory.

use crate::chart::chart_file_name;
use crate::report::{ConfigurationRow, SweepReport};
use std::fmt::Write;

/// Render the full HTML document for a sweep report.
pub fn generate_document(report: &SweepReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Sorting Performance Report</title>\n");
    html.push_str("<style>\n");
    html.push_str(
        "body { font-family: sans-serif; margin: 2em auto; max-width: 60em; color: #222; }\n\
         h1 { border-bottom: 2px solid #444; padding-bottom: 0.3em; }\n\
         table { border-collapse: collapse; margin: 1em 0; }\n\
         th, td { border: 1px solid #bbb; padding: 0.35em 0.8em; text-align: right; }\n\
         th { background: #f0f0f0; }\n\
         td.mode, th.mode { text-align: left; }\n\
         td.missing { color: #a00; font-style: italic; text-align: left; }\n\
         img { max-width: 100%; }\n\
         footer { margin-top: 2em; color: #777; font-size: 0.85em; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>Sorting Performance Report</h1>\n");
    let _ = write!(
        html,
        "<p>Generated {} on {} ({}, {} cores).</p>\n",
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        escape(&report.meta.system.cpu),
        escape(&report.meta.system.os),
        report.meta.system.cpu_cores
    );
    let _ = write!(
        html,
        "<p>Thread range 1-{}, {} repeats per configuration.</p>\n",
        report.meta.plan.max_threads, report.meta.plan.repeats
    );

    for file in &report.files {
        let _ = write!(html, "<h2>Results for {}</h2>\n", escape(&file.label));

        html.push_str("<table>\n<tr><th class=\"mode\">Mode</th><th>Runs</th><th>Failed</th>");
        html.push_str("<th>Real (s)</th><th>User (s)</th><th>Sys (s)</th></tr>\n");
        for row in &file.rows {
            html.push_str(&render_row(row));
        }
        html.push_str("</table>\n");

        if file.series.has_data() {
            let _ = write!(
                html,
                "<img src=\"{}\" alt=\"Time comparison for {}\">\n",
                escape(&chart_file_name(&file.label)),
                escape(&file.label)
            );
        } else {
            let _ = write!(
                html,
                "<p class=\"missing\">No successful samples for {}; chart omitted.</p>\n",
                escape(&file.label)
            );
        }
    }

    html.push_str("<h2>Run summary</h2>\n");
    let _ = write!(
        html,
        "<p>{} file(s), {} configuration(s), {} invocation(s), {} failed sample(s), \
         completed in {:.1}s.</p>\n",
        report.summary.files,
        report.summary.configurations,
        report.summary.invocations,
        report.summary.failed_samples,
        report.summary.total_duration_s
    );

    let _ = write!(
        html,
        "<footer>sortsweep {}</footer>\n",
        escape(&report.meta.version)
    );
    html.push_str("</body>\n</html>\n");

    html
}

fn render_row(row: &ConfigurationRow) -> String {
    match &row.stat {
        Some(stat) => format!(
            "<tr><td class=\"mode\">{}</td><td>{}</td><td>{}</td>\
             <td>{:.2} &plusmn; {:.3}</td><td>{:.2} &plusmn; {:.3}</td><td>{:.2} &plusmn; {:.3}</td></tr>\n",
            row.mode,
            row.attempted,
            row.failed,
            stat.mean.real_s,
            stat.std_dev.real_s,
            stat.mean.user_s,
            stat.std_dev.user_s,
            stat.mean.sys_s,
            stat.std_dev.sys_s,
        ),
        None => format!(
            "<tr><td class=\"mode\">{}</td><td>{}</td><td>{}</td>\
             <td class=\"missing\" colspan=\"3\">no successful samples</td></tr>\n",
            row.mode, row.attempted, row.failed,
        ),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_report_meta;
    use crate::report::{FileReport, FileSeries, RunSummary};
    use sortsweep_core::{Mode, SweepPlan, TimingTriple};
    use sortsweep_stats::AggregateStat;
    use std::path::PathBuf;

    fn stat(real: f64) -> AggregateStat {
        AggregateStat {
            mean: TimingTriple::new(real, 0.9, 0.1),
            std_dev: TimingTriple::new(0.05, 0.0, 0.0),
            samples: 5,
        }
    }

    fn report() -> SweepReport {
        let meta = build_report_meta(&SweepPlan {
            inputs: vec![PathBuf::from("10mb.dat")],
            max_threads: 2,
            repeats: 5,
        });
        SweepReport {
            meta,
            files: vec![FileReport {
                label: "10mb".to_string(),
                rows: vec![
                    ConfigurationRow {
                        mode: Mode::Threaded(1),
                        attempted: 5,
                        failed: 0,
                        stat: Some(stat(1.05)),
                    },
                    ConfigurationRow {
                        mode: Mode::Threaded(2),
                        attempted: 5,
                        failed: 5,
                        stat: None,
                    },
                    ConfigurationRow {
                        mode: Mode::Baseline,
                        attempted: 5,
                        failed: 0,
                        stat: Some(stat(2.0)),
                    },
                ],
                series: FileSeries {
                    label: "10mb".to_string(),
                    thread_counts: vec![1],
                    mean_real_s: vec![1.05],
                    baseline_real_s: Some(2.0),
                },
            }],
            summary: RunSummary {
                files: 1,
                configurations: 3,
                invocations: 15,
                failed_samples: 5,
                empty_configurations: 1,
                total_duration_s: 42.0,
            },
        }
    }

    #[test]
    fn document_embeds_chart_by_deterministic_name() {
        let html = generate_document(&report());
        assert!(html.contains("src=\"10mb_comparison.svg\""));
    }

    #[test]
    fn document_tabulates_each_row() {
        let html = generate_document(&report());

        assert!(html.contains("Results for 10mb"));
        assert!(html.contains("1 thread"));
        assert!(html.contains("baseline"));
        assert!(html.contains("2.00 &plusmn; 0.050"));
        assert!(html.contains("no successful samples"));
    }

    #[test]
    fn chartless_file_is_noted_not_broken() {
        let mut r = report();
        r.files[0].series = FileSeries {
            label: "10mb".to_string(),
            thread_counts: Vec::new(),
            mean_real_s: Vec::new(),
            baseline_real_s: None,
        };

        let html = generate_document(&r);
        assert!(!html.contains("<img"));
        assert!(html.contains("chart omitted"));
    }
}
