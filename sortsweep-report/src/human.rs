//! Terminal Output
//!
//! Human-readable summary printed after a run, grouped per input file with
//! status icons and a speedup column against the baseline.

use crate::report::SweepReport;
use sortsweep_core::Mode;

/// Format a sweep report for terminal display.
pub fn format_human_output(report: &SweepReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Sortsweep Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for file in &report.files {
        output.push_str(&format!("{}\n", file.label));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let baseline_real = file.series.baseline_real_s;

        for row in &file.rows {
            let mode = row.mode.to_string();
            match &row.stat {
                Some(stat) => {
                    let speedup = match (row.mode, baseline_real) {
                        (Mode::Threaded(_), Some(baseline)) if stat.mean.real_s > 0.0 => {
                            format!("  {:>6.2}x", baseline / stat.mean.real_s)
                        }
                        (Mode::Baseline, _) => "  (baseline)".to_string(),
                        _ => String::new(),
                    };
                    output.push_str(&format!(
                        "  ✓ {:<12} real {:>6.2}s ±{:.3}  user {:>6.2}s  sys {:>5.2}s{}\n",
                        mode, stat.mean.real_s, stat.std_dev.real_s, stat.mean.user_s,
                        stat.mean.sys_s, speedup
                    ));
                    if row.failed > 0 {
                        output.push_str(&format!(
                            "      {} of {} runs failed; statistics from {} sample(s)\n",
                            row.failed, row.attempted, stat.samples
                        ));
                    }
                }
                None => {
                    output.push_str(&format!(
                        "  ✗ {:<12} all {} runs failed\n",
                        mode, row.attempted
                    ));
                }
            }
        }

        output.push('\n');
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Files: {}  Configurations: {}  Invocations: {}  Failed samples: {}\n",
        report.summary.files,
        report.summary.configurations,
        report.summary.invocations,
        report.summary.failed_samples
    ));
    output.push_str(&format!(
        "  Duration: {:.1} s\n",
        report.summary.total_duration_s
    ));

    output
}
