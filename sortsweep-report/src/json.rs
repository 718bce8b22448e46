//! JSON Output

use crate::report::SweepReport;

/// Generate a prettified JSON rendition of the sweep report.
pub fn generate_json_report(report: &SweepReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_report_meta;
    use crate::report::RunSummary;
    use sortsweep_core::SweepPlan;
    use std::path::PathBuf;

    #[test]
    fn json_round_trips() {
        let report = SweepReport {
            meta: build_report_meta(&SweepPlan {
                inputs: vec![PathBuf::from("10mb.dat")],
                max_threads: 4,
                repeats: 5,
            }),
            files: Vec::new(),
            summary: RunSummary::default(),
        };

        let json = generate_json_report(&report).unwrap();
        let parsed: SweepReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.meta.plan.max_threads, 4);
        assert_eq!(parsed.meta.plan.repeats, 5);
    }
}
