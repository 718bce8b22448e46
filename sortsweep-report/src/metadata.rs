//! Run Metadata Collection
//!
//! Captures host details and an echo of the sweep plan into the report.
//! Linux-specific data (CPU model) gracefully degrades on other platforms.

use crate::report::{PlanInfo, ReportMeta, SystemInfo};
use chrono::Utc;
use sortsweep_core::SweepPlan;

/// Build report metadata for one run of the given plan.
pub fn build_report_meta(plan: &SweepPlan) -> ReportMeta {
    let system = SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu: get_cpu_model().unwrap_or_else(|| "Unknown".to_string()),
        cpu_cores: num_cpus(),
    };

    ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        system,
        plan: PlanInfo {
            inputs: plan
                .inputs
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            max_threads: plan.max_threads,
            repeats: plan.repeats,
        },
    }
}

/// Get CPU model name from /proc/cpuinfo (Linux only)
fn get_cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo")
            .ok()
            .and_then(|content| {
                content
                    .lines()
                    .find(|l| l.starts_with("model name"))
                    .and_then(|l| l.split(':').nth(1))
                    .map(|s| s.trim().to_string())
            })
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

fn num_cpus() -> u32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as u32)
        .unwrap_or(1)
}
