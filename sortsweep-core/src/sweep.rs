//! Sweep Controller
//!
//! Enumerates the configuration space and drives the runner through it,
//! sequentially and in a fixed order: for each input file, every thread
//! count ascending, then the baseline. Per-sample failures are absorbed into
//! the result; nothing inside the loop aborts a sweep.

use crate::runner::Runner;
use crate::sample::{Configuration, Mode, Sample, SampleSet, SweepEntry, SweepResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, warn};

/// Shape of one sweep: which inputs, how many threads, how many repeats.
///
/// Always an explicit value passed into [`collect`], never process-global
/// state, so harness tests can run isolated sweeps against fake runners.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    /// Input files, measured in the given order
    pub inputs: Vec<PathBuf>,
    /// Upper bound of the thread range `1..=max_threads`
    pub max_threads: u32,
    /// Invocations per configuration
    pub repeats: u32,
}

impl SweepPlan {
    /// All configurations in enumeration order.
    pub fn configurations(&self) -> Vec<Configuration> {
        let mut configurations =
            Vec::with_capacity(self.inputs.len() * (self.max_threads as usize + 1));
        for input in &self.inputs {
            for threads in 1..=self.max_threads {
                configurations.push(Configuration::new(input, Mode::Threaded(threads)));
            }
            configurations.push(Configuration::new(input, Mode::Baseline));
        }
        configurations
    }

    /// Total process invocations a full sweep will issue.
    pub fn total_invocations(&self) -> u64 {
        self.inputs.len() as u64 * (self.max_threads as u64 + 1) * self.repeats as u64
    }
}

/// Run every configuration in the plan, `repeats` times each.
///
/// Strictly sequential: each runner call blocks until the spawned process
/// exits, so the measured program is never contending with a sibling run.
/// Failed samples are recorded as-is (no retry) and reported as warnings.
pub fn collect(runner: &mut dyn Runner, plan: &SweepPlan) -> SweepResult {
    let pb = ProgressBar::new(plan.total_invocations());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut entries = Vec::new();
    for configuration in plan.configurations() {
        info!(configuration = %configuration, repeats = plan.repeats, "measuring");
        pb.set_message(configuration.to_string());

        let mut samples = SampleSet::default();
        for repeat in 1..=plan.repeats {
            let sample = runner.run(&configuration);
            if let Sample::Failed { reason } = &sample {
                warn!(
                    configuration = %configuration,
                    repeat,
                    reason = %reason,
                    "sample failed"
                );
            }
            samples.push(sample);
            pb.inc(1);
        }

        entries.push(SweepEntry {
            configuration,
            samples,
        });
    }

    pb.finish_with_message("sweep complete");
    SweepResult { entries }
}
