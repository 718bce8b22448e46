//! Sample Aggregation
//!
//! Mean and standard deviation are computed independently per timing
//! dimension, using the population formula (variance divided by the sample
//! count). Inputs are assumed to be well-formed non-negative durations.

use serde::{Deserialize, Serialize};
use sortsweep_core::{SampleSet, TimingTriple};

/// Mean/spread summary of one configuration's successful samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStat {
    /// Per-dimension mean
    pub mean: TimingTriple,
    /// Per-dimension population standard deviation
    pub std_dev: TimingTriple,
    /// Number of successful samples the summary is built from
    pub samples: usize,
}

/// Reduce a sample set to its summary statistics.
///
/// Failed samples are excluded; returns `None` when no successful sample
/// remains. Order of samples within the set does not affect the result.
pub fn aggregate(samples: &SampleSet) -> Option<AggregateStat> {
    let successful: Vec<&TimingTriple> = samples.successful().collect();
    if successful.is_empty() {
        return None;
    }

    let reals: Vec<f64> = successful.iter().map(|t| t.real_s).collect();
    let users: Vec<f64> = successful.iter().map(|t| t.user_s).collect();
    let syss: Vec<f64> = successful.iter().map(|t| t.sys_s).collect();

    let (real_mean, real_std) = mean_and_std(&reals);
    let (user_mean, user_std) = mean_and_std(&users);
    let (sys_mean, sys_std) = mean_and_std(&syss);

    Some(AggregateStat {
        mean: TimingTriple::new(real_mean, user_mean, sys_mean),
        std_dev: TimingTriple::new(real_std, user_std, sys_std),
        samples: successful.len(),
    })
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
