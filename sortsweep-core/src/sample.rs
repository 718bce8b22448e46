//! Sweep Data Model
//!
//! Value types shared across the harness: configurations, timing samples,
//! and the collected sweep result handed to reporting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One elapsed/user/system measurement, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingTriple {
    /// Wall-clock time
    pub real_s: f64,
    /// CPU time spent in user mode
    pub user_s: f64,
    /// CPU time spent in kernel mode
    pub sys_s: f64,
}

impl TimingTriple {
    /// Build a triple from seconds.
    pub fn new(real_s: f64, user_s: f64, sys_s: f64) -> Self {
        Self {
            real_s,
            user_s,
            sys_s,
        }
    }
}

/// Threading mode of the program under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The threaded binary, invoked with an explicit thread count
    Threaded(u32),
    /// The non-threaded reference binary (no thread-count argument)
    Baseline,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Threaded(1) => write!(f, "1 thread"),
            Mode::Threaded(n) => write!(f, "{} threads", n),
            Mode::Baseline => write!(f, "baseline"),
        }
    }
}

/// One point in the sweep parameter space: an input file plus a thread mode.
///
/// Configurations are immutable value objects; equality is by field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    /// Short name for reporting, derived from the input file stem
    pub label: String,
    /// Path of the input file handed to the program under test
    pub input: PathBuf,
    /// Threading mode to measure
    pub mode: Mode,
}

impl Configuration {
    /// Build a configuration for `input`, labelling it by the file stem.
    pub fn new(input: impl Into<PathBuf>, mode: Mode) -> Self {
        let input = input.into();
        let label = input_label(&input);
        Self { label, input, mode }
    }
}

/// Reporting label for an input path: the file stem, or the whole path when
/// there is none.
pub fn input_label(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string())
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.label, self.mode)
    }
}

/// One measured outcome of running a configuration once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sample {
    /// The process exited cleanly and its timing line parsed
    Ok(TimingTriple),
    /// The process failed or its timing output was unusable
    Failed {
        /// Diagnostic carried from the runner, for warnings and the report
        reason: String,
    },
}

impl Sample {
    /// The timing triple, if this sample succeeded.
    pub fn timing(&self) -> Option<&TimingTriple> {
        match self {
            Sample::Ok(timing) => Some(timing),
            Sample::Failed { .. } => None,
        }
    }

    /// Whether this sample is a recorded failure.
    pub fn is_failed(&self) -> bool {
        matches!(self, Sample::Failed { .. })
    }
}

/// All repeats collected for one configuration, in run order.
///
/// Failed runs are recorded in place rather than dropped, so
/// `successful_count() + failed_count()` always equals the number of
/// attempts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Record one sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of attempts recorded, successful or not.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over every recorded sample.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Iterate over the timing triples of successful samples only.
    pub fn successful(&self) -> impl Iterator<Item = &TimingTriple> {
        self.samples.iter().filter_map(Sample::timing)
    }

    /// Number of successful samples.
    pub fn successful_count(&self) -> usize {
        self.successful().count()
    }

    /// Number of failed samples.
    pub fn failed_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_failed()).count()
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// One configuration plus everything measured for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    /// The measured point in the parameter space
    pub configuration: Configuration,
    /// All repeats recorded for it
    pub samples: SampleSet,
}

/// Full outcome of one sweep, in enumeration order.
///
/// Owned by the controller until handed, read-only, to reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// One entry per attempted configuration
    pub entries: Vec<SweepEntry>,
}
