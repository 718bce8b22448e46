//! Configuration loading from sweep.toml
//!
//! Sweep configuration can be specified in a `sweep.toml` file in the project
//! root. The configuration is automatically discovered by walking up from the
//! current directory; command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sweep harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SweepConfig {
    /// Sweep shape: input files, thread range, repeats
    #[serde(default)]
    pub sweep: SweepSection,
    /// Program under test and timing wrapper
    #[serde(default)]
    pub program: ProgramSection,
    /// Artifact output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Shape of the parameter sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSection {
    /// Input files, measured in the given order
    #[serde(default = "default_inputs")]
    pub inputs: Vec<String>,
    /// Threads are swept over `1..=max_threads`
    #[serde(default = "default_max_threads")]
    pub max_threads: u32,
    /// Invocations per configuration
    #[serde(default = "default_repeats")]
    pub repeats: u32,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            max_threads: default_max_threads(),
            repeats: default_repeats(),
        }
    }
}

fn default_inputs() -> Vec<String> {
    ["10mb.dat", "16mb.dat", "32mb.dat", "64mb.dat", "100mb.dat"]
        .map(String::from)
        .to_vec()
}
fn default_max_threads() -> u32 {
    8
}
fn default_repeats() -> u32 {
    5
}

/// Paths of the program under test and its timing wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSection {
    /// Threaded variant, invoked as `<threaded> <input> <output> <threads>`
    #[serde(default = "default_threaded")]
    pub threaded: String,
    /// Baseline variant, invoked as `<baseline> <input> <output>`
    #[serde(default = "default_baseline")]
    pub baseline: String,
    /// Scratch file the program under test writes; overwritten every run
    #[serde(default = "default_scratch_output")]
    pub scratch_output: String,
    /// GNU time binary used to capture the timing triple
    #[serde(default = "default_timer")]
    pub timer: String,
}

impl Default for ProgramSection {
    fn default() -> Self {
        Self {
            threaded: default_threaded(),
            baseline: default_baseline(),
            scratch_output: default_scratch_output(),
            timer: default_timer(),
        }
    }
}

fn default_threaded() -> String {
    "./psort".to_string()
}
fn default_baseline() -> String {
    "./psort_serial".to_string()
}
fn default_scratch_output() -> String {
    "output.dat".to_string()
}
fn default_timer() -> String {
    "/usr/bin/time".to_string()
}

/// Where artifacts are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory charts and the document are written into
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// HTML document file name, inside the output directory
    #[serde(default = "default_document")]
    pub document: String,
    /// Also write the aggregated report as JSON after each run
    #[serde(default)]
    pub save_json: bool,
    /// JSON file path; defaults to `sweep.json` inside the output directory
    #[serde(default)]
    pub json_path: Option<String>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            document: default_document(),
            save_json: false,
            json_path: None,
        }
    }
}

fn default_output_dir() -> String {
    "target/sortsweep".to_string()
}
fn default_document() -> String {
    "performance.html".to_string()
}

impl SweepConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("sweep.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Sortsweep Configuration
# https://github.com/sortsweep/sortsweep

[sweep]
# Input files, measured in the given order
inputs = ["10mb.dat", "16mb.dat", "32mb.dat", "64mb.dat", "100mb.dat"]
# Threads are swept over 1..=max_threads
max_threads = 8
# Invocations per configuration
repeats = 5

[program]
# Threaded variant: <threaded> <input> <output> <threads>
threaded = "./psort"
# Baseline variant: <baseline> <input> <output>
baseline = "./psort_serial"
# Scratch file the program under test writes; overwritten every run
scratch_output = "output.dat"
# GNU time binary used to capture the timing triple
timer = "/usr/bin/time"

[output]
# Directory charts and the document are written into
directory = "target/sortsweep"
# HTML document file name, inside the output directory
document = "performance.html"
# Also write the aggregated report as JSON after each run
save_json = false
# JSON file path (uncomment to override the default)
# json_path = "sweep.json"
"#
        .to_string()
    }
}
