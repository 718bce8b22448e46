//! Timed Process Runner
//!
//! Invokes the program under test once per call, wrapped in GNU time, and
//! classifies the outcome. Every failure mode folds into [`Sample::Failed`]
//! so a bad run never aborts a sweep; the typed error is rendered into the
//! sample's reason string.

use crate::sample::{Configuration, Mode, Sample, TimingTriple};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Format string handed to GNU time: elapsed, user, and system seconds.
pub const TIME_FORMAT: &str = "%e %U %S";

/// Why a single timed invocation produced no usable sample.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The timer or the program under test could not be started
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The command line that failed to start
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited with a non-zero status
    #[error("process exited with {status}: {stderr_tail}")]
    NonZeroExit {
        /// Exit status reported by the OS
        status: std::process::ExitStatus,
        /// Last few lines of captured stderr, for the diagnostic
        stderr_tail: String,
    },

    /// The captured output held no line of exactly three floats
    #[error("timing line not parseable as three floats: {line:?}")]
    TimingParse {
        /// The line that failed to parse (empty when stderr was empty)
        line: String,
    },
}

/// Capability to measure one configuration once.
///
/// The sweep controller only depends on this trait, so tests substitute a
/// deterministic fake without spawning processes.
pub trait Runner {
    /// Run the configuration once and classify the outcome.
    ///
    /// Must never panic on process failure; failures are returned as
    /// [`Sample::Failed`].
    fn run(&mut self, configuration: &Configuration) -> Sample;
}

/// Production runner: wraps the program under test with `/usr/bin/time -f`.
///
/// The scratch output path is shared across all invocations of one sweep and
/// simply overwritten each call. Do not drive two runs against the same
/// scratch path concurrently; the harness never does.
pub struct TimeRunner {
    timer: PathBuf,
    threaded_bin: PathBuf,
    baseline_bin: PathBuf,
    scratch_output: PathBuf,
}

impl TimeRunner {
    /// Build a runner for the two program variants and a scratch output path.
    pub fn new(
        threaded_bin: impl Into<PathBuf>,
        baseline_bin: impl Into<PathBuf>,
        scratch_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            timer: PathBuf::from("/usr/bin/time"),
            threaded_bin: threaded_bin.into(),
            baseline_bin: baseline_bin.into(),
            scratch_output: scratch_output.into(),
        }
    }

    /// Override the timing wrapper binary (defaults to `/usr/bin/time`).
    pub fn with_timer(mut self, timer: impl Into<PathBuf>) -> Self {
        self.timer = timer.into();
        self
    }

    /// Arguments passed to the timer binary for one configuration.
    ///
    /// `Baseline` invokes the non-threaded binary without a thread-count
    /// argument; `Threaded(n)` appends `n` to the threaded binary's argv.
    fn argv(&self, configuration: &Configuration) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![OsString::from("-f"), OsString::from(TIME_FORMAT)];
        match configuration.mode {
            Mode::Threaded(threads) => {
                argv.push(self.threaded_bin.clone().into_os_string());
                argv.push(configuration.input.clone().into_os_string());
                argv.push(self.scratch_output.clone().into_os_string());
                argv.push(OsString::from(threads.to_string()));
            }
            Mode::Baseline => {
                argv.push(self.baseline_bin.clone().into_os_string());
                argv.push(configuration.input.clone().into_os_string());
                argv.push(self.scratch_output.clone().into_os_string());
            }
        }
        argv
    }

    fn measure(&self, configuration: &Configuration) -> Result<TimingTriple, RunnerError> {
        let argv = self.argv(configuration);
        let command_line = render_command(&self.timer, &argv);
        debug!(command = %command_line, "spawning");

        // Blocks until the child exits; a hung program hangs the sweep.
        let output = Command::new(&self.timer)
            .args(&argv)
            .output()
            .map_err(|source| RunnerError::Spawn {
                command: command_line,
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(RunnerError::NonZeroExit {
                status: output.status,
                stderr_tail: stderr_tail(&stderr),
            });
        }

        parse_timing_line(&stderr)
    }
}

impl Runner for TimeRunner {
    fn run(&mut self, configuration: &Configuration) -> Sample {
        match self.measure(configuration) {
            Ok(timing) => Sample::Ok(timing),
            Err(e) => Sample::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Parse the timing line GNU time appends to stderr.
///
/// The program under test may write its own stderr first, so the timing line
/// is the last non-empty line. It must hold exactly three
/// whitespace-separated floats.
fn parse_timing_line(stderr: &str) -> Result<TimingTriple, RunnerError> {
    let line = stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    let parse_error = || RunnerError::TimingParse {
        line: line.to_string(),
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(parse_error());
    }

    let mut values = [0.0f64; 3];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| parse_error())?;
    }

    Ok(TimingTriple::new(values[0], values[1], values[2]))
}

/// Last few stderr lines, flattened for a one-line diagnostic.
fn stderr_tail(stderr: &str) -> String {
    let mut lines: Vec<&str> = stderr
        .lines()
        .rev()
        .filter(|l| !l.trim().is_empty())
        .take(3)
        .collect();
    lines.reverse();
    lines.join(" | ")
}

fn render_command(timer: &Path, argv: &[OsString]) -> String {
    let mut parts = vec![timer.display().to_string()];
    parts.extend(argv.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> TimeRunner {
        TimeRunner::new("./psort", "./psort_serial", "output.dat")
    }

    #[test]
    fn threaded_argv_appends_thread_count() {
        let config = Configuration::new("10mb.dat", Mode::Threaded(4));
        let argv = runner().argv(&config);
        let rendered: Vec<String> = argv
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec!["-f", TIME_FORMAT, "./psort", "10mb.dat", "output.dat", "4"]
        );
    }

    #[test]
    fn baseline_argv_omits_thread_count() {
        let config = Configuration::new("10mb.dat", Mode::Baseline);
        let argv = runner().argv(&config);
        let rendered: Vec<String> = argv
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec!["-f", TIME_FORMAT, "./psort_serial", "10mb.dat", "output.dat"]
        );
    }

    #[test]
    fn parses_plain_timing_line() {
        let timing = parse_timing_line("1.25 0.90 0.10\n").unwrap();
        assert_eq!(timing, TimingTriple::new(1.25, 0.90, 0.10));
    }

    #[test]
    fn parses_last_line_when_program_wrote_to_stderr() {
        let stderr = "sorting 10mb.dat with 4 threads\ndone\n0.61 0.95 0.21\n";
        let timing = parse_timing_line(stderr).unwrap();
        assert_eq!(timing, TimingTriple::new(0.61, 0.95, 0.21));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            parse_timing_line("1.0 2.0\n"),
            Err(RunnerError::TimingParse { .. })
        ));
        assert!(matches!(
            parse_timing_line("1.0 2.0 3.0 4.0\n"),
            Err(RunnerError::TimingParse { .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_timing_line("Command terminated by signal 9\n").unwrap_err();
        assert!(matches!(err, RunnerError::TimingParse { .. }));
    }

    #[test]
    fn rejects_empty_output() {
        assert!(matches!(
            parse_timing_line(""),
            Err(RunnerError::TimingParse { .. })
        ));
        assert!(matches!(
            parse_timing_line("\n\n"),
            Err(RunnerError::TimingParse { .. })
        ));
    }

    #[test]
    fn missing_binary_folds_into_failed_sample() {
        let mut runner = TimeRunner::new(
            "./definitely-not-here",
            "./also-not-here",
            "output.dat",
        )
        .with_timer("/nonexistent/timer");
        let config = Configuration::new("10mb.dat", Mode::Threaded(2));

        let sample = runner.run(&config);
        match sample {
            Sample::Failed { reason } => assert!(reason.contains("spawn")),
            Sample::Ok(_) => panic!("spawn against a missing timer cannot succeed"),
        }
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let tail = stderr_tail("one\ntwo\nthree\nfour\n");
        assert_eq!(tail, "two | three | four");
    }

    // Requires GNU time and a POSIX shell on the host.
    #[test]
    #[ignore]
    fn real_invocation_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake_sort.sh");
        std::fs::write(&script, "#!/bin/sh\ncat \"$1\" > \"$2\"\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let input = dir.path().join("10mb.dat");
        std::fs::write(&input, b"payload").unwrap();

        let mut runner = TimeRunner::new(&script, &script, dir.path().join("output.dat"));
        let sample = runner.run(&Configuration::new(&input, Mode::Baseline));
        assert!(sample.timing().is_some(), "expected a timing triple: {:?}", sample);
    }
}
