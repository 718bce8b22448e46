#![warn(missing_docs)]
//! Sortsweep CLI
//!
//! Command-line front end of the sweep harness: discovers `sweep.toml`,
//! layers CLI flags over it, drives the sweep through the timed process
//! runner, and writes every artifact (charts, HTML document, optional JSON).
//!
//! Per-sample failures never abort a run; only resource acquisition outside
//! the measurement loop (unreadable config, unwritable artifacts) is fatal
//! and exits non-zero.

mod config;

pub use config::{OutputSection, ProgramSection, SweepConfig, SweepSection};

use anyhow::Context;
use clap::Parser;
use regex::Regex;
use sortsweep_core::{collect, input_label, Runner, SweepPlan, TimeRunner};
use sortsweep_report::{
    build_report, build_report_meta, chart_file_name, format_human_output, generate_document,
    generate_json_report, render_chart, SweepReport,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Sortsweep CLI arguments
#[derive(Parser, Debug)]
#[command(name = "sortsweep")]
#[command(author, version, about = "Parameter-sweep benchmark harness for an external sort")]
pub struct Cli {
    /// Explicit sweep.toml path; defaults to discovery from the current directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the input file list (repeatable)
    #[arg(long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Upper bound of the thread range 1..=N
    #[arg(long, value_name = "N")]
    pub max_threads: Option<u32>,

    /// Invocations per configuration
    #[arg(long, value_name = "N")]
    pub repeats: Option<u32>,

    /// Path of the threaded sort binary
    #[arg(long, value_name = "PATH")]
    pub threaded_bin: Option<PathBuf>,

    /// Path of the baseline sort binary
    #[arg(long, value_name = "PATH")]
    pub baseline_bin: Option<PathBuf>,

    /// Directory charts and the document are written into
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Restrict the sweep to input labels matching a regex
    #[arg(long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// Also write the aggregated report as JSON
    /// Optionally specify a path; defaults to config or <output-dir>/sweep.json
    #[arg(long)]
    pub save_json: Option<Option<PathBuf>>,

    /// List the configurations that would run, without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Resolved settings for one run: sweep.toml values with CLI flags layered on top.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// The enumerated sweep shape
    pub plan: SweepPlan,
    /// Threaded sort binary
    pub threaded_bin: PathBuf,
    /// Baseline sort binary
    pub baseline_bin: PathBuf,
    /// Scratch file the program under test writes into
    pub scratch_output: PathBuf,
    /// Timing wrapper binary
    pub timer: PathBuf,
    /// Directory artifacts land in
    pub output_dir: PathBuf,
    /// HTML document file name, inside the output directory
    pub document: String,
    /// JSON report destination, when requested
    pub json_path: Option<PathBuf>,
}

/// Run the sortsweep CLI.
/// This is the main entry point for the `sortsweep` binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the sortsweep CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let directives = if cli.verbose {
        "sortsweep_core=debug,sortsweep_report=debug,sortsweep_cli=debug"
    } else {
        "sortsweep_core=info,sortsweep_report=info,sortsweep_cli=info"
    };
    let _ = tracing_subscriber::fmt().with_env_filter(directives).try_init();

    // Discover sweep.toml configuration (CLI flags override)
    let config = match &cli.config {
        Some(path) => SweepConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SweepConfig::discover().unwrap_or_default(),
    };

    let settings = build_settings(&cli, &config)?;

    if settings.plan.inputs.is_empty() {
        println!("No input files selected.");
        return Ok(());
    }

    if cli.dry_run {
        list_configurations(&settings.plan);
        return Ok(());
    }

    let mut runner = TimeRunner::new(
        &settings.threaded_bin,
        &settings.baseline_bin,
        &settings.scratch_output,
    )
    .with_timer(&settings.timer);

    execute_sweep(&mut runner, &settings)
}

/// Layer CLI flags over sweep.toml values into the settings for one run.
pub fn build_settings(cli: &Cli, config: &SweepConfig) -> anyhow::Result<SweepSettings> {
    let mut inputs: Vec<PathBuf> = if cli.inputs.is_empty() {
        config.sweep.inputs.iter().map(PathBuf::from).collect()
    } else {
        cli.inputs.clone()
    };

    if let Some(pattern) = &cli.filter {
        let re = Regex::new(pattern)
            .with_context(|| format!("invalid filter regex: {pattern}"))?;
        inputs.retain(|input| re.is_match(&input_label(input)));
    }

    let plan = SweepPlan {
        inputs,
        max_threads: cli.max_threads.unwrap_or(config.sweep.max_threads),
        repeats: cli.repeats.unwrap_or(config.sweep.repeats),
    };
    anyhow::ensure!(plan.max_threads >= 1, "max-threads must be at least 1");
    anyhow::ensure!(plan.repeats >= 1, "repeats must be at least 1");

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));
    let json_path = resolve_json_path(&cli.save_json, config, &output_dir);

    Ok(SweepSettings {
        plan,
        threaded_bin: cli
            .threaded_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.program.threaded)),
        baseline_bin: cli
            .baseline_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.program.baseline)),
        scratch_output: PathBuf::from(&config.program.scratch_output),
        timer: PathBuf::from(&config.program.timer),
        output_dir,
        document: config.output.document.clone(),
        json_path,
    })
}

/// Resolve the JSON destination: CLI wins, then sweep.toml, then nothing.
fn resolve_json_path(
    cli_flag: &Option<Option<PathBuf>>,
    config: &SweepConfig,
    output_dir: &std::path::Path,
) -> Option<PathBuf> {
    let default_path = || {
        config
            .output
            .json_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| output_dir.join("sweep.json"))
    };

    match cli_flag {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(default_path()),
        None if config.output.save_json => Some(default_path()),
        None => None,
    }
}

/// Drive one full sweep through a runner and write every artifact.
///
/// Takes the runner as a capability so harness tests substitute a
/// deterministic fake; production wires in [`TimeRunner`].
pub fn execute_sweep(runner: &mut dyn Runner, settings: &SweepSettings) -> anyhow::Result<()> {
    println!(
        "Sweeping {} file(s), threads 1-{}, {} repeats each ({} invocations)...\n",
        settings.plan.inputs.len(),
        settings.plan.max_threads,
        settings.plan.repeats,
        settings.plan.total_invocations()
    );

    let start = Instant::now();
    let result = collect(runner, &settings.plan);

    let meta = build_report_meta(&settings.plan);
    let report = build_report(&result, meta, start.elapsed().as_secs_f64());

    write_artifacts(&report, settings)?;
    print!("{}", format_human_output(&report));

    Ok(())
}

/// Write charts, the HTML document, and the optional JSON report.
fn write_artifacts(report: &SweepReport, settings: &SweepSettings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;

    for file in &report.files {
        if let Some(svg) = render_chart(&file.series) {
            let path = settings.output_dir.join(chart_file_name(&file.label));
            std::fs::write(&path, svg)
                .with_context(|| format!("failed to write chart {}", path.display()))?;
            info!(chart = %path.display(), "chart written");
        }
    }

    let document_path = settings.output_dir.join(&settings.document);
    std::fs::write(&document_path, generate_document(report))
        .with_context(|| format!("failed to write document {}", document_path.display()))?;
    println!("Report written to: {}", document_path.display());

    if let Some(json_path) = &settings.json_path {
        let json = generate_json_report(report)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("failed to write JSON report {}", json_path.display()))?;
        println!("JSON report written to: {}", json_path.display());
    }

    Ok(())
}

fn list_configurations(plan: &SweepPlan) {
    println!("Sweep plan:");

    let configurations = plan.configurations();
    let mut current_label: Option<&str> = None;
    for configuration in &configurations {
        if current_label != Some(configuration.label.as_str()) {
            println!("├── {}", configuration.label);
            current_label = Some(configuration.label.as_str());
        }
        println!("│   ├── {} x{}", configuration.mode, plan.repeats);
    }

    println!(
        "{} configurations, {} invocations.",
        configurations.len(),
        plan.total_invocations()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("sortsweep").chain(args.iter().copied()))
    }

    #[test]
    fn settings_default_to_config_values() {
        let settings = build_settings(&cli(&[]), &SweepConfig::default()).unwrap();

        assert_eq!(settings.plan.inputs.len(), 5);
        assert_eq!(settings.plan.max_threads, 8);
        assert_eq!(settings.plan.repeats, 5);
        assert_eq!(settings.threaded_bin, PathBuf::from("./psort"));
        assert_eq!(settings.output_dir, PathBuf::from("target/sortsweep"));
        assert_eq!(settings.json_path, None);
    }

    #[test]
    fn cli_flags_override_config_values() {
        let settings = build_settings(
            &cli(&[
                "--input",
                "a.dat",
                "--input",
                "b.dat",
                "--max-threads",
                "2",
                "--repeats",
                "7",
                "--threaded-bin",
                "./other_sort",
                "--output-dir",
                "out",
            ]),
            &SweepConfig::default(),
        )
        .unwrap();

        assert_eq!(
            settings.plan.inputs,
            vec![PathBuf::from("a.dat"), PathBuf::from("b.dat")]
        );
        assert_eq!(settings.plan.max_threads, 2);
        assert_eq!(settings.plan.repeats, 7);
        assert_eq!(settings.threaded_bin, PathBuf::from("./other_sort"));
        assert_eq!(settings.baseline_bin, PathBuf::from("./psort_serial"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn filter_restricts_inputs_by_label() {
        let settings = build_settings(&cli(&["--filter", "^1"]), &SweepConfig::default()).unwrap();

        let labels: Vec<String> = settings
            .plan
            .inputs
            .iter()
            .map(|p| input_label(p))
            .collect();
        assert_eq!(labels, vec!["10mb", "16mb", "100mb"]);
    }

    #[test]
    fn invalid_filter_is_fatal() {
        assert!(build_settings(&cli(&["--filter", "["]), &SweepConfig::default()).is_err());
    }

    #[test]
    fn zero_repeats_is_fatal() {
        assert!(build_settings(&cli(&["--repeats", "0"]), &SweepConfig::default()).is_err());
        assert!(build_settings(&cli(&["--max-threads", "0"]), &SweepConfig::default()).is_err());
    }

    #[test]
    fn save_json_flag_defaults_into_output_dir() {
        let settings = build_settings(&cli(&["--save-json"]), &SweepConfig::default()).unwrap();
        assert_eq!(
            settings.json_path,
            Some(PathBuf::from("target/sortsweep").join("sweep.json"))
        );
    }

    #[test]
    fn save_json_flag_takes_an_explicit_path() {
        let settings =
            build_settings(&cli(&["--save-json", "out.json"]), &SweepConfig::default()).unwrap();
        assert_eq!(settings.json_path, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn config_save_json_applies_without_the_flag() {
        let mut config = SweepConfig::default();
        config.output.save_json = true;
        config.output.json_path = Some("reports/sweep.json".to_string());

        let settings = build_settings(&cli(&[]), &config).unwrap();
        assert_eq!(settings.json_path, Some(PathBuf::from("reports/sweep.json")));
    }
}
