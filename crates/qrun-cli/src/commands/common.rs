//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::info;

use qrun_adapter_sim::{CircuitRunner, RunResult, RunnerConfig};
use qrun_ir::Circuit;

use crate::{CircuitArgs, SampleArgs};

/// Shots used when neither the command line nor the experiment file sets them.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Results beyond this many outcomes are summarized in the table.
const MAX_TABLE_ROWS: usize = 16;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Human-readable output with headers, spinner and bars.
    pub fn is_table(self) -> bool {
        self == OutputFormat::Table
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
        }
    }
}

/// An experiment file: a circuit plus optional run settings.
#[derive(Debug, Deserialize)]
pub struct Experiment {
    #[serde(flatten)]
    pub circuit: Circuit,
    #[serde(default)]
    pub shots: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Experiment {
    /// An experiment with no run settings of its own.
    pub fn from_circuit(circuit: Circuit) -> Self {
        Self {
            circuit,
            shots: None,
            seed: None,
        }
    }
}

/// Load an experiment from a YAML or JSON file.
pub fn load_experiment(path: &str) -> Result<Experiment> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid experiment file: {path}")),
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid experiment file: {path}")),
    }
}

/// Resolve the circuit named by `--input` or by `--qubits`/`--op`.
pub fn resolve_experiment(args: &CircuitArgs) -> Result<Experiment> {
    if let Some(input) = &args.input {
        return load_experiment(input);
    }
    let qubits = args
        .qubits
        .ok_or_else(|| anyhow::anyhow!("Either --input or --qubits is required"))?;
    let circuit = Circuit::build(qubits, args.ops.iter().copied())?.with_name("inline");
    Ok(Experiment::from_circuit(circuit))
}

/// Build a runner from the command line, falling back to the experiment's seed.
pub fn runner_for(sample: &SampleArgs, experiment: &Experiment) -> CircuitRunner {
    CircuitRunner::with_config(RunnerConfig {
        seed: sample.seed.or(experiment.seed),
        max_qubits: sample.max_qubits,
        parallel: sample.parallel,
        ..RunnerConfig::default()
    })
}

/// Run the experiment with the command-line sampling settings and print the result.
pub fn run_and_report(
    experiment: &Experiment,
    sample: &SampleArgs,
    format: OutputFormat,
) -> Result<()> {
    let shots = sample.shots.or(experiment.shots).unwrap_or(DEFAULT_SHOTS);
    let runner = runner_for(sample, experiment);
    info!(
        circuit = experiment.circuit.name(),
        shots,
        seed = ?runner.config().seed,
        parallel = runner.config().parallel,
        "Running experiment"
    );

    let result = if !format.is_table() {
        runner.run(&experiment.circuit, shots)?
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
        spinner.set_message(format!("Sampling {shots} shots..."));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = runner.run(&experiment.circuit, shots);
        spinner.finish_and_clear();
        result?
    };

    emit(&result, format)
}

/// Print a result in the requested format.
pub fn emit(result: &RunResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result)
                .context("JSON serialization failed")?;
            println!("{json}");
        }
        OutputFormat::Table => print_results(result),
    }
    Ok(())
}

/// Print run results as a table with a bar per outcome.
#[allow(clippy::cast_precision_loss)]
pub fn print_results(result: &RunResult) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        result.shots
    );

    let sorted = result.counts.sorted();
    let total = result.counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(MAX_TABLE_ROWS) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_TABLE_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_TABLE_ROWS);
    }

    if let Some(seed) = result.seed {
        println!("\n  Seed: {}", style(seed).yellow());
    }
    if let Some(time_ms) = result.execution_time_ms {
        println!("  Execution time: {} ms", style(time_ms).yellow());
    }
}
