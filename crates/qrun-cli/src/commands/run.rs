//! Run command implementation.

use anyhow::Result;
use console::style;

use super::common::{OutputFormat, resolve_experiment, run_and_report};
use crate::{CircuitArgs, SampleArgs};

/// Execute the run command.
pub fn execute(circuit: &CircuitArgs, sample: &SampleArgs, draw: bool) -> Result<()> {
    let format: OutputFormat = sample.format.parse()?;
    let experiment = resolve_experiment(circuit)?;

    if format.is_table() {
        println!(
            "{} Running {} ({} qubits, {} ops, depth {})",
            style("→").cyan().bold(),
            style(experiment.circuit.name()).green(),
            experiment.circuit.num_qubits(),
            experiment.circuit.num_ops(),
            experiment.circuit.depth()
        );
        if draw {
            println!("\n{}", experiment.circuit);
        }
    }

    run_and_report(&experiment, sample, format)
}
