//! Built-in tutorial experiments.
//!
//! Each experiment is a small circuit from the beginner walkthrough: the
//! untouched register, a single superposition, a bit-flip, a bit-flip followed
//! by a superposition, and two independent superpositions.

use anyhow::Result;
use console::style;

use qrun_ir::{Circuit, IrResult};

use super::common::{Experiment, OutputFormat, run_and_report};
use crate::SampleArgs;

/// A named circuit with a one-line description of what to expect.
pub struct TutorialExperiment {
    pub name: &'static str,
    pub summary: &'static str,
    build: fn() -> IrResult<Circuit>,
}

impl TutorialExperiment {
    /// Build the experiment's circuit.
    pub fn circuit(&self) -> IrResult<Circuit> {
        (self.build)().map(|c| c.with_name(self.name))
    }
}

/// All tutorial experiments in walkthrough order.
pub const EXPERIMENTS: &[TutorialExperiment] = &[
    TutorialExperiment {
        name: "identity",
        summary: "One qubit, no gates: always measures 0",
        build: || Circuit::build(1, []),
    },
    TutorialExperiment {
        name: "superposition",
        summary: "Hadamard on one qubit: 0 and 1 about half the time each",
        build: || Circuit::builder(1).h(0).build(),
    },
    TutorialExperiment {
        name: "flip",
        summary: "Bit-flip on one qubit: always measures 1",
        build: || Circuit::builder(1).x(0).build(),
    },
    TutorialExperiment {
        name: "flip-superposition",
        summary: "Bit-flip then Hadamard: same 50/50 statistics as superposition",
        build: || Circuit::builder(1).x(0).h(0).build(),
    },
    TutorialExperiment {
        name: "two-qubit",
        summary: "Hadamard on two qubits: 00, 01, 10, 11 about a quarter each",
        build: || Circuit::superposition(2),
    },
];

/// Look up an experiment by name.
pub fn find(name: &str) -> Option<&'static TutorialExperiment> {
    EXPERIMENTS
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
}

/// Print the experiment catalogue.
pub fn list() {
    println!("{} Tutorial experiments:", style("→").cyan().bold());
    for experiment in EXPERIMENTS {
        println!(
            "  {:<20} {}",
            style(experiment.name).green(),
            experiment.summary
        );
    }
}

/// Execute the tutorial command.
pub fn execute(name: &str, sample: &SampleArgs) -> Result<()> {
    let format: OutputFormat = sample.format.parse()?;
    let Some(tutorial) = find(name) else {
        let names: Vec<_> = EXPERIMENTS.iter().map(|e| e.name).collect();
        anyhow::bail!(
            "Unknown experiment: '{name}'. Available: {}",
            names.join(", ")
        );
    };

    let experiment = Experiment::from_circuit(tutorial.circuit()?);
    if format.is_table() {
        println!(
            "{} {}: {}",
            style("→").cyan().bold(),
            style(tutorial.name).green(),
            tutorial.summary
        );
        println!("\n{}", experiment.circuit);
    }

    run_and_report(&experiment, sample, format)
}
