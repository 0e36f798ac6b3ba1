//! qrun Command-Line Interface
//!
//! Build small circuits from named single-qubit gates, sample them on the
//! local statevector simulator and print the outcome frequencies.
//!
//! ```text
//! $ qrun tutorial superposition --seed 7
//! q0: ─H──M─
//!
//! ✓ Results (1024 shots):
//!   0:    519 (50.68%) █████████████████████████
//!   1:    505 (49.32%) █████████████████████████
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qrun_ir::GateOp;

mod commands;

use commands::{draw, run, tutorial, version};

/// qrun - sample quantum circuits on a local statevector simulator
#[derive(Parser)]
#[command(name = "qrun")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where a circuit comes from: an experiment file or inline operations.
#[derive(Args, Debug)]
pub struct CircuitArgs {
    /// Experiment file (YAML or JSON)
    #[arg(short, long, conflicts_with_all = ["qubits", "ops"])]
    pub input: Option<String>,

    /// Number of qubits for an inline circuit
    #[arg(short, long, required_unless_present = "input")]
    pub qubits: Option<u32>,

    /// Gate operation as GATE:QUBIT (repeatable, applied in order)
    #[arg(long = "op", value_name = "GATE:QUBIT")]
    pub ops: Vec<GateOp>,
}

/// Sampling settings shared by `run` and `tutorial`.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Number of shots [default: 1024]
    #[arg(short, long, env = "QRUN_SHOTS")]
    pub shots: Option<u32>,

    /// Seed for the random source (random if omitted)
    #[arg(long, env = "QRUN_SEED")]
    pub seed: Option<u64>,

    /// Sample shots in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Largest circuit the simulator accepts
    #[arg(long, env = "QRUN_MAX_QUBITS", default_value = "24")]
    pub max_qubits: u32,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a circuit and print outcome counts
    Run {
        #[command(flatten)]
        circuit: CircuitArgs,

        #[command(flatten)]
        sample: SampleArgs,

        /// Print the circuit diagram before the results
        #[arg(long)]
        draw: bool,
    },

    /// Run one of the built-in tutorial experiments
    Tutorial {
        /// Experiment name (omit to list experiments)
        name: Option<String>,

        /// List available experiments
        #[arg(short, long)]
        list: bool,

        #[command(flatten)]
        sample: SampleArgs,
    },

    /// Print a circuit diagram
    Draw {
        #[command(flatten)]
        circuit: CircuitArgs,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run {
            circuit,
            sample,
            draw,
        } => run::execute(&circuit, &sample, draw),

        Commands::Tutorial { name, list, sample } => match name {
            Some(name) if !list => tutorial::execute(&name, &sample),
            _ => {
                tutorial::list();
                Ok(())
            }
        },

        Commands::Draw { circuit } => draw::execute(&circuit),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
