//! qrun Shot-Sampling Simulator
//!
//! This crate executes [`qrun_ir::Circuit`]s on a local statevector simulator
//! and reports how often each measurement outcome occurred.
//!
//! The statevector is evolved once per run; each shot then draws one outcome
//! from the Born-rule distribution of that state. Memory grows as `2^n`
//! complex amplitudes, so the runner refuses circuits wider than its
//! configured `max_qubits`, which is itself capped at [`HARD_MAX_QUBITS`].
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//! | 28 | ~4 GB |
//!
//! # Example
//!
//! ```rust
//! use qrun_adapter_sim::CircuitRunner;
//! use qrun_ir::Circuit;
//!
//! let runner = CircuitRunner::new().with_seed(7);
//! let circuit = Circuit::builder(1).h(0).build().unwrap();
//!
//! let result = runner.run(&circuit, 1000).unwrap();
//! assert_eq!(result.counts.total_shots(), 1000);
//! assert_eq!(result.counts.get("0") + result.counts.get("1"), 1000);
//! ```

mod error;
mod result;
mod runner;
mod sampler;
mod statevector;

pub use error::{SimError, SimResult};
pub use result::{Counts, RunResult};
pub use runner::{
    CircuitRunner, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_QUBITS, HARD_MAX_QUBITS, RunnerConfig,
    run_with_rng,
};
pub use sampler::OutcomeSampler;
pub use statevector::Statevector;
