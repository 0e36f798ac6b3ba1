//! Error types for the simulator.

use qrun_ir::IrError;
use thiserror::Error;

/// Errors that can occur when building or running a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit failed validation.
    #[error(transparent)]
    InvalidCircuit(#[from] IrError),

    /// Shot count must be positive.
    #[error("Invalid shots: {0}, at least one shot is required")]
    InvalidShots(u32),

    /// Circuit exceeds the simulator's register limit.
    #[error("Circuit has {num_qubits} qubits but the simulator supports at most {max_qubits}")]
    CircuitTooLarge {
        /// Width of the rejected circuit.
        num_qubits: usize,
        /// Enforced limit.
        max_qubits: u32,
    },
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
