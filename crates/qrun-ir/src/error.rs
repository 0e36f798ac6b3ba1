//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while constructing a circuit.
///
/// Every variant describes a malformed circuit; see [`IrError::is_invalid_circuit`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The register has no qubits.
    #[error("Invalid circuit: register must contain at least one qubit")]
    EmptyRegister,

    /// An operation references a qubit outside the register.
    #[error(
        "Invalid circuit: qubit {qubit} out of range for a {num_qubits}-qubit register (gate: {gate_name})"
    )]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the register.
        num_qubits: u32,
        /// Name of the gate that referenced the qubit.
        gate_name: String,
    },

    /// Gate name is not one of the supported gates.
    #[error("Invalid circuit: unknown gate '{0}'")]
    UnknownGate(String),

    /// Text form of an operation could not be parsed.
    #[error("Invalid circuit: malformed gate operation '{0}', expected <gate>:<qubit>")]
    MalformedOp(String),
}

impl IrError {
    /// Whether this error rejects the circuit itself.
    ///
    /// All current variants do; the method exists so callers can match on the
    /// error category without enumerating variants of a non-exhaustive enum.
    pub fn is_invalid_circuit(&self) -> bool {
        matches!(
            self,
            IrError::EmptyRegister
                | IrError::QubitOutOfRange { .. }
                | IrError::UnknownGate(_)
                | IrError::MalformedOp(_)
        )
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
