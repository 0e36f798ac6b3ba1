//! qrun Circuit Representation
//!
//! This crate provides the data model shared by the qrun simulator and CLI:
//! named single-qubit gates, gate operations bound to a qubit, and validated,
//! immutable circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`GateKind`] for the supported single-qubit gates
//! - **Operations**: [`GateOp`] binding a gate to the qubit it acts on
//! - **Circuit**: [`Circuit`], built once through [`Circuit::build`] or
//!   [`CircuitBuilder`] and never mutated afterwards
//!
//! Every circuit measures all of its qubits at the end, one classical bit per
//! qubit, so there is no explicit measure operation.
//!
//! # Example: Two-Qubit Superposition
//!
//! ```rust
//! use qrun_ir::{Circuit, GateOp, QubitId};
//!
//! let circuit = Circuit::build(2, [GateOp::h(QubitId(0)), GateOp::h(QubitId(1))]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_clbits(), 2);
//! assert_eq!(circuit.depth(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Name | Description |
//! |------|------|-------------|
//! | `I` | `id` | Identity |
//! | `X` | `x` | Bit-flip (Pauli-X) |
//! | `Y` | `y` | Pauli-Y |
//! | `Z` | `z` | Phase-flip (Pauli-Z) |
//! | `H` | `h` | Hadamard (equal-weight superposition) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, CircuitBuilder};
pub use error::{IrError, IrResult};
pub use gate::GateKind;
pub use instruction::GateOp;
pub use qubit::{ClbitId, QubitId};
