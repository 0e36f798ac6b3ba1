//! Gate operations: a gate bound to the qubit it acts on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;
use crate::gate::GateKind;
use crate::qubit::QubitId;

/// A single gate application.
///
/// Serialized either as a struct (`{gate: h, qubit: 0}`) or in the compact
/// text form `h:0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OpRepr")]
pub struct GateOp {
    /// The gate to apply.
    pub gate: GateKind,
    /// The qubit it acts on.
    pub qubit: QubitId,
}

impl GateOp {
    /// Create a gate operation.
    pub fn new(gate: GateKind, qubit: impl Into<QubitId>) -> Self {
        Self {
            gate,
            qubit: qubit.into(),
        }
    }

    /// Identity on `qubit`.
    pub fn id(qubit: QubitId) -> Self {
        Self::new(GateKind::I, qubit)
    }

    /// Bit-flip on `qubit`.
    pub fn x(qubit: QubitId) -> Self {
        Self::new(GateKind::X, qubit)
    }

    /// Pauli-Y on `qubit`.
    pub fn y(qubit: QubitId) -> Self {
        Self::new(GateKind::Y, qubit)
    }

    /// Phase-flip on `qubit`.
    pub fn z(qubit: QubitId) -> Self {
        Self::new(GateKind::Z, qubit)
    }

    /// Hadamard on `qubit`.
    pub fn h(qubit: QubitId) -> Self {
        Self::new(GateKind::H, qubit)
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gate, self.qubit)
    }
}

impl FromStr for GateOp {
    type Err = IrError;

    /// Parse `<gate>:<qubit>`, e.g. `h:0` or `X:3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (gate, qubit) = s
            .split_once(':')
            .ok_or_else(|| IrError::MalformedOp(s.to_string()))?;
        let gate: GateKind = gate.parse()?;
        let qubit: u32 = qubit
            .trim()
            .parse()
            .map_err(|_| IrError::MalformedOp(s.to_string()))?;
        Ok(Self::new(gate, qubit))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OpRepr {
    Text(String),
    Struct { gate: GateKind, qubit: QubitId },
}

impl TryFrom<OpRepr> for GateOp {
    type Error = IrError;

    fn try_from(repr: OpRepr) -> Result<Self, Self::Error> {
        match repr {
            OpRepr::Text(s) => s.parse(),
            OpRepr::Struct { gate, qubit } => Ok(Self::new(gate, qubit)),
        }
    }
}
