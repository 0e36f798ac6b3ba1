//! Single-qubit gate kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// The gates a circuit can apply. All act on exactly one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// Identity gate.
    #[serde(rename = "id", alias = "i")]
    I,
    /// Pauli-X (bit-flip) gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z (phase-flip) gate.
    Z,
    /// Hadamard gate.
    H,
}

impl GateKind {
    /// Every supported gate, in display order.
    pub const ALL: [GateKind; 5] = [
        GateKind::I,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
    ];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
        }
    }

    /// Single-character label used in circuit diagrams.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            GateKind::I => 'I',
            GateKind::X => 'X',
            GateKind::Y => 'Y',
            GateKind::Z => 'Z',
            GateKind::H => 'H',
        }
    }

    /// Whether the gate maps computational basis states onto basis states.
    ///
    /// Only `H` creates superposition; the rest permute basis labels or add a phase.
    #[inline]
    pub fn preserves_basis(self) -> bool {
        !matches!(self, GateKind::H)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "i" => Ok(GateKind::I),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "h" => Ok(GateKind::H),
            _ => Err(IrError::UnknownGate(s.to_string())),
        }
    }
}
