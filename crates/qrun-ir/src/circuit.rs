//! Validated, immutable circuits and the builder that produces them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::instruction::GateOp;
use crate::qubit::{ClbitId, QubitId};

const DEFAULT_NAME: &str = "circuit";

/// A quantum circuit over a fixed-width register.
///
/// A circuit holds `n` qubits, `n` classical bits and an ordered list of
/// [`GateOp`]s. Every qubit is measured into the classical bit of the same
/// index after the last gate. Construction validates every operand, so a
/// `Circuit` value always satisfies `op.qubit < num_qubits` for all ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CircuitRepr")]
pub struct Circuit {
    name: String,
    #[serde(rename = "qubits")]
    num_qubits: u32,
    ops: Vec<GateOp>,
}

impl Circuit {
    /// Build a circuit from a register width and an ordered operation list.
    ///
    /// Fails with [`IrError::EmptyRegister`] when `num_qubits` is zero and with
    /// [`IrError::QubitOutOfRange`] when an operation addresses a qubit outside
    /// `[0, num_qubits)`.
    pub fn build(num_qubits: u32, ops: impl IntoIterator<Item = GateOp>) -> IrResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::EmptyRegister);
        }
        let ops: Vec<GateOp> = ops.into_iter().collect();
        if let Some(bad) = ops.iter().find(|op| op.qubit.0 >= num_qubits) {
            return Err(IrError::QubitOutOfRange {
                qubit: bad.qubit,
                num_qubits,
                gate_name: bad.gate.name().to_string(),
            });
        }
        Ok(Self {
            name: DEFAULT_NAME.to_string(),
            num_qubits,
            ops,
        })
    }

    /// Start a [`CircuitBuilder`] for a register of `num_qubits` qubits.
    pub fn builder(num_qubits: u32) -> CircuitBuilder {
        CircuitBuilder::new(num_qubits)
    }

    /// A circuit with a Hadamard on every qubit.
    ///
    /// Measuring it yields a uniform distribution over all `2^n` outcomes.
    pub fn superposition(num_qubits: u32) -> IrResult<Self> {
        Self::build(num_qubits, (0..num_qubits).map(|q| GateOp::h(QubitId(q))))
            .map(|c| c.with_name("superposition"))
    }

    /// Return the same circuit under a different name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of classical bits. Always equal to the qubit count.
    pub fn num_clbits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Gate operations in application order.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of gate operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Whether the circuit applies no gates.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The terminal measurements, qubit `i` into classical bit `i`.
    pub fn measurements(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        (0..self.num_qubits).map(|q| (QubitId(q), ClbitId(q)))
    }

    /// Circuit depth, excluding the final measurement layer.
    ///
    /// All gates are single-qubit, so this is the longest per-qubit gate count.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits()];
        for op in &self.ops {
            levels[op.qubit.index()] += 1;
        }
        levels.into_iter().max().unwrap_or(0)
    }

    /// Group operations into layers of mutually disjoint qubits.
    ///
    /// Each operation lands in the earliest layer after the previous operation
    /// on the same qubit, so relative order on every qubit is preserved.
    pub fn layers(&self) -> Vec<Vec<GateOp>> {
        let mut levels = vec![0usize; self.num_qubits()];
        let mut layers: Vec<Vec<GateOp>> = Vec::new();
        for op in &self.ops {
            let level = &mut levels[op.qubit.index()];
            if *level == layers.len() {
                layers.push(Vec::new());
            }
            layers[*level].push(*op);
            *level += 1;
        }
        layers
    }
}

impl fmt::Display for Circuit {
    /// Text diagram: one row per qubit, one column per layer, then the measurement.
    ///
    /// ```text
    /// q0: ─H──X──M─
    /// q1: ─H─────M─
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers = self.layers();
        let label_width = format!("q{}", self.num_qubits - 1).len();

        for q in 0..self.num_qubits {
            let label = format!("q{q}");
            write!(f, "{label:>label_width$}: ")?;
            for layer in &layers {
                match layer.iter().find(|op| op.qubit.0 == q) {
                    Some(op) => write!(f, "─{}─", op.gate.symbol())?,
                    None => f.write_str("───")?,
                }
            }
            f.write_str("─M─")?;
            if q + 1 < self.num_qubits {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CircuitRepr {
    #[serde(default)]
    name: Option<String>,
    qubits: u32,
    #[serde(default)]
    ops: Vec<GateOp>,
}

impl TryFrom<CircuitRepr> for Circuit {
    type Error = IrError;

    fn try_from(repr: CircuitRepr) -> Result<Self, Self::Error> {
        let circuit = Circuit::build(repr.qubits, repr.ops)?;
        Ok(match repr.name {
            Some(name) => circuit.with_name(name),
            None => circuit,
        })
    }
}

/// Fluent builder for [`Circuit`].
///
/// Operations are collected unchecked and validated once in [`CircuitBuilder::build`].
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    name: Option<String>,
    num_qubits: u32,
    ops: Vec<GateOp>,
}

impl CircuitBuilder {
    /// Create a builder for a register of `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            name: None,
            num_qubits,
            ops: Vec::new(),
        }
    }

    /// Set the circuit name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append an arbitrary operation.
    #[must_use]
    pub fn op(mut self, op: GateOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Append identity.
    #[must_use]
    pub fn id(self, qubit: u32) -> Self {
        self.op(GateOp::id(QubitId(qubit)))
    }

    /// Append a bit-flip.
    #[must_use]
    pub fn x(self, qubit: u32) -> Self {
        self.op(GateOp::x(QubitId(qubit)))
    }

    /// Append Pauli-Y.
    #[must_use]
    pub fn y(self, qubit: u32) -> Self {
        self.op(GateOp::y(QubitId(qubit)))
    }

    /// Append a phase-flip.
    #[must_use]
    pub fn z(self, qubit: u32) -> Self {
        self.op(GateOp::z(QubitId(qubit)))
    }

    /// Append a Hadamard.
    #[must_use]
    pub fn h(self, qubit: u32) -> Self {
        self.op(GateOp::h(QubitId(qubit)))
    }

    /// Validate and produce the circuit.
    pub fn build(self) -> IrResult<Circuit> {
        let circuit = Circuit::build(self.num_qubits, self.ops)?;
        Ok(match self.name {
            Some(name) => circuit.with_name(name),
            None => circuit,
        })
    }
}
