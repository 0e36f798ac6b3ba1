//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use qrun_ir::{Circuit, GateKind, GateOp};

/// A pure quantum state over `n` qubits.
///
/// Amplitude `k` belongs to the basis state whose bit `i` is the value of
/// qubit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Allocates `2^num_qubits` amplitudes; [`crate::CircuitRunner`] never
    /// calls this above [`crate::HARD_MAX_QUBITS`].
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Evolve |0...0⟩ through every operation of `circuit`.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut sv = Self::new(circuit.num_qubits());
        for op in circuit.ops() {
            sv.apply(op);
        }
        sv
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Born-rule probability of every basis outcome.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Whether two states agree amplitude by amplitude within `tol`.
    ///
    /// This compares states, not measurement statistics: `|+⟩` and `|-⟩` have
    /// identical outcome probabilities but are not `approx_eq`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() < tol)
    }

    /// Apply a gate operation to the statevector.
    pub fn apply(&mut self, op: &GateOp) {
        let qubit = op.qubit.index();
        match op.gate {
            GateKind::I => {}
            GateKind::X => self.apply_x(qubit),
            GateKind::Y => self.apply_y(qubit),
            GateKind::Z => self.apply_z(qubit),
            GateKind::H => self.apply_h(qubit),
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    /// Render a basis index as an `n`-character bitstring.
    ///
    /// The rightmost character is qubit 0.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrun_ir::QubitId;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        for amp in &sv.amplitudes[1..] {
            assert!(approx_eq(*amp, Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_h(0);

        assert!(approx_eq(sv.amplitudes[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_x_gate() {
        let mut sv = Statevector::new(1);
        sv.apply_x(0);

        assert!(approx_eq(sv.amplitudes[0], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_x_targets_correct_qubit() {
        let mut sv = Statevector::new(3);
        sv.apply(&GateOp::x(QubitId(1)));
        assert!(approx_eq(sv.amplitudes[0b010], Complex64::new(1.0, 0.0)));
        assert_eq!(sv.outcome_to_bitstring(0b010), "010");
    }

    #[test]
    fn test_y_gate() {
        let mut sv = Statevector::new(1);
        sv.apply_y(0);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_x_then_h_is_minus_state() {
        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        sv.apply_h(0);

        assert!(approx_eq(sv.amplitudes[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(-FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_z_is_invisible_on_basis_state() {
        let mut sv = Statevector::new(1);
        sv.apply_z(0);
        assert!(sv.approx_eq(&Statevector::new(1), 1e-12));
    }

    #[test]
    fn test_identity_is_noop() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        let before = sv.clone();
        sv.apply(&GateOp::id(QubitId(0)));
        sv.apply(&GateOp::id(QubitId(1)));
        assert_eq!(sv, before);
    }

    #[test]
    fn test_probabilities_normalized() {
        let circuit = Circuit::builder(3).h(0).x(1).h(2).y(2).build().unwrap();
        let sv = Statevector::from_circuit(&circuit);
        let total: f64 = sv.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((sv.probability_of_one(0) - 0.5).abs() < 1e-12);
        assert!((sv.probability_of_one(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bitstring_width() {
        let sv = Statevector::new(4);
        assert_eq!(sv.outcome_to_bitstring(0), "0000");
        assert_eq!(sv.outcome_to_bitstring(1), "0001");
    }
}
