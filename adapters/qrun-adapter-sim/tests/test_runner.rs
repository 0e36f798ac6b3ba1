//! Measurement statistics of the circuit runner.

use qrun_adapter_sim::{CircuitRunner, SimError, Statevector, run_with_rng};
use qrun_ir::{Circuit, GateOp, IrError, QubitId};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Allowed deviation from the mean: five standard deviations of a binomial.
fn tolerance(shots: u64, p: f64) -> f64 {
    5.0 * (shots as f64 * p * (1.0 - p)).sqrt()
}

// ---------------------------------------------------------------------------
// Deterministic circuits
// ---------------------------------------------------------------------------

#[test]
fn empty_circuit_measures_all_zero() {
    for n in 1..=5 {
        let circuit = Circuit::build(n, []).unwrap();
        let result = CircuitRunner::new().with_seed(1).run(&circuit, 500).unwrap();
        let zeros = "0".repeat(n as usize);
        assert_eq!(result.counts.get(&zeros), 500);
        assert_eq!(result.counts.len(), 1);
    }
}

#[test]
fn bit_flip_is_deterministic() {
    let circuit = Circuit::builder(1).x(0).build().unwrap();
    let result = CircuitRunner::new().run(&circuit, 1000).unwrap();
    assert_eq!(result.counts.get("1"), 1000);
}

#[test]
fn bit_flip_on_second_qubit_sets_left_bit() {
    let circuit = Circuit::builder(2).x(1).build().unwrap();
    let result = CircuitRunner::new().run(&circuit, 10).unwrap();
    assert_eq!(result.counts.get("10"), 10);
}

#[test]
fn identity_and_phase_gates_leave_zero_state() {
    let circuit = Circuit::builder(2).id(0).z(1).id(1).build().unwrap();
    let result = CircuitRunner::new().run(&circuit, 100).unwrap();
    assert_eq!(result.counts.get("00"), 100);
}

// ---------------------------------------------------------------------------
// Superposition statistics
// ---------------------------------------------------------------------------

#[test]
fn single_hadamard_splits_evenly() {
    let shots: u32 = 10_000;
    let circuit = Circuit::builder(1).h(0).build().unwrap();
    let bound = 5.0 * f64::from(shots).sqrt() / 2.0;

    let trials = 100;
    let mut within = 0;
    for seed in 0..trials {
        let result = CircuitRunner::new().with_seed(seed).run(&circuit, shots).unwrap();
        let zeros = result.counts.get("0") as f64;
        let ones = result.counts.get("1") as f64;
        let half = f64::from(shots) / 2.0;
        if (zeros - half).abs() <= bound && (ones - half).abs() <= bound {
            within += 1;
        }
    }
    assert!(within * 100 >= trials * 99, "only {within}/{trials} runs within bound");
}

#[test]
fn flip_then_hadamard_matches_hadamard_statistics_but_not_state() {
    let shots: u32 = 20_000;
    let plus = Circuit::builder(1).h(0).build().unwrap();
    let minus = Circuit::builder(1).x(0).h(0).build().unwrap();

    let plus_sv = Statevector::from_circuit(&plus);
    let minus_sv = Statevector::from_circuit(&minus);
    assert!(!plus_sv.approx_eq(&minus_sv, 1e-9));
    // |+> and |-> differ only in the sign of the |1> amplitude.
    assert!(plus_sv.amplitudes()[1].re > 0.0);
    assert!(minus_sv.amplitudes()[1].re < 0.0);
    for (a, b) in plus_sv.probabilities().iter().zip(minus_sv.probabilities()) {
        assert!((a - b).abs() < 1e-12);
    }

    let runner = CircuitRunner::new().with_seed(2024);
    let tol = tolerance(u64::from(shots), 0.5);
    for circuit in [&plus, &minus] {
        let result = runner.run(circuit, shots).unwrap();
        let ones = result.counts.get("1") as f64;
        assert!((ones - f64::from(shots) / 2.0).abs() <= tol);
    }

    // Same seed, same distribution, same sampler draws: identical counts.
    let a = runner.run(&plus, shots).unwrap();
    let b = runner.run(&minus, shots).unwrap();
    assert_eq!(a.counts, b.counts);
}

#[test]
fn uniform_superposition_over_all_outcomes() {
    let n = 3;
    let shots: u32 = 80_000;
    let circuit = Circuit::superposition(n).unwrap();
    let result = CircuitRunner::new().with_seed(11).run(&circuit, shots).unwrap();

    let outcomes = 1u64 << n;
    assert_eq!(result.counts.len() as u64, outcomes);
    let expected = f64::from(shots) / outcomes as f64;
    let tol = tolerance(u64::from(shots), 1.0 / outcomes as f64);
    for k in 0..outcomes {
        let bits = format!("{k:03b}");
        let observed = result.counts.get(&bits) as f64;
        assert!(
            (observed - expected).abs() <= tol,
            "{bits}: {observed} vs {expected}"
        );
    }
}

#[test]
fn marginals_of_mixed_circuit() {
    let shots: u32 = 10_000;
    let circuit = Circuit::builder(2).h(0).x(1).build().unwrap();
    let result = CircuitRunner::new().with_seed(3).run(&circuit, shots).unwrap();

    assert_eq!(result.marginal_ones(1), u64::from(shots));
    let ones = result.marginal_ones(0) as f64;
    assert!((ones - 5000.0).abs() <= tolerance(u64::from(shots), 0.5));
    assert_eq!(result.counts.get("00") + result.counts.get("01"), 0);
}

// ---------------------------------------------------------------------------
// Reproducibility and parallelism
// ---------------------------------------------------------------------------

#[test]
fn seeded_runs_are_reproducible() {
    let circuit = Circuit::superposition(2).unwrap();
    let runner = CircuitRunner::new().with_seed(42);
    let a = runner.run(&circuit, 5000).unwrap();
    let b = runner.run(&circuit, 5000).unwrap();
    assert_eq!(a.counts, b.counts);
}

#[test]
fn parallel_runs_are_reproducible_and_complete() {
    let circuit = Circuit::superposition(4).unwrap();
    let runner = CircuitRunner::new()
        .with_seed(8)
        .with_parallel(true)
        .with_chunk_size(1000);
    let a = runner.run(&circuit, 12_345).unwrap();
    let b = runner.run(&circuit, 12_345).unwrap();
    assert_eq!(a.counts, b.counts);
    assert_eq!(a.counts.total_shots(), 12_345);
    assert_eq!(a.counts.len(), 16);
}

#[test]
fn caller_supplied_rng() {
    let circuit = Circuit::builder(1).h(0).build().unwrap();
    let mut rng_a = StdRng::seed_from_u64(77);
    let mut rng_b = StdRng::seed_from_u64(77);
    let a = run_with_rng(&circuit, 1000, &mut rng_a).unwrap();
    let b = run_with_rng(&circuit, 1000, &mut rng_b).unwrap();
    assert_eq!(a.counts, b.counts);
    assert_eq!(a.seed, None);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn raised_limit_never_exceeds_hard_ceiling() {
    let circuit = Circuit::build(64, [GateOp::h(QubitId(63))]).unwrap();
    let err = CircuitRunner::new()
        .with_max_qubits(64)
        .run(&circuit, 10)
        .unwrap_err();
    assert!(matches!(err, SimError::CircuitTooLarge { num_qubits: 64, .. }));
}

#[test]
fn build_rejects_out_of_range_qubit() {
    let err = CircuitRunner::new()
        .build(2, [GateOp::h(QubitId(0)), GateOp::h(QubitId(2))])
        .unwrap_err();
    assert!(matches!(
        err,
        SimError::InvalidCircuit(IrError::QubitOutOfRange { .. })
    ));
}

#[test]
fn build_rejects_empty_register() {
    let err = CircuitRunner::new().build(0, []).unwrap_err();
    assert!(matches!(err, SimError::InvalidCircuit(IrError::EmptyRegister)));
}

#[test]
fn run_rejects_zero_shots() {
    let circuit = Circuit::superposition(1).unwrap();
    assert!(matches!(
        CircuitRunner::new().run(&circuit, 0),
        Err(SimError::InvalidShots(0))
    ));
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        run_with_rng(&circuit, 0, &mut rng),
        Err(SimError::InvalidShots(0))
    ));
}
