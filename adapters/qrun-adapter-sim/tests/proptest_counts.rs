//! Property-based tests: counts always account for every shot.

use proptest::prelude::*;
use qrun_adapter_sim::CircuitRunner;
use qrun_ir::{Circuit, GateKind, GateOp};

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=6).prop_flat_map(|n| {
        prop::collection::vec(
            (prop::sample::select(GateKind::ALL.to_vec()), 0..n)
                .prop_map(|(g, q)| GateOp::new(g, q)),
            0..=12,
        )
        .prop_map(move |ops| Circuit::build(n, ops).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counts_sum_to_shots(circuit in arb_circuit(), shots in 1_u32..3000, seed in any::<u64>()) {
        let result = CircuitRunner::new().with_seed(seed).run(&circuit, shots).unwrap();
        prop_assert_eq!(result.counts.total_shots(), u64::from(shots));
        prop_assert_eq!(result.shots, shots);
    }

    #[test]
    fn parallel_counts_sum_to_shots(
        circuit in arb_circuit(),
        shots in 1_u32..3000,
        chunk in 1_u32..500,
        seed in any::<u64>(),
    ) {
        let runner = CircuitRunner::new()
            .with_seed(seed)
            .with_parallel(true)
            .with_chunk_size(chunk);
        let result = runner.run(&circuit, shots).unwrap();
        prop_assert_eq!(result.counts.total_shots(), u64::from(shots));
    }

    #[test]
    fn bitstrings_are_fixed_width_binary(circuit in arb_circuit(), seed in any::<u64>()) {
        let result = CircuitRunner::new().with_seed(seed).run(&circuit, 200).unwrap();
        for (bits, _) in result.counts.iter() {
            prop_assert_eq!(bits.len(), circuit.num_qubits());
            prop_assert!(bits.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn basis_preserving_circuits_are_deterministic(
        (n, ops) in (1_u32..=6).prop_flat_map(|n| {
            let gates: Vec<_> = GateKind::ALL
                .into_iter()
                .filter(|g| g.preserves_basis())
                .collect();
            (Just(n), prop::collection::vec(
                (prop::sample::select(gates), 0..n).prop_map(|(g, q)| GateOp::new(g, q)),
                0..=12,
            ))
        }),
        seed in any::<u64>(),
    ) {
        let circuit = Circuit::build(n, ops).unwrap();
        let result = CircuitRunner::new().with_seed(seed).run(&circuit, 300).unwrap();
        prop_assert_eq!(result.counts.len(), 1);
    }
}
