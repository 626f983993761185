//! Tests for placing gates and composing gate sequences.

use toffoli::quantum::circuit::{compose, Circuit, CircuitBuilder, CircuitComposer, PlacedGate};
use toffoli::quantum::gate::{synthesize, GateSpec};
use toffoli::quantum::permutation::dense;
use toffoli::quantum::embed;
use toffoli::simulators::{apply_to_basis_state, BasisStateSimulator};
use toffoli::{ComposeConfig, GateError};

fn cnot_down() -> PlacedGate {
    PlacedGate::new(0, GateSpec::cnot(1, 2).unwrap(), 0)
}

fn cnot_up() -> PlacedGate {
    PlacedGate::new(0, GateSpec::cnot(2, 1).unwrap(), 0)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn empty_sequence_returns_error() {
    assert_eq!(compose(&[]), Err(GateError::EmptySequence));
    let composer = CircuitComposer::new(ComposeConfig::default().with_parallel(false));
    assert_eq!(composer.factors(&[]), Err(GateError::EmptySequence));
}

#[test]
fn width_mismatch_reports_offending_gate() {
    let gates = vec![
        PlacedGate::new(1, GateSpec::cnot(1, 2).unwrap(), 0),
        PlacedGate::new(0, GateSpec::toffoli(1, 2, 3).unwrap(), 0),
        PlacedGate::new(0, GateSpec::not(1).unwrap(), 3),
    ];
    assert_eq!(
        compose(&gates),
        Err(GateError::RegisterWidthMismatch { index: 2, expected: 3, found: 4 })
    );
}

#[test]
fn invalid_gate_json_is_rejected_before_composition() {
    let parsed = serde_json::from_str::<Vec<PlacedGate>>(
        r#"[{"leading": 0, "gate": {"controls": [1], "target": 1}, "trailing": 0}]"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn oversized_padding_in_json_is_rejected() {
    let overflowing = serde_json::from_str::<Vec<PlacedGate>>(
        r#"[{"leading": 18446744073709551615, "gate": {"target": 1}, "trailing": 0}]"#,
    );
    assert!(overflowing.is_err());

    let unbuildable =
        serde_json::from_str::<PlacedGate>(r#"{"leading": 62, "gate": {"target": 1}, "trailing": 0}"#);
    assert!(unbuildable.is_err());

    let placed: PlacedGate =
        serde_json::from_str(r#"{"leading": 2, "gate": {"target": 1}, "trailing": 1}"#).unwrap();
    assert_eq!(placed.total_width(), 4);
}

#[test]
fn oversized_padding_fails_composition() {
    let gates = vec![PlacedGate::new(usize::MAX, GateSpec::not(1).unwrap(), 0)];
    assert!(matches!(compose(&gates), Err(GateError::RegisterTooWide { .. })));
    assert!(matches!(
        Circuit::new(3, gates).err(),
        Some(GateError::RegisterWidthMismatch { index: 0, .. })
    ));
}

#[test]
fn wide_registers_fail_before_allocating() {
    let gates = vec![PlacedGate::new(40, GateSpec::cnot(1, 2).unwrap(), 0)];
    assert_eq!(
        compose(&gates),
        Err(GateError::RegisterTooWide { width: 42, max: 24 })
    );

    let unbounded = CircuitComposer::new(ComposeConfig::new().with_max_qubits(usize::MAX));
    let gates = vec![PlacedGate::new(61, GateSpec::not(1).unwrap(), 0)];
    assert_eq!(
        unbounded.compose(&gates),
        Err(GateError::RegisterTooWide {
            width: 62,
            max: toffoli::quantum::MAX_ADDRESSABLE_WIDTH,
        })
    );
}

// ---------------------------------------------------------------------------
// Single gates
// ---------------------------------------------------------------------------

#[test]
fn single_gate_equals_embedded_synthesis() {
    let gate = GateSpec::toffoli(1, 3, 2).unwrap();
    let placed = PlacedGate::new(1, gate.clone(), 2);

    let expected = embed(&synthesize(gate.controls(), gate.target()).unwrap(), 1, 2).unwrap();
    assert_eq!(compose(&[placed.clone()]).unwrap(), expected);
    assert_eq!(placed.matrix().unwrap(), expected);
}

#[test]
fn zero_padding_single_gate_equals_synthesis() {
    let placed = PlacedGate::new(0, GateSpec::toffoli(1, 2, 3).unwrap(), 0);
    assert_eq!(compose(&[placed]).unwrap(), synthesize(&[1, 2], 3).unwrap());
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn order_of_non_commuting_gates_matters() {
    let forward = compose(&[cnot_down(), cnot_up()]).unwrap();
    let backward = compose(&[cnot_up(), cnot_down()]).unwrap();
    assert_ne!(forward, backward);

    // |10⟩ → CNOT(1→2) → |11⟩ → CNOT(2→1) → |01⟩
    assert_eq!(apply_to_basis_state(&forward, 0b10).unwrap(), 0b01);
    // |10⟩ → CNOT(2→1) → |10⟩ → CNOT(1→2) → |11⟩
    assert_eq!(apply_to_basis_state(&backward, 0b10).unwrap(), 0b11);
}

#[test]
fn composed_matrix_matches_gate_by_gate_application() {
    let gates = vec![cnot_down(), cnot_up()];
    let circuit = compose(&gates).unwrap();
    let first = cnot_down().matrix().unwrap();
    let second = cnot_up().matrix().unwrap();

    for state in 0..4 {
        let stepwise = second.apply(first.apply(state).unwrap()).unwrap();
        assert_eq!(apply_to_basis_state(&circuit, state).unwrap(), stepwise);
    }
}

#[test]
fn composed_matrix_is_later_gate_on_the_left() {
    let circuit = compose(&[cnot_down(), cnot_up()]).unwrap();
    let expected = dense::matmul(
        &cnot_up().matrix().unwrap().to_dense(),
        &cnot_down().matrix().unwrap().to_dense(),
    );
    assert_eq!(circuit.to_dense(), expected);
}

#[test]
fn three_cnots_make_a_swap() {
    let circuit = compose(&[cnot_down(), cnot_up(), cnot_down()]).unwrap();
    assert_eq!(circuit.image(), &[0, 2, 1, 3]);
    assert!(circuit.is_symmetric());
}

#[test]
fn composed_circuit_is_permutation_but_not_symmetric() {
    let circuit = compose(&[cnot_down(), cnot_up()]).unwrap();
    assert!(!circuit.is_symmetric());
    assert!(!circuit.is_involution());
    assert!(circuit.then(&circuit.inverse()).unwrap().is_identity());
}

#[test]
fn mixed_paddings_match_simulator() {
    let mut builder = CircuitBuilder::new(5);
    builder.toffoli(1, 2, 5).unwrap();
    builder.cnot(5, 3).unwrap();
    builder.mcx(&[2, 3, 5], 4).unwrap();
    builder.x(2).unwrap();
    builder.cnot(4, 1).unwrap();
    let gates = builder.build();

    let circuit = compose(&gates).unwrap();
    for state in 0..32 {
        let mut sim = BasisStateSimulator::from_state(5, state).unwrap();
        sim.run(&gates).unwrap();
        assert_eq!(apply_to_basis_state(&circuit, state).unwrap(), sim.state());
    }
}

#[test]
fn parallel_and_sequential_composition_agree() {
    let mut builder = CircuitBuilder::new(6);
    for target in 2..=6 {
        builder.cnot(target - 1, target).unwrap();
    }
    builder.mcx(&[1, 2, 3, 4, 5], 6).unwrap();
    let gates = builder.build();

    let parallel = CircuitComposer::new(ComposeConfig::new().with_parallel(true));
    let sequential = CircuitComposer::new(ComposeConfig::new().with_parallel(false));
    assert_eq!(parallel.compose(&gates).unwrap(), sequential.compose(&gates).unwrap());
    assert_eq!(parallel.factors(&gates).unwrap(), sequential.factors(&gates).unwrap());
}

// ---------------------------------------------------------------------------
// Circuit
// ---------------------------------------------------------------------------

#[test]
fn circuit_keeps_intermediate_matrices() {
    let gates = vec![
        PlacedGate::new(0, GateSpec::cnot(1, 2).unwrap(), 1),
        PlacedGate::new(1, GateSpec::cnot(1, 2).unwrap(), 0),
    ];
    let circuit = Circuit::new(3, gates.clone()).unwrap();

    assert_eq!(circuit.qubit_count(), 3);
    assert_eq!(circuit.gates(), gates.as_slice());
    assert_eq!(circuit.gate_matrices()[0], synthesize(&[1], 2).unwrap());
    assert_eq!(circuit.step_matrices()[1], synthesize(&[2], 3).unwrap());
    assert_eq!(circuit.matrix(), &compose(&gates).unwrap());
    assert_eq!(circuit.apply(0b100).unwrap(), 0b111);
}

#[test]
fn circuit_rejects_gates_of_other_widths() {
    let gates = vec![PlacedGate::new(0, GateSpec::cnot(1, 2).unwrap(), 0)];
    assert_eq!(
        Circuit::new(3, gates).err(),
        Some(GateError::RegisterWidthMismatch { index: 0, expected: 3, found: 2 })
    );
}

#[test]
fn circuit_respects_width_limit() {
    let config = ComposeConfig::new().with_max_qubits(4);
    assert_eq!(
        Circuit::with_config(5, Vec::new(), config).err(),
        Some(GateError::RegisterTooWide { width: 5, max: 4 })
    );
}

#[test]
fn config_deserializes_with_defaults() {
    let config: ComposeConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
    assert!(!config.parallel);
    assert_eq!(config.max_qubits, ComposeConfig::default().max_qubits);
}
