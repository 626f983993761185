//! End-to-end checks of the ripple adder against classical addition.

use toffoli::adder::{adder_mismatches, decode, encode, expected_sum, ripple_adder, verify_adder};
use toffoli::quantum::bits::{initial_ones, to_binary_digits};
use toffoli::quantum::circuit::{compose, Circuit};
use toffoli::simulators::{apply_to_basis_state, BasisStateSimulator};
use toffoli::ComposeConfig;

#[test]
fn three_plus_two_is_five() {
    let circuit = compose(&ripple_adder(3).unwrap()).unwrap();
    let input = encode(3, 2, 3).unwrap();
    assert_eq!(input, 0b011_010);

    let output = apply_to_basis_state(&circuit, input).unwrap();
    assert_eq!(output, 0b011_101);
    assert_eq!(decode(output, 3), (3, 5));
}

#[test]
fn five_plus_five_wraps_to_two() {
    let circuit = compose(&ripple_adder(3).unwrap()).unwrap();
    let output = apply_to_basis_state(&circuit, encode(5, 5, 3).unwrap()).unwrap();
    assert_eq!(to_binary_digits(output, 6).unwrap(), vec![1, 0, 1, 0, 1, 0]);
    assert_eq!(decode(output, 3), (5, 2));
}

#[test]
fn adder_is_correct_for_every_input() {
    let config = ComposeConfig::default();
    for bits in 1..=4 {
        assert!(verify_adder(bits, &config).unwrap(), "{}-bit adder failed", bits);
    }
}

#[test]
fn sequential_composition_gives_the_same_adder() {
    let config = ComposeConfig::default().with_parallel(false);
    assert!(adder_mismatches(3, &config).unwrap().is_empty());
}

#[test]
fn adder_circuit_matches_simulator_for_every_input() {
    let gates = ripple_adder(3).unwrap();
    let circuit = Circuit::new(6, gates.clone()).unwrap();
    assert_eq!(circuit.step_matrices().len(), gates.len());

    for input in 0..64 {
        let mut sim = BasisStateSimulator::from_state(6, input).unwrap();
        sim.run(&gates).unwrap();
        assert_eq!(sim.state(), circuit.apply(input).unwrap());
        assert_eq!(sim.state(), expected_sum(input, 3).unwrap());
    }
}

#[test]
fn simulator_started_from_initial_ones() {
    let input = encode(3, 2, 3).unwrap();
    let wires = initial_ones(input, 6).unwrap();
    assert_eq!(wires, vec![1, 3, 4]);

    let mut sim = BasisStateSimulator::from_initial_ones(6, &wires).unwrap();
    sim.run(&ripple_adder(3).unwrap()).unwrap();
    assert_eq!(sim.bits(), vec![0, 1, 1, 1, 0, 1]);
}

#[test]
fn adder_leaves_first_operand_unchanged() {
    let circuit = compose(&ripple_adder(2).unwrap()).unwrap();
    for a in 0..4 {
        for b in 0..4 {
            let output = apply_to_basis_state(&circuit, encode(a, b, 2).unwrap()).unwrap();
            assert_eq!(decode(output, 2), (a, (a + b) % 4));
        }
    }
}
