//! Placing a gate inside a wider register

use super::bits::{check_register_width, sum_widths};
use super::permutation::{GateMatrix, PermutationCategory};
use crate::category::prelude::*;
use crate::config::DEFAULT_MAX_QUBITS;
use crate::error::GateResult;

/// `I(2^leading) ⊗ gate ⊗ I(2^trailing)`: the gate acting on wires
/// `leading + 1 ..= leading + w` of a `leading + w + trailing` qubit register.
///
/// Padded registers wider than [`DEFAULT_MAX_QUBITS`] are rejected.
pub fn embed(gate: &GateMatrix, leading: usize, trailing: usize) -> GateResult<GateMatrix> {
    embed_within(gate, leading, trailing, DEFAULT_MAX_QUBITS)
}

/// [`embed`] with an explicit register width limit.
pub fn embed_within(
    gate: &GateMatrix,
    leading: usize,
    trailing: usize,
    max_qubits: usize,
) -> GateResult<GateMatrix> {
    if leading == 0 && trailing == 0 {
        return Ok(gate.clone());
    }

    let width = sum_widths(&[leading, gate.qubit_count(), trailing])?;
    check_register_width(width, max_qubits)?;

    let category = PermutationCategory;
    let placed = category.tensor_morphisms(&category.identity(&leading), gate);
    Ok(category.tensor_morphisms(&placed, &category.identity(&trailing)))
}
