//! In-place ripple adder built from multi-controlled NOT gates
//!
//! The register holds two `n`-bit numbers, `A` on positions `1..=n` and `B`
//! on positions `n+1..=2n`, both most significant first, so the basis index
//! of the register is `A · 2^n + B`. The circuit maps `(A, B)` to
//! `(A, A + B mod 2^n)` without ancillas: for every bit `k` of `A`, from the
//! least significant up, it increments the bits `k..n` of `B` controlled on
//! that bit of `A`, flipping the highest bit of `B` first.

use tracing::debug;

use crate::config::ComposeConfig;
use crate::error::{GateError, GateResult};
use crate::quantum::bits::dimension_of;
use crate::quantum::circuit::{Circuit, CircuitBuilder, PlacedGate};
use crate::quantum::gate::MAX_POSITION;

/// Width of the register holding both operands.
fn register_width(bits: usize) -> GateResult<usize> {
    bits.checked_mul(2)
        .filter(|&width| width <= MAX_POSITION)
        .ok_or(GateError::RegisterTooWide {
            width: bits.saturating_mul(2),
            max: MAX_POSITION,
        })
}

/// Gate sequence computing `B ← A + B mod 2^bits` on `2 · bits` qubits.
pub fn ripple_adder(bits: usize) -> GateResult<Vec<PlacedGate>> {
    if bits == 0 {
        return Err(GateError::InvalidGateSpec(
            "an adder needs at least one bit per operand".to_string(),
        ));
    }

    let qubits = register_width(bits)?;
    let a_position = |k: usize| bits - k;
    let b_position = |k: usize| qubits - k;

    let mut builder = CircuitBuilder::new(qubits);
    for k in 0..bits {
        for t in (k..bits).rev() {
            let controls: Vec<usize> = std::iter::once(a_position(k))
                .chain((k..t).map(b_position))
                .collect();
            builder.mcx(&controls, b_position(t))?;
        }
    }

    let gates = builder.build();
    debug!(bits, gates = gates.len(), "built ripple adder");
    Ok(gates)
}

/// Basis index of the register holding `a` and `b`.
pub fn encode(a: usize, b: usize, bits: usize) -> GateResult<usize> {
    register_width(bits)?;
    let limit = dimension_of(bits).ok_or(GateError::OutOfRange { value: a.max(b), width: bits })?;
    for value in [a, b] {
        if value >= limit {
            return Err(GateError::OutOfRange { value, width: bits });
        }
    }
    Ok((a << bits) | b)
}

/// Split a basis index into `(a, b)`.
pub fn decode(index: usize, bits: usize) -> (usize, usize) {
    let mask = dimension_of(bits).map_or(usize::MAX, |limit| limit - 1);
    let a = u32::try_from(bits)
        .ok()
        .and_then(|shift| index.checked_shr(shift))
        .unwrap_or(0);
    (a, index & mask)
}

/// The basis index the adder should produce for `index`.
pub fn expected_sum(index: usize, bits: usize) -> GateResult<usize> {
    let (a, b) = decode(index, bits);
    let mask = dimension_of(bits).map_or(usize::MAX, |limit| limit - 1);
    encode(a, a.wrapping_add(b) & mask, bits)
}

/// Every input whose output differs from the expected sum, as
/// `(input, output, expected)`.
pub fn adder_mismatches(bits: usize, config: &ComposeConfig) -> GateResult<Vec<(usize, usize, usize)>> {
    let circuit = Circuit::with_config(register_width(bits)?, ripple_adder(bits)?, *config)?;

    let mut mismatches = Vec::new();
    for input in 0..circuit.matrix().dimension() {
        let output = circuit.apply(input)?;
        let expected = expected_sum(input, bits)?;
        if output != expected {
            mismatches.push((input, output, expected));
        }
    }
    Ok(mismatches)
}

/// Compose the adder and check it on every input.
pub fn verify_adder(bits: usize, config: &ComposeConfig) -> GateResult<bool> {
    Ok(adder_mismatches(bits, config)?.is_empty())
}
