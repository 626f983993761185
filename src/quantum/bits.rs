//! Conversions between basis indices and qubit values.
//!
//! Qubit positions are 1-based and most-significant first: in a register of
//! width `w`, position `p` carries the weight `2^(w - p)`.

use crate::error::{GateError, GateResult};

/// Number of distinct basis states of a `width`-qubit register, if it fits in `usize`.
pub(crate) fn dimension_of(width: usize) -> Option<usize> {
    u32::try_from(width).ok().and_then(|w| 1usize.checked_shl(w))
}

/// Widest register whose permutation image can be allocated at all.
///
/// `2^w` entries of `usize` must stay within `isize::MAX` bytes.
pub const MAX_ADDRESSABLE_WIDTH: usize = (usize::BITS + 1 - usize::BITS.trailing_zeros()) as usize;

/// Reject registers wider than `max` or than [`MAX_ADDRESSABLE_WIDTH`].
pub(crate) fn check_register_width(width: usize, max: usize) -> GateResult<()> {
    let max = max.min(MAX_ADDRESSABLE_WIDTH);
    if width > max {
        return Err(GateError::RegisterTooWide { width, max });
    }
    Ok(())
}

/// Total width of adjacent registers, `RegisterTooWide` on overflow.
pub(crate) fn sum_widths(widths: &[usize]) -> GateResult<usize> {
    widths
        .iter()
        .try_fold(0usize, |total, &width| total.checked_add(width))
        .ok_or(GateError::RegisterTooWide {
            width: usize::MAX,
            max: MAX_ADDRESSABLE_WIDTH,
        })
}

/// The `width` binary digits of `value`, most significant first.
pub fn to_binary_digits(value: usize, width: usize) -> GateResult<Vec<u8>> {
    if let Some(limit) = dimension_of(width) {
        if value >= limit {
            return Err(GateError::OutOfRange { value, width });
        }
    }

    Ok((1..=width)
        .map(|position| {
            let shift = width - position;
            if shift >= usize::BITS as usize {
                0
            } else {
                ((value >> shift) & 1) as u8
            }
        })
        .collect())
}

/// Read a most-significant-first digit list back into an integer.
pub fn from_binary_digits(digits: &[u8]) -> GateResult<usize> {
    let mut value: usize = 0;
    for (index, &digit) in digits.iter().enumerate() {
        if digit > 1 {
            return Err(GateError::InvalidDigit { index, digit });
        }
        value = value
            .checked_mul(2)
            .map(|v| v | digit as usize)
            .ok_or(GateError::OutOfRange { value, width: digits.len() })?;
    }
    Ok(value)
}

/// The weight `2^(width - position)` of a 1-based position.
///
/// # Panics
///
/// Panics unless `1 <= position <= width` and the weight fits in `usize`.
pub fn weight_of(position: usize, width: usize) -> usize {
    assert!(
        position >= 1 && position <= width,
        "position {} outside 1..={}",
        position,
        width
    );
    let shift = width - position;
    assert!(
        shift < usize::BITS as usize,
        "weight of position {} in a {}-qubit register overflows",
        position,
        width
    );
    1 << shift
}

/// Zero-based, least-significant-first indices of the qubits set in `value`.
///
/// Execution backends number wires this way, so this is the list of wires to
/// prepare in |1⟩ before running a circuit on `value`.
pub fn initial_ones(value: usize, width: usize) -> GateResult<Vec<usize>> {
    let digits = to_binary_digits(value, width)?;
    Ok(digits
        .iter()
        .rev()
        .enumerate()
        .filter(|(_, digit)| **digit == 1)
        .map(|(wire, _)| wire)
        .collect())
}
