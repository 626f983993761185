//! Classical basis-state simulator
//!
//! Every gate here sends basis states to basis states, so a register that
//! starts in a basis state stays in one. The simulator tracks that single
//! index instead of a vector of amplitudes, which makes it a cheap reference
//! for checking composed circuit matrices gate by gate.
use std::fmt;

use crate::error::{GateError, GateResult};
use crate::quantum::bits::{dimension_of, to_binary_digits, weight_of};
use crate::quantum::circuit::PlacedGate;
use crate::quantum::gate::MAX_POSITION;
use crate::quantum::permutation::GateMatrix;

/// A measurement outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Measurement yielded 0
    Zero,
    /// Measurement yielded 1
    One,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Zero => write!(f, "0"),
            Outcome::One => write!(f, "1"),
        }
    }
}

/// The basis state a matrix sends `|input⟩` to.
pub fn apply_to_basis_state(matrix: &GateMatrix, input: usize) -> GateResult<usize> {
    matrix.apply(input)
}

/// A simulator holding one computational basis state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisStateSimulator {
    qubits: usize,
    state: usize,
}

impl BasisStateSimulator {
    /// Create a simulator in |0...0⟩ on `qubits` qubits
    pub fn new(qubits: usize) -> GateResult<Self> {
        BasisStateSimulator::from_state(qubits, 0)
    }

    /// Create a simulator in the basis state `state`
    pub fn from_state(qubits: usize, state: usize) -> GateResult<Self> {
        let dim = dimension_of(qubits).ok_or(GateError::RegisterTooWide {
            width: qubits,
            max: MAX_POSITION,
        })?;
        if state >= dim {
            return Err(GateError::OutOfRange {
                value: state,
                width: qubits,
            });
        }
        Ok(BasisStateSimulator { qubits, state })
    }

    /// Create a simulator with the listed wires in |1⟩.
    ///
    /// Wires are numbered from 0 at the least significant qubit, the way
    /// [`initial_ones`](crate::quantum::bits::initial_ones) reports them.
    pub fn from_initial_ones(qubits: usize, wires: &[usize]) -> GateResult<Self> {
        let mut simulator = BasisStateSimulator::new(qubits)?;
        for &wire in wires {
            if wire >= qubits {
                return Err(GateError::OutOfRange {
                    value: wire,
                    width: qubits,
                });
            }
            simulator.state |= 1 << wire;
        }
        Ok(simulator)
    }

    /// Number of qubits
    pub fn qubit_count(&self) -> usize {
        self.qubits
    }

    /// Current basis index
    pub fn state(&self) -> usize {
        self.state
    }

    /// Current qubit values, position 1 first
    pub fn bits(&self) -> Vec<u8> {
        // state < 2^qubits is kept by every mutation
        to_binary_digits(self.state, self.qubits).unwrap_or_default()
    }

    /// Reset the simulator to |0...0⟩
    pub fn reset(&mut self) {
        self.state = 0;
    }

    /// Apply one placed gate by testing its controls and flipping its target
    pub fn apply_gate(&mut self, gate: &PlacedGate) -> GateResult<()> {
        if gate.total_width() != self.qubits {
            return Err(GateError::RegisterWidthMismatch {
                index: 0,
                expected: self.qubits,
                found: gate.total_width(),
            });
        }

        let triggered = gate
            .global_controls()
            .iter()
            .all(|&control| self.state & weight_of(control, self.qubits) != 0);
        if triggered {
            self.state ^= weight_of(gate.global_target(), self.qubits);
        }
        Ok(())
    }

    /// Apply a gate sequence in order
    pub fn run(&mut self, gates: &[PlacedGate]) -> GateResult<()> {
        for (index, gate) in gates.iter().enumerate() {
            self.apply_gate(gate).map_err(|err| match err {
                GateError::RegisterWidthMismatch { expected, found, .. } => {
                    GateError::RegisterWidthMismatch { index, expected, found }
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Apply a full-register matrix
    pub fn run_matrix(&mut self, matrix: &GateMatrix) -> GateResult<()> {
        if matrix.qubit_count() != self.qubits {
            return Err(GateError::RegisterWidthMismatch {
                index: 0,
                expected: self.qubits,
                found: matrix.qubit_count(),
            });
        }
        self.state = apply_to_basis_state(matrix, self.state)?;
        Ok(())
    }

    /// Read the listed 1-based positions
    pub fn measure(&self, positions: &[usize]) -> GateResult<Vec<Outcome>> {
        positions
            .iter()
            .map(|&position| {
                if position == 0 || position > self.qubits {
                    return Err(GateError::OutOfRange {
                        value: position,
                        width: self.qubits,
                    });
                }
                Ok(if self.state & weight_of(position, self.qubits) != 0 {
                    Outcome::One
                } else {
                    Outcome::Zero
                })
            })
            .collect()
    }
}
