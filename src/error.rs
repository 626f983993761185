//! Error types for gate synthesis, embedding and composition.

use thiserror::Error;

/// Errors produced while synthesizing, embedding or composing gates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GateError {
    /// The gate description is malformed (target among the controls,
    /// a zero position, a repeated control).
    #[error("invalid gate spec: {0}")]
    InvalidGateSpec(String),

    /// A value does not fit in the requested number of bits.
    #[error("value {value} does not fit in {width} bits")]
    OutOfRange {
        /// The offending value.
        value: usize,
        /// Number of bits available.
        width: usize,
    },

    /// Gates (or matrices) of different register widths were combined.
    #[error("gate {index} spans {found} qubits but the register has {expected}")]
    RegisterWidthMismatch {
        /// Position of the offending gate in the sequence.
        index: usize,
        /// Width set by the first gate.
        expected: usize,
        /// Width of the offending gate.
        found: usize,
    },

    /// Composition was requested on zero gates.
    #[error("cannot compose an empty gate sequence")]
    EmptySequence,

    /// A register is wider than the configured limit.
    #[error("register of {width} qubits exceeds the limit of {max} qubits")]
    RegisterTooWide {
        /// Requested register width.
        width: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A dense matrix is not a square 0/1 permutation matrix of power-of-two size.
    #[error("matrix is not a permutation matrix: {0}")]
    NotAPermutation(String),

    /// A digit list contains something other than 0 or 1.
    #[error("digit {digit} at index {index} is not binary")]
    InvalidDigit {
        /// Index of the digit in the list.
        index: usize,
        /// The offending digit.
        digit: u8,
    },

    /// An internal invariant was violated.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;
