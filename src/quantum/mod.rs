// src/quantum/mod.rs
//! Multi-controlled NOT gates as permutation matrices
//!
//! This module synthesizes gate matrices, places them in wider registers
//! and composes gate sequences into circuit matrices, using the categorical
//! structure established in the category module.

pub mod bits;
pub mod gate;
pub mod permutation;
pub mod embed;
pub mod circuit;

pub use bits::{to_binary_digits, from_binary_digits, weight_of, initial_ones, MAX_ADDRESSABLE_WIDTH};
pub use gate::{GateSpec, synthesize, subset_sums};
pub use permutation::{GateMatrix, PermutationCategory};
pub use embed::{embed, embed_within};
pub use circuit::{PlacedGate, CircuitComposer, Circuit, CircuitBuilder, compose};

/// Re-export commonly used types and functions
pub mod prelude {
    pub use super::{GateSpec, GateMatrix, PlacedGate};
    pub use super::{synthesize, embed, compose};
    pub use super::{Circuit, CircuitBuilder, CircuitComposer};
}
