//! Circuit simulators
//!
//! Classical simulation of reversible circuits on computational basis states.

pub mod basis;

pub use basis::{
    apply_to_basis_state,
    BasisStateSimulator,
    Outcome,
};
