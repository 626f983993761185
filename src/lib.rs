//! Multi-controlled NOT gate synthesis
//!
//! This crate builds the matrices of generalized controlled-NOT gates
//! (NOT, CNOT, Toffoli and gates with more controls), places them inside
//! larger registers by tensoring with identities, and composes gate
//! sequences into one circuit matrix. All of these matrices permute
//! computational basis states, which is how they are stored.
//!
//! ```rust
//! use toffoli::quantum::{compose, GateSpec, PlacedGate};
//! use toffoli::simulators::apply_to_basis_state;
//!
//! // CNOT from wire 1 to wire 2, then a Toffoli onto wire 3
//! let gates = vec![
//!     PlacedGate::new(0, GateSpec::cnot(1, 2).unwrap(), 1),
//!     PlacedGate::new(0, GateSpec::toffoli(1, 2, 3).unwrap(), 0),
//! ];
//! let circuit = compose(&gates).unwrap();
//! assert_eq!(apply_to_basis_state(&circuit, 0b100).unwrap(), 0b111);
//! ```

pub mod error;
pub mod config;
pub mod category;
pub mod quantum;
pub mod simulators;
pub mod adder;

pub use error::{GateError, GateResult};
pub use config::ComposeConfig;

/// Gate types, composition functions and the category traits in one import
pub mod prelude {
    pub use crate::category::prelude::*;
    pub use crate::quantum::prelude::*;
    pub use crate::{ComposeConfig, GateError, GateResult};
}

/// Crate version, from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name, from Cargo metadata
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
