//! Category theory abstractions for reversible gates
//!
//! The traits here are the seam between gate matrices and the operations
//! that combine them: sequential composition, tensor placement and inversion.

pub mod monoidal;

pub use monoidal::{Category, MonoidalCategory, DaggerCategory};

/// Module for verification of category theory laws
pub mod laws {
    pub use super::monoidal::laws::{
        verify_category_laws,
        verify_monoidal_laws,
        verify_dagger_laws
    };
}

/// Re-export commonly used types and traits
pub mod prelude {
    pub use super::{Category, MonoidalCategory, DaggerCategory};
}
