//! Composition settings.

use serde::{Deserialize, Serialize};

/// Default upper bound on register width.
///
/// A permutation over 24 qubits is 16M indices; the dense export of the
/// same matrix would not fit in memory anyway.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// Settings for [`CircuitComposer`](crate::quantum::CircuitComposer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Widest register the composer will build.
    pub max_qubits: usize,
    /// Synthesize and embed the gates of a sequence on the rayon pool.
    pub parallel: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        ComposeConfig {
            max_qubits: DEFAULT_MAX_QUBITS,
            parallel: true,
        }
    }
}

impl ComposeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the register width limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Enable or disable parallel synthesis
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
