//! Placed gates and whole-circuit composition
//!
//! A circuit is an ordered list of [`PlacedGate`]s, the first entry acting
//! first on the register. Composition multiplies the embedded gate matrices
//! with later gates on the left, so the product applied to a basis state
//! reproduces running the gates in list order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bits::{check_register_width, sum_widths, MAX_ADDRESSABLE_WIDTH};
use super::embed::embed_within;
use super::gate::GateSpec;
use super::permutation::GateMatrix;
use crate::config::{ComposeConfig, DEFAULT_MAX_QUBITS};
use crate::error::{GateError, GateResult};

/// A gate together with the untouched wires above and below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlacedGateRepr")]
pub struct PlacedGate {
    leading: usize,
    gate: GateSpec,
    trailing: usize,
}

#[derive(Deserialize)]
struct PlacedGateRepr {
    leading: usize,
    gate: GateSpec,
    trailing: usize,
}

// Deserialized placements must describe a register that could be built.
impl TryFrom<PlacedGateRepr> for PlacedGate {
    type Error = GateError;

    fn try_from(repr: PlacedGateRepr) -> GateResult<Self> {
        let width = sum_widths(&[repr.leading, repr.gate.local_width(), repr.trailing])?;
        check_register_width(width, MAX_ADDRESSABLE_WIDTH)?;
        Ok(PlacedGate::new(repr.leading, repr.gate, repr.trailing))
    }
}

impl PlacedGate {
    /// Place `gate` after `leading` identity wires and before `trailing` ones
    pub fn new(leading: usize, gate: GateSpec, trailing: usize) -> Self {
        PlacedGate {
            leading,
            gate,
            trailing,
        }
    }

    /// Number of identity wires before the gate
    pub fn leading(&self) -> usize {
        self.leading
    }

    /// The gate, in its local positions
    pub fn gate(&self) -> &GateSpec {
        &self.gate
    }

    /// Number of identity wires after the gate
    pub fn trailing(&self) -> usize {
        self.trailing
    }

    /// Width of the register the gate is placed in.
    ///
    /// Saturates at `usize::MAX`, which every width check rejects.
    pub fn total_width(&self) -> usize {
        self.leading
            .saturating_add(self.gate.local_width())
            .saturating_add(self.trailing)
    }

    /// Control positions in the full register
    pub fn global_controls(&self) -> Vec<usize> {
        self.gate
            .controls()
            .iter()
            .map(|c| c.saturating_add(self.leading))
            .collect()
    }

    /// Target position in the full register
    pub fn global_target(&self) -> usize {
        self.gate.target().saturating_add(self.leading)
    }

    /// The gate's matrix on the full register, for registers up to
    /// [`DEFAULT_MAX_QUBITS`] wide
    pub fn matrix(&self) -> GateResult<GateMatrix> {
        self.matrix_within(DEFAULT_MAX_QUBITS)
    }

    /// The gate's matrix on the full register, or `RegisterTooWide` past
    /// `max_qubits`
    pub fn matrix_within(&self, max_qubits: usize) -> GateResult<GateMatrix> {
        let width = sum_widths(&[self.leading, self.gate.local_width(), self.trailing])?;
        check_register_width(width, max_qubits)?;
        embed_within(
            &self.gate.matrix_within(max_qubits)?,
            self.leading,
            self.trailing,
            max_qubits,
        )
    }
}

/// Folds placed gates into a single circuit matrix.
#[derive(Debug, Clone, Default)]
pub struct CircuitComposer {
    config: ComposeConfig,
}

impl CircuitComposer {
    /// Create a composer with the given settings
    pub fn new(config: ComposeConfig) -> Self {
        CircuitComposer { config }
    }

    /// The composer's settings
    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// The common register width of a non-empty gate sequence
    pub fn register_width(&self, gates: &[PlacedGate]) -> GateResult<usize> {
        let expected = gates.first().ok_or(GateError::EmptySequence)?.total_width();
        for (index, gate) in gates.iter().enumerate() {
            let found = gate.total_width();
            if found != expected {
                return Err(GateError::RegisterWidthMismatch {
                    index,
                    expected,
                    found,
                });
            }
        }
        self.check_width(expected)?;
        Ok(expected)
    }

    /// One full-register matrix per gate, in sequence order
    pub fn factors(&self, gates: &[PlacedGate]) -> GateResult<Vec<GateMatrix>> {
        self.register_width(gates)?;
        let max_qubits = self.config.max_qubits;
        self.map_gates(gates, move |placed| placed.matrix_within(max_qubits))
    }

    /// The circuit matrix `gk × … × g2 × g1` for gates `[g1, g2, …, gk]`
    pub fn compose(&self, gates: &[PlacedGate]) -> GateResult<GateMatrix> {
        let width = self.register_width(gates)?;
        debug!(
            gates = gates.len(),
            width,
            parallel = self.config.parallel,
            "composing circuit"
        );
        let max_qubits = self.config.max_qubits;
        let factors = self.map_gates(gates, move |placed| placed.matrix_within(max_qubits))?;
        fold(&factors)
    }

    pub(crate) fn check_width(&self, width: usize) -> GateResult<()> {
        check_register_width(width, self.config.max_qubits)
    }

    // Synthesis of distinct gates is independent; collect keeps list order.
    pub(crate) fn map_gates<T, F>(&self, gates: &[PlacedGate], f: F) -> GateResult<Vec<T>>
    where
        T: Send,
        F: Fn(&PlacedGate) -> GateResult<T> + Send + Sync,
    {
        if self.config.parallel {
            gates.par_iter().map(f).collect()
        } else {
            gates.iter().map(f).collect()
        }
    }
}

/// Multiply factors so that the first one is applied first.
fn fold(factors: &[GateMatrix]) -> GateResult<GateMatrix> {
    let (first, rest) = factors.split_first().ok_or(GateError::EmptySequence)?;
    rest.iter().enumerate().try_fold(first.clone(), |product, (offset, factor)| {
        product.then(factor).map_err(|_| GateError::RegisterWidthMismatch {
            index: offset + 1,
            expected: product.qubit_count(),
            found: factor.qubit_count(),
        })
    })
}

/// Compose a gate sequence with the default settings.
pub fn compose(gates: &[PlacedGate]) -> GateResult<GateMatrix> {
    CircuitComposer::default().compose(gates)
}

/// A gate sequence on a register of known width, with every intermediate
/// matrix kept for inspection.
#[derive(Debug, Clone)]
pub struct Circuit {
    qubits: usize,
    gates: Vec<PlacedGate>,
    gate_matrices: Vec<GateMatrix>,
    step_matrices: Vec<GateMatrix>,
    matrix: GateMatrix,
}

impl Circuit {
    /// Build and compose a circuit with the default settings
    pub fn new(qubits: usize, gates: Vec<PlacedGate>) -> GateResult<Self> {
        Circuit::with_config(qubits, gates, ComposeConfig::default())
    }

    /// Build and compose a circuit.
    ///
    /// Unlike [`compose`], an empty gate list is allowed here: the register
    /// width is known, so the result is the identity.
    pub fn with_config(qubits: usize, gates: Vec<PlacedGate>, config: ComposeConfig) -> GateResult<Self> {
        let composer = CircuitComposer::new(config);
        composer.check_width(qubits)?;
        for (index, gate) in gates.iter().enumerate() {
            if gate.total_width() != qubits {
                return Err(GateError::RegisterWidthMismatch {
                    index,
                    expected: qubits,
                    found: gate.total_width(),
                });
            }
        }

        let max_qubits = composer.config().max_qubits;
        let (gate_matrices, step_matrices): (Vec<_>, Vec<_>) = composer
            .map_gates(&gates, move |placed| {
                let local = placed.gate().matrix_within(max_qubits)?;
                let step = embed_within(&local, placed.leading(), placed.trailing(), max_qubits)?;
                Ok((local, step))
            })?
            .into_iter()
            .unzip();

        let matrix = if step_matrices.is_empty() {
            GateMatrix::identity(qubits)
        } else {
            fold(&step_matrices)?
        };
        debug!(qubits, gates = gates.len(), "built circuit");

        Ok(Circuit {
            qubits,
            gates,
            gate_matrices,
            step_matrices,
            matrix,
        })
    }

    /// Register width
    pub fn qubit_count(&self) -> usize {
        self.qubits
    }

    /// The gates, in application order
    pub fn gates(&self) -> &[PlacedGate] {
        &self.gates
    }

    /// Each gate's matrix on its local register
    pub fn gate_matrices(&self) -> &[GateMatrix] {
        &self.gate_matrices
    }

    /// Each gate's matrix on the full register
    pub fn step_matrices(&self) -> &[GateMatrix] {
        &self.step_matrices
    }

    /// The composed circuit matrix
    pub fn matrix(&self) -> &GateMatrix {
        &self.matrix
    }

    /// The basis state the circuit sends `|index⟩` to
    pub fn apply(&self, index: usize) -> GateResult<usize> {
        self.matrix.apply(index)
    }
}

/// Builds a gate sequence from positions in the full register.
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    qubits: usize,
    gates: Vec<PlacedGate>,
}

impl CircuitBuilder {
    /// Start a circuit on `qubits` wires
    pub fn new(qubits: usize) -> Self {
        CircuitBuilder {
            qubits,
            gates: Vec::new(),
        }
    }

    /// Add a controlled NOT given register positions (1-based, MSB first).
    ///
    /// The gate is placed in the narrowest window covering its positions.
    pub fn mcx(&mut self, controls: &[usize], target: usize) -> GateResult<()> {
        let lowest = controls.iter().copied().chain(Some(target)).min().unwrap_or(target);
        let highest = controls.iter().copied().chain(Some(target)).max().unwrap_or(target);
        if lowest == 0 {
            return Err(GateError::InvalidGateSpec(
                "qubit positions start at 1".to_string(),
            ));
        }
        if highest > self.qubits {
            return Err(GateError::OutOfRange {
                value: highest,
                width: self.qubits,
            });
        }

        let leading = lowest - 1;
        let gate = GateSpec::new(controls.iter().map(|c| c - leading), target - leading)?;
        self.gates.push(PlacedGate::new(leading, gate, self.qubits - highest));
        Ok(())
    }

    /// Add an uncontrolled NOT
    pub fn x(&mut self, target: usize) -> GateResult<()> {
        self.mcx(&[], target)
    }

    /// Add a single-control NOT
    pub fn cnot(&mut self, control: usize, target: usize) -> GateResult<()> {
        self.mcx(&[control], target)
    }

    /// Add a double-control NOT
    pub fn toffoli(&mut self, control1: usize, control2: usize, target: usize) -> GateResult<()> {
        self.mcx(&[control1, control2], target)
    }

    /// Add an already placed gate
    pub fn push(&mut self, gate: PlacedGate) -> GateResult<()> {
        if gate.total_width() != self.qubits {
            return Err(GateError::RegisterWidthMismatch {
                index: self.gates.len(),
                expected: self.qubits,
                found: gate.total_width(),
            });
        }
        self.gates.push(gate);
        Ok(())
    }

    /// The gate sequence built so far
    pub fn gates(&self) -> &[PlacedGate] {
        &self.gates
    }

    /// Finish and return the gate sequence
    pub fn build(self) -> Vec<PlacedGate> {
        self.gates
    }
}
