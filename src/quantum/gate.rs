//! Multi-controlled NOT gates
//!
//! A [`GateSpec`] names a set of control positions and one target position,
//! all 1-based and most-significant first within the smallest register that
//! contains them. Its matrix flips the target bit of every basis state whose
//! control bits are all 1 and fixes every other basis state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bits::{check_register_width, weight_of};
use super::permutation::GateMatrix;
use crate::config::DEFAULT_MAX_QUBITS;
use crate::error::{GateError, GateResult};

/// Highest position a gate description may reference.
///
/// Every weight `2^(w - p)` of such a gate fits in `usize`. Building its
/// matrix is limited separately, see [`GateSpec::matrix_within`].
pub const MAX_POSITION: usize = usize::BITS as usize - 1;

/// A generalized controlled-NOT: NOT, CNOT, Toffoli and beyond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GateSpecRepr")]
pub struct GateSpec {
    controls: Vec<usize>,
    target: usize,
}

#[derive(Deserialize)]
struct GateSpecRepr {
    #[serde(default)]
    controls: Vec<usize>,
    target: usize,
}

impl TryFrom<GateSpecRepr> for GateSpec {
    type Error = GateError;

    fn try_from(repr: GateSpecRepr) -> GateResult<Self> {
        GateSpec::new(repr.controls, repr.target)
    }
}

impl GateSpec {
    /// Create a gate, checking that positions are positive and distinct and
    /// that the target is not a control.
    pub fn new(controls: impl IntoIterator<Item = usize>, target: usize) -> GateResult<Self> {
        let mut controls: Vec<usize> = controls.into_iter().collect();
        controls.sort_unstable();

        if target == 0 || controls.first() == Some(&0) {
            return Err(GateError::InvalidGateSpec(
                "qubit positions start at 1".to_string(),
            ));
        }
        if controls.binary_search(&target).is_ok() {
            return Err(GateError::InvalidGateSpec(format!(
                "target {} is also a control",
                target
            )));
        }
        if let Some(pair) = controls.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(GateError::InvalidGateSpec(format!(
                "control {} is listed twice",
                pair[0]
            )));
        }

        let width = controls.last().map_or(target, |&last| last.max(target));
        if width > MAX_POSITION {
            return Err(GateError::RegisterTooWide {
                width,
                max: MAX_POSITION,
            });
        }

        Ok(GateSpec { controls, target })
    }

    /// Uncontrolled NOT on `target`
    pub fn not(target: usize) -> GateResult<Self> {
        GateSpec::new(std::iter::empty(), target)
    }

    /// Single-control NOT
    pub fn cnot(control: usize, target: usize) -> GateResult<Self> {
        GateSpec::new([control], target)
    }

    /// Double-control NOT
    pub fn toffoli(control1: usize, control2: usize, target: usize) -> GateResult<Self> {
        GateSpec::new([control1, control2], target)
    }

    /// Control positions in ascending order
    pub fn controls(&self) -> &[usize] {
        &self.controls
    }

    /// Target position
    pub fn target(&self) -> usize {
        self.target
    }

    /// Width of the smallest register holding every referenced position
    pub fn local_width(&self) -> usize {
        self.controls.last().map_or(self.target, |&last| last.max(self.target))
    }

    /// Positions inside the local width that are neither control nor target
    pub fn free_positions(&self) -> Vec<usize> {
        (1..=self.local_width())
            .filter(|p| *p != self.target && self.controls.binary_search(p).is_err())
            .collect()
    }

    /// The pairs of basis indices the gate exchanges, in subset-sum order.
    ///
    /// Each pair is (all controls 1, target 0) and the same state with the
    /// target set, for every assignment of the free positions.
    pub fn swap_pairs(&self) -> Vec<(usize, usize)> {
        let width = self.local_width();
        let control_offset: usize = self.controls.iter().map(|&c| weight_of(c, width)).sum();
        let target_weight = weight_of(self.target, width);

        let free_weights: Vec<usize> = self
            .free_positions()
            .into_iter()
            .map(|p| weight_of(p, width))
            .collect();

        subset_sums(&free_weights)
            .into_iter()
            .map(|sum| {
                let low = control_offset + sum;
                (low, low + target_weight)
            })
            .collect()
    }

    /// The `2^w × 2^w` matrix of the gate on its local register, for local
    /// widths up to [`DEFAULT_MAX_QUBITS`]
    pub fn matrix(&self) -> GateResult<GateMatrix> {
        self.matrix_within(DEFAULT_MAX_QUBITS)
    }

    /// The gate's matrix, or `RegisterTooWide` if its local width exceeds
    /// `max_qubits` or cannot be allocated.
    pub fn matrix_within(&self, max_qubits: usize) -> GateResult<GateMatrix> {
        check_register_width(self.local_width(), max_qubits)?;
        let pairs = self.swap_pairs();
        debug!(
            controls = ?self.controls,
            target = self.target,
            width = self.local_width(),
            pairs = pairs.len(),
            "synthesizing gate"
        );
        GateMatrix::from_swaps(self.local_width(), &pairs)
    }
}

/// Every sum of a subset of `weights`, the empty subset included.
///
/// Built by doubling: start from `{0}` and for each weight append the
/// current sums shifted by it. With distinct powers of two the result has
/// exactly `2^len` distinct entries.
pub fn subset_sums(weights: &[usize]) -> Vec<usize> {
    let mut sums = vec![0];
    for &weight in weights {
        let shifted: Vec<usize> = sums.iter().map(|s| s + weight).collect();
        sums.extend(shifted);
    }
    sums
}

/// Synthesize the matrix of the NOT on `target` controlled by `controls`.
///
/// Registers wider than [`DEFAULT_MAX_QUBITS`] are rejected.
pub fn synthesize(controls: &[usize], target: usize) -> GateResult<GateMatrix> {
    GateSpec::new(controls.iter().copied(), target)?.matrix()
}
