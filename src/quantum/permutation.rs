//! Permutation matrices over computational basis states
//!
//! Every gate this crate produces maps basis states to basis states, so its
//! matrix has exactly one 1 per row and per column. A [`GateMatrix`] stores
//! only where each column's 1 sits, which is `O(2^n)` instead of `O(4^n)`.
//! Dense views are available at the boundary through [`GateMatrix::to_dense`]
//! and [`GateMatrix::to_unitary`].

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::category::prelude::*;
use crate::error::{GateError, GateResult};

/// A square 0/1 permutation matrix of dimension `2^n`.
///
/// `image[j]` is the row holding the 1 of column `j`, i.e. the basis state
/// that input state `|j⟩` is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct GateMatrix {
    qubits: usize,
    image: Vec<usize>,
}

impl GateMatrix {
    /// The identity on `qubits` qubits.
    ///
    /// # Panics
    ///
    /// Panics if `2^qubits` does not fit in `usize`.
    pub fn identity(qubits: usize) -> Self {
        let dim = crate::quantum::bits::dimension_of(qubits)
            .unwrap_or_else(|| panic!("register of {} qubits cannot be indexed", qubits));
        GateMatrix {
            qubits,
            image: (0..dim).collect(),
        }
    }

    /// Build from an image array, checking that it is a permutation of
    /// `0..2^n` for some `n`.
    pub fn from_image(image: Vec<usize>) -> GateResult<Self> {
        let dim = image.len();
        if !dim.is_power_of_two() {
            return Err(GateError::NotAPermutation(format!(
                "dimension {} is not a power of two",
                dim
            )));
        }

        let mut seen = vec![false; dim];
        for (column, &row) in image.iter().enumerate() {
            if row >= dim {
                return Err(GateError::NotAPermutation(format!(
                    "column {} maps to row {} outside dimension {}",
                    column, row, dim
                )));
            }
            if seen[row] {
                return Err(GateError::NotAPermutation(format!(
                    "row {} holds more than one 1",
                    row
                )));
            }
            seen[row] = true;
        }

        Ok(GateMatrix {
            qubits: dim.trailing_zeros() as usize,
            image,
        })
    }

    /// The identity with every listed pair of basis states exchanged.
    ///
    /// Pairs must be disjoint; an index outside the matrix is an internal
    /// error because callers derive pairs from validated positions.
    pub(crate) fn from_swaps(qubits: usize, pairs: &[(usize, usize)]) -> GateResult<Self> {
        let mut matrix = GateMatrix::identity(qubits);
        let dim = matrix.dimension();
        for &(i, j) in pairs {
            if i >= dim || j >= dim {
                return Err(GateError::Internal(format!(
                    "swap ({}, {}) outside a {}-dimensional matrix",
                    i, j, dim
                )));
            }
            matrix.image.swap(i, j);
        }
        Ok(matrix)
    }

    /// Number of qubits the matrix acts on
    pub fn qubit_count(&self) -> usize {
        self.qubits
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.image.len()
    }

    /// The column-to-row map
    pub fn image(&self) -> &[usize] {
        &self.image
    }

    /// The basis state that `|index⟩` is sent to.
    pub fn apply(&self, index: usize) -> GateResult<usize> {
        self.image.get(index).copied().ok_or(GateError::OutOfRange {
            value: index,
            width: self.qubits,
        })
    }

    /// The product `next × self`: apply `self` first, then `next`.
    pub fn then(&self, next: &GateMatrix) -> GateResult<GateMatrix> {
        if self.qubits != next.qubits {
            return Err(GateError::RegisterWidthMismatch {
                index: 1,
                expected: self.qubits,
                found: next.qubits,
            });
        }
        Ok(GateMatrix {
            qubits: self.qubits,
            image: self.image.iter().map(|&row| next.image[row]).collect(),
        })
    }

    /// The inverse, which for a permutation matrix is its transpose
    pub fn inverse(&self) -> GateMatrix {
        let mut image = vec![0; self.image.len()];
        for (column, &row) in self.image.iter().enumerate() {
            image[row] = column;
        }
        GateMatrix {
            qubits: self.qubits,
            image,
        }
    }

    /// Kronecker product `self ⊗ other`; `self` acts on the leading wires.
    ///
    /// # Panics
    ///
    /// Panics if the combined dimension does not fit in `usize`.
    pub fn kron(&self, other: &GateMatrix) -> GateMatrix {
        let inner = other.dimension();
        let dim = self
            .dimension()
            .checked_mul(inner)
            .unwrap_or_else(|| panic!("tensor product of {} and {} qubits cannot be indexed", self.qubits, other.qubits));

        let mut image = Vec::with_capacity(dim);
        for &outer_row in &self.image {
            image.extend(other.image.iter().map(|&inner_row| outer_row * inner + inner_row));
        }
        GateMatrix {
            qubits: self.qubits + other.qubits,
            image,
        }
    }

    /// True if the matrix equals its transpose
    pub fn is_symmetric(&self) -> bool {
        self.inverse() == *self
    }

    /// True if applying the matrix twice gives the identity
    pub fn is_involution(&self) -> bool {
        self.image.iter().enumerate().all(|(column, &row)| self.image[row] == column)
    }

    /// True if every basis state is fixed
    pub fn is_identity(&self) -> bool {
        self.image.iter().enumerate().all(|(column, &row)| row == column)
    }

    /// The pairs of basis states exchanged by an involution, smaller index first.
    ///
    /// Longer cycles are not reported; use [`is_involution`](Self::is_involution)
    /// first when that matters.
    pub fn swapped_pairs(&self) -> Vec<(usize, usize)> {
        self.image
            .iter()
            .enumerate()
            .filter(|&(column, &row)| column < row && self.image[row] == column)
            .map(|(column, &row)| (column, row))
            .collect()
    }

    /// Dense 0/1 matrix with `m[[row, column]] = 1`
    pub fn to_dense(&self) -> Array2<u8> {
        let dim = self.dimension();
        let mut matrix = Array2::zeros((dim, dim));
        for (column, &row) in self.image.iter().enumerate() {
            matrix[[row, column]] = 1;
        }
        matrix
    }

    /// Dense complex matrix, for consumers that work with general unitaries
    pub fn to_unitary(&self) -> Array2<Complex64> {
        let dim = self.dimension();
        let mut matrix = Array2::zeros((dim, dim));
        for (column, &row) in self.image.iter().enumerate() {
            matrix[[row, column]] = Complex64::new(1.0, 0.0);
        }
        matrix
    }

    /// Import a dense 0/1 matrix, checking the permutation invariant.
    pub fn from_dense(matrix: &Array2<u8>) -> GateResult<Self> {
        let (rows, columns) = matrix.dim();
        if rows != columns {
            return Err(GateError::NotAPermutation(format!(
                "matrix is {}x{}, not square",
                rows, columns
            )));
        }

        let mut image = Vec::with_capacity(columns);
        for (column, lane) in matrix.columns().into_iter().enumerate() {
            let mut found = None;
            for (row, &value) in lane.iter().enumerate() {
                match value {
                    0 => {}
                    1 if found.is_none() => found = Some(row),
                    1 => {
                        return Err(GateError::NotAPermutation(format!(
                            "column {} holds more than one 1",
                            column
                        )))
                    }
                    other => {
                        return Err(GateError::NotAPermutation(format!(
                            "entry ({}, {}) is {}",
                            row, column, other
                        )))
                    }
                }
            }
            let row = found.ok_or_else(|| {
                GateError::NotAPermutation(format!("column {} has no 1", column))
            })?;
            image.push(row);
        }

        GateMatrix::from_image(image)
    }
}

impl TryFrom<Vec<usize>> for GateMatrix {
    type Error = GateError;

    fn try_from(image: Vec<usize>) -> GateResult<Self> {
        GateMatrix::from_image(image)
    }
}

impl From<GateMatrix> for Vec<usize> {
    fn from(matrix: GateMatrix) -> Self {
        matrix.image
    }
}

impl fmt::Display for GateMatrix {
    /// Rows of space-separated 0/1 entries
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dense = self.to_dense();
        for row in dense.rows() {
            let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// The category of permutation matrices
///
/// Objects are qubit counts, morphisms are [`GateMatrix`] values.
/// Composition is matrix multiplication, the tensor product is the
/// Kronecker product and the dagger is the transpose.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermutationCategory;

impl Category for PermutationCategory {
    type Object = usize;
    type Morphism = GateMatrix;

    fn domain(&self, f: &Self::Morphism) -> Self::Object {
        f.qubit_count()
    }

    fn codomain(&self, f: &Self::Morphism) -> Self::Object {
        f.qubit_count()
    }

    fn identity(&self, obj: &Self::Object) -> Self::Morphism {
        GateMatrix::identity(*obj)
    }

    fn compose(&self, f: &Self::Morphism, g: &Self::Morphism) -> Option<Self::Morphism> {
        // g after f (first apply f, then g)
        f.then(g).ok()
    }
}

impl MonoidalCategory for PermutationCategory {
    fn unit(&self) -> Self::Object {
        0
    }

    fn tensor_objects(&self, a: &Self::Object, b: &Self::Object) -> Self::Object {
        a + b
    }

    fn tensor_morphisms(&self, f: &Self::Morphism, g: &Self::Morphism) -> Self::Morphism {
        f.kron(g)
    }

    fn left_unitor(&self, a: &Self::Object) -> Self::Morphism {
        GateMatrix::identity(*a)
    }

    fn right_unitor(&self, a: &Self::Object) -> Self::Morphism {
        GateMatrix::identity(*a)
    }

    // Basis indices concatenate MSB-first, so regrouping wires moves nothing.
    fn associator(&self, a: &Self::Object, b: &Self::Object, c: &Self::Object) -> Self::Morphism {
        GateMatrix::identity(a + b + c)
    }
}

impl DaggerCategory for PermutationCategory {
    fn dagger(&self, f: &Self::Morphism) -> Self::Morphism {
        f.inverse()
    }
}

/// Dense reference operations, used to check the permutation representation
pub mod dense {
    use ndarray::Array2;

    /// Dense identity of the given dimension
    pub fn identity(dim: usize) -> Array2<u8> {
        Array2::eye(dim)
    }

    /// Kronecker product of two dense matrices
    pub fn kron(matrix1: &Array2<u8>, matrix2: &Array2<u8>) -> Array2<u8> {
        let (n1, m1) = matrix1.dim();
        let (n2, m2) = matrix2.dim();

        let mut result = Array2::zeros((n1 * n2, m1 * m2));
        for i in 0..n1 {
            for j in 0..m1 {
                for k in 0..n2 {
                    for l in 0..m2 {
                        result[[i * n2 + k, j * m2 + l]] = matrix1[[i, j]] * matrix2[[k, l]];
                    }
                }
            }
        }
        result
    }

    /// Matrix product `left × right`
    pub fn matmul(left: &Array2<u8>, right: &Array2<u8>) -> Array2<u8> {
        left.dot(right)
    }
}
