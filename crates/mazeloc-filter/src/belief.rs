//! Belief vectors and their normalization.

use std::ops::Index;

use crate::matrix::{DiagonalMatrix, Matrix};

/// A row vector holding one weight per state.
///
/// After the starting distribution, weights are scaled according to the
/// filter's [`Normalization`], so they are comparable across cells but do not
/// necessarily sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefVector(Vec<f64>);

impl BeliefVector {
    /// Wraps raw state weights.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    /// Creates an all-zero vector of length `len`.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self(vec![0.0; len])
    }

    /// Returns the number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the vector has no states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the weights as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the Euclidean norm.
    ///
    /// Weights are scaled by the largest magnitude before squaring, so the
    /// norm of a nonzero vector is nonzero even when every weight is tiny.
    #[must_use]
    pub fn norm(&self) -> f64 {
        let max = self.0.iter().fold(0.0_f64, |max, w| max.max(w.abs()));
        if max == 0.0 {
            return 0.0;
        }
        max * self.0.iter().map(|w| (w / max).powi(2)).sum::<f64>().sqrt()
    }

    /// Returns the sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Returns `true` if every weight is exactly zero.
    ///
    /// A zero belief means the observations so far are impossible under the
    /// model; it is a divergence signal, not a distribution.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0.0)
    }

    /// Computes `self · m`.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() != m.rows()`.
    #[must_use]
    pub fn mul(&self, m: &Matrix) -> Self {
        Self(m.left_mul(&self.0))
    }

    /// Computes `self · d` for a diagonal matrix.
    ///
    /// # Panics
    ///
    /// Panics if `self.len() != d.size()`.
    #[must_use]
    pub fn mul_diagonal(&self, d: &DiagonalMatrix) -> Self {
        Self(d.left_mul(&self.0))
    }
}

impl Index<usize> for BeliefVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl From<Vec<f64>> for BeliefVector {
    fn from(weights: Vec<f64>) -> Self {
        Self(weights)
    }
}

/// How a belief vector is rescaled after each observation update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the Euclidean norm; see [`normalize`].
    #[default]
    Euclidean,
    /// Divide by the sum, producing a probability distribution; see [`normalize_sum`].
    Probability,
}

impl Normalization {
    /// Rescales `v` according to this policy.
    #[must_use]
    pub fn apply(self, v: &BeliefVector) -> BeliefVector {
        match self {
            Self::Euclidean => normalize(v),
            Self::Probability => normalize_sum(v),
        }
    }
}

/// Divides `v` by its Euclidean norm.
///
/// The result has unit length and generally does **not** sum to 1; relative
/// magnitudes between cells are preserved. A zero vector is returned unchanged.
/// Normalizing twice gives the same result as normalizing once.
///
/// # Examples
///
/// ```
/// use mazeloc_filter::{BeliefVector, normalize};
///
/// let v = normalize(&BeliefVector::new(vec![3.0, 0.0, 4.0]));
/// assert_eq!(v.as_slice(), &[0.6, 0.0, 0.8]);
///
/// let zero = BeliefVector::zeros(3);
/// assert_eq!(normalize(&zero), zero);
/// ```
#[must_use]
pub fn normalize(v: &BeliefVector) -> BeliefVector {
    rescale(v, v.norm())
}

/// Divides `v` by the sum of its weights.
///
/// A vector summing to zero is returned unchanged.
///
/// # Examples
///
/// ```
/// use mazeloc_filter::{BeliefVector, normalize_sum};
///
/// let v = normalize_sum(&BeliefVector::new(vec![1.0, 3.0]));
/// assert_eq!(v.as_slice(), &[0.25, 0.75]);
/// ```
#[must_use]
pub fn normalize_sum(v: &BeliefVector) -> BeliefVector {
    rescale(v, v.sum())
}

fn rescale(v: &BeliefVector, divisor: f64) -> BeliefVector {
    if v.is_zero() || divisor == 0.0 {
        return v.clone();
    }
    BeliefVector(v.0.iter().map(|w| w / divisor).collect())
}
