//! Dense and diagonal matrices for the forward recursion.
//!
//! Belief vectors are row vectors and are multiplied from the left, so the
//! only product these types need is `v · M`.

use std::ops::{Index, IndexMut};

/// A dense row-major matrix of `f64`.
///
/// # Examples
///
/// ```
/// use mazeloc_filter::matrix::Matrix;
///
/// let mut m = Matrix::zeros(2, 3);
/// m[(0, 2)] = 1.5;
/// assert_eq!(m.row(0), &[0.0, 0.0, 1.5]);
///
/// let t = m.transpose();
/// assert_eq!((t.rows(), t.cols()), (3, 2));
/// assert_eq!(t[(2, 0)], 1.5);
///
/// assert_eq!(m.left_mul(&[2.0, 1.0]), vec![0.0, 0.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a `rows × cols` matrix filled with zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns row `r` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `r >= self.rows()`.
    #[must_use]
    pub fn row(&self, r: usize) -> &[f64] {
        assert!(r < self.rows, "row {r} out of range for {} rows", self.rows);
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns the transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }

    /// Computes the row-vector product `v · self`.
    ///
    /// Zero entries of `v` are skipped, which keeps the product cheap for
    /// belief vectors whose wall states carry no mass.
    ///
    /// # Panics
    ///
    /// Panics if `v.len() != self.rows()`.
    #[must_use]
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            v.len(),
            self.rows,
            "vector length does not match matrix rows"
        );
        let mut out = vec![0.0; self.cols];
        for (r, &weight) in v.iter().enumerate() {
            if weight == 0.0 {
                continue;
            }
            for (acc, &m) in out.iter_mut().zip(self.row(r)) {
                *acc += weight * m;
            }
        }
        out
    }

    fn offset(&self, (r, c): (usize, usize)) -> usize {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of range for {}x{} matrix",
            self.rows,
            self.cols
        );
        r * self.cols + c
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[self.offset(index)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}

/// A square diagonal matrix, storing only its diagonal.
///
/// # Examples
///
/// ```
/// use mazeloc_filter::matrix::DiagonalMatrix;
///
/// let d = DiagonalMatrix::new(vec![0.5, 0.0, 2.0]);
/// assert_eq!(d.size(), 3);
/// assert_eq!(d.left_mul(&[1.0, 1.0, 1.0]), vec![0.5, 0.0, 2.0]);
/// assert_eq!(d.to_dense()[(2, 2)], 2.0);
/// assert_eq!(d.to_dense()[(0, 2)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalMatrix {
    diagonal: Vec<f64>,
}

impl DiagonalMatrix {
    /// Creates a diagonal matrix from its diagonal entries.
    #[must_use]
    pub fn new(diagonal: Vec<f64>) -> Self {
        Self { diagonal }
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.diagonal.len()
    }

    /// Returns the diagonal entries.
    #[must_use]
    #[inline]
    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    /// Computes the row-vector product `v · self`, an element-wise scaling.
    ///
    /// # Panics
    ///
    /// Panics if `v.len() != self.size()`.
    #[must_use]
    pub fn left_mul(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            v.len(),
            self.size(),
            "vector length does not match matrix size"
        );
        v.iter().zip(&self.diagonal).map(|(a, b)| a * b).collect()
    }

    /// Expands into a dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> Matrix {
        let mut dense = Matrix::zeros(self.size(), self.size());
        for (i, &d) in self.diagonal.iter().enumerate() {
            dense[(i, i)] = d;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_mul_matches_definition() {
        // [1 2] · [[1 2 3], [4 5 6]] = [9 12 15]
        let mut m = Matrix::zeros(2, 3);
        for (i, v) in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0].into_iter().enumerate() {
            m[(i / 3, i % 3)] = v;
        }
        assert_eq!(m.left_mul(&[1.0, 2.0]), vec![9.0, 12.0, 15.0]);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let mut m = Matrix::zeros(3, 2);
        m[(0, 1)] = 1.0;
        m[(2, 0)] = -4.0;
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_diagonal_matches_dense_product() {
        let d = DiagonalMatrix::new(vec![0.25, 4.0]);
        let v = [2.0, 0.5];
        assert_eq!(d.left_mul(&v), d.to_dense().left_mul(&v));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let m = Matrix::zeros(2, 2);
        let _ = m[(2, 0)];
    }

    #[test]
    #[should_panic(expected = "vector length does not match matrix rows")]
    fn test_left_mul_dimension_mismatch_panics() {
        let _ = Matrix::zeros(2, 2).left_mul(&[1.0]);
    }
}
