//! Dense linear algebra for the simultaneous-wins system.
//!
//! `A = P·L·U` is factored with partial pivoting (row swaps picking the
//! largest remaining magnitude in each column), then `A x = b` is solved by
//! forward substitution on `L` and back substitution on `U`.
//!
//! A pivot whose magnitude falls under `n · ε · max|A|` is treated as zero and
//! reported as [`LinalgError::Singular`] instead of being divided through.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    #[error("matrix is {rows}x{cols}, expected a square matrix")]
    NotSquare { rows: usize, cols: usize },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("matrix is singular or ill-conditioned (pivot {pivot:e} in column {column})")]
    Singular { column: usize, pivot: f64 },

    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Row-major dense matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(LinalgError::DimensionMismatch {
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    #[inline]
    pub fn add_to(&mut self, row: usize, col: usize, delta: f64) {
        self.data[row * self.cols + col] += delta;
    }

    fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Factor into `P·L·U` with partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition, LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.data.iter().any(|v| !v.is_finite()) {
            return Err(LinalgError::NonFinite("matrix"));
        }

        let n = self.rows;
        let mut lu = self.data.clone();
        let mut perm: Vec<usize> = (0..n).collect();
        let tolerance = n as f64 * f64::EPSILON * self.max_abs();

        for k in 0..n {
            let mut pivot_row = k;
            let mut pivot_abs = lu[k * n + k].abs();
            for i in (k + 1)..n {
                let v = lu[i * n + k].abs();
                if v > pivot_abs {
                    pivot_abs = v;
                    pivot_row = i;
                }
            }
            if pivot_abs <= tolerance {
                return Err(LinalgError::Singular {
                    column: k,
                    pivot: lu[pivot_row * n + k],
                });
            }
            if pivot_row != k {
                for j in 0..n {
                    lu.swap(k * n + j, pivot_row * n + j);
                }
                perm.swap(k, pivot_row);
            }

            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                if factor == 0.0 {
                    continue;
                }
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(LuDecomposition { n, lu, perm })
    }

    /// Solve `self · x = b` with a fresh factorization.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
        self.lu()?.solve(b)
    }
}

/// Packed LU factors: unit-diagonal `L` below the diagonal, `U` on and above.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    n: usize,
    lu: Vec<f64>,
    perm: Vec<usize>,
}

impl LuDecomposition {
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
        let n = self.n;
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                found: b.len(),
            });
        }

        // Forward substitution: L y = P b
        let mut x: Vec<f64> = self.perm.iter().map(|&p| b[p]).collect();
        for i in 0..n {
            let mut sum = x[i];
            for j in 0..i {
                sum -= self.lu[i * n + j] * x[j];
            }
            x[i] = sum;
        }

        // Back substitution: U x = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for j in (i + 1)..n {
                sum -= self.lu[i * n + j] * x[j];
            }
            x[i] = sum / self.lu[i * n + i];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(LinalgError::NonFinite("solution"));
        }
        Ok(x)
    }
}
