//! Covariance operators: diagonal, isotropic and dense positive-definite
//! linear operators, each exposing a Cholesky apply, an inverse apply, and
//! the induced quadratic-form norm.

use crate::error::Error;
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// A positive-definite linear operator on `R^d`, dispatched as a tagged
/// variant rather than through a trait object: the set of representations
/// is fixed and known at build time.
#[derive(Clone)]
pub enum Covariance {
    /// Independent coordinates, one marginal variance per dimension.
    Diagonal(DVector<f64>),
    /// A single variance shared by every coordinate.
    Isotropic { variance: f64, dim: usize },
    /// A general covariance, represented by its precomputed lower
    /// Cholesky factor `L` with `C = L L^T`.
    Dense { chol: DMatrix<f64>, dim: usize },
}

impl fmt::Debug for Covariance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Covariance::Diagonal(v) => write!(f, "Covariance::Diagonal(dim={})", v.len()),
            Covariance::Isotropic { dim, .. } => write!(f, "Covariance::Isotropic(dim={})", dim),
            Covariance::Dense { dim, .. } => write!(f, "Covariance::Dense(dim={})", dim),
        }
    }
}

impl Covariance {
    pub fn diagonal(marginal_variances: DVector<f64>) -> Result<Self, Error> {
        if marginal_variances.iter().any(|&v| v <= 0.0 || !v.is_finite()) {
            return Err(Error::IllConditioned);
        }
        Ok(Covariance::Diagonal(marginal_variances))
    }

    pub fn isotropic(variance: f64, dim: usize) -> Result<Self, Error> {
        if variance <= 0.0 || !variance.is_finite() {
            return Err(Error::IllConditioned);
        }
        Ok(Covariance::Isotropic { variance, dim })
    }

    /// Build a dense covariance from a full matrix, precomputing its
    /// lower Cholesky factor once.
    pub fn dense(matrix: DMatrix<f64>) -> Result<Self, Error> {
        let dim = matrix.nrows();
        if matrix.ncols() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                found: matrix.ncols(),
            });
        }
        let chol = nalgebra::Cholesky::new(matrix).ok_or(Error::IllConditioned)?;
        Ok(Covariance::Dense {
            chol: chol.l(),
            dim,
        })
    }

    pub fn dim(&self) -> usize {
        match self {
            Covariance::Diagonal(v) => v.len(),
            Covariance::Isotropic { dim, .. } => *dim,
            Covariance::Dense { dim, .. } => *dim,
        }
    }

    /// Apply the Cholesky factor: `L x`.
    pub fn chol(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            Covariance::Diagonal(v) => v.map(|vi| vi.sqrt()).component_mul(x),
            Covariance::Isotropic { variance, .. } => x * variance.sqrt(),
            Covariance::Dense { chol, .. } => chol * x,
        }
    }

    /// Apply the inverse: `C^{-1} x`.
    pub fn inv(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            Covariance::Diagonal(v) => x.component_div(v),
            Covariance::Isotropic { variance, .. } => x / *variance,
            Covariance::Dense { chol, .. } => {
                // Two triangular solves: L y = x, then L^T z = y.
                let y = chol
                    .solve_lower_triangular(x)
                    .expect("Cholesky factor is always lower-triangular and invertible");
                chol.transpose()
                    .solve_upper_triangular(&y)
                    .expect("transpose of an invertible lower-triangular matrix is invertible")
            }
        }
    }

    /// The induced norm `x^T C^{-1} x`.
    pub fn norm2(&self, x: &DVector<f64>) -> f64 {
        x.dot(&self.inv(x))
    }

    /// Materialise the covariance as a dense matrix, used when combining
    /// covariances (e.g. the Adaptive Error Model's noise correction).
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            Covariance::Diagonal(v) => DMatrix::from_diagonal(v),
            Covariance::Isotropic { variance, dim } => {
                DMatrix::identity(*dim, *dim) * *variance
            }
            Covariance::Dense { chol, .. } => chol * chol.transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn norm2_is_nonnegative_and_zero_at_origin() {
        let cov = Covariance::dense(DMatrix::from_row_slice(2, 2, &[2.4, -0.5, -0.5, 0.7]))
            .unwrap();
        let zero = DVector::zeros(2);
        assert_relative_eq!(cov.norm2(&zero), 0.0);

        let x = DVector::from_vec(vec![1.3, -0.8]);
        assert!(cov.norm2(&x) > 0.0);
    }

    #[test]
    fn chol_inv_round_trip() {
        let cov = Covariance::dense(DMatrix::from_row_slice(3, 3, &[
            4.0, 1.0, 0.0,
            1.0, 3.0, 0.5,
            0.0, 0.5, 2.0,
        ]))
        .unwrap();

        let x = DVector::from_vec(vec![1.0, -2.0, 0.5]);

        // C (C^-1 x) = x, where C is reconstructed from the Cholesky factor.
        let dense = cov.to_dense();
        let reconstructed = dense * cov.inv(&x);
        assert_relative_eq!(reconstructed, x, epsilon = 1e-8);
    }

    #[test]
    fn diagonal_matches_dense_equivalent() {
        let diag = Covariance::diagonal(DVector::from_vec(vec![2.0, 3.0])).unwrap();
        let dense = Covariance::dense(DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]))
            .unwrap();
        let x = DVector::from_vec(vec![1.0, 1.0]);
        assert_relative_eq!(diag.norm2(&x), dense.norm2(&x), epsilon = 1e-12);
    }

    #[test]
    fn ill_conditioned_rejected() {
        let not_pd = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        assert!(matches!(Covariance::dense(not_pd), Err(Error::IllConditioned)));
    }
}
