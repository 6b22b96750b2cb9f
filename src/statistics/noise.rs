//! Centred Gaussian noise: `log_likelihood(residuals) = -1/2 sum_i norm2(r_i)`.

use crate::statistics::covariance::Covariance;
use nalgebra::DVector;

#[derive(Clone, Debug)]
pub struct NoiseModel {
    cov: Covariance,
}

impl NoiseModel {
    pub fn new(cov: Covariance) -> Self {
        Self { cov }
    }

    pub fn covariance(&self) -> &Covariance {
        &self.cov
    }

    /// Sum of quadratic forms over an ordered sequence of residual vectors.
    pub fn log_likelihood(&self, residuals: &[DVector<f64>]) -> f64 {
        -0.5 * residuals.iter().map(|r| self.cov.norm2(r)).sum::<f64>()
    }
}
