//! The plain additive-Gaussian-noise likelihood: every data row is a
//! replicate observation of the same forward-model prediction.

use crate::forward_model::{ForwardModel, ForwardSolver};
use crate::likelihood::{Dataset, Likelihood};
use crate::parameter::ParameterVector;
use crate::statistics::NoiseModel;
use std::fmt;

pub struct GaussianLikelihood<S: ForwardSolver> {
    data: Dataset,
    forward: ForwardModel<S>,
    noise: NoiseModel,
}

impl<S: ForwardSolver> GaussianLikelihood<S> {
    pub fn new(data: Dataset, solver: S, noise: NoiseModel) -> Self {
        Self {
            data,
            forward: ForwardModel::new(solver),
            noise,
        }
    }
}

impl<S: ForwardSolver> fmt::Debug for GaussianLikelihood<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaussianLikelihood")
            .field("data_size", &self.data.size())
            .finish()
    }
}

impl<S: ForwardSolver> Likelihood for GaussianLikelihood<S> {
    fn log_likelihood(&self, theta: &ParameterVector) -> f64 {
        match self.forward.evaluate(theta) {
            Ok(prediction) => {
                let residuals: Vec<_> = self
                    .data
                    .rows()
                    .iter()
                    .map(|row| row - &prediction)
                    .collect();
                self.noise.log_likelihood(&residuals)
            }
            Err(_) => f64::NEG_INFINITY,
        }
    }
}
