//! The unnormalised log-posterior and the per-level model hierarchy used
//! by the Multi-Level Delayed Acceptance sampler.

pub mod hierarchy;

pub use hierarchy::HierarchyBuilder;

use crate::likelihood::Likelihood;
use crate::parameter::ParameterVector;
use crate::statistics::Gaussian;
use std::fmt;

/// `log pi(theta) = log prior(theta) + beta * log L(theta)`.
pub struct BayesModel {
    prior: Gaussian,
    likelihood: Box<dyn Likelihood>,
    beta: f64,
}

impl BayesModel {
    pub fn new(prior: Gaussian, likelihood: Box<dyn Likelihood>, beta: f64) -> Self {
        Self {
            prior,
            likelihood,
            beta,
        }
    }

    pub fn prior(&self) -> &Gaussian {
        &self.prior
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn log_posterior(&self, theta: &ParameterVector) -> f64 {
        let log_prior = self.prior.log_density(theta);
        let log_likelihood = self.likelihood.log_likelihood(theta);
        let raw = log_prior + self.beta * log_likelihood;
        if raw.is_nan() {
            f64::NEG_INFINITY
        } else {
            raw
        }
    }
}

impl fmt::Debug for BayesModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BayesModel")
            .field("beta", &self.beta)
            .field("likelihood", &self.likelihood)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::GaussianLikelihood;
    use crate::forward_model::ForwardSolver;
    use crate::error::Error;
    use crate::likelihood::Dataset;
    use crate::statistics::{Covariance, NoiseModel};
    use nalgebra::DVector;

    struct Identity;
    impl ForwardSolver for Identity {
        fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error> {
            Ok(theta.values().clone())
        }
    }

    #[test]
    fn tempering_scales_likelihood_only() {
        let prior = Gaussian::new(
            ParameterVector::from_vec(vec![0.0]),
            Covariance::isotropic(10.0, 1).unwrap(),
        )
        .unwrap();
        let data = Dataset::new(vec![DVector::from_vec(vec![1.0])]).unwrap();
        let noise = NoiseModel::new(Covariance::isotropic(1.0, 1).unwrap());
        let likelihood = Box::new(GaussianLikelihood::new(data, Identity, noise));

        let model_full = BayesModel::new(prior.clone(), likelihood, 1.0);

        let data2 = Dataset::new(vec![DVector::from_vec(vec![1.0])]).unwrap();
        let noise2 = NoiseModel::new(Covariance::isotropic(1.0, 1).unwrap());
        let likelihood2 = Box::new(GaussianLikelihood::new(data2, Identity, noise2));
        let model_tempered = BayesModel::new(prior, likelihood2, 0.5);

        let theta = ParameterVector::from_vec(vec![0.0]);
        // Tempering shrinks the likelihood's pull, so the tempered
        // log-posterior sits strictly between the prior alone and the
        // full posterior whenever the likelihood term is nonzero there.
        assert!(model_tempered.log_posterior(&theta) > model_full.log_posterior(&theta));
    }
}
