//! A level hierarchy for shared vs. per-level model components, and the
//! builder that assembles a validated tempering ladder of [`BayesModel`]s.

use crate::bayes::BayesModel;
use crate::error::Error;
use crate::likelihood::Likelihood;
use crate::statistics::Gaussian;
use std::sync::Arc;

/// Either one value broadcast to every level, or one value per level.
#[derive(Clone)]
pub enum Hierarchy<T> {
    Shared(T),
    PerLevel(Vec<T>),
}

impl<T> Hierarchy<T> {
    pub fn level(&self, l: usize) -> &T {
        match self {
            Hierarchy::Shared(t) => t,
            Hierarchy::PerLevel(v) => &v[l],
        }
    }
}

/// Builds a length-`L` sequence of [`BayesModel`]s with priors drawn from
/// a [`Hierarchy`] (shared or per-level), per-level likelihoods, and a
/// validated, non-decreasing tempering ladder terminating at `beta = 1`.
#[derive(Default)]
pub struct HierarchyBuilder {
    prior: Option<Hierarchy<Gaussian>>,
    likelihoods: Option<Vec<Box<dyn Likelihood>>>,
    betas: Option<Vec<f64>>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prior_shared(mut self, prior: Gaussian) -> Self {
        self.prior = Some(Hierarchy::Shared(prior));
        self
    }

    pub fn prior_per_level(mut self, priors: Vec<Gaussian>) -> Self {
        self.prior = Some(Hierarchy::PerLevel(priors));
        self
    }

    pub fn likelihoods(mut self, likelihoods: Vec<Box<dyn Likelihood>>) -> Self {
        self.likelihoods = Some(likelihoods);
        self
    }

    pub fn tempering(mut self, betas: Vec<f64>) -> Self {
        self.betas = Some(betas);
        self
    }

    pub fn build(self) -> Result<Vec<Arc<BayesModel>>, Error> {
        let prior = self
            .prior
            .ok_or_else(|| Error::InvalidBuilder("prior not set".into()))?;
        let likelihoods = self
            .likelihoods
            .ok_or_else(|| Error::InvalidBuilder("likelihoods not set".into()))?;
        let betas = self
            .betas
            .ok_or_else(|| Error::InvalidBuilder("tempering sequence not set".into()))?;

        let n_levels = likelihoods.len();
        if betas.len() != n_levels {
            return Err(Error::DimensionMismatch {
                expected: n_levels,
                found: betas.len(),
            });
        }
        if let Hierarchy::PerLevel(ref v) = prior {
            if v.len() != n_levels {
                return Err(Error::DimensionMismatch {
                    expected: n_levels,
                    found: v.len(),
                });
            }
        }
        validate_tempering(&betas)?;

        Ok(likelihoods
            .into_iter()
            .enumerate()
            .map(|(l, likelihood)| {
                Arc::new(BayesModel::new(prior.level(l).clone(), likelihood, betas[l]))
            })
            .collect())
    }
}

fn validate_tempering(betas: &[f64]) -> Result<(), Error> {
    if betas.is_empty() {
        return Err(Error::InvalidHierarchy("tempering sequence is empty".into()));
    }
    for window in betas.windows(2) {
        if window[1] < window[0] {
            return Err(Error::InvalidHierarchy(
                "tempering sequence is not non-decreasing".into(),
            ));
        }
    }
    if *betas.last().unwrap() != 1.0 {
        return Err(Error::InvalidHierarchy(
            "the finest level must carry beta = 1".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error as E;
    use crate::forward_model::ForwardSolver;
    use crate::likelihood::{Dataset, GaussianLikelihood};
    use crate::parameter::ParameterVector;
    use crate::statistics::{Covariance, NoiseModel};
    use nalgebra::DVector;

    struct Identity;
    impl ForwardSolver for Identity {
        fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error> {
            Ok(theta.values().clone())
        }
    }

    fn dummy_likelihood() -> Box<dyn Likelihood> {
        let data = Dataset::new(vec![DVector::from_vec(vec![0.0])]).unwrap();
        let noise = NoiseModel::new(Covariance::isotropic(1.0, 1).unwrap());
        Box::new(GaussianLikelihood::new(data, Identity, noise))
    }

    fn prior() -> Gaussian {
        Gaussian::new(
            ParameterVector::from_vec(vec![0.0]),
            Covariance::isotropic(1.0, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_decreasing_tempering() {
        let result = HierarchyBuilder::new()
            .prior_shared(prior())
            .likelihoods(vec![dummy_likelihood(), dummy_likelihood()])
            .tempering(vec![0.5, 0.2])
            .build();
        assert!(matches!(result, Err(E::InvalidHierarchy(_))));
    }

    #[test]
    fn rejects_final_beta_not_one() {
        let result = HierarchyBuilder::new()
            .prior_shared(prior())
            .likelihoods(vec![dummy_likelihood()])
            .tempering(vec![0.9])
            .build();
        assert!(matches!(result, Err(E::InvalidHierarchy(_))));
    }

    #[test]
    fn accepts_valid_ladder() {
        let result = HierarchyBuilder::new()
            .prior_shared(prior())
            .likelihoods(vec![dummy_likelihood(), dummy_likelihood()])
            .tempering(vec![0.3, 1.0])
            .build();
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }
}
