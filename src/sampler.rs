//! The top-level sampler driver: owns one stepping algorithm, its
//! trajectory, and the diagnostics accumulated alongside it.

use crate::chain::{AcceptanceRateDiagnostics, Chain, WelfordAccumulator};
use crate::parameter::ParameterVector;
use crate::steppers::SteppingAlg;
use rand::RngCore;

/// Drives any [`SteppingAlg`] (a base Metropolis-Hastings kernel or the
/// finest level of an MLDA recursion) for a fixed number of transitions,
/// recording every resulting state and tracking acceptance-rate and
/// moment diagnostics alongside it.
pub struct Sampler {
    stepper: Box<dyn SteppingAlg>,
    chain: Chain,
    diagnostics: AcceptanceRateDiagnostics,
    moments: WelfordAccumulator,
}

impl Sampler {
    pub fn new(stepper: Box<dyn SteppingAlg>, dim: usize, rolling_lag: usize) -> Self {
        Self {
            stepper,
            chain: Chain::new(),
            diagnostics: AcceptanceRateDiagnostics::new(rolling_lag),
            moments: WelfordAccumulator::new(dim),
        }
    }

    /// Advance the chain by `n` transitions from `x0`. The initial state
    /// is not itself a transition and is excluded from both the
    /// acceptance-rate denominator and the moment accumulator; it is
    /// simply the chain's starting point.
    pub fn run(&mut self, rng: &mut dyn RngCore, x0: ParameterVector, n: usize) -> &Chain {
        let mut state = x0;
        for _ in 0..n {
            let (next, accepted) = self.stepper.step(rng, state);
            self.diagnostics.record(accepted);
            if accepted {
                self.moments.push(next.values());
            }
            self.chain.push(next.clone());
            state = next;
        }
        &self.chain
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn diagnostics(&self) -> &AcceptanceRateDiagnostics {
        &self.diagnostics
    }

    pub fn moments(&self) -> &WelfordAccumulator {
        &self.moments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bayes::BayesModel;
    use crate::error::Error;
    use crate::forward_model::ForwardSolver;
    use crate::likelihood::{Dataset, GaussianLikelihood};
    use crate::statistics::{Covariance, Gaussian, NoiseModel};
    use crate::steppers::mh::MetropolisHastings;
    use crate::steppers::proposal::mrw::MrwProposal;
    use nalgebra::DVector;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;
    use std::sync::Arc;

    struct Identity;
    impl ForwardSolver for Identity {
        fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error> {
            Ok(theta.values().clone())
        }
    }

    fn sampler() -> Sampler {
        let prior = Gaussian::new(
            ParameterVector::from_vec(vec![0.0]),
            Covariance::isotropic(1.0, 1).unwrap(),
        )
        .unwrap();
        let data = Dataset::new(vec![DVector::from_vec(vec![0.0])]).unwrap();
        let noise = NoiseModel::new(Covariance::isotropic(1.0, 1).unwrap());
        let likelihood = Box::new(GaussianLikelihood::new(data, Identity, noise));
        let model = Arc::new(BayesModel::new(prior, likelihood, 1.0));
        let stepper: Box<dyn SteppingAlg> = Box::new(MetropolisHastings::new(
            model,
            MrwProposal::new(Covariance::isotropic(0.3, 1).unwrap()),
        ));
        Sampler::new(stepper, 1, 100)
    }

    #[test]
    fn chain_length_equals_requested_step_count_and_excludes_x0() {
        let mut sampler = sampler();
        let mut rng = Xoshiro256Plus::seed_from_u64(5);
        sampler.run(&mut rng, ParameterVector::from_vec(vec![0.0]), 200);
        assert_eq!(sampler.chain().len(), 200);
        assert_eq!(sampler.diagnostics().total_transitions(), 200);
    }

    #[test]
    fn moments_only_see_accepted_states() {
        let mut sampler = sampler();
        let mut rng = Xoshiro256Plus::seed_from_u64(6);
        sampler.run(&mut rng, ParameterVector::from_vec(vec![0.0]), 500);
        assert!(sampler.moments().count() <= 500);
        assert!(sampler.moments().count() > 0);
    }
}
