//! Metropolised Random Walk: a symmetric Gaussian random-walk proposal.

use crate::parameter::ParameterVector;
use crate::statistics::Covariance;
use crate::steppers::proposal::Proposal;
use nalgebra::DVector;
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

pub struct MrwProposal {
    cov: Covariance,
    state: Option<ParameterVector>,
}

impl MrwProposal {
    pub fn new(cov: Covariance) -> Self {
        Self { cov, state: None }
    }
}

impl Proposal for MrwProposal {
    fn set_state(&mut self, state: ParameterVector) {
        self.state = Some(state);
    }

    fn generate(&mut self, rng: &mut dyn RngCore) -> ParameterVector {
        let state = self
            .state
            .as_ref()
            .expect("generate() called before set_state()");
        let dim = self.cov.dim();
        let z = DVector::from_iterator(dim, (0..dim).map(|_| {
            let sample: f64 = StandardNormal.sample(rng);
            sample
        }));
        ParameterVector::new(state.values() + self.cov.chol(&z))
    }

    fn log_density_ratio(&self, _from: &ParameterVector, _to: &ParameterVector) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn symmetric_ratio_is_zero() {
        let mut prop = MrwProposal::new(Covariance::isotropic(1.0, 2).unwrap());
        prop.set_state(ParameterVector::from_vec(vec![0.0, 0.0]));
        let a = ParameterVector::from_vec(vec![1.0, 1.0]);
        let b = ParameterVector::from_vec(vec![-1.0, 2.0]);
        assert_eq!(prop.log_density_ratio(&a, &b), 0.0);
    }

    #[test]
    fn reproducible_given_fixed_seed() {
        let mut p1 = MrwProposal::new(Covariance::isotropic(1.0, 2).unwrap());
        let mut p2 = MrwProposal::new(Covariance::isotropic(1.0, 2).unwrap());
        p1.set_state(ParameterVector::from_vec(vec![0.0, 0.0]));
        p2.set_state(ParameterVector::from_vec(vec![0.0, 0.0]));

        let mut r1 = Xoshiro256Plus::seed_from_u64(7);
        let mut r2 = Xoshiro256Plus::seed_from_u64(7);
        assert_eq!(p1.generate(&mut r1), p2.generate(&mut r2));
    }
}
