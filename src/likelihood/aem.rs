//! The Adaptive Error Model (AEM) likelihood.
//!
//! Learns an online bias/covariance correction between a surrogate and a
//! target forward model from the set of differences observed at accepted
//! states. Below `n_min` accepted observations the correction is the
//! identity (zero bias, unmodified noise); the evaluated likelihood is
//! then exactly the uncorrected surrogate likelihood.

use crate::error::Error;
use crate::forward_model::{ForwardModel, ForwardSolver};
use crate::likelihood::{Dataset, Likelihood};
use crate::parameter::ParameterVector;
use crate::statistics::{Covariance, NoiseModel};
use crate::steppers::TransitionObserver;
use nalgebra::{DMatrix, DVector};
use std::fmt;
use std::sync::Mutex;

/// Online mean/covariance accumulator over the stream of model-discrepancy
/// vectors `d = y_target - y_surrogate`, plus the frozen correction
/// (`bias`, `effective_noise`) derived from it.
struct AemState {
    n: usize,
    mean: DVector<f64>,
    m2: DMatrix<f64>,
    bias: DVector<f64>,
    effective_noise: Covariance,
}

impl AemState {
    fn new(dim: usize, base_noise: Covariance) -> Self {
        Self {
            n: 0,
            mean: DVector::zeros(dim),
            m2: DMatrix::zeros(dim, dim),
            bias: DVector::zeros(dim),
            effective_noise: base_noise,
        }
    }

    /// Welford's online mean/covariance update, generalised to vectors.
    fn push(&mut self, d: &DVector<f64>) {
        self.n += 1;
        let delta = d - &self.mean;
        self.mean += &delta / (self.n as f64);
        let delta2 = d - &self.mean;
        self.m2 += &delta * delta2.transpose();
    }

    fn unbiased_covariance(&self) -> DMatrix<f64> {
        if self.n < 2 {
            DMatrix::zeros(self.mean.len(), self.mean.len())
        } else {
            &self.m2 / ((self.n - 1) as f64)
        }
    }
}

pub struct AdaptiveErrorLikelihood<Sur: ForwardSolver, Tgt: ForwardSolver> {
    data: Dataset,
    surrogate: ForwardModel<Sur>,
    target: ForwardModel<Tgt>,
    base_noise: Covariance,
    n_min: usize,
    state: Mutex<AemState>,
}

impl<Sur: ForwardSolver, Tgt: ForwardSolver> AdaptiveErrorLikelihood<Sur, Tgt> {
    pub fn new(
        data: Dataset,
        surrogate: Sur,
        target: Tgt,
        base_noise: Covariance,
        n_min: usize,
    ) -> Self {
        let dim = base_noise.dim();
        let state = Mutex::new(AemState::new(dim, base_noise.clone()));
        Self {
            data,
            surrogate: ForwardModel::new(surrogate),
            target: ForwardModel::new(target),
            base_noise,
            n_min,
            state,
        }
    }

    /// Number of accepted-state observations folded into the accumulator
    /// so far.
    pub fn observation_count(&self) -> usize {
        self.state.lock().expect("AEM state poisoned").n
    }

    /// Whether the correction threshold has been reached.
    pub fn is_active(&self) -> bool {
        self.observation_count() >= self.n_min
    }
}

impl<Sur: ForwardSolver, Tgt: ForwardSolver> fmt::Debug for AdaptiveErrorLikelihood<Sur, Tgt> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().expect("AEM state poisoned");
        f.debug_struct("AdaptiveErrorLikelihood")
            .field("n_min", &self.n_min)
            .field("n_observed", &state.n)
            .finish()
    }
}

impl<Sur: ForwardSolver, Tgt: ForwardSolver> Likelihood for AdaptiveErrorLikelihood<Sur, Tgt> {
    fn log_likelihood(&self, theta: &ParameterVector) -> f64 {
        let y_sur = match self.surrogate.evaluate(theta) {
            Ok(y) => y,
            Err(_) => return f64::NEG_INFINITY,
        };
        let state = self.state.lock().expect("AEM state poisoned");
        let noise = NoiseModel::new(state.effective_noise.clone());
        let residuals: Vec<_> = self
            .data
            .rows()
            .iter()
            .map(|row| row - &y_sur - &state.bias)
            .collect();
        noise.log_likelihood(&residuals)
    }
}

impl<Sur: ForwardSolver, Tgt: ForwardSolver> TransitionObserver
    for AdaptiveErrorLikelihood<Sur, Tgt>
{
    fn on_accept(&self, theta: &ParameterVector) {
        let y_tgt = match self.target.evaluate(theta) {
            Ok(y) => y,
            Err(_) => return,
        };
        let y_sur = match self.surrogate.evaluate(theta) {
            Ok(y) => y,
            Err(_) => return,
        };
        let d = y_tgt - y_sur;

        let mut state = self.state.lock().expect("AEM state poisoned");
        state.push(&d);

        if state.n >= self.n_min {
            let bias = state.mean.clone();
            let correction = state.unbiased_covariance();
            let combined = self.base_noise.to_dense() + correction;
            state.bias = bias;
            state.effective_noise =
                Covariance::dense(combined).unwrap_or_else(|_| self.base_noise.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    struct ConstantSolver {
        value: DVector<f64>,
    }
    impl ForwardSolver for ConstantSolver {
        fn evaluate(&self, _theta: &ParameterVector) -> Result<DVector<f64>, Error> {
            Ok(self.value.clone())
        }
    }

    fn make_likelihood(n_min: usize) -> AdaptiveErrorLikelihood<ConstantSolver, ConstantSolver> {
        let data = Dataset::new(vec![DVector::from_vec(vec![0.0, 0.0])]).unwrap();
        let surrogate = ConstantSolver {
            value: DVector::from_vec(vec![0.0, 0.0]),
        };
        let target = ConstantSolver {
            value: DVector::from_vec(vec![0.2, -0.1]),
        };
        let base_noise = Covariance::dense(DMatrix::identity(2, 2)).unwrap();
        AdaptiveErrorLikelihood::new(data, surrogate, target, base_noise, n_min)
    }

    #[test]
    fn below_threshold_matches_uncorrected_surrogate_likelihood() {
        let aem = make_likelihood(5);
        let theta = ParameterVector::from_vec(vec![0.0, 0.0]);

        let uncorrected = aem.log_likelihood(&theta);

        for _ in 0..4 {
            aem.on_accept(&theta);
            assert_eq!(aem.log_likelihood(&theta), uncorrected);
        }
        assert!(!aem.is_active());
    }

    #[test]
    fn crossing_threshold_activates_nonzero_correction() {
        let aem = make_likelihood(3);
        let theta = ParameterVector::from_vec(vec![0.0, 0.0]);

        let uncorrected = aem.log_likelihood(&theta);
        aem.on_accept(&theta);
        aem.on_accept(&theta);
        assert_eq!(aem.log_likelihood(&theta), uncorrected);

        aem.on_accept(&theta);
        assert!(aem.is_active());
        let corrected = aem.log_likelihood(&theta);
        assert_ne!(corrected, uncorrected);
    }
}
