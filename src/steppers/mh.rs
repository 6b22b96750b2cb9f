//! The base Metropolis-Hastings kernel: one proposal, one Bayes model,
//! one acceptance test.

use crate::bayes::BayesModel;
use crate::parameter::ParameterVector;
use crate::steppers::proposal::Proposal;
use crate::steppers::{accept, safe_log_ratio, SteppingAlg, TransitionObserver};
use rand::RngCore;
use std::sync::Arc;

/// Drives a single [`Proposal`] against a single [`BayesModel`]'s
/// log-posterior, optionally notifying observers on every acceptance.
pub struct MetropolisHastings<P: Proposal> {
    model: Arc<BayesModel>,
    proposal: P,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl<P: Proposal> MetropolisHastings<P> {
    pub fn new(model: Arc<BayesModel>, proposal: P) -> Self {
        Self {
            model,
            proposal,
            observers: Vec::new(),
        }
    }

    pub fn with_observers(mut self, observers: Vec<Arc<dyn TransitionObserver>>) -> Self {
        self.observers = observers;
        self
    }
}

impl<P: Proposal> SteppingAlg for MetropolisHastings<P> {
    fn step(&mut self, rng: &mut dyn RngCore, state: ParameterVector) -> (ParameterVector, bool) {
        self.proposal.set_state(state.clone());
        let candidate = self.proposal.generate(rng);

        let log_post_ratio = safe_log_ratio(
            self.model.log_posterior(&candidate),
            self.model.log_posterior(&state),
        );
        let log_alpha = log_post_ratio + self.proposal.log_density_ratio(&state, &candidate);

        if accept(rng, log_alpha) {
            for observer in &self.observers {
                observer.on_accept(&candidate);
            }
            (candidate, true)
        } else {
            (state, false)
        }
    }
}
