//! Multi-Level Delayed Acceptance: a recursive sampler that uses a cheap
//! level's sub-chain as the proposal generator for the level above it.

mod builder;

pub use builder::MldaBuilder;

use crate::bayes::BayesModel;
use crate::parameter::ParameterVector;
use crate::steppers::{accept, safe_log_ratio, SteppingAlg, TransitionObserver};
use rand::RngCore;
use std::sync::Arc;

/// One level of the MLDA recursion, above the base level. Advances its
/// sub-chain (the level below, `j_{l-1}` steps) to obtain a proposal, then
/// accepts or rejects it against the generalised two-level ratio.
pub struct MldaLevel {
    model: Arc<BayesModel>,
    model_below: Arc<BayesModel>,
    sub_chain: Box<dyn SteppingAlg>,
    sub_chain_length: usize,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl MldaLevel {
    pub fn new(
        model: Arc<BayesModel>,
        model_below: Arc<BayesModel>,
        sub_chain: Box<dyn SteppingAlg>,
        sub_chain_length: usize,
    ) -> Self {
        Self {
            model,
            model_below,
            sub_chain,
            sub_chain_length,
            observers: Vec::new(),
        }
    }

    pub fn with_observers(mut self, observers: Vec<Arc<dyn TransitionObserver>>) -> Self {
        self.observers = observers;
        self
    }
}

impl SteppingAlg for MldaLevel {
    fn step(&mut self, rng: &mut dyn RngCore, state: ParameterVector) -> (ParameterVector, bool) {
        // The sub-chain's own transitions are transient: only its terminal
        // state after j_{l-1} steps surfaces as this level's proposal.
        let candidate = self
            .sub_chain
            .multiple_steps(rng, state.clone(), self.sub_chain_length);

        let diff_here = safe_log_ratio(
            self.model.log_posterior(&candidate),
            self.model.log_posterior(&state),
        );
        let diff_below = safe_log_ratio(
            self.model_below.log_posterior(&candidate),
            self.model_below.log_posterior(&state),
        );
        let log_alpha = safe_log_ratio(diff_here, diff_below);

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
