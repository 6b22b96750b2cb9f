//! Fluent builders for the two single-level samplers, matching the MLDA
//! builder's validate-then-construct shape.

use crate::bayes::BayesModel;
use crate::error::Error;
use crate::statistics::Covariance;
use crate::steppers::mh::MetropolisHastings;
use crate::steppers::proposal::{mrw::MrwProposal, pcn::PcnProposal};
use crate::steppers::{SteppingAlg, TransitionObserver};
use std::sync::Arc;

#[derive(Default)]
pub struct MrwBuilder {
    model: Option<Arc<BayesModel>>,
    proposal_covariance: Option<Covariance>,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl MrwBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bayes_model(mut self, model: Arc<BayesModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn proposal_covariance(mut self, cov: Covariance) -> Self {
        self.proposal_covariance = Some(cov);
        self
    }

    pub fn observers(mut self, observers: Vec<Arc<dyn TransitionObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn build(self) -> Result<Box<dyn SteppingAlg>, Error> {
        let model = self
            .model
            .ok_or_else(|| Error::InvalidBuilder("bayesModel not set".into()))?;
        let cov = self
            .proposal_covariance
            .ok_or_else(|| Error::InvalidBuilder("proposalCovariance not set".into()))?;
        if cov.dim() != model.prior().dim() {
            return Err(Error::DimensionMismatch {
                expected: model.prior().dim(),
                found: cov.dim(),
            });
        }
        let kernel =
            MetropolisHastings::new(model, MrwProposal::new(cov)).with_observers(self.observers);
        Ok(Box::new(kernel))
    }
}

#[derive(Default)]
pub struct PcnBuilder {
    model: Option<Arc<BayesModel>>,
    step_size: Option<f64>,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl PcnBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bayes_model(mut self, model: Arc<BayesModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn step_size(mut self, step_size: f64) -> Self {
        self.step_size = Some(step_size);
        self
    }

    pub fn observers(mut self, observers: Vec<Arc<dyn TransitionObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn build(self) -> Result<Box<dyn SteppingAlg>, Error> {
        let model = self
            .model
            .ok_or_else(|| Error::InvalidBuilder("bayesModel not set".into()))?;
        let step_size = self
            .step_size
            .ok_or_else(|| Error::InvalidBuilder("stepSize not set".into()))?;
        if !(step_size > 0.0 && step_size < 1.0) {
            return Err(Error::InvalidBuilder(
                "stepSize must lie in the open interval (0, 1)".into(),
            ));
        }
        let prior = model.prior().clone();
        let kernel = MetropolisHastings::new(model, PcnProposal::new(prior, step_size))
            .with_observers(self.observers);
        Ok(Box::new(kernel))
    }
}
