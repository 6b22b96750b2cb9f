//! Fluent construction of an MLDA sampler from either a level hierarchy or
//! an explicit target/surrogate pair of models.

use crate::bayes::BayesModel;
use crate::error::Error;
use crate::statistics::Covariance;
use crate::steppers::mh::MetropolisHastings;
use crate::steppers::mlda::MldaLevel;
use crate::steppers::proposal::mrw::MrwProposal;
use crate::steppers::{SteppingAlg, TransitionObserver};
use std::sync::Arc;

#[derive(Default)]
pub struct MldaBuilder {
    hierarchy: Option<Vec<Arc<BayesModel>>>,
    explicit_levels: Option<Vec<Arc<BayesModel>>>,
    base_proposal_covariance: Option<Covariance>,
    sub_chain_lengths: Option<Vec<usize>>,
    observers: Vec<Arc<dyn TransitionObserver>>,
}

impl MldaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels produced by a shared [`crate::bayes::hierarchy::HierarchyBuilder`].
    pub fn hierarchy(mut self, levels: Vec<Arc<BayesModel>>) -> Self {
        self.hierarchy = Some(levels);
        self
    }

    /// Levels assembled by the caller from an explicit target model plus
    /// one or more surrogate models, finest level last.
    pub fn explicit_levels(mut self, levels: Vec<Arc<BayesModel>>) -> Self {
        self.explicit_levels = Some(levels);
        self
    }

    pub fn base_proposal_covariance(mut self, cov: Covariance) -> Self {
        self.base_proposal_covariance = Some(cov);
        self
    }

    pub fn sub_chain_lengths(mut self, lengths: Vec<usize>) -> Self {
        self.sub_chain_lengths = Some(lengths);
        self
    }

    pub fn observers(mut self, observers: Vec<Arc<dyn TransitionObserver>>) -> Self {
        self.observers = observers;
        self
    }

    pub fn build(self) -> Result<Box<dyn SteppingAlg>, Error> {
        let levels = match (self.hierarchy, self.explicit_levels) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidBuilder(
                    "both a hierarchy and explicit levels were supplied".into(),
                ))
            }
            (None, None) => {
                return Err(Error::InvalidBuilder(
                    "neither a hierarchy nor explicit levels were supplied".into(),
                ))
            }
            (Some(levels), None) | (None, Some(levels)) => levels,
        };
        if levels.len() < 2 {
            return Err(Error::InvalidBuilder(
                "MLDA requires at least two levels".into(),
            ));
        }
        let base_cov = self
            .base_proposal_covariance
            .ok_or_else(|| Error::InvalidBuilder("base proposal covariance not set".into()))?;
        let sub_chain_lengths = self
            .sub_chain_lengths
            .ok_or_else(|| Error::InvalidBuilder("sub-chain lengths not set".into()))?;
        if sub_chain_lengths.len() != levels.len() - 1 {
            return Err(Error::DimensionMismatch {
                expected: levels.len() - 1,
                found: sub_chain_lengths.len(),
            });
        }
        if sub_chain_lengths.iter().any(|&j| j == 0) {
            return Err(Error::InvalidBuilder(
                "sub-chain lengths must be strictly positive".into(),
            ));
        }

        let mut current: Box<dyn SteppingAlg> = Box::new(MetropolisHastings::new(
            levels[0].clone(),
            MrwProposal::new(base_cov),
        ));

        let last = levels.len() - 1;
        for (l, window) in levels.windows(2).enumerate() {
            let model_below = window[0].clone();
            let model_here = window[1].clone();
            let mut level =
                MldaLevel::new(model_here, model_below, current, sub_chain_lengths[l]);
            if l + 1 == last {
                level = level.with_observers(self.observers.clone());
            }
            current = Box::new(level);
        }

        Ok(current)
    }
}
