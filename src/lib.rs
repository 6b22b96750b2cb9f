//! A Markov-Chain-Monte-Carlo engine for Bayesian inverse problems:
//! a Metropolis-Hastings kernel, a Multi-Level Delayed Acceptance (MLDA)
//! sampler that composes cheap surrogate chains as proposals for more
//! expensive targets, and an Adaptive Error Model (AEM) likelihood that
//! learns the surrogate/target discrepancy online from accepted states.
//!
//! The core contract every piece of the engine is built around is a
//! single cheap, reproducible operation: evaluate a log-posterior on a
//! parameter vector. See [`bayes::BayesModel::log_posterior`].

pub mod autocorrelation;
pub mod bayes;
pub mod chain;
pub mod error;
pub mod forward_model;
pub mod likelihood;
pub mod parameter;
pub mod runner;
pub mod sampler;
pub mod statistics;
pub mod steppers;

pub use bayes::BayesModel;
pub use error::{Error, Result};
pub use parameter::ParameterVector;
pub use sampler::Sampler;
