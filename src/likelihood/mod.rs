//! Likelihood containers: a narrow contract (`log_likelihood(theta)`) that
//! the Bayes model composes with a prior and an optional tempering
//! exponent, plus the two concrete implementations the engine ships with.

pub mod aem;
pub mod dataset;
pub mod gaussian;

pub use aem::AdaptiveErrorLikelihood;
pub use dataset::Dataset;
pub use gaussian::GaussianLikelihood;

use crate::parameter::ParameterVector;
use std::fmt;
use std::sync::Arc;

/// Log-likelihood of a parameter, gradient-free.
///
/// A non-finite return value (typically negative infinity, produced when
/// the underlying forward solver fails) is interpreted by [`crate::bayes`]
/// as an unconditional rejection.
pub trait Likelihood: Send + Sync + fmt::Debug {
    fn log_likelihood(&self, theta: &ParameterVector) -> f64;
}

impl<T: Likelihood + ?Sized> Likelihood for Arc<T> {
    fn log_likelihood(&self, theta: &ParameterVector) -> f64 {
        (**self).log_likelihood(theta)
    }
}
