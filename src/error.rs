//! Crate-wide error type.
//!
//! Construction-time failures (bad builder inputs, ill-conditioned
//! covariances, inconsistent tempering ladders) are surfaced through this
//! type. Runtime failures of a single forward-model evaluation are *not*
//! propagated as an [`Error`] to the sampler; they are translated into a
//! log-posterior of negative infinity so that the offending proposal is
//! simply rejected (see [`crate::bayes::BayesModel::log_posterior`]).

use std::error::Error as StdError;
use std::fmt;

/// Errors produced while assembling the model hierarchy or samplers.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A builder was missing a required input, or was given conflicting
    /// inputs (e.g. both a hierarchical Bayes model and an explicit
    /// target/surrogate pair).
    InvalidBuilder(String),
    /// A tempering ladder was not non-decreasing, or did not terminate at
    /// `beta = 1`.
    InvalidHierarchy(String),
    /// Two objects that must share a dimension (parameter, data, noise,
    /// covariance) did not.
    DimensionMismatch { expected: usize, found: usize },
    /// A supplied covariance matrix was not positive definite; its
    /// Cholesky factor could not be computed.
    IllConditioned,
    /// The user forward solver signalled non-convergence at a parameter.
    SolverFailure(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBuilder(msg) => write!(f, "invalid builder: {}", msg),
            Error::InvalidHierarchy(msg) => write!(f, "invalid hierarchy: {}", msg),
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected {}, found {}",
                expected, found
            ),
            Error::IllConditioned => {
                write!(f, "covariance is not positive definite (Cholesky failed)")
            }
            Error::SolverFailure(msg) => write!(f, "forward solver failed: {}", msg),
        }
    }
}

impl StdError for Error {}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
