//! The runner's own error type, distinct from [`crate::error::Error`]:
//! construction-time failures belong to the sampler's builders, while a
//! `RunnerError` reports a failure of the parallel-chain harness itself.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use std::sync::PoisonError;

#[derive(Clone, Debug)]
pub enum RunnerError {
    /// A worker thread panicked while holding the results lock.
    LockPoisoned,
}

impl Display for RunnerError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            RunnerError::LockPoisoned => write!(f, "a chain-results lock was poisoned"),
        }
    }
}

impl<T> From<PoisonError<T>> for RunnerError {
    fn from(_: PoisonError<T>) -> Self {
        RunnerError::LockPoisoned
    }
}

impl StdError for RunnerError {}

pub type Result<T> = std::result::Result<T, RunnerError>;
