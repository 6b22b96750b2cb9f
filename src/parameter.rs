//! The parameter vector: a typed, immutable wrapper over a dense real vector.

use nalgebra::DVector;
use std::fmt;

/// A point in the (fixed, finite-dimensional) parameter space.
///
/// Equality is elementwise and exact, which is what the Metropolis-Hastings
/// kernel relies on to tell an accepted proposal apart from a repeated
/// rejection without threading an explicit outcome flag through every
/// layer of the sampler.
#[derive(Clone, Debug)]
pub struct ParameterVector {
    values: DVector<f64>,
}

impl ParameterVector {
    pub fn new(values: DVector<f64>) -> Self {
        Self { values }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: DVector::from_vec(values),
        }
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            values: DVector::zeros(dim),
        }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }
}

impl PartialEq for ParameterVector {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.transpose())
    }
}
