//! The boundary between the sampler and a user-supplied forward solver.
//!
//! [`ForwardSolver`] is the narrow contract external collaborators (ODE
//! integrators, PDE solvers, surrogate models) implement. [`ForwardModel`]
//! wraps one with a last-input/last-output cache so that repeated
//! evaluations at the same parameter (as happens whenever a proposal is
//! rejected and the current state's density is asked for again) do not
//! re-invoke the user's solver.

use crate::error::Error;
use crate::parameter::ParameterVector;
use nalgebra::DVector;
use std::sync::Mutex;

/// A deterministic map `theta -> y(theta)`.
///
/// Implementations may fail (e.g. an ODE integrator that does not
/// converge); such a failure is translated into [`Error::SolverFailure`]
/// and, by the caller, into a log-posterior of negative infinity.
pub trait ForwardSolver: Send + Sync {
    fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error>;
}

/// Memoising wrapper around a [`ForwardSolver`].
///
/// Holds only the most recent input/output pair; any new input evicts it.
pub struct ForwardModel<S: ForwardSolver> {
    solver: S,
    cache: Mutex<Option<(ParameterVector, DVector<f64>)>>,
}

impl<S: ForwardSolver> ForwardModel<S> {
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            cache: Mutex::new(None),
        }
    }

    pub fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error> {
        let mut cache = self.cache.lock().expect("forward model cache poisoned");
        if let Some((last_input, last_output)) = cache.as_ref() {
            if last_input == theta {
                return Ok(last_output.clone());
            }
        }
        let output = self.solver.evaluate(theta)?;
        *cache = Some((theta.clone(), output.clone()));
        Ok(output)
    }
}
