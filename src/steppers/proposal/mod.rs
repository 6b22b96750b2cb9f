//! Proposal kernels used by the Metropolis-Hastings stepper.

pub mod mrw;
pub mod pcn;

use crate::parameter::ParameterVector;
use rand::RngCore;

/// A proposal kernel: holds the chain's current state, generates a
/// candidate next state, and reports the asymmetry (if any) the kernel
/// introduces into the acceptance ratio.
pub trait Proposal: Send + Sync {
    fn set_state(&mut self, state: ParameterVector);

    fn generate(&mut self, rng: &mut dyn RngCore) -> ParameterVector;

    /// `log q(from|to) - log q(to|from)`, added to the raw posterior
    /// log-ratio by the Metropolis-Hastings kernel. Zero for symmetric
    /// proposals such as MRW.
    fn log_density_ratio(&self, from: &ParameterVector, to: &ParameterVector) -> f64;
}
