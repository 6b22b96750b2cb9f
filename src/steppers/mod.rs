//! Stepping algorithms: the Metropolis-Hastings kernel, its two proposal
//! kernels (MRW, pCN), and the Multi-Level Delayed Acceptance sampler that
//! composes them recursively.

pub mod builders;
pub mod mh;
pub mod mlda;
pub mod proposal;

pub use builders::{MrwBuilder, PcnBuilder};
pub use mh::MetropolisHastings;
pub use mlda::{MldaBuilder, MldaLevel};
pub use proposal::{mrw::MrwProposal, pcn::PcnProposal, Proposal};

use crate::parameter::ParameterVector;
use rand::RngCore;

/// A single step of a Markov chain, advancing the parameter vector by
/// exactly one transition.
///
/// This is the uniform interface both the base Metropolis-Hastings kernel
/// and each level of the MLDA recursion implement, so that an MLDA level
/// can use the sampler one level down as an opaque proposal generator
/// without knowing whether it is itself an [`MetropolisHastings`] kernel or
/// another [`MldaLevel`].
pub trait SteppingAlg: Send + Sync {
    /// Advance the chain by one transition, returning the resulting state
    /// and whether the proposal was accepted.
    fn step(&mut self, rng: &mut dyn RngCore, state: ParameterVector) -> (ParameterVector, bool);

    /// Advance the chain by `steps` transitions, discarding the
    /// intermediate states and the accept/reject outcomes. Used to
    /// generate MLDA sub-chain proposals, which are transient by
    /// definition.
    fn multiple_steps(
        &mut self,
        rng: &mut dyn RngCore,
        state: ParameterVector,
        steps: usize,
    ) -> ParameterVector {
        (0..steps).fold(state, |s, _| self.step(rng, s).0)
    }
}

impl SteppingAlg for Box<dyn SteppingAlg> {
    fn step(&mut self, rng: &mut dyn RngCore, state: ParameterVector) -> (ParameterVector, bool) {
        (**self).step(rng, state)
    }
}

/// Observer notified once per accepted transition at the level a sampler
/// drives directly (the finest level, for MLDA). The Adaptive Error Model
/// likelihood subscribes through this trait rather than through a hidden
/// callback wired into the sampler.
pub trait TransitionObserver: Send + Sync {
    fn on_accept(&self, theta: &ParameterVector);
}

impl<T: TransitionObserver + ?Sized> TransitionObserver for std::sync::Arc<T> {
    fn on_accept(&self, theta: &ParameterVector) {
        (**self).on_accept(theta)
    }
}

/// Decide acceptance from a log-acceptance-ratio and a single fresh
/// uniform draw, skipping the draw entirely when the ratio already
/// guarantees acceptance (`log_alpha >= 0`). This keeps the RNG stream
/// consumption of a degenerate two-level MLDA chain (identical posteriors
/// at both levels) identical to that of a plain base-level kernel, since
/// such a chain always has `log_alpha == 0` at the outer level.
pub(crate) fn accept(rng: &mut dyn RngCore, log_alpha: f64) -> bool {
    if log_alpha >= 0.0 {
        true
    } else if !log_alpha.is_finite() {
        false
    } else {
        let u: f64 = rand::Rng::gen(rng);
        u.ln() < log_alpha
    }
}

/// Subtract two log-posterior differences while treating `-inf - (-inf)`
/// (both sides of a comparison unsupported by the data) as an outright
/// rejection rather than propagating `NaN`.
pub(crate) fn safe_log_ratio(a: f64, b: f64) -> f64 {
    let raw = a - b;
    if raw.is_nan() {
        f64::NEG_INFINITY
    } else {
        raw
    }
}
