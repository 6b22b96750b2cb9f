//! The per-chain draw loop shared by every spawned worker: warmup
//! followed by thinned sampling, with an explicit choice of whether
//! warmup states are kept in the output.

use crate::chain::Chain;
use crate::parameter::ParameterVector;
use crate::steppers::SteppingAlg;
use rand::RngCore;

#[doc(hidden)]
pub fn draw_from_stepper(
    stepper: &mut dyn SteppingAlg,
    rng: &mut dyn RngCore,
    init: ParameterVector,
    n_draws: usize,
    n_warmup: usize,
    thinning: usize,
    keep_warmup: bool,
) -> Chain {
    let mut chain = Chain::new();

    let warmed = if keep_warmup {
        let mut state = init;
        for _ in 0..n_warmup {
            state = stepper.step(rng, state).0;
            chain.push(state.clone());
        }
        state
    } else {
        stepper.multiple_steps(rng, init, n_warmup)
    };

    let mut state = warmed;
    for i in 0..(n_draws * thinning) {
        state = stepper.step(rng, state).0;
        if (i + 1) % thinning == 0 {
            chain.push(state.clone());
        }
    }

    chain
}
