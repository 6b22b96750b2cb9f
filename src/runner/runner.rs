//! Runs independent chains in parallel via `rayon::scope`, one worker per
//! chain, each built from its own sampler instance and a disjoint,
//! deterministically-derived RNG seed.

use crate::chain::Chain;
use crate::parameter::ParameterVector;
use crate::runner::result::{Result, RunnerError};
use crate::runner::utils::draw_from_stepper;
use crate::steppers::SteppingAlg;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use std::sync::{Arc, RwLock};

/// Builds one fresh, independent sampler per chain. The factory is called
/// once per spawned worker, so a closure capturing `Arc<BayesModel>` (and
/// any `Arc<dyn TransitionObserver>`s) can cheaply hand out a distinct
/// sampler instance to each.
pub struct Runner<F>
where
    F: Fn() -> Box<dyn SteppingAlg> + Sync,
{
    factory: F,
    n_chains: usize,
    warmup_steps: usize,
    samples: usize,
    keep_warmup: bool,
    thinning: usize,
}

impl<F> Runner<F>
where
    F: Fn() -> Box<dyn SteppingAlg> + Sync,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            n_chains: 1,
            warmup_steps: 1000,
            samples: 1000,
            keep_warmup: false,
            thinning: 1,
        }
    }

    pub fn chains(mut self, n_chains: usize) -> Self {
        self.n_chains = n_chains;
        self
    }

    pub fn warmup(mut self, steps: usize) -> Self {
        self.warmup_steps = steps;
        self
    }

    pub fn keep_warmup(mut self, keep: bool) -> Self {
        self.keep_warmup = keep;
        self
    }

    pub fn samples(mut self, steps: usize) -> Self {
        self.samples = steps;
        self
    }

    pub fn thinning(mut self, thinning: usize) -> Self {
        assert!(thinning > 0, "thinning must be greater than 0");
        self.thinning = thinning;
        self
    }

    /// Run `n_chains` independent samplers from `init`, seeded off `seed_rng`
    /// (one fresh `u64` drawn per chain, so chains never share RNG state).
    pub fn run(
        &self,
        seed_rng: &mut dyn rand::RngCore,
        init: ParameterVector,
    ) -> Result<Vec<Chain>> {
        let seeds: Vec<u64> = (0..self.n_chains).map(|_| seed_rng.gen()).collect();
        let results = Arc::new(RwLock::new(Vec::with_capacity(self.n_chains)));

        rayon::scope(|scope| {
            for seed in seeds {
                let results = Arc::clone(&results);
                let init = init.clone();
                scope.spawn(move |_| {
                    let mut stepper = (self.factory)();
                    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
                    let chain = draw_from_stepper(
                        stepper.as_mut(),
                        &mut rng,
                        init,
                        self.samples,
                        self.warmup_steps,
                        self.thinning,
                        self.keep_warmup,
                    );
                    results
                        .write()
                        .expect("chain-results lock poisoned by a panicking worker")
                        .push(chain);
                });
            }
        });

        let results = Arc::try_unwrap(results)
            .map_err(|_| RunnerError::LockPoisoned)?
            .into_inner()?;
        Ok(results)
    }
}
