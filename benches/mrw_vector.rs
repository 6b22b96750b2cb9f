//! Benchmark the Metropolised Random Walk kernel across dimensions, with
//! and without an adaptive error model layered on top of the likelihood.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::DVector;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::sync::Arc;

use yagremcmc::bayes::BayesModel;
use yagremcmc::error::Error;
use yagremcmc::forward_model::ForwardSolver;
use yagremcmc::likelihood::{AdaptiveErrorLikelihood, Dataset, GaussianLikelihood, Likelihood};
use yagremcmc::parameter::ParameterVector;
use yagremcmc::statistics::{Covariance, Gaussian, NoiseModel};
use yagremcmc::steppers::proposal::mrw::MrwProposal;
use yagremcmc::steppers::{MetropolisHastings, SteppingAlg, TransitionObserver};

struct Identity;
impl ForwardSolver for Identity {
    fn evaluate(&self, theta: &ParameterVector) -> Result<DVector<f64>, Error> {
        Ok(theta.values().clone())
    }
}

fn run_chain(dims: usize, steps: usize) {
    let mut rng = Xoshiro256Plus::seed_from_u64(0);

    let prior = Gaussian::new(
        ParameterVector::zeros(dims),
        Covariance::isotropic(1.0, dims).unwrap(),
    )
    .unwrap();
    let data = Dataset::new(vec![DVector::zeros(dims)]).unwrap();
    let noise = NoiseModel::new(Covariance::isotropic(1.0, dims).unwrap());
    let likelihood = Box::new(GaussianLikelihood::new(data, Identity, noise));
    let model = Arc::new(BayesModel::new(prior, likelihood, 1.0));

    let mut kernel =
        MetropolisHastings::new(model, MrwProposal::new(Covariance::isotropic(1.0, dims).unwrap()));

    let mut state = ParameterVector::zeros(dims);
    for _ in 0..steps {
        state = kernel.step(&mut rng, state).0;
    }
}

/// Same kernel, but with the likelihood wrapped in an [`AdaptiveErrorLikelihood`]
/// (surrogate and target both the identity map, so the correction itself is
/// trivial) subscribed as a transition observer, to measure the overhead the
/// AEM bookkeeping adds on top of a plain Gaussian likelihood.
fn run_chain_aem(dims: usize, steps: usize) {
    let mut rng = Xoshiro256Plus::seed_from_u64(0);

    let prior = Gaussian::new(
        ParameterVector::zeros(dims),
        Covariance::isotropic(1.0, dims).unwrap(),
    )
    .unwrap();
    let data = Dataset::new(vec![DVector::zeros(dims)]).unwrap();
    let base_noise = Covariance::isotropic(1.0, dims).unwrap();
    let aem = Arc::new(AdaptiveErrorLikelihood::new(
        data, Identity, Identity, base_noise, 50,
    ));
    let likelihood: Box<dyn Likelihood> = Box::new(aem.clone());
    let model = Arc::new(BayesModel::new(prior, likelihood, 1.0));

    let mut kernel = MetropolisHastings::new(
        model,
        MrwProposal::new(Covariance::isotropic(1.0, dims).unwrap()),
    )
    .with_observers(vec![aem as Arc<dyn TransitionObserver>]);

    let mut state = ParameterVector::zeros(dims);
    for _ in 0..steps {
        state = kernel.step(&mut rng, state).0;
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dimensions");

    for dims in 1..10 {
        group.bench_with_input(format!("100 steps with {} dims", dims), &dims, |b, &dims| {
            b.iter(|| run_chain(dims, 100))
        });
        group.bench_with_input(
            format!("100 steps with {} dims, AEM likelihood", dims),
            &dims,
            |b, &dims| b.iter(|| run_chain_aem(dims, 100)),
        );
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
