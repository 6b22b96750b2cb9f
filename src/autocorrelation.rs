//! Integrated autocorrelation time (IAT) estimation and the thinning step
//! derived from it.
//!
//! Uses Sokal's adaptive-window estimator: the autocovariance is computed
//! by zero-padded FFT (cheaper than the direct O(n^2) sum for long
//! chains), the normalised autocorrelation function rho_t is integrated
//! into a running estimate tau(M), and the window M is grown until it
//! first satisfies Sokal's self-consistency criterion `M >= c * tau(M)`.

use log::warn;
use rustfft::{num_complex::Complex, FftPlanner};

/// How a per-coordinate IAT estimate is reduced to a single scalar for a
/// multivariate chain.
#[derive(Clone, Copy, Debug)]
pub enum Reduction {
    Mean,
    Max,
}

/// Sokal's constant: the window is accepted once it is at least `C` times
/// the running IAT estimate.
const SOKAL_C: f64 = 5.0;

/// Estimate the IAT of a single coordinate's trajectory. Returns `None`
/// (a degenerate chain) if the series is too short or has zero variance,
/// in which case the caller should fall back to no thinning.
pub fn integrated_autocorrelation_time(series: &[f64]) -> Option<f64> {
    let n = series.len();
    if n < 4 {
        return None;
    }
    let acf = autocorrelation_function(series)?;

    let max_window = acf.len() - 1;
    let mut tau = 1.0;
    for m in 1..=max_window {
        tau += 2.0 * acf[m];
        if (m as f64) >= SOKAL_C * tau {
            return Some(tau);
        }
    }
    // No window satisfied the self-consistency criterion within the
    // available lags; the series is too short relative to its own
    // correlation length to trust a Sokal estimate.
    None
}

/// Reduce per-coordinate IAT estimates for a multivariate chain. Missing
/// (degenerate) coordinates are excluded; if every coordinate is
/// degenerate, returns `None`.
pub fn reduce(coordinate_series: &[Vec<f64>], reduction: Reduction) -> Option<f64> {
    let estimates: Vec<f64> = coordinate_series
        .iter()
        .filter_map(|s| integrated_autocorrelation_time(s))
        .collect();
    if estimates.is_empty() {
        return None;
    }
    Some(match reduction {
        Reduction::Mean => estimates.iter().sum::<f64>() / estimates.len() as f64,
        Reduction::Max => estimates.iter().cloned().fold(f64::MIN, f64::max),
    })
}

/// The thinning step implied by an IAT estimate, `max(1, ceil(tau))`. When
/// the estimator could not converge (a degenerate chain), logs a warning
/// and falls back to `chain_len / 50`, per the documented degenerate-chain
/// policy, rather than silently disabling thinning.
pub fn thinning_step(tau: Option<f64>, chain_len: usize) -> usize {
    match tau {
        Some(tau) if tau.is_finite() && tau > 0.0 => tau.ceil().max(1.0) as usize,
        _ => {
            let fallback = (chain_len / 50).max(1);
            warn!(
                "integrated autocorrelation time did not converge (degenerate chain); \
                 falling back to thinning = chain_len / 50 = {}",
                fallback
            );
            fallback
        }
    }
}

/// FFT-accelerated biased autocovariance, normalised to the correlation
/// function `rho_t = gamma_t / gamma_0`. Returns `None` if the series has
/// zero variance (`gamma_0 == 0`).
fn autocorrelation_function(series: &[f64]) -> Option<Vec<f64>> {
    let n = series.len();
    let mean = series.iter().sum::<f64>() / n as f64;

    // Zero-pad to at least twice the length so the circular convolution
    // FFT computes matches the linear autocovariance.
    let padded_len = (2 * n).next_power_of_two();
    let mut buffer: Vec<Complex<f64>> = series
        .iter()
        .map(|&x| Complex::new(x - mean, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)).take(padded_len - n))
        .collect();

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(padded_len);
    forward.process(&mut buffer);

    for c in buffer.iter_mut() {
        *c = *c * c.conj();
    }

    let inverse = planner.plan_fft_inverse(padded_len);
    inverse.process(&mut buffer);

    let gamma_0 = buffer[0].re / (padded_len as f64 * n as f64);
    if gamma_0 <= 0.0 {
        return None;
    }

    let rho: Vec<f64> = (0..n)
        .map(|t| buffer[t].re / (padded_len as f64 * n as f64) / gamma_0)
        .collect();
    Some(rho)
}
