//! Online, elementwise mean/variance accumulation over accepted states,
//! following Welford's one-pass update.

use nalgebra::DVector;

pub struct WelfordAccumulator {
    n: usize,
    mean: DVector<f64>,
    m2: DVector<f64>,
}

impl WelfordAccumulator {
    pub fn new(dim: usize) -> Self {
        Self {
            n: 0,
            mean: DVector::zeros(dim),
            m2: DVector::zeros(dim),
        }
    }

    pub fn push(&mut self, x: &DVector<f64>) {
        self.n += 1;
        let delta = x - &self.mean;
        self.mean += &delta / (self.n as f64);
        let delta2 = x - &self.mean;
        self.m2 += delta.component_mul(&delta2);
    }

    pub fn count(&self) -> usize {
        self.n
    }

    pub fn mean(&self) -> &DVector<f64> {
        &self.mean
    }

    /// Elementwise unbiased variance, `M2 / (n - 1)`. Zero before two
    /// observations have been pushed.
    pub fn variance(&self) -> DVector<f64> {
        if self.n < 2 {
            DVector::zeros(self.mean.len())
        } else {
            &self.m2 / ((self.n - 1) as f64)
        }
    }
}
