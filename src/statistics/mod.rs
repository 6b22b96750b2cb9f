//! Probability objects shared by every level of the model hierarchy:
//! covariance operators, the Gaussian prior/proposal law, and the centred
//! Gaussian noise model.

pub mod covariance;
pub mod gaussian;
pub mod noise;

pub use covariance::Covariance;
pub use gaussian::Gaussian;
pub use noise::NoiseModel;
