//! Normal + Exponential mixture as an EM model.
//!
//! [`MixtureModel`] plugs the E-step and M-step from
//! [`crate::mixture::core::steps`] into the generic driver by implementing
//! [`ExpectationMaximization`] over a normalized [`Histogram`].
use crate::{
    histogram::{data::Histogram, errors::HistError},
    mixture::core::{
        steps::{expectation_step, maximization_step},
        theta::Theta,
    },
    optimization::{
        em_driver::traits::ExpectationMaximization,
        errors::{OptError, OptResult},
    },
};

/// Two-component mixture: one Gaussian, one Exponential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MixtureModel;

impl MixtureModel {
    pub fn new() -> Self {
        MixtureModel
    }
}

impl ExpectationMaximization for MixtureModel {
    type Data = Histogram;
    type Latent = Histogram;

    fn expectation(&self, theta: &Theta, data: &Histogram) -> OptResult<Histogram> {
        Ok(expectation_step(data, theta))
    }

    fn maximization(&self, data: &Histogram, responsibility: &Histogram) -> OptResult<Theta> {
        Ok(maximization_step(data, responsibility)?)
    }

    /// Reject empty or unnormalized data before the first sweep.
    ///
    /// The starting theta is not checked: random draws are finite by
    /// construction and any later breakdown is reported by the driver.
    fn check(&self, _theta: &Theta, data: &Histogram) -> OptResult<()> {
        if data.is_empty() {
            return Err(OptError::Histogram(HistError::EmptyHistogram));
        }
        if !data.is_normalized() {
            return Err(OptError::Histogram(HistError::NotNormalized {
                total: data.total_mass(),
            }));
        }
        Ok(())
    }
}
