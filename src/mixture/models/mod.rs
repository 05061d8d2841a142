//! Mixture models and the multi-restart search.
//!
//! - [`mixture_model`]: [`mixture_model::MixtureModel`], the Normal +
//!   Exponential mixture as an EM model for the generic driver.
//! - [`restart`]: seeded initialization and execution of one restart.
//! - [`search`]: [`search::find_theta`], the parallel restart map with its
//!   ordered reduction, and the [`search::MixtureFit`] report.

pub mod mixture_model;
pub mod restart;
pub mod search;
