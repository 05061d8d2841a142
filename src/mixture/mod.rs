//! mixture — Normal + Exponential mixture fitting by multi-restart EM.
//!
//! Purpose
//! -------
//! Estimate `(μ, σ, λ, α)` of `α·Normal(μ, σ) + (1 − α)·Exponential(λ)` for a
//! binned histogram. EM runs from many random starting points and the run
//! whose fitted mixture has the lowest KL divergence from the data wins.
//!
//! Key behaviors
//! -------------
//! - E-step: per-bin posterior probability of the normal component.
//! - M-step: frequency- and responsibility-weighted re-estimation, followed by
//!   synthesis of the fitted mixture and KL scoring.
//! - Convergence: `|Δ divergence| < tol` between consecutive sweeps, bounded
//!   by an iteration cap.
//! - Search: independent seeded restarts, run in parallel, reduced in restart
//!   order.
//!
//! Invariants & assumptions
//! ------------------------
//! - All histograms in one fit share the bin column of the data; algorithms
//!   index them positionally.
//! - Invalid numerics (σ ≤ 0, zero denominators) are never clamped. They
//!   surface as non-finite values and the driver reports the restart as
//!   failed.
//!
//! Downstream usage
//! ----------------
//! - Call [`models::search::find_theta`] with a [`Histogram`](crate::histogram::Histogram)
//!   and [`core::options::FitOptions`], or
//!   [`models::search::fit_histogram_file`] with a path.
//! - The building blocks in [`core`] are public for callers that need a
//!   single E-step or M-step.

pub mod core;
pub mod models;

pub mod prelude {
    pub use super::core::{
        density::{bayes, exp_pdf, normal_pdf},
        options::{FailurePolicy, FitOptions},
        steps::{expectation_step, maximization_step, simulate_mixture},
        theta::Theta,
    };
    pub use super::models::{
        mixture_model::MixtureModel,
        search::{MixtureFit, find_theta, fit_histogram_file},
    };
}
