//! E-step, M-step, and fitted-mixture synthesis.
//!
//! Purpose
//! -------
//! Implement one Expectation-Maximization sweep for the Normal + Exponential
//! mixture over a binned histogram:
//!
//! - [`expectation_step`] turns the current [`Theta`] into per-bin
//!   responsibilities (posterior probability of the normal component).
//! - [`maximization_step`] re-estimates `(μ, σ, λ, α)` from frequency- and
//!   responsibility-weighted sufficient statistics, synthesizes the fitted
//!   mixture with [`simulate_mixture`], and scores it against the data.
//!
//! Invariants & assumptions
//! ------------------------
//! - `data` is normalized (weights sum to one), so `Σ w·r` is directly the
//!   new mixing weight.
//! - Responsibilities are aligned with `data`; misalignment is an error, not a
//!   panic.
//! - Zero denominators are not guarded. They produce non-finite parameters that
//!   the driver reports as a failed restart.
use crate::{
    histogram::{data::Histogram, divergence::kl_divergence, errors::HistResult},
    mixture::core::{
        density::{bayes, exp_pdf, normal_pdf},
        theta::Theta,
    },
};

/// Per-bin posterior probability of the normal component under `theta`.
///
/// The result carries the bins of `data`; its weights are probabilities per
/// bin and are not normalized.
pub fn expectation_step(data: &Histogram, theta: &Theta) -> Histogram {
    data.map_weights(|x, _| {
        let n = normal_pdf(x, theta.mu, theta.sigma);
        let e = exp_pdf(x, theta.lambda);
        bayes(n, e, theta.mixing_weight)
    })
}

/// Re-estimate the mixture parameters from data and responsibilities.
///
/// Sums run over aligned bins `(x_i, w_i)` of `data` and `r_i` of
/// `responsibility`:
///
/// - `μ' = Σ x·w·r / Σ w·r`
/// - `σ' = √(Σ (x − μ')²·w·r / Σ w·r)`
/// - `λ' = Σ w·(1 − r) / Σ x·w·(1 − r)`
/// - `α' = Σ w·r`
///
/// The fitted mixture is then synthesized, normalized, and scored with
/// `KL(data ‖ fitted)`. When the fitted histogram has no finite, non-zero
/// mass the divergence is NaN.
///
/// Errors
/// ------
/// - `HistError::ShapeMismatch` / `HistError::BinMismatch` when
///   `responsibility` is not aligned with `data`.
/// - `HistError::NotNormalized` when `data` is not a distribution.
pub fn maximization_step(data: &Histogram, responsibility: &Histogram) -> HistResult<Theta> {
    data.check_aligned(responsibility)?;

    let mut normal_mass = 0.0;
    let mut normal_moment = 0.0;
    let mut exp_mass = 0.0;
    let mut exp_moment = 0.0;
    for ((x, w), &r) in data.iter().zip(responsibility.weights().iter()) {
        let x = x as f64;
        normal_mass += w * r;
        normal_moment += x * w * r;
        exp_mass += w * (1.0 - r);
        exp_moment += x * w * (1.0 - r);
    }
    let mu = normal_moment / normal_mass;

    let spread: f64 = data
        .iter()
        .zip(responsibility.weights().iter())
        .map(|((x, w), &r)| (x as f64 - mu).powi(2) * w * r)
        .sum();
    let sigma = (spread / normal_mass).sqrt();
    let lambda = exp_mass / exp_moment;
    let mixing_weight = normal_mass;

    let mut fitted = simulate_mixture(responsibility, mu, sigma, lambda);
    let divergence = match fitted.normalize_in_place() {
        Ok(()) => kl_divergence(data, &fitted)?,
        Err(_) => f64::NAN,
    };

    Ok(Theta::new(mu, sigma, lambda, mixing_weight, divergence))
}

/// Unnormalized fitted mixture over the bins of `responsibility`.
///
/// Weight at bin `x_i` is `r_i·N(x_i; μ, σ) + (1 − r_i)·Exp(x_i; λ)`.
pub fn simulate_mixture(responsibility: &Histogram, mu: f64, sigma: f64, lambda: f64) -> Histogram {
    responsibility
        .map_weights(|x, r| r * normal_pdf(x, mu, sigma) + (1.0 - r) * exp_pdf(x, lambda))
}
