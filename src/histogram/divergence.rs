//! Kullback–Leibler divergence between two index-aligned histograms.
//!
//! The divergence is the goodness-of-fit score of the EM search and its
//! convergence signal. Both inputs must already be probability distributions
//! over the same bins; the checks below run in every build profile.
use crate::histogram::{
    data::Histogram,
    errors::{HistError, HistResult},
};

/// Directed KL divergence `D(real ‖ model) = Σ real·ln(real / model)`.
///
/// Bins where either weight is exactly zero contribute nothing
/// (`0·ln(0/x) = 0`).
///
/// Errors
/// ------
/// - `HistError::ShapeMismatch` / `HistError::BinMismatch` when the two
///   histograms are not index-aligned.
/// - `HistError::NotNormalized` when either input does not sum to one within
///   [`NORMALIZATION_TOL`](crate::histogram::data::NORMALIZATION_TOL).
pub fn kl_divergence(real: &Histogram, model: &Histogram) -> HistResult<f64> {
    real.check_aligned(model)?;
    for histogram in [real, model] {
        if !histogram.is_normalized() {
            return Err(HistError::NotNormalized { total: histogram.total_mass() });
        }
    }

    let value = real
        .weights()
        .iter()
        .zip(model.weights().iter())
        .filter(|&(&p, &q)| p != 0.0 && q != 0.0)
        .map(|(&p, &q)| p * (p / q).ln())
        .sum::<f64>();
    Ok(value)
}
