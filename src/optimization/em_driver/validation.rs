//! Validation helpers for EM runs.
//!
//! - **Configuration checks**: [`verify_tol_divergence`], [`verify_max_iter`],
//!   [`verify_restarts`] reject unusable settings at construction time.
//! - **Iteration checks**: [`validate_delta`] and [`validate_theta`] turn
//!   numerical breakdowns inside a sweep into typed [`OptError`] values.
use crate::{
    mixture::core::theta::Theta,
    optimization::errors::{OptError, OptResult},
};

/// Validate the divergence-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolDivergence`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_divergence(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolDivergence {
            tol,
            reason: "Divergence tolerance must be finite.",
        });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolDivergence {
            tol,
            reason: "Divergence tolerance must be strictly positive.",
        });
    }
    Ok(())
}

/// Validate the per-run iteration cap.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Validate the number of restarts.
pub fn verify_restarts(restarts: usize) -> OptResult<()> {
    if restarts == 0 {
        return Err(OptError::InvalidRestarts {
            restarts,
            reason: "At least one restart is required.",
        });
    }
    Ok(())
}

/// Reject a NaN change in divergence.
///
/// # Errors
/// Returns [`OptError::DivergedToNaN`] tagged with `iteration`.
pub fn validate_delta(delta: f64, iteration: u64) -> OptResult<()> {
    if delta.is_nan() {
        return Err(OptError::DivergedToNaN { iteration });
    }
    Ok(())
}

/// Ensure a theta is present and every parameter is finite.
///
/// # Errors
/// - [`OptError::MissingTheta`] for `None`.
/// - [`OptError::NonFiniteParameter`] naming the first non-finite parameter.
pub fn validate_theta(theta: Option<Theta>, iteration: u64) -> OptResult<Theta> {
    let theta = theta.ok_or(OptError::MissingTheta)?;
    if let Some((name, value)) = theta.first_non_finite() {
        return Err(OptError::NonFiniteParameter { iteration, name, value });
    }
    Ok(theta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Configuration checks accept sane values and reject the rest.
    //
    // Given
    // -----
    // - Tolerances 1e-5, -1, inf; caps 1 and 0; restarts 1 and 0.
    //
    // Expect
    // ------
    // - Ok for the sane values, the matching error variant otherwise.
    fn configuration_checks() {
        assert!(verify_tol_divergence(1e-5).is_ok());
        assert!(verify_tol_divergence(-1.0).is_err());
        assert!(verify_tol_divergence(f64::INFINITY).is_err());

        assert!(verify_max_iter(1).is_ok());
        assert!(verify_max_iter(0).is_err());

        assert!(verify_restarts(1).is_ok());
        assert_eq!(
            verify_restarts(0).unwrap_err(),
            OptError::InvalidRestarts { restarts: 0, reason: "At least one restart is required." }
        );
    }

    #[test]
    // Purpose
    // -------
    // NaN deltas and non-finite parameters carry the iteration number.
    //
    // Given
    // -----
    // - delta = NaN at iteration 3; theta with sigma = inf at iteration 4.
    //
    // Expect
    // ------
    // - `DivergedToNaN { 3 }` and `NonFiniteParameter { 4, "sigma", inf }`.
    fn iteration_checks_report_iteration() {
        assert!(validate_delta(0.0, 1).is_ok());
        assert!(validate_delta(f64::INFINITY, 1).is_ok());
        assert_eq!(validate_delta(f64::NAN, 3).unwrap_err(), OptError::DivergedToNaN { iteration: 3 });

        let bad = Theta::new(1.0, f64::INFINITY, 1.0, 0.5, 0.1);
        assert_eq!(
            validate_theta(Some(bad), 4).unwrap_err(),
            OptError::NonFiniteParameter { iteration: 4, name: "sigma", value: f64::INFINITY }
        );
        assert_eq!(validate_theta(None, 0).unwrap_err(), OptError::MissingTheta);
    }
}
