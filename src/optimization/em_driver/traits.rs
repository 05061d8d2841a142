//! Public API surface for Expectation-Maximization runs.
//!
//! - [`ExpectationMaximization`]: trait a mixture model implements.
//! - [`EmTolerances`]: convergence tolerance and iteration cap.
//! - [`EmOutcome`]: normalized result of a single EM run.
//!
//! Convention: an EM run is scored by the divergence carried on [`Theta`].
//! The run converges when two consecutive sweeps change it by less than the
//! tolerance; the divergence itself is never required to reach a target.
use crate::{
    mixture::core::theta::Theta,
    optimization::{
        em_driver::validation::{validate_theta, verify_max_iter, verify_tol_divergence},
        errors::OptResult,
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// Default divergence-change tolerance.
pub const DEFAULT_TOL_DIVERGENCE: f64 = 1e-5;

/// Default iteration cap for a single EM run.
pub const DEFAULT_MAX_ITER: usize = 10_000;

/// User-implemented EM model.
///
/// - `type Data`: observed data carried into both steps.
/// - `type Latent`: the E-step output (responsibilities) consumed by the
///   following M-step.
///
/// Required:
/// - `expectation(&Theta, &Data) -> OptResult<Latent>`: posterior of the
///   latent assignment under the current parameters.
/// - `maximization(&Data, &Latent) -> OptResult<Theta>`: re-estimated
///   parameters, including the divergence of the fitted model.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook called once
///   before the first sweep.
pub trait ExpectationMaximization {
    type Data;
    type Latent;

    fn expectation(&self, theta: &Theta, data: &Self::Data) -> OptResult<Self::Latent>;
    fn maximization(&self, data: &Self::Data, latent: &Self::Latent) -> OptResult<Theta>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    /// One full sweep: E-step followed by M-step.
    fn sweep(&self, theta: &Theta, data: &Self::Data) -> OptResult<Theta> {
        let latent = self.expectation(theta, data)?;
        self.maximization(data, &latent)
    }
}

/// Convergence tolerance and iteration cap for a single EM run.
///
/// - `tol_divergence`: converge when `|Δ divergence| < tol_divergence`.
/// - `max_iter`: hard cap on the number of sweeps; reaching it yields a
///   non-converged [`EmOutcome`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmTolerances {
    pub tol_divergence: f64,
    pub max_iter: usize,
}

impl EmTolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolDivergence`](crate::optimization::errors::OptError::InvalidTolDivergence)
    ///   for a non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`](crate::optimization::errors::OptError::InvalidMaxIter)
    ///   if `max_iter == 0`.
    pub fn new(tol_divergence: f64, max_iter: usize) -> OptResult<Self> {
        verify_tol_divergence(tol_divergence)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol_divergence, max_iter })
    }
}

impl Default for EmTolerances {
    fn default() -> Self {
        Self { tol_divergence: DEFAULT_TOL_DIVERGENCE, max_iter: DEFAULT_MAX_ITER }
    }
}

/// Canonical result of a single EM run.
///
/// - `theta`: parameters after the last sweep.
/// - `converged`: `true` only when the solver reported convergence; a run
///   stopped by the iteration cap is not converged.
/// - `status`: human-readable termination status.
/// - `iterations`: number of sweeps performed.
#[derive(Debug, Clone, PartialEq)]
pub struct EmOutcome {
    pub theta: Theta,
    pub converged: bool,
    pub status: String,
    pub iterations: u64,
}

impl EmOutcome {
    /// Build a validated [`EmOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - `OptError::MissingTheta` when the state holds no parameter.
    /// - `OptError::NonFiniteParameter` when a parameter is not finite.
    pub fn new(
        theta_opt: Option<Theta>, termination: TerminationStatus, iterations: u64,
    ) -> OptResult<Self> {
        let theta = validate_theta(theta_opt, iterations)?;
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        let status = match termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        Ok(Self { theta, converged, status, iterations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;

    #[test]
    // Purpose
    // -------
    // Default tolerances carry the reference constants.
    //
    // Given
    // -----
    // - `EmTolerances::default()`.
    //
    // Expect
    // ------
    // - tol 1e-5, cap 10 000, and the defaults pass validation.
    fn default_tolerances_match_reference_constants() {
        let tols = EmTolerances::default();

        assert_eq!(tols.tol_divergence, 1e-5);
        assert_eq!(tols.max_iter, 10_000);
        assert_eq!(EmTolerances::new(tols.tol_divergence, tols.max_iter).unwrap(), tols);
    }

    #[test]
    // Purpose
    // -------
    // Invalid tolerances are rejected.
    //
    // Given
    // -----
    // - tol = 0, tol = NaN, max_iter = 0.
    //
    // Expect
    // ------
    // - `InvalidTolDivergence` twice, then `InvalidMaxIter`.
    fn invalid_tolerances_are_rejected() {
        assert!(matches!(
            EmTolerances::new(0.0, 10).unwrap_err(),
            OptError::InvalidTolDivergence { .. }
        ));
        assert!(matches!(
            EmTolerances::new(f64::NAN, 10).unwrap_err(),
            OptError::InvalidTolDivergence { .. }
        ));
        assert!(matches!(
            EmTolerances::new(1e-5, 0).unwrap_err(),
            OptError::InvalidMaxIter { max_iter: 0, .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Only solver convergence counts as converged.
    //
    // Given
    // -----
    // - A finite theta with `SolverConverged` and with `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged` true for the first, false for the second.
    fn outcome_distinguishes_convergence_from_cap() {
        let theta = Theta::new(1.0, 1.0, 1.0, 0.5, 0.1);

        let done = EmOutcome::new(
            Some(theta),
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
        )
        .unwrap();
        let capped = EmOutcome::new(
            Some(theta),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            50,
        )
        .unwrap();

        assert!(done.converged);
        assert!(!capped.converged);
        assert_eq!(capped.iterations, 50);
        assert!(EmOutcome::new(None, TerminationStatus::NotTerminated, 0).is_err());
    }
}
