//! optimization::errors — unified error surface for the EM driver and the
//! multi-restart search.
//!
//! Purpose
//! -------
//! Collect configuration mistakes, numerical failures of a single EM run,
//! search-level outcomes, histogram errors, and backend `argmin` errors into
//! one enum, [`OptError`], with the [`OptResult`] alias.
//!
//! Conventions
//! -----------
//! - `iteration` fields are 1-based EM sweep numbers within one restart.
//! - Errors raised inside the argmin solver travel through `argmin::core::Error`
//!   and are recovered intact by the `From<Error>` conversion below.
use argmin::core::{ArgminError, Error};

use crate::histogram::errors::HistError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for fitting operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptError {
    // ---- EmTolerances / FitOptions ----
    /// Divergence-change tolerance needs to be positive and finite.
    #[error("Invalid divergence tolerance {tol}: {reason}")]
    InvalidTolDivergence { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Number of restarts needs to be positive.
    #[error("Invalid number of restarts {restarts}: {reason}")]
    InvalidRestarts { restarts: usize, reason: &'static str },

    /// Unknown failure-policy name.
    #[error("Invalid failure policy '{name}': {reason}")]
    InvalidFailurePolicy { name: String, reason: &'static str },

    // ---- EM iteration ----
    /// The change in divergence between two sweeps is NaN.
    #[error("Divergence became NaN at EM iteration {iteration}")]
    DivergedToNaN { iteration: u64 },

    /// An M-step produced a non-finite parameter.
    #[error("Non-finite parameter {name} = {value} at EM iteration {iteration}")]
    NonFiniteParameter { iteration: u64, name: &'static str, value: f64 },

    /// The solver state lost its parameter.
    #[error("Missing parameter set (theta) in solver state")]
    MissingTheta,

    // ---- Multi-restart search ----
    /// Every restart failed or hit the iteration cap.
    #[error(
        "No restart converged: {restarts} restarts run, {failed} failed, {capped} reached the iteration cap"
    )]
    NoConvergedRestart { restarts: usize, failed: usize, capped: usize },

    // ---- Histogram ----
    #[error(transparent)]
    Histogram(#[from] HistError),

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    #[error("Invalid parameter: {text}")]
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckpointNotFound
    #[error("Checkpoint not found: {text}")]
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    #[error("Impossible error: {text}")]
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    #[error("Backend error: {text}")]
    BackendError { text: String },

    // ---- Fallback ----
    #[error("Unknown error")]
    UnknownError,
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(format!("OptError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of `OptError` values raised inside the argmin solver.
    // - Mapping of `ArgminError` variants and foreign errors.
    // - Wrapping of `HistError`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An `OptError` boxed into `argmin::core::Error` comes back unchanged.
    //
    // Given
    // -----
    // - `DivergedToNaN { iteration: 7 }` converted into `Error`.
    //
    // Expect
    // ------
    // - The same variant after `OptError::from`.
    fn opt_error_round_trips_through_argmin_error() {
        let boxed: Error = OptError::DivergedToNaN { iteration: 7 }.into();

        assert_eq!(OptError::from(boxed), OptError::DivergedToNaN { iteration: 7 });
    }

    #[test]
    // Purpose
    // -------
    // Backend errors map onto the wrapper variants.
    //
    // Given
    // -----
    // - An `ArgminError::NotInitialized` and an arbitrary foreign error.
    //
    // Expect
    // ------
    // - `NotInitialized { text }` and `BackendError { text }` respectively.
    fn argmin_and_foreign_errors_are_wrapped() {
        let not_init: Error = ArgminError::NotInitialized { text: "param".to_string() }.into();
        assert_eq!(
            OptError::from(not_init),
            OptError::NotInitialized { text: "param".to_string() }
        );

        let foreign: Error = std::io::Error::other("disk on fire").into();
        assert!(matches!(OptError::from(foreign), OptError::BackendError { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Histogram errors keep their message when wrapped.
    //
    // Given
    // -----
    // - `HistError::EmptyHistogram`.
    //
    // Expect
    // ------
    // - `OptError::Histogram` with the same `Display`.
    fn histogram_errors_are_wrapped_transparently() {
        let err: OptError = HistError::EmptyHistogram.into();

        assert_eq!(err.to_string(), HistError::EmptyHistogram.to_string());
        assert!(matches!(err, OptError::Histogram(HistError::EmptyHistogram)));
    }
}
