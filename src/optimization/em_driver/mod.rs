//! em_driver — argmin-powered Expectation-Maximization runner.
//!
//! Purpose
//! -------
//! Run a single EM fit from one starting point: alternate E-steps and M-steps
//! until the divergence carried on the parameters stops changing, with an
//! explicit iteration cap. Callers implement [`ExpectationMaximization`] and
//! invoke [`run_em`].
//!
//! Key behaviors
//! -------------
//! - Express one E + M sweep as an `argmin` iteration ([`solver::EmSolver`])
//!   so the executor supplies iteration counting, the cap, termination status,
//!   and optional observers.
//! - Turn NaN divergence changes and non-finite parameters into typed errors
//!   carrying the iteration number ([`validation`]).
//! - Report the run as an [`EmOutcome`] that distinguishes convergence from
//!   reaching the cap.
//!
//! Invariants & assumptions
//! ------------------------
//! - The divergence on the starting theta is a sentinel, so the first sweep
//!   never converges on its own for realistic fits.
//! - [`EmTolerances`] are validated on construction and trusted afterwards.
//!
//! Testing notes
//! -------------
//! - Unit tests drive the solver and the runner on toy models whose divergence
//!   sequence is known in closed form; the mixture model itself is exercised
//!   in `mixture` and in the integration tests.

pub mod run;
pub mod solver;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::run::run_em;
pub use self::solver::{EmProblem, EmSolver, EmState};
pub use self::traits::{
    DEFAULT_MAX_ITER, DEFAULT_TOL_DIVERGENCE, EmOutcome, EmTolerances, ExpectationMaximization,
};

pub mod prelude {
    pub use super::run::run_em;
    pub use super::traits::{EmOutcome, EmTolerances, ExpectationMaximization};
}
