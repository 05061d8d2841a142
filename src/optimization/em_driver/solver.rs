//! EM as an `argmin` solver.
//!
//! [`EmProblem`] bridges an [`ExpectationMaximization`] model and its data to
//! `argmin`'s `Problem`, and [`EmSolver`] performs one E-step + M-step sweep
//! per `argmin` iteration. The state's cost is the divergence of the current
//! theta, so observers and best-parameter tracking see the fit quality.
//!
//! Iteration `k` (1-based):
//! 1. `new = sweep(theta)`.
//! 2. `delta = |theta.divergence − new.divergence|`; NaN fails the run with
//!    `DivergedToNaN`.
//! 3. Any non-finite parameter in `new` fails the run with
//!    `NonFiniteParameter`.
//! 4. `theta ← new`; the run terminates as converged once `delta < tol`.
//!
//! The iteration cap is `argmin`'s `max_iters`; hitting it terminates with
//! `MaxItersReached`.
use crate::{
    mixture::core::theta::Theta,
    optimization::{
        em_driver::{
            traits::ExpectationMaximization,
            validation::{validate_delta, validate_theta},
        },
        errors::OptError,
    },
};
use argmin::core::{
    Error, IterState, KV, Problem, Solver, State, TerminationReason, TerminationStatus,
};
use serde::{Deserialize, Serialize};

/// State type used by the EM solver: parameter `Theta`, no derivatives.
pub type EmState = IterState<Theta, (), (), (), (), f64>;

/// Bridges a user model and its data into an `argmin` problem.
pub struct EmProblem<'a, M: ExpectationMaximization> {
    pub model: &'a M,
    pub data: &'a M::Data,
}

impl<'a, M: ExpectationMaximization> EmProblem<'a, M> {
    pub fn new(model: &'a M, data: &'a M::Data) -> Self {
        Self { model, data }
    }

    fn sweep(&self, theta: &Theta) -> Result<Theta, Error> {
        Ok(self.model.sweep(theta, self.data)?)
    }
}

/// Fixed-point EM iteration with a divergence-change stopping rule.
///
/// `last_delta` starts at infinity and holds the most recent
/// `|Δ divergence|`; termination compares it to `tol_divergence`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmSolver {
    tol_divergence: f64,
    last_delta: f64,
}

impl EmSolver {
    pub fn new(tol_divergence: f64) -> Self {
        Self { tol_divergence, last_delta: f64::INFINITY }
    }

    /// Most recent `|Δ divergence|` (infinite before the first sweep).
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    /// `true` once the last sweep changed the divergence by less than the
    /// tolerance.
    pub fn is_converged(&self) -> bool {
        self.last_delta < self.tol_divergence
    }
}

impl<'a, M: ExpectationMaximization> Solver<EmProblem<'a, M>, EmState> for EmSolver {
    const NAME: &'static str = "Expectation-Maximization";

    fn init(
        &mut self, _problem: &mut Problem<EmProblem<'a, M>>, state: EmState,
    ) -> Result<(EmState, Option<KV>), Error> {
        let theta = state.get_param().ok_or(OptError::MissingTheta)?;
        let divergence = theta.divergence;
        self.last_delta = f64::INFINITY;
        Ok((state.cost(divergence), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<EmProblem<'a, M>>, mut state: EmState,
    ) -> Result<(EmState, Option<KV>), Error> {
        let iteration = state.get_iter() + 1;
        let theta = state.take_param().ok_or(OptError::MissingTheta)?;

        let next = problem.problem("sweep_count", |em| em.sweep(&theta))?;
        let delta = (theta.divergence - next.divergence).abs();
        validate_delta(delta, iteration)?;
        let next = validate_theta(Some(next), iteration)?;

        self.last_delta = delta;
        let divergence = next.divergence;
        Ok((state.param(next).cost(divergence), None))
    }

    fn terminate(&mut self, _state: &EmState) -> TerminationStatus {
        if self.is_converged() {
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        } else {
            TerminationStatus::NotTerminated
        }
    }
}
