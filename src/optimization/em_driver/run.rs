//! Execution helper that runs the EM solver on a model and returns a
//! crate-friendly [`EmOutcome`].
use crate::{
    mixture::core::theta::Theta,
    optimization::{
        em_driver::{
            solver::{EmProblem, EmSolver},
            traits::{EmOutcome, EmTolerances, ExpectationMaximization},
        },
        errors::OptResult,
    },
};
use argmin::core::{Executor, State};

/// Run EM from `theta0` until the divergence stabilizes or the cap is hit.
///
/// Wires up the model via [`EmProblem`], an [`EmSolver`] with
/// `tols.tol_divergence`, the initial theta, the iteration cap, and
/// optionally a terminal observer, then converts the final state.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `verbose == true`, a terminal slog
/// observer is attached with `ObserverMode::Always` and a one-time line logs
/// the starting theta.
///
/// # Returns
/// An [`EmOutcome`] holding the theta of the last sweep. Reaching
/// `tols.max_iter` without converging is not an error; the outcome reports
/// `converged == false`.
///
/// # Errors
/// - Whatever [`ExpectationMaximization::check`] rejects before the first sweep.
/// - `OptError::DivergedToNaN` / `OptError::NonFiniteParameter` from a sweep.
/// - Any model error raised inside a sweep, recovered intact.
/// - Backend `argmin` errors via `From<argmin::core::Error>`.
pub fn run_em<M>(
    model: &M, data: &M::Data, theta0: Theta, tols: &EmTolerances, verbose: bool,
) -> OptResult<EmOutcome>
where
    M: ExpectationMaximization,
{
    model.check(&theta0, data)?;

    #[cfg(feature = "obs_slog")]
    if verbose {
        eprintln!(
            "init: mu = {:.6}, sigma = {:.6}, lambda = {:.6}, mix = {:.6}",
            theta0.mu, theta0.sigma, theta0.lambda, theta0.mixing_weight
        );
    }
    #[cfg(not(feature = "obs_slog"))]
    let _ = verbose;

    let problem = EmProblem::new(model, data);
    let solver = EmSolver::new(tols.tol_divergence);
    let max_iter = tols.max_iter as u64;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let termination = result.get_termination_status().clone();
    EmOutcome::new(result.take_param(), termination, iterations)
}
