//! Multi-restart EM search.
//!
//! Purpose
//! -------
//! Guard the EM fit against local optima by running many independent restarts
//! and keeping the one whose fitted mixture is closest to the data in KL
//! divergence.
//!
//! Key behaviors
//! -------------
//! - Normalize the data once; every restart reads the same normalized
//!   histogram.
//! - Map restarts in parallel (rayon) or sequentially, then reduce in restart
//!   order: the strictly smallest divergence wins and ties go to the lowest
//!   restart index, so the result does not depend on scheduling.
//! - Apply the [`FailurePolicy`] to restarts that fail numerically; restarts
//!   that hit the iteration cap never win but do not fail the search.
//!
//! Logging
//! -------
//! `debug!` per restart outcome, including discarded ones, and one `info!`
//! summary per search carrying the converged, failed and capped counts.
//! `warn!` is reserved for a failure that aborts the search.
use crate::{
    histogram::{data::Histogram, reader::read_histogram},
    mixture::{
        core::{
            options::{FailurePolicy, FitOptions},
            theta::Theta,
        },
        models::restart::run_restart,
    },
    optimization::{
        em_driver::traits::EmOutcome,
        errors::{OptError, OptResult},
    },
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// MixtureFit — best parameters plus a report of the search that found them.
///
/// Fields
/// ------
/// - `theta`: winning parameters; `theta.divergence` is its KL score.
/// - `restarts`: number of restarts run.
/// - `converged`: restarts that converged.
/// - `failed`: restarts discarded after a numerical failure.
/// - `capped`: restarts that reached the iteration cap.
/// - `seed`: seed actually used, including one drawn from entropy.
/// - `best_restart`: index of the winning restart.
/// - `iterations`: EM sweeps of the winning restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixtureFit {
    pub theta: Theta,
    pub restarts: usize,
    pub converged: usize,
    pub failed: usize,
    pub capped: usize,
    pub seed: u64,
    pub best_restart: usize,
    pub iterations: u64,
}

impl MixtureFit {
    /// One-line `key=value` summary of the fitted parameters.
    pub fn summary_line(&self) -> String {
        let t = &self.theta;
        format!(
            "mu={} sigma={} lambda={} mix={} divergence={}",
            t.mu, t.sigma, t.lambda, t.mixing_weight, t.divergence
        )
    }
}

/// Fit the mixture to `data` with `opts.restarts` independent EM restarts.
///
/// Errors
/// ------
/// - `OptError::Histogram(ZeroMass)` when `data` cannot be normalized.
/// - With `FailurePolicy::Abort`, the error of the lowest failing restart.
/// - `OptError::NoConvergedRestart` when no restart converged.
pub fn find_theta(data: &Histogram, opts: &FitOptions) -> OptResult<MixtureFit> {
    let normalized = data.normalize()?;
    let seed = opts.seed.unwrap_or_else(rand::random::<u64>);
    let tols = opts.tols;

    let run = |index: usize| run_restart(&normalized, seed, index, &tols, opts.verbose);
    let outcomes: Vec<OptResult<EmOutcome>> = if opts.parallel {
        (0..opts.restarts).into_par_iter().map(run).collect()
    } else {
        (0..opts.restarts).map(run).collect()
    };

    let fit = reduce_outcomes(outcomes, seed, opts.failure_policy)?;
    info!(
        restarts = fit.restarts,
        converged = fit.converged,
        failed = fit.failed,
        capped = fit.capped,
        seed = fit.seed,
        best_restart = fit.best_restart,
        divergence = fit.theta.divergence,
        "mixture search finished"
    );
    Ok(fit)
}

/// Read a histogram file and fit it.
pub fn fit_histogram_file<P: AsRef<Path>>(path: P, opts: &FitOptions) -> OptResult<MixtureFit> {
    let data = read_histogram(path)?;
    find_theta(&data, opts)
}

/// Reduce per-restart outcomes, given in restart order, into the best fit.
///
/// A candidate replaces the incumbent only when its divergence is strictly
/// smaller, so the first restart wins ties. Discarded restarts are logged at
/// debug level and counted on the report; only an aborting failure warns.
pub fn reduce_outcomes(
    outcomes: Vec<OptResult<EmOutcome>>, seed: u64, policy: FailurePolicy,
) -> OptResult<MixtureFit> {
    let restarts = outcomes.len();
    let mut best: Option<(usize, EmOutcome)> = None;
    let (mut converged, mut failed, mut capped) = (0, 0, 0);

    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(out) if out.converged => {
                converged += 1;
                debug!(
                    restart = index,
                    iterations = out.iterations,
                    divergence = out.theta.divergence,
                    "restart converged"
                );
                let improves = best.as_ref().map_or(true, |(_, incumbent)| {
                    out.theta.divergence < incumbent.theta.divergence
                });
                if improves {
                    best = Some((index, out));
                }
            }
            Ok(out) => {
                capped += 1;
                debug!(
                    restart = index,
                    iterations = out.iterations,
                    status = %out.status,
                    "restart reached the iteration cap, discarded"
                );
            }
            Err(err) => match policy {
                FailurePolicy::Abort => {
                    warn!(restart = index, error = %err, "restart failed, aborting search");
                    return Err(err);
                }
                FailurePolicy::Skip => {
                    failed += 1;
                    debug!(restart = index, error = %err, "restart failed, discarded");
                }
            },
        }
    }

    let (best_restart, out) =
        best.ok_or(OptError::NoConvergedRestart { restarts, failed, capped })?;
    Ok(MixtureFit {
        theta: out.theta,
        restarts,
        converged,
        failed,
        capped,
        seed,
        best_restart,
        iterations: out.iterations,
    })
}
