//! Mixture fitting options — restarts, seeding, parallelism, failure policy.
//!
//! Purpose
//! -------
//! Collect the knobs of the multi-restart search in one validated value,
//! [`FitOptions`], so front-ends (CLI, Python) map their flags onto a single
//! type and the search never sees an unusable configuration.
//!
//! Conventions
//! -----------
//! - `seed: None` draws a fresh seed from OS entropy; the seed actually used
//!   is reported back on the fit so any run can be reproduced.
//! - Parallel and sequential execution produce identical results for the same
//!   seed.
use crate::optimization::{
    em_driver::{traits::EmTolerances, validation::verify_restarts},
    errors::{OptError, OptResult},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Number of independent EM restarts in the reference behavior.
pub const DEFAULT_RESTARTS: usize = 100;

/// What the search does when a single restart fails numerically.
///
/// Variants:
/// - `Skip`: discard the failed restart and continue (default).
/// - `Abort`: the failure of any restart fails the whole search; the lowest
///   failing restart index determines the reported error.
///
/// Parsing:
/// `FromStr` accepts case-insensitive `"skip"` and `"abort"`; anything else
/// returns `OptError::InvalidFailurePolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Skip,
    Abort,
}

impl FromStr for FailurePolicy {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::Skip),
            "abort" => Ok(FailurePolicy::Abort),
            _ => Err(OptError::InvalidFailurePolicy {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'skip' or 'abort'.",
            }),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Skip => write!(f, "skip"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Search-level configuration.
///
/// Fields:
/// - `tols: EmTolerances`: per-restart tolerance and iteration cap.
/// - `restarts: usize`: number of independent restarts (`>= 1`).
/// - `seed: Option<u64>`: base seed; restart `k` draws from stream `k`.
/// - `parallel: bool`: run restarts on the rayon pool.
/// - `failure_policy: FailurePolicy`: skip or abort on a failed restart.
/// - `verbose: bool`: attach the per-iteration observer (feature `obs_slog`).
///
/// Default:
/// - tolerance 1e-5, cap 10 000, 100 restarts, fresh seed, parallel, skip,
///   quiet.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub tols: EmTolerances,
    pub restarts: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub failure_policy: FailurePolicy,
    pub verbose: bool,
}

impl FitOptions {
    /// Create validated search options.
    ///
    /// # Errors
    /// - `OptError::InvalidRestarts` if `restarts == 0`.
    pub fn new(
        tols: EmTolerances, restarts: usize, seed: Option<u64>, parallel: bool,
        failure_policy: FailurePolicy, verbose: bool,
    ) -> OptResult<Self> {
        verify_restarts(restarts)?;
        Ok(Self { tols, restarts, seed, parallel, failure_policy, verbose })
    }

    /// Copy of these options with a fixed seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tols: EmTolerances::default(),
            restarts: DEFAULT_RESTARTS,
            seed: None,
            parallel: true,
            failure_policy: FailurePolicy::Skip,
            verbose: false,
        }
    }
}
