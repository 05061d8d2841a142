//! optimization — EM driver and unified error surface.
//!
//! Purpose
//! -------
//! Provide the iteration machinery for model fitting: an `argmin`-backed
//! Expectation-Maximization runner and a single error/result surface shared
//! with the search layer. Callers implement an EM model, choose tolerances,
//! and obtain the final parameters and diagnostics without touching backend
//! solver details.
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return `OptResult<T>`; callers never see
//!   raw `argmin` errors.
//! - This module and its submodules do not log; the search layer reports
//!   per-restart outcomes.
//!
//! Downstream usage
//! ----------------
//! - `mixture::models` implements [`em_driver::ExpectationMaximization`] for
//!   the Normal + Exponential mixture and calls [`em_driver::run_em`] once per
//!   restart.
//! - Front-ends import `optimization::prelude::*`.

pub mod em_driver;
pub mod errors;

pub mod prelude {
    pub use super::em_driver::prelude::*;
    pub use super::errors::{OptError, OptResult};
}
