//! Core building blocks for Normal + Exponential mixture fitting.
//!
//! This module groups the pieces one EM sweep is made of:
//!
//! - [`density`]: closed-form normal and exponential densities at integer bins
//!   and the two-component Bayes posterior.
//! - [`theta`]: the parameter set `(μ, σ, λ, α)` with its divergence score and
//!   seeded random initialization.
//! - [`steps`]: the E-step (responsibilities), the M-step (weighted
//!   re-estimation plus KL scoring), and fitted-mixture synthesis.
//! - [`options`]: validated search configuration ([`options::FitOptions`]) and
//!   the per-restart failure policy.
//!
//! Higher-level search logic lives in [`crate::mixture::models`].

pub mod density;
pub mod options;
pub mod steps;
pub mod theta;
