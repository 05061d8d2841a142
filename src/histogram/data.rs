//! Histogram container — index-aligned bin values and weights.
//!
//! Purpose
//! -------
//! Provide the single value type every fitting stage works on: an ordered
//! sequence of `(bin, weight)` pairs with integer bin values and finite,
//! non-negative weights. The data histogram, the per-bin responsibilities,
//! and the fitted mixture are all [`Histogram`]s sharing the same bin column.
//!
//! Key behaviors
//! -------------
//! - Validate weights once at construction ([`Histogram::new`]).
//! - Normalize to a probability distribution, either into a fresh value
//!   ([`Histogram::normalize`]) or in place on an owned value
//!   ([`Histogram::normalize_in_place`]); bin count and order never change.
//! - Derive aligned histograms that reuse the bin column
//!   ([`Histogram::map_weights`]) and check alignment between two values
//!   ([`Histogram::check_aligned`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `bins.len() == weights.len()`.
//! - Every weight is finite and `>= 0` for histograms built through
//!   [`Histogram::new`]. Derived histograms built with
//!   [`Histogram::map_weights`] skip the weight scan so that the numerics can
//!   carry NaN/inf forward to the caller that decides what a failure means.
//! - Zero weights are allowed here; the text reader drops them at load time.
//!
//! Conventions
//! -----------
//! - Positional indexing: index `i` refers to the same bin value in every
//!   histogram derived from the same data.
//! - Bin values are not required to be sorted or unique.
use crate::histogram::errors::{HistError, HistResult};
use ndarray::{Array1, ArrayView1};

/// Tolerance used when deciding whether a histogram is a probability
/// distribution.
pub const NORMALIZATION_TOL: f64 = 1e-6;

/// `Histogram` — ordered integer bins with non-negative real weights.
///
/// Fields
/// ------
/// - `bins`: `Array1<i64>`
///   Bin values (the x-axis), in input order.
/// - `weights`: `Array1<f64>`
///   Frequency, probability, or responsibility per bin.
///
/// Invariants
/// ----------
/// - Both columns have equal length.
/// - Weights are finite and non-negative when built via [`Histogram::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Array1<i64>,
    weights: Array1<f64>,
}

impl Histogram {
    /// Construct a validated histogram from a bin column and a weight column.
    ///
    /// Errors
    /// ------
    /// - `HistError::LengthMismatch` when the columns differ in length.
    /// - `HistError::NonFiniteWeight` / `HistError::NegativeWeight` for the
    ///   first offending weight.
    pub fn new(bins: Array1<i64>, weights: Array1<f64>) -> HistResult<Self> {
        if bins.len() != weights.len() {
            return Err(HistError::LengthMismatch { bins: bins.len(), weights: weights.len() });
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(HistError::NonFiniteWeight { index, value });
            }
            if value < 0.0 {
                return Err(HistError::NegativeWeight { index, value });
            }
        }
        Ok(Histogram { bins, weights })
    }

    /// Build a histogram from `(bin, weight)` pairs, validating as [`Histogram::new`].
    pub fn from_pairs<I>(pairs: I) -> HistResult<Self>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let (bins, weights): (Vec<i64>, Vec<f64>) = pairs.into_iter().unzip();
        Histogram::new(Array1::from(bins), Array1::from(weights))
    }

    /// Derive an aligned histogram whose weight at each index is `f(bin, weight)`.
    ///
    /// The result is not scanned for negative or non-finite weights. The
    /// E-step and mixture synthesis build their histograms this way, which is
    /// where non-finite numerics are allowed to surface.
    pub fn map_weights<F>(&self, mut f: F) -> Histogram
    where
        F: FnMut(i64, f64) -> f64,
    {
        let weights: Array1<f64> = self.iter().map(|(bin, weight)| f(bin, weight)).collect();
        Histogram { bins: self.bins.clone(), weights }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin values.
    pub fn bins(&self) -> ArrayView1<'_, i64> {
        self.bins.view()
    }

    /// Per-bin weights.
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Iterate over `(bin, weight)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.bins.iter().copied().zip(self.weights.iter().copied())
    }

    /// Sum of all weights.
    pub fn total_mass(&self) -> f64 {
        self.weights.sum()
    }

    /// Return `true` when the weights sum to one within [`NORMALIZATION_TOL`].
    pub fn is_normalized(&self) -> bool {
        (self.total_mass() - 1.0).abs() <= NORMALIZATION_TOL
    }

    /// Return a normalized copy whose weights sum to one.
    ///
    /// Errors
    /// ------
    /// - `HistError::ZeroMass` when the total is zero or not finite.
    pub fn normalize(&self) -> HistResult<Histogram> {
        let mut out = self.clone();
        out.normalize_in_place()?;
        Ok(out)
    }

    /// Normalize the weights of an owned histogram in place.
    ///
    /// On error the weights are left untouched.
    pub fn normalize_in_place(&mut self) -> HistResult<()> {
        let total = self.total_mass();
        if total == 0.0 || !total.is_finite() {
            return Err(HistError::ZeroMass { total });
        }
        self.weights.mapv_inplace(|w| w / total);
        Ok(())
    }

    /// Check that `other` has the same length and bin value at every index.
    ///
    /// Errors
    /// ------
    /// - `HistError::ShapeMismatch` on a length difference.
    /// - `HistError::BinMismatch` at the first index whose bin values differ.
    pub fn check_aligned(&self, other: &Histogram) -> HistResult<()> {
        if self.len() != other.len() {
            return Err(HistError::ShapeMismatch { expected: self.len(), found: other.len() });
        }
        for (index, (&expected, &found)) in self.bins.iter().zip(other.bins.iter()).enumerate() {
            if expected != found {
                return Err(HistError::BinMismatch { index, expected, found });
            }
        }
        Ok(())
    }
}

/// Normalize a histogram, returning a new value.
///
/// Free-function form of [`Histogram::normalize`].
pub fn normalize(histogram: &Histogram) -> HistResult<Histogram> {
    histogram.normalize()
}
