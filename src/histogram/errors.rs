//! histogram::errors — error surface for histogram construction, I/O, and
//! divergence checks.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`HistError`], and the [`HistResult`] alias for
//! everything that can go wrong before the EM machinery runs: reading a
//! histogram from text, validating weights, normalizing, and comparing two
//! histograms bin by bin.
//!
//! Conventions
//! -----------
//! - Indices are 0-based positions in the histogram, not bin values.
//! - Messages are phrased in terms of the violated constraint
//!   ("weights must be non-negative") rather than the failing operation.
//! - Alignment failures (`ShapeMismatch`, `BinMismatch`) indicate a defect in
//!   the caller, not bad user data; they are never recovered inside the crate.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` embeds the payload of each variant and,
//!   with `python-bindings`, that the message survives conversion to `PyErr`.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for histogram operations that may produce [`HistError`].
pub type HistResult<T> = Result<T, HistError>;

/// HistError — validation, I/O, and alignment failures for histograms.
///
/// Variants
/// --------
/// - `InvalidInput` is the user-facing "Bad filename" failure: the input
///   source could not be opened or read.
/// - `MalformedInput` covers readable text that does not form valid
///   `(integer, real)` pairs.
/// - `ShapeMismatch` / `BinMismatch` signal two histograms that are not
///   index-aligned.
/// - `NotNormalized` rejects unnormalized input to the KL divergence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistError {
    // ---- Input / reader ----
    /// The input file is missing or unreadable.
    #[error("Bad filename: {path}: {reason}")]
    InvalidInput { path: String, reason: String },

    /// A token pair could not be parsed as `(integer, real)`.
    #[error("Malformed histogram input at token {token_index} ('{token}'): {reason}")]
    MalformedInput { token_index: usize, token: String, reason: &'static str },

    /// No non-zero bins remained after loading.
    #[error("Histogram is empty: no bins with non-zero weight")]
    EmptyHistogram,

    // ---- Construction ----
    /// Bin and weight columns have different lengths.
    #[error("Bin/weight length mismatch: {bins} bins, {weights} weights")]
    LengthMismatch { bins: usize, weights: usize },

    /// A weight is below zero.
    #[error("Invalid weight at index {index}: {value}, weights must be non-negative")]
    NegativeWeight { index: usize, value: f64 },

    /// A weight is NaN or ±inf.
    #[error("Invalid weight at index {index}: {value}, weights must be finite")]
    NonFiniteWeight { index: usize, value: f64 },

    // ---- Normalization ----
    /// Total mass is zero or non-finite, so the histogram cannot be normalized.
    #[error("Cannot normalize histogram with total mass {total}")]
    ZeroMass { total: f64 },

    // ---- Alignment / divergence ----
    /// Histograms compared positionally have different lengths.
    #[error("Histogram shape mismatch: expected {expected} bins, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Histograms compared positionally disagree on a bin value.
    #[error("Bin mismatch at index {index}: expected bin {expected}, found {found}")]
    BinMismatch { index: usize, expected: i64, found: i64 },

    /// A distribution passed to the KL divergence does not sum to one.
    #[error("Histogram is not normalized: total mass {total}")]
    NotNormalized { total: f64 },
}

#[cfg(feature = "python-bindings")]
impl From<HistError> for PyErr {
    fn from(err: HistError) -> PyErr {
        PyValueError::new_err(format!("HistError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `Display` messages embedding the payload of representative variants.
    //
    // They intentionally DO NOT cover:
    // - Where the errors are raised; that belongs to the reader, data, and
    //   divergence modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the reader failure keeps the historical "Bad filename" wording.
    //
    // Given
    // -----
    // - An `InvalidInput` carrying a path and an OS reason.
    //
    // Expect
    // ------
    // - The message starts with "Bad filename" and contains the path.
    fn invalid_input_message_mentions_bad_filename() {
        let err = HistError::InvalidInput {
            path: "missing.txt".to_string(),
            reason: "No such file or directory".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.starts_with("Bad filename"));
        assert!(msg.contains("missing.txt"));
    }

    #[test]
    // Purpose
    // -------
    // Verify alignment errors report both sides of the mismatch.
    //
    // Given
    // -----
    // - `ShapeMismatch { expected: 3, found: 4 }`.
    // - `BinMismatch { index: 2, expected: 7, found: 8 }`.
    //
    // Expect
    // ------
    // - Each message contains both numbers.
    fn alignment_errors_report_both_sides() {
        let shape = HistError::ShapeMismatch { expected: 3, found: 4 }.to_string();
        let bins = HistError::BinMismatch { index: 2, expected: 7, found: 8 }.to_string();

        assert!(shape.contains('3') && shape.contains('4'));
        assert!(bins.contains("index 2") && bins.contains("bin 7") && bins.contains("found 8"));
    }
}
