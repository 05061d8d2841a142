//! histogram_mixture — Normal + Exponential mixture fitting for binned data.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the fitting engine to Python via the `_histogram_mixture` extension
//! module. Given a histogram of integer bin values and non-negative weights,
//! the crate estimates `(μ, σ, λ, α)` of
//! `α·Normal(μ, σ) + (1 − α)·Exponential(λ)` by Expectation-Maximization from
//! many random restarts, scoring fits by KL divergence.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`histogram`, `mixture`, `optimization`)
//!   as the public crate surface.
//! - When `python-bindings` is enabled, define the `MixtureFit` `#[pyclass]`,
//!   the `read_histogram` function, and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Histograms passed from Python are validated by `Histogram::new` before
//!   any fitting starts.
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `ValueError` at the PyO3 boundary.
//! - `lambda` is a Python keyword, so the exponential rate is exposed as
//!   `lambda_`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code calls `mixture::models::search::find_theta` or
//!   `fit_histogram_file` directly and can ignore the PyO3 items.
//! - The `histmix` binary wraps `fit_histogram_file` for the command line.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by `tests/integration_mixture_pipeline.rs`.

pub mod histogram;
pub mod mixture;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    histogram::reader,
    mixture::models::search::{self, find_theta},
    utils::{extract_fit_options, extract_histogram},
};

/// MixtureFit — Python-facing result of a multi-restart mixture fit.
///
/// Purpose
/// -------
/// Run the search on construction and expose the winning parameters and the
/// search report as read-only properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `MixtureFit(bins, weights, restarts=100, seed=None, max_iter=10000,
/// tol=1e-5, on_failure="skip")`:
/// - `bins`: one-dimensional array-like of integer bin values.
/// - `weights`: one-dimensional array-like of finite, non-negative weights.
/// - `restarts`: number of independent EM restarts (`>= 1`).
/// - `seed`: base seed; `None` draws one from entropy (see `seed` property).
/// - `max_iter`: per-restart iteration cap.
/// - `tol`: divergence-change tolerance.
/// - `on_failure`: `"skip"` or `"abort"`.
///
/// Notes
/// -----
/// - The GIL is released while the restarts run.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "MixtureFit", module = "histogram_mixture")]
pub struct PyMixtureFit {
    inner: search::MixtureFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyMixtureFit {
    #[new]
    #[allow(clippy::too_many_arguments)]
    #[pyo3(
        text_signature = "(bins, weights, /, restarts=100, seed=None, max_iter=10000, tol=1e-5, on_failure='skip')",
        signature = (bins, weights, restarts = 100, seed = None, max_iter = 10_000, tol = 1e-5, on_failure = "skip")
    )]
    pub fn new<'py>(
        py: Python<'py>, bins: &Bound<'py, PyAny>, weights: &Bound<'py, PyAny>, restarts: usize,
        seed: Option<u64>, max_iter: usize, tol: f64, on_failure: &str,
    ) -> PyResult<PyMixtureFit> {
        let histogram = extract_histogram(py, bins, weights)?;
        let opts = extract_fit_options(restarts, seed, max_iter, tol, on_failure)?;
        let inner = py.allow_threads(|| find_theta(&histogram, &opts))?;
        Ok(PyMixtureFit { inner })
    }

    #[getter]
    pub fn mu(&self) -> f64 {
        self.inner.theta.mu
    }

    #[getter]
    pub fn sigma(&self) -> f64 {
        self.inner.theta.sigma
    }

    /// Exponential rate.
    #[getter(lambda_)]
    pub fn lambda(&self) -> f64 {
        self.inner.theta.lambda
    }

    #[getter]
    pub fn mixing_weight(&self) -> f64 {
        self.inner.theta.mixing_weight
    }

    /// KL divergence of the fitted mixture from the normalized data.
    #[getter]
    pub fn divergence(&self) -> f64 {
        self.inner.theta.divergence
    }

    #[getter]
    pub fn restarts(&self) -> usize {
        self.inner.restarts
    }

    #[getter]
    pub fn converged(&self) -> usize {
        self.inner.converged
    }

    #[getter]
    pub fn failed(&self) -> usize {
        self.inner.failed
    }

    #[getter]
    pub fn capped(&self) -> usize {
        self.inner.capped
    }

    /// Seed actually used; pass it back to reproduce the fit.
    #[getter]
    pub fn seed(&self) -> u64 {
        self.inner.seed
    }

    #[getter]
    pub fn best_restart(&self) -> usize {
        self.inner.best_restart
    }

    #[getter]
    pub fn iterations(&self) -> u64 {
        self.inner.iterations
    }

    /// The full report as a JSON string.
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|err| pyo3::exceptions::PyValueError::new_err(err.to_string()))
    }

    fn __repr__(&self) -> String {
        format!("MixtureFit({})", self.inner.summary_line())
    }
}

/// Read a histogram file into `(bins, weights)` numpy arrays.
///
/// Zero-weight pairs are dropped; a missing or unreadable file raises
/// `ValueError("HistError: Bad filename: ...")`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "read_histogram")]
fn py_read_histogram<'py>(
    py: Python<'py>, path: &str,
) -> PyResult<(Bound<'py, PyArray1<i64>>, Bound<'py, PyArray1<f64>>)> {
    let histogram = reader::read_histogram(path)?;
    let bins = histogram.bins().to_vec().into_pyarray(py);
    let weights = histogram.weights().to_vec().into_pyarray(py);
    Ok((bins, weights))
}

/// Python module initializer for `_histogram_mixture`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _histogram_mixture<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<PyMixtureFit>()?;
    m.add_function(wrap_pyfunction!(py_read_histogram, m)?)?;
    Ok(())
}
