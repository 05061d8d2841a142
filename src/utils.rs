//! PyO3 extraction helpers shared by the Python bindings.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    histogram::data::Histogram,
    mixture::core::options::{FailurePolicy, FitOptions},
    optimization::em_driver::traits::EmTolerances,
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Integer counterpart of [`extract_f64_array`] for bin values.
#[cfg(feature = "python-bindings")]
pub fn extract_i64_vec(raw_bins: &Bound<'_, PyAny>) -> PyResult<Vec<i64>> {
    if let Ok(arr_ro) = raw_bins.extract::<PyReadonlyArray1<i64>>() {
        return Ok(arr_ro.as_array().to_vec());
    }
    raw_bins.extract::<Vec<i64>>().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of int64 bin values")
    })
}

/// Build a validated [`Histogram`] from Python bins and weights.
#[cfg(feature = "python-bindings")]
pub fn extract_histogram<'py>(
    py: Python<'py>, raw_bins: &Bound<'py, PyAny>, raw_weights: &Bound<'py, PyAny>,
) -> PyResult<Histogram> {
    let bins = extract_i64_vec(raw_bins)?;
    let weights = extract_f64_array(py, raw_weights)?;
    let weights = Array1::from(weights.as_array().to_vec());
    Ok(Histogram::new(Array1::from(bins), weights)?)
}

/// Map Python keyword arguments onto validated [`FitOptions`].
#[cfg(feature = "python-bindings")]
pub fn extract_fit_options(
    restarts: usize, seed: Option<u64>, max_iter: usize, tol: f64, on_failure: &str,
) -> PyResult<FitOptions> {
    let tols = EmTolerances::new(tol, max_iter)?;
    let policy: FailurePolicy = on_failure.parse()?;
    Ok(FitOptions::new(tols, restarts, seed, true, policy, false)?)
}
