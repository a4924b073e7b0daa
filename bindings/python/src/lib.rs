//! Python bindings for fastGroupAdjust.

#![allow(non_snake_case)]

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyList;
use std::fmt::Display;

use ::fastGroupAdjust::prelude::{
    Batch, GroupAdjust as GroupAdjustBuilder, GroupAdjustResult, UndefinedMeanPolicy,
};

// ============================================================================
// Helper Types
// ============================================================================

/// Group label accepted from Python: an integer or a string.
#[derive(FromPyObject, Debug, Clone, PartialEq, Eq, Hash)]
enum PyLabel {
    Int(i64),
    Str(String),
}

impl PyLabel {
    fn to_object<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        Ok(match self {
            PyLabel::Int(i) => i.into_pyobject(py)?.into_any(),
            PyLabel::Str(s) => s.into_pyobject(py)?.into_any(),
        })
    }
}

/// Value series accepted from Python: a float64 array (NaN for missing) or a
/// list of floats and `None`.
#[derive(FromPyObject)]
enum PyValues<'py> {
    Array(PyReadonlyArray1<'py, f64>),
    List(Vec<Option<f64>>),
}

impl PyValues<'_> {
    fn to_vec(&self) -> PyResult<Vec<f64>> {
        match self {
            PyValues::Array(a) => Ok(a.as_slice().map_err(to_py_error)?.to_vec()),
            PyValues::List(v) => Ok(v.iter().map(|x| x.unwrap_or(f64::NAN)).collect()),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a GroupAdjustError to a PyErr
fn to_py_error(e: impl Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Parse undefined mean policy from string
fn parse_undefined_mean(name: &str) -> PyResult<UndefinedMeanPolicy> {
    match name.to_lowercase().as_str() {
        "propagate" | "strict" => Ok(UndefinedMeanPolicy::Propagate),
        "skip" | "skipna" => Ok(UndefinedMeanPolicy::Skip),
        _ => Err(PyValueError::new_err(format!(
            "Unknown undefined mean policy: {}. Valid options: propagate, skip",
            name
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    vals: &PyValues<'_>,
    groups: &[Vec<PyLabel>],
    weights: &[f64],
    undefined_mean: &str,
    return_weighted_means: bool,
    return_diagnostics: bool,
    parallel: bool,
) -> PyResult<GroupAdjustResult<f64, PyLabel>> {
    let values = vals.to_vec()?;
    let policy = parse_undefined_mean(undefined_mean)?;

    let mut builder = GroupAdjustBuilder::<f64>::new();
    builder = builder.weights(weights);
    builder = builder.undefined_mean(policy);

    if return_weighted_means {
        builder = builder.return_weighted_means();
    }

    if return_diagnostics {
        builder = builder.return_diagnostics();
    }

    builder
        .adapter(Batch)
        .parallel(parallel)
        .build()
        .map_err(to_py_error)?
        .adjust(&values, groups)
        .map_err(to_py_error)
}

// ============================================================================
// Python Classes
// ============================================================================

/// Diagnostic statistics for a group adjustment.
#[pyclass(name = "Diagnostics")]
#[derive(Clone)]
pub struct PyDiagnostics {
    /// Number of records
    #[pyo3(get)]
    pub n_records: usize,

    /// Number of missing input values
    #[pyo3(get)]
    pub n_missing_values: usize,

    /// Number of missing adjusted values
    #[pyo3(get)]
    pub n_missing_outputs: usize,

    /// Sum of the weights
    #[pyo3(get)]
    pub weight_sum: f64,

    /// Number of groups per grouping
    #[pyo3(get)]
    pub n_groups: Vec<usize>,

    /// Mean of the defined adjusted values
    #[pyo3(get)]
    pub output_mean: f64,

    /// Standard deviation of the defined adjusted values
    #[pyo3(get)]
    pub output_sd: f64,
}

#[pymethods]
impl PyDiagnostics {
    fn __repr__(&self) -> String {
        format!(
            "Diagnostics(n_records={}, n_missing_outputs={}, output_mean={:.6}, output_sd={:.6})",
            self.n_records, self.n_missing_outputs, self.output_mean, self.output_sd
        )
    }
}

/// Result from a group adjustment.
#[pyclass(name = "GroupAdjustResult")]
pub struct PyGroupAdjustResult {
    inner: GroupAdjustResult<f64, PyLabel>,
}

#[pymethods]
impl PyGroupAdjustResult {
    /// Adjusted values (NaN where missing)
    #[getter]
    fn adjusted<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_vec(py, self.inner.adjusted.clone())
    }

    /// Weighted means subtracted from each value (if requested)
    #[getter]
    fn weighted_means<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.inner
            .weighted_means
            .as_ref()
            .map(|v| PyArray1::from_vec(py, v.clone()))
    }

    /// Diagnostic statistics (if requested)
    #[getter]
    fn diagnostics(&self) -> Option<PyDiagnostics> {
        self.inner.diagnostics.as_ref().map(|d| PyDiagnostics {
            n_records: d.n_records,
            n_missing_values: d.n_missing_values,
            n_missing_outputs: d.n_missing_outputs,
            weight_sum: d.weight_sum,
            n_groups: d.groupings.iter().map(|g| g.n_groups).collect(),
            output_mean: d.output_mean,
            output_sd: d.output_sd,
        })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "GroupAdjustResult(n={}, groupings={})",
            self.inner.len(),
            self.inner.weights.len()
        )
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Demean values against several groupings with one weight per grouping.
///
/// Parameters
/// ----------
/// vals : array_like
///     Values; NaN (arrays) or None (lists) marks a missing value.
/// groups : list of list
///     Groupings, each with one int or str label per value.
/// weights : list of float
///     One non-negative weight per grouping. Not normalized.
/// undefined_mean : str, optional
///     Treatment of all-missing groups: "propagate" or "skip" (default: "propagate").
/// parallel : bool, optional
///     Use all CPU cores (default: True).
///
/// Returns
/// -------
/// numpy.ndarray
///     Adjusted values, NaN where the input or its weighted mean is missing.
///
/// Raises
/// ------
/// ValueError
///     If the groupings or weights do not match the values, or a weight is invalid.
#[pyfunction]
#[pyo3(signature = (vals, groups, weights, undefined_mean="propagate", parallel=true))]
fn group_adjust<'py>(
    py: Python<'py>,
    vals: PyValues<'py>,
    groups: Vec<Vec<PyLabel>>,
    weights: Vec<f64>,
    undefined_mean: &str,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let result = run(
        &vals,
        &groups,
        &weights,
        undefined_mean,
        false,
        false,
        parallel,
    )?;

    Ok(PyArray1::from_vec(py, result.into_adjusted()))
}

/// Group adjustment returning a result object with optional extras.
///
/// Parameters
/// ----------
/// vals, groups, weights, undefined_mean, parallel
///     As for `group_adjust`.
/// return_weighted_means : bool, optional
///     Keep the weighted mean subtracted from each value.
/// return_diagnostics : bool, optional
///     Compute summary statistics.
#[pyfunction]
#[pyo3(signature = (
    vals, groups, weights,
    undefined_mean="propagate",
    return_weighted_means=false,
    return_diagnostics=false,
    parallel=true
))]
#[allow(clippy::too_many_arguments)]
fn adjust(
    vals: PyValues<'_>,
    groups: Vec<Vec<PyLabel>>,
    weights: Vec<f64>,
    undefined_mean: &str,
    return_weighted_means: bool,
    return_diagnostics: bool,
    parallel: bool,
) -> PyResult<PyGroupAdjustResult> {
    let inner = run(
        &vals,
        &groups,
        &weights,
        undefined_mean,
        return_weighted_means,
        return_diagnostics,
        parallel,
    )?;

    Ok(PyGroupAdjustResult { inner })
}

/// Mean of the non-missing values of each label of one grouping.
///
/// Returns
/// -------
/// (list, numpy.ndarray)
///     Labels in order of first appearance and their means (NaN if a label
///     has no non-missing value).
#[pyfunction]
#[pyo3(signature = (vals, group, parallel=true))]
fn group_means<'py>(
    py: Python<'py>,
    vals: PyValues<'py>,
    group: Vec<PyLabel>,
    parallel: bool,
) -> PyResult<(Bound<'py, PyList>, Bound<'py, PyArray1<f64>>)> {
    let values = vals.to_vec()?;

    let result = GroupAdjustBuilder::<f64>::new()
        .weights(&[1.0])
        .return_group_means()
        .adapter(Batch)
        .parallel(parallel)
        .build()
        .map_err(to_py_error)?
        .adjust(&values, &[group])
        .map_err(to_py_error)?;

    let table = result
        .group_means
        .and_then(|mut tables| tables.pop())
        .ok_or_else(|| PyValueError::new_err("group means were not computed"))?;

    let labels = table
        .labels
        .iter()
        .map(|l| l.to_object(py))
        .collect::<PyResult<Vec<_>>>()?;

    Ok((PyList::new(py, labels)?, PyArray1::from_vec(py, table.means)))
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGroupAdjustResult>()?;
    m.add_class::<PyDiagnostics>()?;
    m.add_function(wrap_pyfunction!(group_adjust, m)?)?;
    m.add_function(wrap_pyfunction!(adjust, m)?)?;
    m.add_function(wrap_pyfunction!(group_means, m)?)?;
    Ok(())
}
