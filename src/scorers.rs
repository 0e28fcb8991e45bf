// SPDX-License-Identifier: MIT
// PyO3 wrappers for TER scoring and alignment.
// Heavy work runs with the GIL released.

use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::config::TerOptions;
use crate::ter::TextScorer;
use crate::types::extract_text;

#[pyfunction]
#[pyo3(signature = (reference, hypothesis, wordmatch=true))]
pub fn ter(
    py: Python<'_>,
    reference: &Bound<'_, PyAny>,
    hypothesis: &Bound<'_, PyAny>,
    wordmatch: bool,
) -> PyResult<f64> {
    let r = extract_text(reference)?;
    let h = extract_text(hypothesis)?;
    Ok(py.allow_threads(|| crate::ter::ter(&r, &h, wordmatch))?)
}

#[pyfunction]
#[pyo3(signature = (reference, hypothesis, wordmatch=true))]
pub fn ter_glue(
    py: Python<'_>,
    reference: &Bound<'_, PyAny>,
    hypothesis: &Bound<'_, PyAny>,
    wordmatch: bool,
) -> PyResult<f64> {
    let r = extract_text(reference)?;
    let h = extract_text(hypothesis)?;
    Ok(py.allow_threads(|| crate::ter::ter_glue(&r, &h, wordmatch))?)
}

/// Returns `[(ref_offset, hyp_offset, length), ...]` in characters.
#[pyfunction]
#[pyo3(signature = (reference, hypothesis, wordmatch=true))]
pub fn align(
    py: Python<'_>,
    reference: &Bound<'_, PyAny>,
    hypothesis: &Bound<'_, PyAny>,
    wordmatch: bool,
) -> PyResult<Vec<(usize, usize, usize)>> {
    let r = extract_text(reference)?;
    let h = extract_text(hypothesis)?;
    Ok(py.allow_threads(|| crate::ter::align(&r, &h, wordmatch)))
}

/// Pooled TER over `(reference, hypothesis)` pairs, scored in parallel.
#[pyfunction]
#[pyo3(signature = (pairs, wordmatch=true, glue=false))]
pub fn corpus_ter(py: Python<'_>, pairs: Vec<(String, String)>, wordmatch: bool, glue: bool) -> PyResult<f64> {
    let options = TerOptions::new(wordmatch).with_glue(glue);
    Ok(py.allow_threads(|| crate::ter::corpus_ter(&pairs, options))?)
}

/// TER scorer bound to one reference.
///
/// Keeps its edit-distance cache between calls, so scoring many hypotheses
/// of the same reference through one instance is faster than calling `ter`
/// repeatedly. Create one instance per reference.
#[pyclass(name = "TerScorer", module = "rustter._rustter")]
pub struct PyTerScorer {
    inner: TextScorer,
    reference: String,
    wordmatch: bool,
    glue: bool,
}

#[pymethods]
impl PyTerScorer {
    #[new]
    #[pyo3(signature = (reference, wordmatch=true, glue=false))]
    fn new(reference: &Bound<'_, PyAny>, wordmatch: bool, glue: bool) -> PyResult<Self> {
        let reference = extract_text(reference)?;
        let options = TerOptions::new(wordmatch).with_glue(glue);
        Ok(PyTerScorer {
            inner: TextScorer::new(&reference, options),
            reference,
            wordmatch,
            glue,
        })
    }

    /// Pickles as the constructor arguments; the cache is rebuilt on demand.
    fn __reduce__<'py>(slf: PyRef<'py, Self>, py: Python<'py>) -> (Bound<'py, PyType>, (String, bool, bool)) {
        (
            PyType::new::<PyTerScorer>(py),
            (slf.reference.clone(), slf.wordmatch, slf.glue),
        )
    }

    #[getter]
    fn reference(&self) -> &str {
        &self.reference
    }

    /// Number of hypotheses held by the edit-distance cache.
    #[getter]
    fn cache_size(&self) -> usize {
        self.inner.cache_size()
    }

    fn score(&mut self, py: Python<'_>, hypothesis: &Bound<'_, PyAny>) -> PyResult<f64> {
        let h = extract_text(hypothesis)?;
        let inner = &mut self.inner;
        Ok(py.allow_threads(|| inner.score(&h))?)
    }

    /// `(shifts, edits, reference_length)` for one hypothesis.
    fn stats(&mut self, py: Python<'_>, hypothesis: &Bound<'_, PyAny>) -> PyResult<(usize, usize, usize)> {
        let h = extract_text(hypothesis)?;
        let inner = &mut self.inner;
        let stats = py.allow_threads(|| inner.stats(&h));
        Ok((stats.shifts, stats.edits, stats.reference_len))
    }

    fn score_batch(&mut self, py: Python<'_>, hypotheses: Vec<String>) -> PyResult<Vec<f64>> {
        let inner = &mut self.inner;
        Ok(py.allow_threads(|| inner.score_batch(&hypotheses))?)
    }

    fn __repr__(&self) -> String {
        format!(
            "TerScorer(reference={:?}, wordmatch={}, glue={})",
            self.reference,
            if self.wordmatch { "True" } else { "False" },
            if self.glue { "True" } else { "False" },
        )
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ter, m)?)?;
    m.add_function(wrap_pyfunction!(ter_glue, m)?)?;
    m.add_function(wrap_pyfunction!(align, m)?)?;
    m.add_function(wrap_pyfunction!(corpus_ter, m)?)?;
    m.add_class::<PyTerScorer>()?;
    Ok(())
}
