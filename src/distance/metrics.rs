// SPDX-License-Identifier: MIT
// PyO3 wrapper for the plain edit distance.

use pyo3::prelude::*;

use crate::algorithms as alg;
use crate::types::{extract_tokens, Tokens};

/// Levenshtein distance between two strings (per character) or two
/// sequences of strings (per item). A string compared with a sequence is
/// read as a sequence of one-character strings.
#[pyfunction]
#[pyo3(signature = (s, t))]
pub fn edit_distance(py: Python<'_>, s: &Bound<'_, PyAny>, t: &Bound<'_, PyAny>) -> PyResult<usize> {
    let a = extract_tokens(s)?;
    let b = extract_tokens(t)?;
    let dist = match (a, b) {
        (Tokens::Chars(a), Tokens::Chars(b)) => py.allow_threads(|| alg::edit_distance(&a, &b)),
        (a, b) => {
            let (a, b) = (a.into_words(), b.into_words());
            py.allow_threads(|| alg::edit_distance(&a, &b))
        }
    };
    Ok(dist)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(edit_distance, m)?)?;
    Ok(())
}
