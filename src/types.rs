// SPDX-License-Identifier: MIT
// Argument extraction for the Python bindings.
use pyo3::prelude::*;
use pyo3::types::PyString;

use crate::error::TerError;

/// A Python argument read as a token sequence.
#[derive(Clone, Debug)]
pub enum Tokens {
    /// A `str`: one token per character.
    Chars(Vec<char>),
    /// Any other iterable of `str`.
    Words(Vec<String>),
}

impl Tokens {
    pub fn into_words(self) -> Vec<String> {
        match self {
            Tokens::Chars(v) => v.into_iter().map(String::from).collect(),
            Tokens::Words(v) => v,
        }
    }
}

fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "object".to_string())
}

/// Reads a text argument. Anything but `str` is rejected up front.
pub fn extract_text(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(s.to_str()?.to_owned());
    }
    Err(TerError::InvalidInput(format!("expected str, got {}", type_name(obj))).into())
}

/// Reads a `str` or an iterable of `str` as tokens.
pub fn extract_tokens(obj: &Bound<'_, PyAny>) -> PyResult<Tokens> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Tokens::Chars(s.to_str()?.chars().collect()));
    }
    let Ok(iter) = obj.try_iter() else {
        return Err(TerError::InvalidInput(format!(
            "expected str or sequence of str, got {}",
            type_name(obj)
        ))
        .into());
    };
    let mut words = Vec::new();
    for item in iter {
        let item = item?;
        match item.downcast::<PyString>() {
            Ok(s) => words.push(s.to_str()?.to_owned()),
            Err(_) => {
                return Err(TerError::InvalidInput(format!(
                    "sequence items must be str, got {}",
                    type_name(&item)
                ))
                .into())
            }
        }
    }
    Ok(Tokens::Words(words))
}
