// SPDX-License-Identifier: MIT
//! Error types for TER scoring.

use thiserror::Error;

/// Result type alias for scoring operations.
pub type Result<T> = std::result::Result<T, TerError>;

/// Caller input errors. Nothing here is transient; none are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerError {
    /// The reference has no tokens, so the error count cannot be normalized.
    #[error("reference is empty: translation error rate is undefined")]
    DivisionUndefined,

    /// An argument could not be read as text or as a token sequence.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(feature = "python")]
impl From<TerError> for pyo3::PyErr {
    fn from(err: TerError) -> Self {
        match err {
            TerError::DivisionUndefined => {
                pyo3::exceptions::PyZeroDivisionError::new_err(err.to_string())
            }
            TerError::InvalidInput(_) => pyo3::exceptions::PyTypeError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_condition() {
        assert!(TerError::DivisionUndefined.to_string().contains("reference is empty"));
        assert_eq!(
            TerError::InvalidInput("expected str, got int".into()).to_string(),
            "invalid input: expected str, got int"
        );
    }
}
