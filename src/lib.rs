// SPDX-License-Identifier: MIT
//! Translation Error Rate (TER) for scoring machine output against a
//! reference.
//!
//! TER counts the insertions, deletions, substitutions and block shifts
//! needed to turn a hypothesis into the reference, divided by the reference
//! length. Shifts are found greedily: the block move that lowers the edit
//! distance the most is applied until no move helps. Candidate moves are
//! near-identical sequences, so their distances go through a prefix cache
//! of DP tables ([`CachedEditDistance`]).
//!
//! ```
//! let score = rustter::ter("the cat sat on the mat", "on the mat the cat sat", true).unwrap();
//! assert!((score - 1.0 / 6.0).abs() < 1e-12);
//! ```
//!
//! With the `python` feature the crate builds the `rustter._rustter`
//! extension module.

pub mod algorithms;
pub mod config;
pub mod distance;
pub mod error;
pub mod ter;
pub mod utils;

#[cfg(feature = "python")]
mod scorers;
#[cfg(feature = "python")]
mod types;

pub use algorithms::{edit_distance, Token};
pub use config::{TerOptions, Tokenization};
pub use distance::{CachedEditDistance, EditDistance, HypothesisDistance};
pub use error::{Result, TerError};
pub use ter::{
    align, align_tokens, corpus_ter, ter, ter_glue, ter_glue_tokens, ter_tokens, ter_with, text_stats, AlignedBlock,
    TerScorer, TerStats, TextScorer,
};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn _rustter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    distance::metrics::register(m)?;
    scorers::register(m)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
