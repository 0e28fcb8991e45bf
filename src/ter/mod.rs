// SPDX-License-Identifier: MIT
// Translation Error Rate: shift search, scoring and alignment.
pub mod align;
pub mod scorer;
pub mod shift;

pub use align::{align, align_tokens, AlignedBlock};
pub use scorer::{
    corpus_ter, ter, ter_glue, ter_glue_tokens, ter_tokens, ter_with, text_stats, TerScorer, TerStats,
    TextScorer,
};
pub use shift::{best_shift, converge, iterate_matches, Converged, Shift, ShiftCandidate};
