// SPDX-License-Identifier: MIT
// Distance submodule structure
pub mod cached;
#[cfg(feature = "python")]
pub mod metrics;

pub use cached::CachedEditDistance;

use crate::algorithms::edit_distance;

/// Distance from a hypothesis to a reference fixed at construction.
///
/// The shift search only ever asks "how far is this candidate from the
/// reference", so scorers plug in either the plain metric or the cache.
pub trait HypothesisDistance<T> {
    fn distance(&mut self, hypothesis: &[T]) -> usize;
}

/// Uncached Levenshtein distance against a borrowed reference.
#[derive(Clone, Copy, Debug)]
pub struct EditDistance<'a, T> {
    reference: &'a [T],
}

impl<'a, T> EditDistance<'a, T> {
    pub fn new(reference: &'a [T]) -> Self {
        EditDistance { reference }
    }
}

impl<T: PartialEq> HypothesisDistance<T> for EditDistance<'_, T> {
    fn distance(&mut self, hypothesis: &[T]) -> usize {
        edit_distance(self.reference, hypothesis)
    }
}
