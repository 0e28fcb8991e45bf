// SPDX-License-Identifier: MIT
// TER scoring: shift to convergence, then count the residual edits.

use std::iter::Sum;
use std::ops::Add;

use rayon::prelude::*;

use super::shift::{converge, pad};
use crate::algorithms::Token;
use crate::config::{TerOptions, Tokenization};
use crate::distance::{CachedEditDistance, EditDistance};
use crate::error::{Result, TerError};
use crate::utils::{split_chars, split_words};

/// Edit counts behind one TER score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerStats {
    /// Accepted block shifts.
    pub shifts: usize,
    /// Insertions, deletions and substitutions left after shifting.
    pub edits: usize,
    /// Tokens in the reference.
    pub reference_len: usize,
}

impl TerStats {
    pub fn errors(&self) -> usize {
        self.shifts + self.edits
    }

    /// Errors per reference token.
    pub fn score(&self) -> Result<f64> {
        if self.reference_len == 0 {
            return Err(TerError::DivisionUndefined);
        }
        Ok(self.errors() as f64 / self.reference_len as f64)
    }
}

impl Add for TerStats {
    type Output = TerStats;

    fn add(self, rhs: TerStats) -> TerStats {
        TerStats {
            shifts: self.shifts + rhs.shifts,
            edits: self.edits + rhs.edits,
            reference_len: self.reference_len + rhs.reference_len,
        }
    }
}

impl Sum for TerStats {
    fn sum<I: Iterator<Item = TerStats>>(iter: I) -> TerStats {
        iter.fold(TerStats::default(), Add::add)
    }
}

/// Scores many hypotheses against one reference.
///
/// The strict scorer keeps a prefix cache of edit-distance tables that
/// persists across calls, which is what makes reuse worthwhile: the shift
/// search evaluates many near-identical candidates per hypothesis. The glue
/// scorer evaluates every candidate with the plain distance instead.
#[derive(Clone, Debug)]
pub struct TerScorer<T> {
    reference: Vec<T>,
    cache: CachedEditDistance<T>,
    glue: bool,
}

impl<T: Token> TerScorer<T> {
    pub fn new(reference: &[T]) -> Self {
        Self::with_glue(reference, false)
    }

    pub fn glue(reference: &[T]) -> Self {
        Self::with_glue(reference, true)
    }

    pub fn with_glue(reference: &[T], glue: bool) -> Self {
        TerScorer {
            reference: reference.to_vec(),
            cache: CachedEditDistance::new(reference),
            glue,
        }
    }

    pub fn reference(&self) -> &[T] {
        &self.reference
    }

    pub fn is_glue(&self) -> bool {
        self.glue
    }

    /// Number of hypotheses held by the prefix cache.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn stats(&mut self, hypothesis: &[T]) -> TerStats {
        let hyp = pad(hypothesis, self.reference.len());
        let done = if self.glue {
            let mut plain = EditDistance::new(&self.reference);
            converge(&self.reference, hyp, &mut plain, |_| {})
        } else {
            converge(&self.reference, hyp, &mut self.cache, |_| {})
        };
        TerStats {
            shifts: done.shifts,
            edits: done.distance,
            reference_len: self.reference.len(),
        }
    }

    pub fn score(&mut self, hypothesis: &[T]) -> Result<f64> {
        if self.reference.is_empty() {
            return Err(TerError::DivisionUndefined);
        }
        self.stats(hypothesis).score()
    }
}

/// TER over pre-tokenized input.
pub fn ter_tokens<T: Token>(reference: &[T], hypothesis: &[T]) -> Result<f64> {
    TerScorer::new(reference).score(hypothesis)
}

/// Glue TER over pre-tokenized input.
pub fn ter_glue_tokens<T: Token>(reference: &[T], hypothesis: &[T]) -> Result<f64> {
    TerScorer::glue(reference).score(hypothesis)
}

/// Tokenizes both texts and counts TER edits.
pub fn text_stats(reference: &str, hypothesis: &str, options: TerOptions) -> TerStats {
    match options.tokenization {
        Tokenization::Words => {
            TerScorer::with_glue(&split_words(reference), options.glue).stats(&split_words(hypothesis))
        }
        Tokenization::Chars => {
            TerScorer::with_glue(&split_chars(reference), options.glue).stats(&split_chars(hypothesis))
        }
    }
}

pub fn ter_with(reference: &str, hypothesis: &str, options: TerOptions) -> Result<f64> {
    text_stats(reference, hypothesis, options).score()
}

/// Translation Error Rate of `hypothesis` against `reference`.
///
/// With `word_mode` the texts are split on single spaces, otherwise into
/// characters. Fails with [`TerError::DivisionUndefined`] on an empty
/// reference.
///
/// ```
/// let reference = "SAUDI ARABIA denied THIS WEEK information published in the AMERICAN new york times";
/// let hypothesis = "THIS WEEK THE SAUDIS denied information published in the new york times";
/// let score = rustter::ter(reference, hypothesis, true).unwrap();
/// assert_eq!(format!("{:.3}", score), "0.308");
/// ```
pub fn ter(reference: &str, hypothesis: &str, word_mode: bool) -> Result<f64> {
    ter_with(reference, hypothesis, TerOptions::new(word_mode))
}

/// TER scored with the uncached glue distance. Equal to [`ter`].
pub fn ter_glue(reference: &str, hypothesis: &str, word_mode: bool) -> Result<f64> {
    ter_with(reference, hypothesis, TerOptions::new(word_mode).with_glue(true))
}

/// Corpus-level TER: total errors over total reference tokens.
///
/// Pairs are scored in parallel, each with its own scorer. A pair with an
/// empty reference fails the whole corpus with
/// [`TerError::DivisionUndefined`], as it would in [`ter`].
pub fn corpus_ter<R, H>(pairs: &[(R, H)], options: TerOptions) -> Result<f64>
where
    R: AsRef<str> + Sync,
    H: AsRef<str> + Sync,
{
    pairs
        .par_iter()
        .map(|(r, h)| match text_stats(r.as_ref(), h.as_ref(), options) {
            stats if stats.reference_len == 0 => Err(TerError::DivisionUndefined),
            stats => Ok(stats),
        })
        .try_reduce(TerStats::default, |a, b| Ok(a + b))?
        .score()
}

/// A [`TerScorer`] over text, owning its tokenized reference.
#[derive(Clone, Debug)]
pub enum TextScorer {
    Words(TerScorer<String>),
    Chars(TerScorer<char>),
}

impl TextScorer {
    pub fn new(reference: &str, options: TerOptions) -> Self {
        match options.tokenization {
            Tokenization::Words => {
                let tokens: Vec<String> = split_words(reference).into_iter().map(String::from).collect();
                TextScorer::Words(TerScorer::with_glue(&tokens, options.glue))
            }
            Tokenization::Chars => TextScorer::Chars(TerScorer::with_glue(&split_chars(reference), options.glue)),
        }
    }

    pub fn reference_len(&self) -> usize {
        match self {
            TextScorer::Words(s) => s.reference().len(),
            TextScorer::Chars(s) => s.reference().len(),
        }
    }

    pub fn cache_size(&self) -> usize {
        match self {
            TextScorer::Words(s) => s.cache_size(),
            TextScorer::Chars(s) => s.cache_size(),
        }
    }

    pub fn stats(&mut self, hypothesis: &str) -> TerStats {
        match self {
            TextScorer::Words(s) => {
                let tokens: Vec<String> = split_words(hypothesis).into_iter().map(String::from).collect();
                s.stats(&tokens)
            }
            TextScorer::Chars(s) => s.stats(&split_chars(hypothesis)),
        }
    }

    pub fn score(&mut self, hypothesis: &str) -> Result<f64> {
        if self.reference_len() == 0 {
            return Err(TerError::DivisionUndefined);
        }
        self.stats(hypothesis).score()
    }

    /// Scores hypotheses in order, sharing the reference's cache.
    pub fn score_batch<S: AsRef<str>>(&mut self, hypotheses: &[S]) -> Result<Vec<f64>> {
        hypotheses.iter().map(|h| self.score(h.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAUDI_REF: &str = "SAUDI ARABIA denied THIS WEEK information published in the AMERICAN new york times";
    const SAUDI_HYP: &str = "THIS WEEK THE SAUDIS denied information published in the new york times";

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn saudi_scenario() {
        let score = ter(SAUDI_REF, SAUDI_HYP, true).unwrap();
        assert!(close(score, 4.0 / 13.0), "got {score}");
        assert_eq!(format!("{:.3}", score), "0.308");
        assert!(close(ter_glue(SAUDI_REF, SAUDI_HYP, true).unwrap(), score));
    }

    #[test]
    fn identical_texts_score_zero() {
        assert_eq!(ter("a b c d", "a b c d", true).unwrap(), 0.0);
        assert_eq!(ter("abc", "abc", false).unwrap(), 0.0);
    }

    #[test]
    fn empty_reference_is_undefined() {
        assert_eq!(ter("", "a b", true), Err(TerError::DivisionUndefined));
        assert_eq!(ter("", "", false), Err(TerError::DivisionUndefined));
        assert_eq!(ter_glue("", "x", true), Err(TerError::DivisionUndefined));
        let empty: [&str; 0] = [];
        assert_eq!(ter_tokens(&empty, &["a"]), Err(TerError::DivisionUndefined));
    }

    #[test]
    fn one_shift_fixes_a_rotated_phrase() {
        let stats = text_stats("the cat sat on the mat", "on the mat the cat sat", TerOptions::default());
        assert_eq!(stats, TerStats { shifts: 1, edits: 0, reference_len: 6 });
        assert!(close(ter("a b c d", "d a b c", true).unwrap(), 0.25));
    }

    #[test]
    fn plain_edits_without_shifts() {
        assert!(close(ter("kitten", "sitting", false).unwrap(), 0.5));
        assert!(close(ter("a b c", "x", true).unwrap(), 1.0));
        assert!(close(ter("a b c", "", true).unwrap(), 1.0));
        assert!(close(ter("a b", "a b c d", true).unwrap(), 1.0));
    }

    #[test]
    fn scorer_reuse_matches_fresh_scores() {
        let reference: Vec<&str> = SAUDI_REF.split(' ').collect();
        let hyps = [SAUDI_HYP, "new york times", SAUDI_REF, SAUDI_HYP];
        let mut scorer = TerScorer::new(&reference);
        for h in hyps {
            let hyp: Vec<&str> = h.split(' ').collect();
            assert_eq!(scorer.score(&hyp), ter_tokens(&reference, &hyp));
        }
        assert!(scorer.cache_size() > 0);
    }

    #[test]
    fn text_scorer_batches_and_counts() {
        let mut scorer = TextScorer::new("the cat sat on the mat", TerOptions::default());
        let scores = scorer
            .score_batch(&["on the mat the cat sat", "the cat sat on the mat"])
            .unwrap();
        assert!(close(scores[0], 1.0 / 6.0));
        assert_eq!(scores[1], 0.0);
        assert_eq!(scorer.reference_len(), 6);

        let mut chars = TextScorer::new("kitten", TerOptions::new(false).with_glue(true));
        assert!(close(chars.score("sitting").unwrap(), 0.5));
        assert_eq!(chars.cache_size(), 0);
        assert_eq!(TextScorer::new("", TerOptions::default()).score("x"), Err(TerError::DivisionUndefined));
    }

    #[test]
    fn corpus_pools_errors() {
        let pairs = [("a b c d", "d a b c"), ("the cat sat on the mat", "on the mat the cat sat")];
        assert!(close(corpus_ter(&pairs, TerOptions::default()).unwrap(), 0.2));
        let none: [(&str, &str); 0] = [];
        assert_eq!(corpus_ter(&none, TerOptions::default()), Err(TerError::DivisionUndefined));
    }

    #[test]
    fn corpus_rejects_empty_reference_pair() {
        let pairs = [("a b c d", "d a b c"), ("", "stray words")];
        for options in [TerOptions::default(), TerOptions::new(false).with_glue(true)] {
            assert_eq!(corpus_ter(&pairs, options), Err(TerError::DivisionUndefined));
        }
    }

    #[test]
    fn stats_sum() {
        let a = TerStats { shifts: 1, edits: 2, reference_len: 5 };
        let b = TerStats { shifts: 0, edits: 3, reference_len: 5 };
        let total: TerStats = [a, b].into_iter().sum();
        assert_eq!(total.errors(), 6);
        assert!(close(total.score().unwrap(), 0.6));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::algorithms::edit_distance;
    use proptest::prelude::*;

    fn arb_tokens(min: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(0u8..4, min..9)
    }

    proptest! {
        #[test]
        fn self_score_is_zero(r in arb_tokens(1)) {
            prop_assert_eq!(ter_tokens(&r, &r).unwrap(), 0.0);
        }

        #[test]
        fn glue_never_exceeds_strict(r in arb_tokens(1), h in arb_tokens(0)) {
            let strict = ter_tokens(&r, &h).unwrap();
            let glue = ter_glue_tokens(&r, &h).unwrap();
            prop_assert!(glue <= strict);
            if h.len() >= r.len() {
                prop_assert_eq!(glue, strict);
            }
        }

        #[test]
        fn shifting_never_costs_more_than_plain_edits(r in arb_tokens(1), h in arb_tokens(0)) {
            let stats = TerScorer::new(&r).stats(&h);
            let plain = edit_distance(&r, &h);
            prop_assert!(stats.errors() <= plain);
            prop_assert!(stats.shifts <= plain);
        }
    }
}
