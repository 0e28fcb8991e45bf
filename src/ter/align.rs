// SPDX-License-Identifier: MIT
// TER alignment: which hypothesis blocks explain which reference spans.

use rustc_hash::FxHashSet;

use super::shift::{converge, pad};
use crate::algorithms::Token;
use crate::config::Tokenization;
use crate::distance::CachedEditDistance;
use crate::utils::{split_chars, split_words, TokenOffsets};

/// `reference[ref_start..][..len] == hypothesis[hyp_start..][..len]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlignedBlock {
    pub ref_start: usize,
    pub hyp_start: usize,
    pub len: usize,
}

/// Disjoint matched blocks plus the positions they consume on each side.
struct Marks {
    blocks: Vec<AlignedBlock>,
    covered: Vec<bool>,
    used: FxHashSet<usize>,
}

impl Marks {
    fn new(reference_len: usize) -> Self {
        Marks {
            blocks: Vec::new(),
            covered: vec![false; reference_len],
            used: FxHashSet::default(),
        }
    }

    fn push(&mut self, block: AlignedBlock) {
        for k in 0..block.len {
            self.covered[block.ref_start + k] = true;
            self.used.insert(block.hyp_start + k);
        }
        self.blocks.push(block);
    }

    /// Records a shifted block landing at `cursor`, given as original
    /// hypothesis indices. Later shifts may have moved the block again, but
    /// the tokens still match, so it is kept unless it overlaps a block kept
    /// before it on either side. Non-consecutive original indices are split
    /// into consecutive runs.
    fn keep_shifted<T: PartialEq>(&mut self, cursor: usize, block: &[usize], reference: &[T], hypothesis: &[T]) {
        let matched = block.iter().enumerate().all(|(k, &i)| {
            matches!((reference.get(cursor + k), hypothesis.get(i)), (Some(r), Some(h)) if r == h)
        });
        if !matched {
            return;
        }
        if self.covered[cursor..cursor + block.len()].iter().any(|&c| c) || block.iter().any(|i| self.used.contains(i)) {
            return;
        }
        let mut run = 0;
        for k in 1..=block.len() {
            if k == block.len() || block[k] != block[k - 1] + 1 {
                self.push(AlignedBlock {
                    ref_start: cursor + run,
                    hyp_start: block[run],
                    len: k - run,
                });
                run = k;
            }
        }
    }

    /// Matches uncovered reference positions against unused hypothesis
    /// tokens, left to right, extending each match greedily.
    fn fill_in_place<T: PartialEq>(&mut self, reference: &[T], hypothesis: &[T]) {
        let mut p = 0;
        while p < reference.len() {
            if self.covered[p] {
                p += 1;
                continue;
            }
            let found = (0..hypothesis.len()).find(|&i| !self.used.contains(&i) && hypothesis[i] == reference[p]);
            let Some(h) = found else {
                p += 1;
                continue;
            };
            let mut len = 1;
            while h + len < hypothesis.len()
                && p + len < reference.len()
                && !self.used.contains(&(h + len))
                && !self.covered[p + len]
                && hypothesis[h + len] == reference[p + len]
            {
                len += 1;
            }
            self.push(AlignedBlock { ref_start: p, hyp_start: h, len });
            p += len;
        }
    }
}

/// Token-level TER alignment, sorted by reference position.
///
/// Runs the shift search, remembering where each accepted block came from,
/// then explains the remaining reference positions with in-place matches.
/// Blocks never overlap on either side.
pub fn align_tokens<T: Token>(reference: &[T], hypothesis: &[T]) -> Vec<AlignedBlock> {
    let hyp = pad(hypothesis, reference.len());
    let mut origin: Vec<usize> = (0..hyp.len()).collect();
    let mut moves: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut dist = CachedEditDistance::new(reference);
    converge(reference, hyp, &mut dist, |shift| {
        moves.push((shift.cursor, origin[shift.start..shift.end].to_vec()));
        origin = shift.apply(&origin);
    });

    let mut marks = Marks::new(reference.len());
    for (cursor, block) in moves.iter().rev() {
        marks.keep_shifted(*cursor, block, reference, hypothesis);
    }
    marks.fill_in_place(reference, hypothesis);
    let mut blocks = marks.blocks;
    blocks.sort();
    blocks
}

/// TER alignment of two texts as `(ref_offset, hyp_offset, length)`
/// triples, all counted in characters.
///
/// ```
/// let aligned = rustter::align("A B C D E F", "E F A C D B", true);
/// assert_eq!(aligned, vec![(0, 4, 1), (2, 10, 1), (4, 6, 3), (8, 0, 3)]);
/// ```
pub fn align(reference: &str, hypothesis: &str, word_mode: bool) -> Vec<(usize, usize, usize)> {
    let (blocks, r_offs, h_offs) = match Tokenization::from_word_mode(word_mode) {
        Tokenization::Words => {
            let r = split_words(reference);
            let h = split_words(hypothesis);
            (align_tokens(&r, &h), TokenOffsets::words(&r), TokenOffsets::words(&h))
        }
        Tokenization::Chars => {
            let r = split_chars(reference);
            let h = split_chars(hypothesis);
            (align_tokens(&r, &h), TokenOffsets::chars(r.len()), TokenOffsets::chars(h.len()))
        }
    };
    blocks
        .into_iter()
        .map(|b| (r_offs.start(b.ref_start), h_offs.start(b.hyp_start), r_offs.span(b.ref_start, b.len)))
        .collect()
}
