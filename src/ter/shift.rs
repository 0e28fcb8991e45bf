// SPDX-License-Identifier: MIT
// Greedy block-shift search.
//
// The working hypothesis is a sequence of `Option<T>`: `None` is a glue
// placeholder that pads a short hypothesis up to the reference length so
// blocks can be moved past its original end. Placeholders never match a
// reference token and are dropped before every distance evaluation.

use std::cmp::{Ordering, Reverse};

use log::{debug, trace};

use crate::algorithms::Token;
use crate::distance::HypothesisDistance;

/// Relocate `hyp[start..end)` so it begins at `cursor` in the sequence left
/// after removing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    pub cursor: usize,
    pub start: usize,
    pub end: usize,
}

impl Shift {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Applies the move to any sequence of the hypothesis' length. A cursor
    /// past the end of the remaining tokens appends the block.
    pub fn apply<U: Clone>(&self, seq: &[U]) -> Vec<U> {
        let block = &seq[self.start..self.end];
        let mut rest: Vec<U> = Vec::with_capacity(seq.len());
        rest.extend_from_slice(&seq[..self.start]);
        rest.extend_from_slice(&seq[self.end..]);
        let tail = rest.split_off(self.cursor.min(rest.len()));
        rest.extend_from_slice(block);
        rest.extend(tail);
        rest
    }
}

/// Pads `hypothesis` with placeholders up to `reference_len` tokens.
pub fn pad<T: Clone>(hypothesis: &[T], reference_len: usize) -> Vec<Option<T>> {
    let mut padded: Vec<Option<T>> = hypothesis.iter().cloned().map(Some).collect();
    if padded.len() < reference_len {
        padded.resize(reference_len, None);
    }
    padded
}

/// The real tokens of a working hypothesis, placeholders removed.
pub fn present<T: Clone>(hyp: &[Option<T>]) -> Vec<T> {
    hyp.iter().flatten().cloned().collect()
}

#[inline]
fn matches<T: PartialEq>(slot: &Option<T>, tok: &T) -> bool {
    slot.as_ref() == Some(tok)
}

/// Candidate shifts, in cursor-major then start order.
///
/// For every cursor whose token disagrees with the reference, every other
/// position holding the wanted reference token starts a block, extended for
/// as long as it keeps agreeing with the reference from the cursor on.
pub struct Matches<'a, T> {
    reference: &'a [T],
    hyp: &'a [Option<T>],
    limit: usize,
    cursor: usize,
    start: usize,
}

pub fn iterate_matches<'a, T: PartialEq>(reference: &'a [T], hyp: &'a [Option<T>]) -> Matches<'a, T> {
    Matches {
        reference,
        hyp,
        limit: reference.len().min(hyp.len()),
        cursor: 0,
        start: 0,
    }
}

impl<T: PartialEq> Matches<'_, T> {
    fn block_end(&self, cursor: usize, start: usize) -> usize {
        let mut end = start + 1;
        while end < self.limit
            && cursor + (end - start) < self.reference.len()
            && matches(&self.hyp[end], &self.reference[cursor + (end - start)])
        {
            end += 1;
        }
        end
    }
}

impl<T: PartialEq> Iterator for Matches<'_, T> {
    type Item = Shift;

    fn next(&mut self) -> Option<Shift> {
        while self.cursor < self.limit {
            let cursor = self.cursor;
            let wanted = &self.reference[cursor];
            if !matches(&self.hyp[cursor], wanted) {
                while self.start < self.limit {
                    let start = self.start;
                    self.start += 1;
                    if start != cursor && matches(&self.hyp[start], wanted) {
                        let end = self.block_end(cursor, start);
                        return Some(Shift { cursor, start, end });
                    }
                }
            }
            self.cursor += 1;
            self.start = 0;
        }
        None
    }
}

/// A shift together with the hypothesis it produces and that hypothesis'
/// distance to the reference.
#[derive(Clone, Debug)]
pub struct ShiftCandidate<T> {
    pub shift: Shift,
    pub distance: usize,
    pub hypothesis: Vec<Option<T>>,
}

impl<T: Ord> ShiftCandidate<T> {
    /// Lower distance first, then the longer block, then the smaller moved
    /// hypothesis. Full ties keep the earlier candidate.
    fn ranks_before(&self, other: &Self) -> bool {
        (self.distance, Reverse(self.shift.len()))
            .cmp(&(other.distance, Reverse(other.shift.len())))
            .then_with(|| self.hypothesis.cmp(&other.hypothesis))
            == Ordering::Less
    }
}

/// Finds the shift that lowers the distance from `current` the most.
///
/// Returns `None` when no candidate is strictly below `current`.
pub fn best_shift<T, D>(
    reference: &[T],
    hyp: &[Option<T>],
    current: usize,
    dist: &mut D,
) -> Option<ShiftCandidate<T>>
where
    T: Token,
    D: HypothesisDistance<T>,
{
    let mut best: Option<ShiftCandidate<T>> = None;
    let mut evaluated = 0usize;
    for shift in iterate_matches(reference, hyp) {
        let moved = shift.apply(hyp);
        let candidate = ShiftCandidate {
            shift,
            distance: dist.distance(&present(&moved)),
            hypothesis: moved,
        };
        evaluated += 1;
        if best.as_ref().map_or(true, |b| candidate.ranks_before(b)) {
            best = Some(candidate);
        }
    }
    trace!("shift search: {} candidates evaluated", evaluated);
    best.filter(|b| b.distance < current)
}

/// State of the working hypothesis once no shift improves it.
#[derive(Clone, Debug)]
pub struct Converged<T> {
    pub hypothesis: Vec<Option<T>>,
    pub shifts: usize,
    /// Distance of the final hypothesis, placeholders removed.
    pub distance: usize,
}

/// Applies best shifts until none improves the distance.
///
/// Every accepted shift strictly lowers a non-negative distance, so the loop
/// is capped at the starting distance. `on_accept` sees each accepted shift
/// before the working hypothesis is replaced.
pub fn converge<T, D, F>(reference: &[T], hyp: Vec<Option<T>>, dist: &mut D, mut on_accept: F) -> Converged<T>
where
    T: Token,
    D: HypothesisDistance<T>,
    F: FnMut(&Shift),
{
    let initial = dist.distance(&present(&hyp));
    let mut hypothesis = hyp;
    let mut distance = initial;
    let mut shifts = 0usize;
    while shifts < initial {
        let Some(candidate) = best_shift(reference, &hypothesis, distance, dist) else {
            break;
        };
        debug!(
            "shift {:?} accepted: distance {} -> {}",
            candidate.shift, distance, candidate.distance
        );
        on_accept(&candidate.shift);
        hypothesis = candidate.hypothesis;
        distance = candidate.distance;
        shifts += 1;
    }
    debug!("shift search converged after {} shifts, residual distance {}", shifts, distance);
    Converged { hypothesis, shifts, distance }
}
