// SPDX-License-Identifier: MIT
// Prefix-cached edit distance against a fixed reference.
//
// Every query stores its full DP table (one row per hypothesis prefix) under
// the hypothesis as key. Keys are kept sorted, so the entry sharing the
// longest prefix with a new query is one of its two binary-search neighbours,
// and only the rows past that shared prefix need computing.

use std::sync::Arc;

use log::trace;

use super::HypothesisDistance;
use crate::algorithms::{base_row, common_prefix, next_row, Token};

type Row = Arc<[usize]>;

/// Edit distance to one reference, memoized across queries.
///
/// Row `i` of a stored table is the DP row of the length-`i` prefix of its
/// key, so a prefix of any table is valid for every key sharing that prefix.
/// Rows are shared between tables rather than copied. Entries are never
/// evicted; drop the whole object once the reference is done.
#[derive(Clone, Debug)]
pub struct CachedEditDistance<T> {
    reference: Vec<T>,
    keys: Vec<Vec<T>>,
    tables: Vec<Vec<Row>>,
    base: Row,
}

impl<T: Token> CachedEditDistance<T> {
    pub fn new(reference: &[T]) -> Self {
        CachedEditDistance {
            reference: reference.to_vec(),
            keys: Vec::new(),
            tables: Vec::new(),
            base: base_row(reference.len()).into(),
        }
    }

    pub fn reference(&self) -> &[T] {
        &self.reference
    }

    /// Number of cached hypotheses.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Edit distance between the reference and `hyp`.
    pub fn query(&mut self, hyp: &[T]) -> usize {
        let idx = self.keys.partition_point(|k| k.as_slice() < hyp);
        let mut table: Vec<Row> = Vec::with_capacity(hyp.len() + 1);
        let reused = match self.nearest(idx, hyp) {
            Some((entry, prefix)) => {
                table.extend(self.tables[entry][..=prefix].iter().cloned());
                prefix
            }
            None => {
                table.push(self.base.clone());
                0
            }
        };
        trace!("edit distance cache: reusing {} of {} rows", reused, hyp.len());

        let mut prev = table[reused].clone();
        for tok in &hyp[reused..] {
            let row: Row = next_row(&prev, tok, &self.reference).into();
            table.push(row.clone());
            prev = row;
        }
        let dist = table[hyp.len()][self.reference.len()];
        self.insert(idx, hyp, table);
        dist
    }

    /// Picks the neighbour of insertion point `idx` sharing the longest
    /// prefix with `hyp`. Ties go to the entry before `idx`; a zero-length
    /// prefix is no better than the base row.
    fn nearest(&self, idx: usize, hyp: &[T]) -> Option<(usize, usize)> {
        let pre = if idx == 0 { 0 } else { common_prefix(self.keys[idx - 1].as_slice(), hyp) };
        let pos = if idx == self.keys.len() { 0 } else { common_prefix(self.keys[idx].as_slice(), hyp) };
        if pre >= pos && pre > 0 {
            Some((idx - 1, pre))
        } else if pos > pre {
            Some((idx, pos))
        } else {
            None
        }
    }

    fn insert(&mut self, idx: usize, hyp: &[T], table: Vec<Row>) {
        if self.keys.get(idx).is_some_and(|k| k.as_slice() == hyp) {
            return;
        }
        self.keys.insert(idx, hyp.to_vec());
        self.tables.insert(idx, table);
    }
}

impl<T: Token> HypothesisDistance<T> for CachedEditDistance<T> {
    fn distance(&mut self, hypothesis: &[T]) -> usize {
        self.query(hypothesis)
    }
}
