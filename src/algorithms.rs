// SPDX-License-Identifier: MIT
// Pure Rust edit-distance primitives shared by the plain and cached metrics.
// Unit costs throughout: insert, delete and substitute each cost 1.

/// Anything comparable by equality and orderable for the prefix cache.
pub trait Token: Clone + Ord {}
impl<T: Clone + Ord> Token for T {}

// ---------------------------------------------------------------------------
// Helper: common prefix length
// ---------------------------------------------------------------------------
#[inline]
pub fn common_prefix<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    s1.iter().zip(s2.iter()).take_while(|(a, b)| a == b).count()
}

/// First row of the DP table against a reference of `len` tokens.
#[inline]
pub fn base_row(len: usize) -> Vec<usize> {
    (0..=len).collect()
}

/// Computes the DP row for one more hypothesis token from the row above it.
///
/// `prev` has `reference.len() + 1` cells; so does the returned row.
pub fn next_row<T: PartialEq>(prev: &[usize], token: &T, reference: &[T]) -> Vec<usize> {
    debug_assert_eq!(prev.len(), reference.len() + 1);
    let mut row = Vec::with_capacity(prev.len());
    row.push(prev[0] + 1);
    for (j, r) in reference.iter().enumerate() {
        let cost = if token == r { 0 } else { 1 };
        let cell = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        row.push(cell);
    }
    row
}

/// Levenshtein distance between two token sequences.
pub fn edit_distance<T: PartialEq>(s: &[T], t: &[T]) -> usize {
    if s.is_empty() {
        return t.len();
    }
    if t.is_empty() {
        return s.len();
    }
    let n = t.len();
    let mut prev: Vec<usize> = base_row(n);
    let mut curr: Vec<usize> = vec![0; n + 1];
    for (i, a) in s.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b) in t.iter().enumerate() {
            let cost = if a == b { 0 } else { 1 };
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_tokens() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(0u8..4, 0..12)
    }

    proptest! {
        #[test]
        fn identity_is_zero(s in arb_tokens()) {
            prop_assert_eq!(edit_distance(&s, &s), 0);
        }

        #[test]
        fn symmetric(s in arb_tokens(), t in arb_tokens()) {
            prop_assert_eq!(edit_distance(&s, &t), edit_distance(&t, &s));
        }

        #[test]
        fn bounded_by_total_length(s in arb_tokens(), t in arb_tokens()) {
            let d = edit_distance(&s, &t);
            prop_assert!(d <= s.len() + t.len());
            prop_assert!(d >= s.len().abs_diff(t.len()));
        }
    }
}
