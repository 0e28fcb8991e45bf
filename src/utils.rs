// SPDX-License-Identifier: MIT
// Tokenization and token-index -> character-offset translation.

use crate::config::Tokenization;

/// Splits `text` into word tokens on single spaces.
///
/// The empty string has no tokens; otherwise every space is a boundary, so
/// `"a  b"` yields `["a", "", "b"]`.
pub fn split_words(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ').collect()
}

/// Splits `text` into one token per Unicode scalar value.
pub fn split_chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Character offsets of each token of a tokenized text.
///
/// In word mode every token is followed by one separator character, so the
/// start of token `i` is the sum of `len(token) + 1` over the tokens before
/// it. In char mode the token index is already a character offset.
pub struct TokenOffsets {
    starts: Vec<usize>,
    tokenization: Tokenization,
}

impl TokenOffsets {
    pub fn words(tokens: &[&str]) -> Self {
        let mut starts = Vec::with_capacity(tokens.len() + 1);
        let mut acc = 0usize;
        starts.push(acc);
        for tok in tokens {
            acc += tok.chars().count() + 1;
            starts.push(acc);
        }
        TokenOffsets { starts, tokenization: Tokenization::Words }
    }

    pub fn chars(len: usize) -> Self {
        TokenOffsets {
            starts: (0..=len).collect(),
            tokenization: Tokenization::Chars,
        }
    }

    /// Character offset of token `idx`. `idx == len` gives the end offset.
    #[inline]
    pub fn start(&self, idx: usize) -> usize {
        self.starts[idx]
    }

    /// Character length of the run of `len` tokens starting at `idx`,
    /// counting the separators between them but not the trailing one.
    pub fn span(&self, idx: usize, len: usize) -> usize {
        let raw = self.starts[idx + len] - self.starts[idx];
        match self.tokenization {
            Tokenization::Words => raw.saturating_sub(1),
            Tokenization::Chars => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_single_spaces() {
        assert_eq!(split_words("a b c"), vec!["a", "b", "c"]);
        assert_eq!(split_words("a  b"), vec!["a", "", "b"]);
        assert_eq!(split_words("a\tb"), vec!["a\tb"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn chars_split_on_scalar_values() {
        assert_eq!(split_chars("añb"), vec!['a', 'ñ', 'b']);
        assert!(split_chars("").is_empty());
    }

    #[test]
    fn word_offsets_count_separators() {
        let toks = split_words("A BB CCC");
        let offs = TokenOffsets::words(&toks);
        assert_eq!(offs.start(0), 0);
        assert_eq!(offs.start(1), 2);
        assert_eq!(offs.start(2), 5);
        assert_eq!(offs.span(0, 1), 1);
        assert_eq!(offs.span(1, 2), 6);
    }

    #[test]
    fn word_offsets_count_chars_not_bytes() {
        let toks = split_words("日本 語");
        let offs = TokenOffsets::words(&toks);
        assert_eq!(offs.start(1), 3);
        assert_eq!(offs.span(0, 2), 4);
    }

    #[test]
    fn char_offsets_are_identity() {
        let offs = TokenOffsets::chars(6);
        assert_eq!(offs.start(4), 4);
        assert_eq!(offs.span(2, 3), 3);
    }
}
