// SPDX-License-Identifier: MIT
// Scoring options: tokenization mode and the glue flavor.

/// How a text is split into tokens before scoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tokenization {
    /// Split on single space characters. Consecutive spaces yield empty tokens.
    #[default]
    Words,
    /// One token per Unicode scalar value.
    Chars,
}

impl Tokenization {
    /// Maps the `wordmatch` flag of the Python API onto a mode.
    pub fn from_word_mode(word_mode: bool) -> Self {
        if word_mode {
            Tokenization::Words
        } else {
            Tokenization::Chars
        }
    }

    pub fn is_words(self) -> bool {
        matches!(self, Tokenization::Words)
    }
}

/// Options shared by the string-level scorers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerOptions {
    pub tokenization: Tokenization,
    /// Score with the uncached glue distance instead of the prefix cache.
    pub glue: bool,
}

impl TerOptions {
    pub fn new(word_mode: bool) -> Self {
        TerOptions {
            tokenization: Tokenization::from_word_mode(word_mode),
            glue: false,
        }
    }

    pub fn with_glue(mut self, glue: bool) -> Self {
        self.glue = glue;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_strict_word_mode() {
        let opts = TerOptions::default();
        assert_eq!(opts.tokenization, Tokenization::Words);
        assert!(!opts.glue);
        assert_eq!(opts, TerOptions::new(true));
    }

    #[test]
    fn word_mode_flag_maps_to_tokenization() {
        assert!(Tokenization::from_word_mode(true).is_words());
        assert_eq!(Tokenization::from_word_mode(false), Tokenization::Chars);
        assert!(TerOptions::new(false).with_glue(true).glue);
    }
}
