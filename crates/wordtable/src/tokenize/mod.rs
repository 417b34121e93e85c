//! # Sentence Tokenization
//!
//! Sentence tokenization is an upstream concern; this module provides the
//! seam ([`SentenceTokenizer`]) used by [`Embedding::encode_text`](crate::Embedding::encode_text),
//! and two simple implementations.
//!
//! Any ``Fn(&str) -> Vec<String>`` is also a [`SentenceTokenizer`], so an
//! external segmenter can be plugged in with a closure.

/// Splits a sentence into an ordered sequence of tokens.
pub trait SentenceTokenizer {
    /// Tokenize `text`.
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String>;
}

impl<F> SentenceTokenizer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        self(text)
    }
}

/// Splits on unicode whitespace.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl SentenceTokenizer for WhitespaceTokenizer {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Splits into single characters, skipping whitespace.
///
/// Matches character-level vocabularies, such as those seeded from a
/// one-character-per-line token list in random mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CharTokenizer;

impl SentenceTokenizer for CharTokenizer {
    fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizers() {
        assert_eq!(
            WhitespaceTokenizer.tokenize(" the  cat\tsat\n"),
            vec!["the", "cat", "sat"]
        );
        assert_eq!(CharTokenizer.tokenize("天 气好"), vec!["天", "气", "好"]);

        let upper = |text: &str| vec![text.to_uppercase()];
        assert_eq!(upper.tokenize("abc"), vec!["ABC"]);
    }
}
