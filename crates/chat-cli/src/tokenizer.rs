use chat_core::{BoxError, Tokenizer};
use std::sync::Arc;

use crate::config::{TokenizerKind, TokenizerSettings};

/// One token per whitespace-separated word. Ids are word positions, which
/// is enough for counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, content: &str) -> Result<Vec<u32>, BoxError> {
        let words = content.split_whitespace().count();
        let words = u32::try_from(words).map_err(|_| "too many words to tokenize")?;
        Ok((0..words).collect())
    }
}

/// Rough estimate of one token per `chars_per_token` characters.
#[derive(Debug, Clone, Copy)]
pub struct CharEstimateTokenizer {
    chars_per_token: usize,
}

impl CharEstimateTokenizer {
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Tokenizer for CharEstimateTokenizer {
    fn tokenize(&self, content: &str) -> Result<Vec<u32>, BoxError> {
        let chars = content.chars().count();
        let tokens = chars.div_ceil(self.chars_per_token);
        let tokens = u32::try_from(tokens).map_err(|_| "content too long to tokenize")?;
        Ok((0..tokens).collect())
    }
}

pub fn build_tokenizer(settings: &TokenizerSettings) -> Arc<dyn Tokenizer> {
    match settings.kind {
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer),
        TokenizerKind::Chars => Arc::new(CharEstimateTokenizer::new(settings.chars_per_token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_counts_words() {
        let tokens = WhitespaceTokenizer.tokenize("  hello   big world ").unwrap();
        assert_eq!(tokens, vec![0, 1, 2]);
        assert!(WhitespaceTokenizer.tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_char_estimate_rounds_up() {
        let t = CharEstimateTokenizer::new(4);
        assert_eq!(t.tokenize("abcd").unwrap().len(), 1);
        assert_eq!(t.tokenize("abcde").unwrap().len(), 2);
        assert_eq!(t.tokenize("").unwrap().len(), 0);
    }

    #[test]
    fn test_char_estimate_zero_width_clamped() {
        assert_eq!(CharEstimateTokenizer::new(0).tokenize("abc").unwrap().len(), 3);
    }
}
