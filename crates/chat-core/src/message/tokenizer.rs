use crate::error::BoxError;

/// Converts text into a sequence of integer token ids.
///
/// The core ships no implementation; callers attach one per message with
/// [`Message::with_tokenizer`](crate::Message::with_tokenizer). Any closure
/// of the right shape is a tokenizer:
///
/// ```
/// use chat_core::{BoxError, Message};
/// use std::sync::Arc;
///
/// let words = |s: &str| -> Result<Vec<u32>, BoxError> {
///     Ok((0..s.split_whitespace().count() as u32).collect())
/// };
/// let msg = Message::user("hello world").with_tokenizer(Arc::new(words));
/// assert_eq!(msg.tokenize().unwrap().len(), 2);
/// ```
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, content: &str) -> Result<Vec<u32>, BoxError>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Result<Vec<u32>, BoxError> + Send + Sync,
{
    fn tokenize(&self, content: &str) -> Result<Vec<u32>, BoxError> {
        self(content)
    }
}
