use thiserror::Error;

/// Boxed error returned by [`Tokenizer`](crate::Tokenizer) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("no tokenizer")]
    NoTokenizer,

    #[error("error tokenizing message {content:?}: {source}")]
    Tokenization {
        content: String,
        #[source]
        source: BoxError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    pub fn tokenization(content: impl Into<String>, source: BoxError) -> Self {
        Self::Tokenization {
            content: content.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
