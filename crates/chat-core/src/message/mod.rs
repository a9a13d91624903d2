mod role;
mod tokenizer;

pub use role::Role;
pub use tokenizer::Tokenizer;

use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A piece of content sent from a role.
///
/// Messages are values: once built they are never changed in place. The
/// `with_*` methods consume the message and hand back the modified copy.
/// The attached tokenizer is shared, never serialized, and ignored by
/// equality.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    #[serde(skip)]
    tokenizer: Option<Arc<dyn Tokenizer>>,
}

impl Message {
    pub fn new(role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            tokenizer: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn without_tokenizer(mut self) -> Self {
        self.tokenizer = None;
        self
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_tokenizer(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// True when neither a role nor any content has been set.
    pub fn is_empty(&self) -> bool {
        self.role.is_unset() && self.content.is_empty()
    }

    /// Run the attached tokenizer over the content. Nothing is cached, so
    /// every call tokenizes again.
    pub fn tokenize(&self) -> Result<Vec<u32>> {
        let tokenizer = self.tokenizer.as_ref().ok_or(ChatError::NoTokenizer)?;
        tokenizer
            .tokenize(&self.content)
            .map_err(|e| ChatError::tokenization(self.content.as_str(), e))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role && self.content == other.content
    }
}

impl Eq for Message {}

/// One transcript line: `role: content`, trailing whitespace trimmed.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = format!("{}: {}", self.role, self.content);
        f.write_str(line.trim_end())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("role", &self.role)
            .field("content", &self.content)
            .field("tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}
