mod messages;

pub use messages::Messages;

use crate::error::{ChatError, Result};
use crate::message::Message;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

struct State {
    messages: Vec<Message>,
    parent: Option<Weak<Conversation>>,
}

/// An ordered collection of messages, safe to share between threads.
///
/// Every operation takes the conversation's lock for its whole duration.
/// Indices are positions, not identities: they shift on `prepend`,
/// `insert` and `remove`. Out-of-range reads return `None` and
/// out-of-range writes fall back to appending.
///
/// Conversations are usually held in an [`Arc`] so that children can point
/// back at them with [`Conversation::new_child`]. The back-reference is
/// weak; a child never keeps its parent alive.
pub struct Conversation {
    state: Mutex<State>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::from_messages(Vec::new())
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            state: Mutex::new(State {
                messages,
                parent: None,
            }),
        }
    }

    // Nothing a panic can interrupt leaves `State` half-updated, so a
    // poisoned lock is still safe to use.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A copy of the current message sequence.
    pub fn messages(&self) -> Messages {
        Messages::new(self.state().messages.clone())
    }

    pub fn message(&self, i: usize) -> Option<Message> {
        self.state().messages.get(i).cloned()
    }

    pub fn last(&self) -> Option<Message> {
        self.state().messages.last().cloned()
    }

    pub fn len(&self) -> usize {
        self.state().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().messages.is_empty()
    }

    pub fn append(&self, message: Message) {
        self.state().messages.push(message);
    }

    pub fn prepend(&self, message: Message) {
        self.state().messages.insert(0, message);
    }

    /// Remove and return the message at `i`, shifting later messages back
    /// by one. Returns `None` and leaves the conversation alone if `i` is
    /// out of range.
    pub fn remove(&self, i: usize) -> Option<Message> {
        let mut state = self.state();
        if i >= state.messages.len() {
            return None;
        }
        Some(state.messages.remove(i))
    }

    /// Insert `message` at `i`. An out-of-range index appends instead.
    pub fn insert(&self, i: usize, message: Message) {
        let mut state = self.state();
        if i >= state.messages.len() {
            tracing::debug!(index = i, len = state.messages.len(), "insert out of range, appending");
            state.messages.push(message);
            return;
        }
        state.messages.insert(i, message);
    }

    /// Overwrite the message at `i`. An out-of-range index appends instead.
    pub fn replace(&self, i: usize, message: Message) {
        let mut state = self.state();
        match state.messages.get_mut(i) {
            Some(slot) => *slot = message,
            None => {
                tracing::debug!(index = i, len = state.messages.len(), "replace out of range, appending");
                state.messages.push(message);
            }
        }
    }

    /// Drop every message, keeping the parent link.
    pub fn clear(&self) {
        self.state().messages.clear();
    }

    /// Total tokens across all messages, in order.
    ///
    /// Stops at the first message that cannot be tokenized and returns that
    /// error; no partial count is reported. A message without a tokenizer
    /// is reported as a [`ChatError::Tokenization`] naming its content.
    /// Tokenizers run after the lock is released.
    pub fn count_tokens(&self) -> Result<usize> {
        let messages = self.messages();
        let mut total = 0;
        for (i, message) in messages.iter().enumerate() {
            let tokenized = message.tokenize().map_err(|e| match e {
                ChatError::NoTokenizer => ChatError::tokenization(message.content(), Box::new(e)),
                other => other,
            });
            match tokenized {
                Ok(tokens) => total += tokens.len(),
                Err(e) => {
                    tracing::debug!(index = i, error = %e, "token count aborted");
                    return Err(e);
                }
            }
        }
        Ok(total)
    }

    /// The conversation this one was forked from. `None` for a root, or
    /// once the parent has been dropped.
    pub fn parent(&self) -> Option<Arc<Conversation>> {
        self.state().parent.as_ref().and_then(Weak::upgrade)
    }

    /// Start a child conversation holding `messages` and pointing back at
    /// `self`.
    ///
    /// Useful when the assistant needs to talk to itself before answering:
    /// work happens in the child, and only the final reply is appended to
    /// the parent. The parent is neither locked nor modified.
    pub fn new_child(self: &Arc<Self>, messages: Vec<Message>) -> Arc<Conversation> {
        tracing::debug!(messages = messages.len(), "new child conversation");
        Arc::new(Self {
            state: Mutex::new(State {
                messages,
                parent: Some(Arc::downgrade(self)),
            }),
        })
    }

    /// Replace the whole message sequence.
    pub fn with_messages(&self, messages: Vec<Message>) -> &Self {
        self.state().messages = messages;
        self
    }

    pub fn with_parent(&self, parent: &Arc<Conversation>) -> &Self {
        self.state().parent = Some(Arc::downgrade(parent));
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}

impl fmt::Debug for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Conversation")
            .field("messages", &state.messages)
            .field("has_parent", &state.parent.is_some())
            .finish()
    }
}

impl Serialize for Conversation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Conversation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Message>::deserialize(deserializer).map(Conversation::from_messages)
    }
}
