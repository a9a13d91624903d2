use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// An ordered snapshot of a conversation's messages.
///
/// Changing a `Messages` value never affects the conversation it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(Vec<Message>);

impl Messages {
    pub fn new(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    /// Render as `role: content` lines, each trimmed of trailing whitespace.
    pub fn transcript(&self) -> String {
        self.0
            .iter()
            .map(Message::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_vec(self) -> Vec<Message> {
        self.0
    }
}

impl Deref for Messages {
    type Target = [Message];

    fn deref(&self) -> &[Message] {
        &self.0
    }
}

impl From<Vec<Message>> for Messages {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

impl From<Messages> for Vec<Message> {
    fn from(messages: Messages) -> Self {
        messages.0
    }
}

impl IntoIterator for Messages {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_lines() {
        let messages = Messages::new(vec![
            Message::user("hi there"),
            Message::assistant("hello  \n"),
        ]);
        assert_eq!(messages.transcript(), "user: hi there\nassistant: hello");
    }

    #[test]
    fn test_transcript_empty() {
        assert_eq!(Messages::default().transcript(), "");
    }
}
