//! Derived prompt conversations.
//!
//! Each builder forks a child of the conversation it is given, so the
//! parent stays exactly as the user left it. Only a final assistant reply
//! should ever be appended back to the parent.

use chat_core::{Conversation, Message};
use std::sync::Arc;

use crate::config::PromptSettings;

/// A child holding a copy of the whole conversation followed by a system
/// instruction asking for a summary.
pub fn summarize(conversation: &Arc<Conversation>, prompts: &PromptSettings) -> Arc<Conversation> {
    let summary = conversation.new_child(Vec::new());
    summary
        .with_messages(conversation.messages().into_vec())
        .append(Message::system(prompts.summarize.as_str()));
    summary
}

/// A child holding one system message that asks the assistant to reason
/// about the conversation before it answers.
pub fn monologue(conversation: &Arc<Conversation>, prompts: &PromptSettings) -> Arc<Conversation> {
    let content = format!(
        "{}\n{}\n\n{}\n{}\n{}",
        prompts.monologue_preamble,
        prompts.transcript_label,
        conversation.messages().transcript(),
        prompts.monologue_rules,
        prompts.monologue_request,
    );
    conversation.new_child(vec![Message::system(content)])
}

/// Follow-up for a monologue child once the assistant has critiqued
/// itself: ask for the actual reply to the last message of the parent.
/// `None` when the parent is gone or empty.
pub fn reply_request(monologue: &Conversation) -> Option<Message> {
    let parent = monologue.parent()?;
    let last = parent.last()?;
    Some(Message::user(format!(
        "With your self-critique in mind, briefly respond directly to {:?}:",
        last.content()
    )))
}
