use anyhow::{Context, Result};
use chat_core::{Conversation, Message, Messages, Role, Tokenizer};
use crossterm::style::{style, Stylize};
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use crate::commands::{handle_command, CommandResult};
use crate::config::PromptSettings;
use crate::prompts;

/// Read a JSON array of `{role, content}` objects and attach `tokenizer`
/// to every message.
pub fn load_conversation(path: &Path, tokenizer: &Arc<dyn Tokenizer>) -> Result<Arc<Conversation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let messages: Vec<Message> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(Arc::new(Conversation::from_messages(
        messages
            .into_iter()
            .map(|m| m.with_tokenizer(Arc::clone(tokenizer)))
            .collect(),
    )))
}

/// Transcript with assistant lines in blue and system lines in yellow.
pub fn render_transcript(messages: &Messages, color: bool) -> String {
    if !color {
        return messages.transcript();
    }
    messages
        .iter()
        .map(|m| {
            let line = m.to_string();
            match m.role() {
                Role::Assistant => style(line).blue().to_string(),
                Role::System => style(line).yellow().to_string(),
                _ => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// What the loop should do after a line of input.
#[derive(Debug, PartialEq)]
pub enum Step {
    Print(String),
    Nothing,
    Quit,
}

/// Interactive editing state: the conversation being edited plus the
/// ancestors it was forked from.
pub struct Session {
    current: Arc<Conversation>,
    // Children only hold weak links, so forked-from conversations are
    // owned here until the user returns to them.
    ancestors: Vec<Arc<Conversation>>,
    tokenizer: Arc<dyn Tokenizer>,
    prompts: PromptSettings,
    color: bool,
}

impl Session {
    pub fn new(conversation: Arc<Conversation>, tokenizer: Arc<dyn Tokenizer>, prompts: PromptSettings) -> Self {
        Self {
            current: conversation,
            ancestors: Vec::new(),
            tokenizer,
            prompts,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn conversation(&self) -> &Arc<Conversation> {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    fn message(&self, role: Role, content: String) -> Message {
        Message::new(role, content).with_tokenizer(Arc::clone(&self.tokenizer))
    }

    pub fn handle_input(&mut self, input: &str) -> Result<Step> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Step::Nothing);
        }

        let step = match handle_command(input) {
            CommandResult::Message(text) => Step::Print(text),
            CommandResult::Quit => Step::Quit,
            CommandResult::Show => Step::Print(render_transcript(&self.current.messages(), self.color)),
            CommandResult::Json => Step::Print(self.current.to_json()?),
            CommandResult::Tokens => match self.current.count_tokens() {
                Ok(n) => Step::Print(format!("{n} tokens")),
                Err(e) => Step::Print(format!("Cannot count tokens: {e}")),
            },
            CommandResult::Append { role, content } => {
                self.current.append(self.message(role, content));
                Step::Nothing
            }
            CommandResult::Prepend { role, content } => {
                self.current.prepend(self.message(role, content));
                Step::Nothing
            }
            CommandResult::Insert { index, role, content } => {
                self.current.insert(index, self.message(role, content));
                Step::Nothing
            }
            CommandResult::Replace { index, role, content } => {
                self.current.replace(index, self.message(role, content));
                Step::Nothing
            }
            CommandResult::Remove(index) => match self.current.remove(index) {
                Some(m) => Step::Print(format!("Removed {}: {}", m.role(), m.content())),
                None => Step::Print(format!("No message at index {index}")),
            },
            CommandResult::Clear => {
                self.current.clear();
                Step::Nothing
            }
            CommandResult::Fork => {
                let child = self.current.new_child(self.current.messages().into_vec());
                self.ancestors.push(std::mem::replace(&mut self.current, child));
                Step::Print(format!("Forked child conversation (depth {})", self.depth()))
            }
            CommandResult::Parent => match self.current.parent() {
                Some(parent) => {
                    self.ancestors.pop();
                    self.current = parent;
                    Step::Print(format!("Returned to parent conversation (depth {})", self.depth()))
                }
                None => Step::Print("Already at the root conversation".into()),
            },
            CommandResult::Summarize => {
                Step::Print(prompts::summarize(&self.current, &self.prompts).to_json()?)
            }
            CommandResult::Monologue => {
                let child = prompts::monologue(&self.current, &self.prompts);
                child.with_messages(
                    child
                        .messages()
                        .into_iter()
                        .map(|m| m.with_tokenizer(Arc::clone(&self.tokenizer)))
                        .collect(),
                );
                let json = child.to_json()?;
                self.ancestors.push(std::mem::replace(&mut self.current, child));
                Step::Print(json)
            }
            CommandResult::Reply => match prompts::reply_request(&self.current) {
                Some(request) => {
                    let request = request.with_tokenizer(Arc::clone(&self.tokenizer));
                    self.current.append(request);
                    Step::Print(self.current.to_json()?)
                }
                None => Step::Print("Nothing to reply to: no parent conversation or it is empty".into()),
            },
            CommandResult::NotACommand => {
                self.current.append(self.message(Role::User, input.to_string()));
                Step::Nothing
            }
        };
        Ok(step)
    }
}

/// Line loop: read commands from `input` until EOF or `/quit`.
pub fn run_repl<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> Result<()> {
    writeln!(output, "Type /help for commands.")?;
    for line in input.lines() {
        let line = line.context("reading input")?;
        match session.handle_input(&line)? {
            Step::Print(text) => writeln!(output, "{text}")?,
            Step::Nothing => {}
            Step::Quit => break,
        }
    }
    output.flush()?;
    Ok(())
}
