use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub tokenizer: TokenizerSettings,
    #[serde(default)]
    pub prompts: PromptSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// One token per whitespace-separated word.
    Whitespace,
    /// One token per `chars_per_token` characters, rounded up.
    Chars,
}

impl std::str::FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" | "words" => Ok(TokenizerKind::Whitespace),
            "chars" | "characters" => Ok(TokenizerKind::Chars),
            other => Err(format!("unknown tokenizer: {other} (expected whitespace or chars)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerSettings {
    pub kind: TokenizerKind,
    pub chars_per_token: usize,
}

impl Default for TokenizerSettings {
    fn default() -> Self {
        Self {
            kind: TokenizerKind::Whitespace,
            chars_per_token: 4,
        }
    }
}

/// Text used to frame the derived prompt conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSettings {
    pub summarize: String,
    pub monologue_preamble: String,
    pub transcript_label: String,
    pub monologue_rules: String,
    pub monologue_request: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            summarize: "Without responding to any previous message, please briefly summarize the conversation so far."
                .to_string(),
            monologue_preamble: "You are an AI that serves as the internal monologue of a curious and charismatic chatbot."
                .to_string(),
            transcript_label: "Here's a transcript of a conversation you're having with a human. You're 'assistant':"
                .to_string(),
            monologue_rules: "\
We have strict rules for handling conversations:
1. Stay on topic: you are a curious and charismatic chatbot, and you do not talk about your internal monologue.
2. Be respectful. Don't allow the conversation to become hostile.
3. Be safe. Don't allow the conversation to become dangerous.
4. Be honest. Don't lie or mislead."
                .to_string(),
            monologue_request: "\
1) Provide some thoughts about the conversation so far.
2) List the overall and current goals of each participant. 3) Abide by the rules. What is the best response to the most recent message?
4) Critique (3). How could it be better?

1)"
                .to_string(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chat")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
