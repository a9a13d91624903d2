// Library interface for chat-cli, shared by the binary and integration tests.

pub mod app;
pub mod commands;
pub mod config;
pub mod prompts;
pub mod tokenizer;

// Re-export commonly used items for easier testing
pub use app::{load_conversation, run_repl, Session, Step};
pub use commands::{handle_command, CommandResult};
pub use config::Settings;
