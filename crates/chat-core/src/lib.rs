pub mod error;
pub mod message;
pub mod conversation;

// Re-export key types
pub use error::{BoxError, ChatError, Result};
pub use message::{Message, Role, Tokenizer};
pub use conversation::{Conversation, Messages};
