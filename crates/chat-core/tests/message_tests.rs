use chat_core::*;
use std::sync::Arc;

fn word_tokenizer() -> Arc<dyn Tokenizer> {
    Arc::new(|content: &str| -> std::result::Result<Vec<u32>, BoxError> {
        Ok((0..content.split(' ').count() as u32).collect())
    })
}

#[derive(Debug, thiserror::Error)]
#[error("tokenizer exploded")]
struct Exploded;

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_default_message_is_empty() {
    let msg = Message::default();
    assert!(msg.is_empty());
    assert_eq!(msg.role().as_str(), "");
    assert_eq!(msg.content(), "");
}

#[test]
fn test_new_message_accessors() {
    let msg = Message::new("user", "hello");
    assert!(!msg.is_empty());
    assert_eq!(msg.role(), &Role::User);
    assert_eq!(msg.role().as_str(), "user");
    assert_eq!(msg.content(), "hello");
}

#[test]
fn test_role_only_message_is_not_empty() {
    assert!(!Message::default().with_role(Role::System).is_empty());
    assert!(!Message::default().with_content("x").is_empty());
}

#[test]
fn test_fluent_and_direct_construction_agree() {
    let fluent = Message::default().with_role("assistant").with_content("hi");
    assert_eq!(fluent, Message::assistant("hi"));
    assert_eq!(fluent, Message::new(Role::Assistant, "hi"));
}

#[test]
fn test_with_returns_modified_copy() {
    let original = Message::user("first");
    let edited = original.clone().with_content("second");
    assert_eq!(original.content(), "first");
    assert_eq!(edited.content(), "second");
    assert_eq!(edited.role(), &Role::User);
}

#[test]
fn test_custom_role_is_accepted() {
    let msg = Message::new("narrator", "once upon a time");
    assert_eq!(msg.role(), &Role::Custom("narrator".into()));
}

#[test]
fn test_equality_ignores_tokenizer() {
    let plain = Message::user("hello world");
    let tokenized = plain.clone().with_tokenizer(word_tokenizer());
    assert!(tokenized.has_tokenizer());
    assert_eq!(plain, tokenized);
    assert!(!tokenized.without_tokenizer().has_tokenizer());
}

#[test]
fn test_display_is_transcript_line() {
    assert_eq!(Message::assistant("hello  \n").to_string(), "assistant: hello");
    assert_eq!(Message::user("").to_string(), "user:");
    assert_eq!(Message::new("narrator", "once").to_string(), "narrator: once");
}

// ========================================================================
// JSON
// ========================================================================

#[test]
fn test_message_json_projection() {
    let msg = Message::new("user", "hello").with_tokenizer(word_tokenizer());
    assert_eq!(msg.to_json().unwrap(), r#"{"role":"user","content":"hello"}"#);
}

#[test]
fn test_message_json_parse() {
    let msg: Message = serde_json::from_str(r#"{"role":"system","content":"be brief"}"#).unwrap();
    assert_eq!(msg, Message::system("be brief"));
    assert!(!msg.has_tokenizer());
}

// ========================================================================
// Tokenize
// ========================================================================

#[test]
fn test_tokenize_without_tokenizer() {
    let msg = Message::user("hello");
    assert!(matches!(msg.tokenize(), Err(ChatError::NoTokenizer)));
}

#[test]
fn test_tokenize_with_tokenizer() {
    let msg = Message::user("hello world").with_tokenizer(word_tokenizer());
    assert_eq!(msg.tokenize().unwrap(), vec![0, 1]);
    // Not cached: a second call tokenizes again with the same result.
    assert_eq!(msg.tokenize().unwrap(), vec![0, 1]);
}

#[test]
fn test_tokenize_failure_wraps_content() {
    let failing: Arc<dyn Tokenizer> =
        Arc::new(|_: &str| -> std::result::Result<Vec<u32>, BoxError> { Err(Box::new(Exploded)) });
    let msg = Message::user("bad input").with_tokenizer(failing);

    match msg.tokenize() {
        Err(ChatError::Tokenization { content, source }) => {
            assert_eq!(content, "bad input");
            assert!(source.downcast_ref::<Exploded>().is_some());
        }
        other => panic!("expected tokenization error, got {:?}", other),
    }
}
