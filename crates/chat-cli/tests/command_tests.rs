use chat_cli::commands::{handle_command, CommandResult};
use chat_core::Role;

// ========================================================================
// Command Parsing Tests (commands.rs)
// ========================================================================

#[test]
fn test_help_command() {
    let result = handle_command("/help");
    match result {
        CommandResult::Message(msg) => {
            assert!(msg.contains("/append"));
            assert!(msg.contains("/fork"));
            assert!(msg.contains("/reply"));
        }
        other => panic!("expected help text, got {:?}", other),
    }
}

#[test]
fn test_help_alias_and_version() {
    assert_eq!(handle_command("/h"), handle_command("/help"));
    match handle_command("/version") {
        CommandResult::Message(msg) => assert!(msg.starts_with("chat v")),
        other => panic!("expected version, got {:?}", other),
    }
}

#[test]
fn test_quit_aliases() {
    for cmd in ["/exit", "/quit", "/q"] {
        assert_eq!(handle_command(cmd), CommandResult::Quit);
    }
}

#[test]
fn test_view_commands() {
    assert_eq!(handle_command("/show"), CommandResult::Show);
    assert_eq!(handle_command("/transcript"), CommandResult::Show);
    assert_eq!(handle_command("/json"), CommandResult::Json);
    assert_eq!(handle_command("/tokens"), CommandResult::Tokens);
}

#[test]
fn test_derived_conversation_commands() {
    assert_eq!(handle_command("/fork"), CommandResult::Fork);
    assert_eq!(handle_command("/parent"), CommandResult::Parent);
    assert_eq!(handle_command("/up"), CommandResult::Parent);
    assert_eq!(handle_command("/summarize"), CommandResult::Summarize);
    assert_eq!(handle_command("/monologue"), CommandResult::Monologue);
    assert_eq!(handle_command("/reply"), CommandResult::Reply);
}

#[test]
fn test_append_command() {
    assert_eq!(
        handle_command("/append assistant Hello there!"),
        CommandResult::Append {
            role: Role::Assistant,
            content: "Hello there!".into()
        }
    );
}

#[test]
fn test_append_custom_role() {
    assert_eq!(
        handle_command("/prepend narrator It was a dark night"),
        CommandResult::Prepend {
            role: Role::Custom("narrator".into()),
            content: "It was a dark night".into()
        }
    );
}

#[test]
fn test_append_missing_content_shows_usage() {
    match handle_command("/append user") {
        CommandResult::Message(msg) => assert!(msg.starts_with("Usage: /append")),
        other => panic!("expected usage, got {:?}", other),
    }
}

#[test]
fn test_insert_and_replace_commands() {
    assert_eq!(
        handle_command("/insert 2 system be brief"),
        CommandResult::Insert {
            index: 2,
            role: Role::System,
            content: "be brief".into()
        }
    );
    assert_eq!(
        handle_command("/replace 0 user new text"),
        CommandResult::Replace {
            index: 0,
            role: Role::User,
            content: "new text".into()
        }
    );
}

#[test]
fn test_insert_bad_index_shows_usage() {
    assert!(matches!(handle_command("/insert x user hi"), CommandResult::Message(_)));
    assert!(matches!(handle_command("/insert -1 user hi"), CommandResult::Message(_)));
}

#[test]
fn test_remove_command() {
    assert_eq!(handle_command("/remove 3"), CommandResult::Remove(3));
    assert_eq!(handle_command("/rm 0"), CommandResult::Remove(0));
    assert!(matches!(handle_command("/remove"), CommandResult::Message(_)));
}

#[test]
fn test_unknown_command() {
    match handle_command("/frobnicate") {
        CommandResult::Message(msg) => assert!(msg.contains("Unknown command: /frobnicate")),
        other => panic!("expected unknown command message, got {:?}", other),
    }
}

#[test]
fn test_plain_text_is_not_a_command() {
    assert_eq!(handle_command("hello there"), CommandResult::NotACommand);
}
