use chat_core::Role;

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the loop.
    Quit,
    /// Print the transcript of the current conversation.
    Show,
    /// Print the current conversation as JSON.
    Json,
    /// Print the token count.
    Tokens,
    Append { role: Role, content: String },
    Prepend { role: Role, content: String },
    Insert { index: usize, role: Role, content: String },
    Replace { index: usize, role: Role, content: String },
    Remove(usize),
    /// Drop every message of the current conversation.
    Clear,
    /// Switch to a new child of the current conversation.
    Fork,
    /// Switch back to the parent conversation.
    Parent,
    /// Print the summarize prompt as JSON.
    Summarize,
    /// Continue in an internal monologue child and print its prompt as JSON.
    Monologue,
    /// Ask the monologue child for the final reply to the parent.
    Reply,
    /// Not a command - treat as a user message.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/show" | "/transcript" => CommandResult::Show,
        "/json" => CommandResult::Json,
        "/tokens" => CommandResult::Tokens,
        "/clear" => CommandResult::Clear,
        "/fork" => CommandResult::Fork,
        "/parent" | "/up" => CommandResult::Parent,
        "/summarize" => CommandResult::Summarize,
        "/monologue" => CommandResult::Monologue,
        "/reply" => CommandResult::Reply,

        "/append" => match parse_role_content(arg) {
            Some((role, content)) => CommandResult::Append { role, content },
            None => usage("/append <role> <text>"),
        },
        "/prepend" => match parse_role_content(arg) {
            Some((role, content)) => CommandResult::Prepend { role, content },
            None => usage("/prepend <role> <text>"),
        },
        "/insert" => match parse_indexed(arg) {
            Some((index, role, content)) => CommandResult::Insert { index, role, content },
            None => usage("/insert <index> <role> <text>"),
        },
        "/replace" => match parse_indexed(arg) {
            Some((index, role, content)) => CommandResult::Replace { index, role, content },
            None => usage("/replace <index> <role> <text>"),
        },
        "/remove" | "/rm" => match arg.parse::<usize>() {
            Ok(index) => CommandResult::Remove(index),
            Err(_) => usage("/remove <index>"),
        },

        "/version" => CommandResult::Message(format!("chat v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Message(format!("Usage: {text}"))
}

fn parse_role_content(arg: &str) -> Option<(Role, String)> {
    let (role, content) = arg.split_once(' ')?;
    let content = content.trim();
    if role.is_empty() || content.is_empty() {
        return None;
    }
    Some((Role::from(role), content.to_string()))
}

fn parse_indexed(arg: &str) -> Option<(usize, Role, String)> {
    let (index, rest) = arg.split_once(' ')?;
    let index = index.parse().ok()?;
    let (role, content) = parse_role_content(rest.trim())?;
    Some((index, role, content))
}

fn show_help() -> CommandResult {
    let help_text = "\
Commands:

  EDITING
    /append <role> <text>            Add a message at the end
    /prepend <role> <text>           Add a message at the start
    /insert <index> <role> <text>    Insert before index (appends if out of range)
    /replace <index> <role> <text>   Overwrite index (appends if out of range)
    /remove, /rm <index>             Remove the message at index
    /clear                           Remove every message

  VIEWING
    /show, /transcript               Print the transcript
    /json                            Print the conversation as JSON
    /tokens                          Count tokens

  DERIVED CONVERSATIONS
    /fork                            Continue in a child conversation
    /parent, /up                     Return to the parent conversation
    /summarize                       Print the summarize prompt
    /monologue                       Continue in an internal monologue child
    /reply                           Ask the monologue for its reply to the parent

  OTHER
    /help, /h                        Show this help message
    /version                         Show version information
    /exit, /quit, /q                 Quit

Anything else is appended as a user message.";

    CommandResult::Message(help_text.into())
}
