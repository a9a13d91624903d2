use anyhow::Result;
use chat_cli::config::{Settings, TokenizerKind};
use chat_cli::{app, prompts, tokenizer};
use chat_core::Conversation;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "chat")]
#[command(about = "Inspect and edit role-tagged conversations")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Tokenizer used for counting (whitespace, chars)
    #[arg(long, global = true)]
    tokenizer: Option<TokenizerKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the transcript of a conversation file
    Transcript { file: PathBuf },
    /// Count the tokens in a conversation file
    Tokens { file: PathBuf },
    /// Print the summarize prompt for a conversation file as JSON
    Summarize { file: PathBuf },
    /// Print the internal monologue prompt for a conversation file as JSON
    Monologue { file: PathBuf },
    /// Edit a conversation interactively
    Repl { file: Option<PathBuf> },
    /// Print the effective settings as TOML
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let init = matches!(cli.command, Command::Config { init: true });
    let mut settings = match cli.config {
        Some(ref path) if init && !path.exists() => Settings::default(),
        Some(ref path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(kind) = cli.tokenizer {
        settings.tokenizer.kind = kind;
    }
    let tokenizer = tokenizer::build_tokenizer(&settings.tokenizer);
    let color = std::io::stdout().is_terminal();

    match cli.command {
        Command::Transcript { file } => {
            let conversation = app::load_conversation(&file, &tokenizer)?;
            println!("{}", app::render_transcript(&conversation.messages(), color));
        }
        Command::Tokens { file } => {
            let conversation = app::load_conversation(&file, &tokenizer)?;
            println!("{}", conversation.count_tokens()?);
        }
        Command::Summarize { file } => {
            let conversation = app::load_conversation(&file, &tokenizer)?;
            println!("{}", prompts::summarize(&conversation, &settings.prompts).to_json()?);
        }
        Command::Monologue { file } => {
            let conversation = app::load_conversation(&file, &tokenizer)?;
            println!("{}", prompts::monologue(&conversation, &settings.prompts).to_json()?);
        }
        Command::Repl { file } => {
            let conversation = match file {
                Some(ref path) => app::load_conversation(path, &tokenizer)?,
                None => Arc::new(Conversation::new()),
            };
            let mut session = app::Session::new(conversation, tokenizer, settings.prompts).with_color(color);
            let stdin = std::io::stdin();
            app::run_repl(&mut session, stdin.lock(), std::io::stdout())?;
        }
        Command::Config { init } => {
            if init {
                match cli.config {
                    Some(ref path) => settings.save_to(path)?,
                    None => settings.save()?,
                }
                let path = cli.config.clone().unwrap_or_else(Settings::config_path);
                eprintln!("Wrote {}", path.display());
            }
            print!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
