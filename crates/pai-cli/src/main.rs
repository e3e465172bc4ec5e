//! pai CLI: Command-line interface for the pai demo assistant

use clap::{Parser, Subcommand};
use pai_engine::{Config, Conversation, Effect, ReplyScheduler, Store, StoreError};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Terminal chat client for a demo personal AI assistant
#[derive(Parser, Debug)]
#[command(name = "pai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (TUI default: pai.log in the temp directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui {
        /// Go straight to the chat screen
        #[arg(long)]
        skip_landing: bool,
    },

    /// Send messages without the TUI and print the conversation
    Ask {
        /// Messages to send, in order
        #[arg(required = true)]
        messages: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None => run_tui(&runtime, config, false, cli.log_file),
        Some(Commands::Tui { skip_landing }) => run_tui(&runtime, config, skip_landing, cli.log_file),
        Some(Commands::Ask { messages, json }) => {
            init_tracing(LogTarget::from_flag(cli.log_file, LogTarget::Stderr));
            runtime.block_on(cmd_ask(&config, &messages, json))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, pai_engine::ConfigError> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn run_tui(
    runtime: &tokio::runtime::Runtime,
    config: Config,
    skip_landing: bool,
    log_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // The terminal belongs to the TUI, so logs always go to a file.
    let default_log = std::env::temp_dir().join("pai.log");
    init_tracing(LogTarget::from_flag(log_file, LogTarget::File(default_log)));
    runtime.block_on(pai_tui::run_tui(config, skip_landing))
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    fn from_flag(flag: Option<PathBuf>, fallback: Self) -> Self {
        flag.map_or(fallback, Self::File)
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
fn init_tracing(target: LogTarget) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .init();
        }
        LogTarget::File(path) => match File::create(&path) {
            Ok(file) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        fmt::layer()
                            .with_writer(Mutex::new(file))
                            .with_ansi(false)
                            .with_target(true),
                    )
                    .init();
            }
            Err(e) => {
                // Logging is best effort; the app runs without it.
                eprintln!("Warning: cannot open log file {}: {e}", path.display());
            }
        },
    }
}

async fn cmd_ask(
    config: &Config,
    messages: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let conversation = ask(config, messages).await?;

    if json {
        println!("{}", format_json(&conversation)?);
    } else {
        print!("{}", format_transcript(&conversation));
    }
    Ok(())
}

/// Send each message to a fresh conversation, waiting for every reply.
///
/// Blank messages are skipped with a warning.
async fn ask(config: &Config, messages: &[String]) -> Result<Conversation, StoreError> {
    let (mut scheduler, mut replies) = ReplyScheduler::new(config.reply_delay());
    let mut store = Store::new(&Config {
        seed_demo_history: false,
        ..config.clone()
    });
    let id = store.active_id();

    for message in messages {
        let transition = match store.append_user_message(id, message.as_str(), Vec::new()) {
            Ok(transition) => transition,
            Err(StoreError::EmptyMessage) => {
                warn!("Skipping empty message");
                continue;
            }
            Err(e) => return Err(e),
        };
        store = transition.store;

        let mut expected = 0;
        for effect in transition.effects {
            if let Effect::ScheduleReply(target) = effect {
                scheduler.schedule(target);
                expected += 1;
            }
        }

        for _ in 0..expected {
            let Some(ready) = replies.recv().await else {
                break;
            };
            store = store.append_assistant_reply(ready.conversation_id)?.store;
        }
    }

    info!(messages = store.active().messages().len(), "Conversation complete");
    Ok(store.active().clone())
}

/// Plain-text transcript: the title, then one block per message.
fn format_transcript(conversation: &Conversation) -> String {
    let mut out = format!("# {}\n", conversation.title);
    for message in conversation.messages() {
        out.push('\n');
        out.push_str(&format!("{}: {}\n", message.role.label(), message.content));
    }
    out
}

fn format_json(conversation: &Conversation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(conversation)
}
