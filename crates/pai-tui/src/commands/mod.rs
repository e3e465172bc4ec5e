//! Slash command system for the pai TUI.
//!
//! Commands are typed into the composer as `/` followed by the command name,
//! for example `/new` or `/doc ~/notes.pdf`. A leading `//` sends the text
//! as a message with a single literal slash.

mod parse;

pub use parse::{parse_command, Command, CommandInfo, COMMANDS};

/// Check if input starts with '/' (is a command).
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/') && !input.trim().starts_with("//")
}

/// Check if input is an escaped slash (starts with //).
pub fn is_escaped_slash(input: &str) -> bool {
    input.trim().starts_with("//")
}

/// Unescape a slash command (// -> /).
pub fn unescape_slash(input: &str) -> String {
    let trimmed = input.trim_start();
    if let Some(rest) = trimmed.strip_prefix("//") {
        format!("/{rest}")
    } else {
        input.to_string()
    }
}

/// Commands whose name or alias starts with the typed prefix.
pub fn get_completions(partial: &str) -> Vec<&'static CommandInfo> {
    let partial = partial.trim().to_lowercase();
    let partial = partial.strip_prefix('/').unwrap_or(&partial);

    COMMANDS
        .iter()
        .filter(|cmd| {
            cmd.name.starts_with(partial) || cmd.aliases.iter().any(|a| a.starts_with(partial))
        })
        .collect()
}
