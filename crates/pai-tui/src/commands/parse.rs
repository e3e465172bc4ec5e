//! Command parser and registry for slash commands.

/// A parsed slash command from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show help overlay
    Help,
    /// Exit the application
    Quit,
    /// Start a new conversation
    New,
    /// Delete the active conversation
    Delete,
    /// Attach a document to the next message
    Doc(Option<String>),
    /// Attach an image to the next message
    Image(Option<String>),
    /// Open the profile dialog
    Profile,
    /// Copy last assistant reply to clipboard
    Copy,
    /// Show or hide the sidebar
    Sidebar,

    /// Unknown command
    Unknown(String),
}

/// Command metadata for help display and autocomplete.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    /// Primary command name (without the /)
    pub name: &'static str,
    /// Alternative names for the command
    pub aliases: &'static [&'static str],
    /// Argument placeholder shown in help, if the command takes one
    pub argument: Option<&'static str>,
    /// Brief description for help
    pub description: &'static str,
    /// Keyboard shortcut if available
    pub keybinding: Option<&'static str>,
}

/// Static registry of all available commands.
pub static COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        aliases: &["?"],
        argument: None,
        description: "Show available commands",
        keybinding: Some("F1"),
    },
    CommandInfo {
        name: "quit",
        aliases: &["q", "exit"],
        argument: None,
        description: "Exit pai",
        keybinding: Some("Ctrl+C"),
    },
    CommandInfo {
        name: "new",
        aliases: &["n"],
        argument: None,
        description: "Start a new chat",
        keybinding: Some("Ctrl+N"),
    },
    CommandInfo {
        name: "delete",
        aliases: &["del"],
        argument: None,
        description: "Delete the current chat",
        keybinding: Some("Ctrl+D"),
    },
    CommandInfo {
        name: "doc",
        aliases: &["document"],
        argument: Some("<path>"),
        description: "Attach a document",
        keybinding: None,
    },
    CommandInfo {
        name: "image",
        aliases: &["img"],
        argument: Some("<path>"),
        description: "Attach an image",
        keybinding: None,
    },
    CommandInfo {
        name: "profile",
        aliases: &[],
        argument: None,
        description: "Edit your profile",
        keybinding: Some("Ctrl+P"),
    },
    CommandInfo {
        name: "copy",
        aliases: &[],
        argument: None,
        description: "Copy last reply to clipboard",
        keybinding: None,
    },
    CommandInfo {
        name: "sidebar",
        aliases: &[],
        argument: None,
        description: "Toggle the chat list",
        keybinding: Some("Ctrl+B"),
    },
];

/// Parse a slash command from user input.
///
/// Returns `None` if the input is not a valid command format.
/// Returns `Command::Unknown` if the command is not recognized.
///
/// # Examples
///
/// ```
/// use pai_tui::commands::{parse_command, Command};
///
/// assert!(matches!(parse_command("/help"), Some(Command::Help)));
/// assert!(matches!(parse_command("/q"), Some(Command::Quit)));
/// assert!(matches!(parse_command("/doc notes.pdf"), Some(Command::Doc(Some(_)))));
/// ```
pub fn parse_command(input: &str) -> Option<Command> {
    let content = input.trim().strip_prefix('/')?;

    let (cmd_str, args) = match content.find(char::is_whitespace) {
        Some(idx) => {
            let (c, a) = content.split_at(idx);
            let a = a.trim();
            (c.to_lowercase(), (!a.is_empty()).then(|| a.to_string()))
        }
        None => (content.to_lowercase(), None),
    };

    Some(match cmd_str.as_str() {
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" => Command::New,
        "delete" | "del" => Command::Delete,
        "doc" | "document" => Command::Doc(args),
        "image" | "img" => Command::Image(args),
        "profile" => Command::Profile,
        "copy" => Command::Copy,
        "sidebar" => Command::Sidebar,
        other => Command::Unknown(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help_commands() {
        assert!(matches!(parse_command("/help"), Some(Command::Help)));
        assert!(matches!(parse_command("/?"), Some(Command::Help)));
        assert!(matches!(parse_command("/HELP"), Some(Command::Help)));
        assert!(matches!(parse_command("  /help  "), Some(Command::Help)));
    }

    #[test]
    fn test_parse_quit_commands() {
        assert!(matches!(parse_command("/quit"), Some(Command::Quit)));
        assert!(matches!(parse_command("/q"), Some(Command::Quit)));
        assert!(matches!(parse_command("/exit"), Some(Command::Quit)));
    }

    #[test]
    fn test_parse_conversation_commands() {
        assert!(matches!(parse_command("/new"), Some(Command::New)));
        assert!(matches!(parse_command("/n"), Some(Command::New)));
        assert!(matches!(parse_command("/delete"), Some(Command::Delete)));
        assert!(matches!(parse_command("/profile"), Some(Command::Profile)));
        assert!(matches!(parse_command("/copy"), Some(Command::Copy)));
        assert!(matches!(parse_command("/sidebar"), Some(Command::Sidebar)));
    }

    #[test]
    fn test_parse_attachment_paths() {
        match parse_command("/doc ~/My Files/plan.pdf") {
            Some(Command::Doc(Some(path))) => assert_eq!(path, "~/My Files/plan.pdf"),
            other => panic!("Expected Doc with path, got {other:?}"),
        }
        match parse_command("/img shot.png") {
            Some(Command::Image(Some(path))) => assert_eq!(path, "shot.png"),
            other => panic!("Expected Image with path, got {other:?}"),
        }
        assert_eq!(parse_command("/doc"), Some(Command::Doc(None)));
        assert_eq!(parse_command("/image   "), Some(Command::Image(None)));
    }

    #[test]
    fn test_parse_unknown_command() {
        match parse_command("/foobar") {
            Some(Command::Unknown(s)) => assert_eq!(s, "foobar"),
            other => panic!("Expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_non_command() {
        assert!(parse_command("hello").is_none());
        assert!(parse_command("").is_none());
        assert!(parse_command("   ").is_none());
    }

    #[test]
    fn test_commands_registry() {
        assert!(COMMANDS.iter().any(|c| c.name == "help"));
        assert!(COMMANDS.iter().any(|c| c.name == "doc" && c.argument.is_some()));

        let quit_cmd = COMMANDS.iter().find(|c| c.name == "quit").unwrap();
        assert!(quit_cmd.aliases.contains(&"q"));
    }
}
