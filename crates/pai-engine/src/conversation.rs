//! Conversation and message model.
//!
//! A [`Conversation`] is an append-only list of [`Message`]s. Messages are
//! never edited once created; the only mutation a conversation supports is
//! appending, and even that goes through the store so callers observe whole
//! snapshots.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Greeting seeded into every new conversation.
pub const GREETING: &str = "Hello! I'm your Personal AI Assistant. How can I help you today?";

/// Canned reply delivered for every user message.
pub const PLACEHOLDER_REPLY: &str = "I understand your query. This is a demo response. In a full implementation, I would process your request and provide a detailed, helpful answer.";

/// Title shown until the first user message names the conversation.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 30;

/// Identifier of a conversation, unique within a store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub u64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a message, increasing by creation order within its conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Typed by the person at the keyboard.
    User,
    /// Produced by the (simulated) assistant.
    Assistant,
}

impl Role {
    /// Label used in headers and transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
        }
    }
}

/// Kind of file attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Document,
    Image,
}

/// A file reference attached to a user message.
///
/// Only the name is ever displayed; the file content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// Display name (the file name component of the locator).
    pub name: String,
    /// Where the file was picked from.
    pub locator: String,
}

impl Attachment {
    /// Build an attachment from a picked path, keeping only its file name for display.
    ///
    /// Returns `None` when the path has no file name component (e.g. `/` or `..`).
    pub fn from_path(kind: AttachmentKind, path: &std::path::Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            kind,
            name,
            locator: path.display().to_string(),
        })
    }
}

/// A single immutable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// An ordered, append-only conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    /// When the conversation last received a message.
    pub last_activity: DateTime<Utc>,
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation seeded with the assistant greeting.
    pub fn new(id: ConversationId, greeting: &str, now: DateTime<Utc>) -> Self {
        let mut conversation = Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            last_activity: now,
            messages: Vec::new(),
        };
        conversation.push(Role::Assistant, greeting.to_string(), Vec::new(), now);
        conversation
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether the user has written anything yet.
    pub fn has_user_message(&self) -> bool {
        self.messages.iter().any(|m| m.role == Role::User)
    }

    /// Relative label for the last activity, e.g. "2 hours ago".
    pub fn activity_label(&self, now: DateTime<Utc>) -> String {
        relative_label(now - self.last_activity)
    }

    /// Append a message, assigning the next id.
    pub(crate) fn push(
        &mut self,
        role: Role,
        content: String,
        attachments: Vec<Attachment>,
        now: DateTime<Utc>,
    ) -> MessageId {
        let id = MessageId(self.messages.last().map_or(1, |m| m.id.0 + 1));
        self.messages.push(Message {
            id,
            role,
            content,
            timestamp: now,
            attachments,
        });
        self.last_activity = now;
        id
    }
}

/// Truncate text to a title: the first `max_chars` characters, untrimmed, no ellipsis.
pub fn title_from(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Format an elapsed duration as a sidebar activity label.
pub fn relative_label(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if hours < 48 {
        "Yesterday".to_string()
    } else {
        format!("{days} days ago")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_conversation_has_greeting() {
        let now = Utc::now();
        let conversation = Conversation::new(ConversationId(7), GREETING, now);

        assert_eq!(conversation.title, DEFAULT_TITLE);
        assert_eq!(conversation.messages().len(), 1);

        let greeting = &conversation.messages()[0];
        assert_eq!(greeting.id, MessageId(1));
        assert_eq!(greeting.role, Role::Assistant);
        assert_eq!(greeting.content, GREETING);
        assert!(!conversation.has_user_message());
    }

    #[test]
    fn test_message_ids_increase() {
        let now = Utc::now();
        let mut conversation = Conversation::new(ConversationId(1), GREETING, now);
        let a = conversation.push(Role::User, "one".into(), Vec::new(), now);
        let b = conversation.push(Role::Assistant, "two".into(), Vec::new(), now);

        assert_eq!(a, MessageId(2));
        assert_eq!(b, MessageId(3));
        assert!(conversation.has_user_message());
    }

    #[test]
    fn test_title_from_truncates_by_chars() {
        assert_eq!(title_from("Hello", 30), "Hello");
        assert_eq!(
            title_from("This is a rather long first message indeed", 30),
            "This is a rather long first me"
        );
        // No trimming, no ellipsis
        assert_eq!(title_from("  padded", 4), "  pa");
        // Multi-byte characters count as one
        assert_eq!(title_from("héllo wörld", 7), "héllo w");
    }

    #[test]
    fn test_relative_labels() {
        assert_eq!(relative_label(Duration::seconds(10)), "Just now");
        assert_eq!(relative_label(Duration::seconds(-30)), "Just now");
        assert_eq!(relative_label(Duration::minutes(1)), "1 minute ago");
        assert_eq!(relative_label(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(relative_label(Duration::hours(2)), "2 hours ago");
        assert_eq!(relative_label(Duration::hours(30)), "Yesterday");
        assert_eq!(relative_label(Duration::days(2)), "2 days ago");
    }

    #[test]
    fn test_attachment_from_path_keeps_file_name() {
        let path = std::path::Path::new("/home/me/reports/q3.pdf");
        let attachment = Attachment::from_path(AttachmentKind::Document, path).unwrap();
        assert_eq!(attachment.name, "q3.pdf");
        assert_eq!(attachment.locator, "/home/me/reports/q3.pdf");

        assert!(Attachment::from_path(AttachmentKind::Image, std::path::Path::new("/")).is_none());
    }

    #[test]
    fn test_message_serializes_lowercase_role() {
        let now = Utc::now();
        let conversation = Conversation::new(ConversationId(1), GREETING, now);
        let json = serde_json::to_string(&conversation.messages()[0]).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(!json.contains("attachments"));
    }
}
