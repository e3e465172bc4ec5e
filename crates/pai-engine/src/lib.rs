//! pai-engine: Headless conversation engine for the pai demo assistant
//!
//! This crate provides the UI-independent core, including:
//! - Conversation and message model
//! - Conversation store (immutable snapshots, transitions with effects)
//! - Cancellable scheduling of simulated assistant replies
//! - Session profile editing
//! - Configuration

pub mod config;
pub mod conversation;
pub mod profile;
pub mod scheduler;
pub mod store;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use conversation::{
    Attachment, AttachmentKind, Conversation, ConversationId, Message, MessageId, Role,
};
pub use profile::{Profile, ProfileEditor, ProfileField};
pub use scheduler::{ReplyReady, ReplyScheduler};
pub use store::{Effect, Store, StoreError, StoreEvent, Transition};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
