//! Self-expiring timestamp visibility.
//!
//! Every message shows its time for a short while after it first comes into
//! view. The tracker records a deadline per message; the tick loop calls
//! [`TimestampTracker::expire`] and rendering only asks
//! [`TimestampTracker::is_visible`].

use pai_engine::{Conversation, ConversationId, MessageId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a timestamp stays up when no config says otherwise.
pub const DEFAULT_VISIBLE_FOR: Duration = Duration::from_millis(3000);

type Key = (ConversationId, MessageId);

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Instant,
    visible: bool,
}

/// Tracks which message timestamps are currently shown.
#[derive(Debug, Clone)]
pub struct TimestampTracker {
    visible_for: Duration,
    entries: HashMap<Key, Entry>,
}

impl Default for TimestampTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBLE_FOR)
    }
}

impl TimestampTracker {
    pub fn new(visible_for: Duration) -> Self {
        Self {
            visible_for,
            entries: HashMap::new(),
        }
    }

    /// Start the clock for messages of `conversation` not seen before.
    pub fn observe(&mut self, conversation: &Conversation, now: Instant) {
        let deadline = now + self.visible_for;
        for message in conversation.messages() {
            self.entries
                .entry((conversation.id, message.id))
                .or_insert(Entry {
                    deadline,
                    visible: true,
                });
        }
    }

    /// Show every timestamp of `conversation` again, as when it is opened.
    pub fn reset(&mut self, conversation: &Conversation, now: Instant) {
        let id = conversation.id;
        self.entries.retain(|(conversation_id, _), _| *conversation_id != id);
        self.observe(conversation, now);
    }

    /// Hide timestamps whose deadline has passed. Returns true if any changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for entry in self.entries.values_mut() {
            if entry.visible && entry.deadline <= now {
                entry.visible = false;
                changed = true;
            }
        }
        changed
    }

    /// Drop entries for messages no longer in view.
    pub fn retain(&mut self, mut keep: impl FnMut(ConversationId, MessageId) -> bool) {
        self.entries
            .retain(|(conversation_id, message_id), _| keep(*conversation_id, *message_id));
    }

    pub fn is_visible(&self, conversation_id: ConversationId, message_id: MessageId) -> bool {
        self.entries
            .get(&(conversation_id, message_id))
            .is_some_and(|entry| entry.visible)
    }
}
