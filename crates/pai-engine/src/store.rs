//! Conversation store.
//!
//! [`Store`] is an immutable snapshot of every conversation plus the active
//! pointer. Operations never mutate a snapshot in place: each one returns a
//! [`Transition`] holding the next snapshot and the side effects the host
//! must carry out (scheduling or cancelling simulated replies).
//!
//! Invariants held by every snapshot:
//! - at least one conversation exists
//! - `active_id` names an existing conversation
//! - conversation ids are never reused

use crate::config::Config;
use crate::conversation::{title_from, Attachment, Conversation, ConversationId, Role};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

/// Sample sidebar history: (title, age).
const DEMO_HISTORY: [(&str, i64); 3] = [
    ("Product Research", 2),
    ("Code Review Help", 26),
    ("Document Analysis", 50),
];

/// Text settings shared by every snapshot of a store.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoreSettings {
    greeting: String,
    placeholder_reply: String,
    title_max_chars: usize,
}

/// An operation on the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Insert a new conversation at the front and select it.
    Create,
    /// Make an existing conversation active.
    Select(ConversationId),
    /// Remove a conversation (never the last one).
    Delete(ConversationId),
    /// Append a user message and request a reply.
    AppendUser {
        conversation_id: ConversationId,
        text: String,
        attachments: Vec<Attachment>,
    },
    /// Deliver a previously scheduled reply.
    AssistantReply(ConversationId),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Deliver the placeholder reply to this conversation after the reply delay.
    ScheduleReply(ConversationId),
    /// Drop any reply still pending for this conversation.
    CancelReplies(ConversationId),
}

/// Result of applying an event: the next snapshot and what to do about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub store: Store,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(store: Store) -> Self {
        Self {
            store,
            effects: Vec::new(),
        }
    }
}

/// Errors reported by store operations. None of them change state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Cannot delete the last conversation")]
    CannotDeleteLast,

    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Message is empty")]
    EmptyMessage,
}

/// Immutable snapshot of all conversations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Newest first.
    conversations: Vec<Conversation>,
    active: ConversationId,
    next_id: u64,
    settings: Arc<StoreSettings>,
}

impl Store {
    /// Create a store holding a single fresh conversation.
    pub fn new(config: &Config) -> Self {
        Self::new_at(config, Utc::now())
    }

    /// Like [`Store::new`] with an explicit clock reading.
    pub fn new_at(config: &Config, now: DateTime<Utc>) -> Self {
        let settings = Arc::new(StoreSettings {
            greeting: config.greeting.clone(),
            placeholder_reply: config.placeholder_reply.clone(),
            title_max_chars: config.title_max_chars,
        });

        let first = Conversation::new(ConversationId(1), &settings.greeting, now);
        let mut conversations = vec![first];
        let mut next_id = 2;

        if config.seed_demo_history {
            for (title, hours_ago) in DEMO_HISTORY {
                let mut conversation = Conversation::new(
                    ConversationId(next_id),
                    &settings.greeting,
                    now - Duration::hours(hours_ago),
                );
                conversation.title = title.to_string();
                conversations.push(conversation);
                next_id += 1;
            }
        }

        Self {
            conversations,
            active: ConversationId(1),
            next_id,
            settings,
        }
    }

    /// All conversations, newest first.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn active_id(&self) -> ConversationId {
        self.active
    }

    /// The active conversation.
    pub fn active(&self) -> &Conversation {
        // The active id always names an existing conversation.
        self.get(self.active).unwrap_or(&self.conversations[0])
    }

    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Index of a conversation in display order.
    pub fn position(&self, id: ConversationId) -> Option<usize> {
        self.conversations.iter().position(|c| c.id == id)
    }

    /// Apply an event using the current time.
    pub fn apply(&self, event: StoreEvent) -> Result<Transition, StoreError> {
        self.apply_at(event, Utc::now())
    }

    /// Apply an event at an explicit time.
    pub fn apply_at(&self, event: StoreEvent, now: DateTime<Utc>) -> Result<Transition, StoreError> {
        match event {
            StoreEvent::Create => Ok(self.create_at(now)),
            StoreEvent::Select(id) => self.select(id),
            StoreEvent::Delete(id) => self.delete(id),
            StoreEvent::AppendUser {
                conversation_id,
                text,
                attachments,
            } => self.append_user_at(conversation_id, text, attachments, now),
            StoreEvent::AssistantReply(id) => self.assistant_reply_at(id, now),
        }
    }

    /// Insert a new conversation at the front and make it active.
    pub fn create_conversation(&self) -> Transition {
        self.create_at(Utc::now())
    }

    /// Make `id` the active conversation.
    pub fn select_conversation(&self, id: ConversationId) -> Result<Transition, StoreError> {
        self.select(id)
    }

    /// Remove `id`, refusing to remove the last conversation.
    pub fn delete_conversation(&self, id: ConversationId) -> Result<Transition, StoreError> {
        self.delete(id)
    }

    /// Append a user message to `id`.
    pub fn append_user_message(
        &self,
        id: ConversationId,
        text: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Result<Transition, StoreError> {
        self.append_user_at(id, text.into(), attachments, Utc::now())
    }

    /// Deliver the placeholder reply to `id` if it still exists.
    pub fn append_assistant_reply(&self, id: ConversationId) -> Result<Transition, StoreError> {
        self.assistant_reply_at(id, Utc::now())
    }

    fn create_at(&self, now: DateTime<Utc>) -> Transition {
        let id = ConversationId(self.next_id);
        let mut next = self.clone();
        next.conversations
            .insert(0, Conversation::new(id, &self.settings.greeting, now));
        next.active = id;
        next.next_id += 1;

        debug!(conversation_id = %id, "Created conversation");
        Transition::quiet(next)
    }

    fn select(&self, id: ConversationId) -> Result<Transition, StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::ConversationNotFound(id));
        }
        let mut next = self.clone();
        next.active = id;
        Ok(Transition::quiet(next))
    }

    fn delete(&self, id: ConversationId) -> Result<Transition, StoreError> {
        if self.conversations.len() <= 1 {
            return Err(StoreError::CannotDeleteLast);
        }
        let index = self
            .position(id)
            .ok_or(StoreError::ConversationNotFound(id))?;

        let mut next = self.clone();
        next.conversations.remove(index);
        if next.active == id {
            next.active = next.conversations[0].id;
        }

        debug!(conversation_id = %id, active = %next.active, "Deleted conversation");
        Ok(Transition {
            store: next,
            effects: vec![Effect::CancelReplies(id)],
        })
    }

    fn append_user_at(
        &self,
        id: ConversationId,
        text: String,
        attachments: Vec<Attachment>,
        now: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let index = self
            .position(id)
            .ok_or(StoreError::ConversationNotFound(id))?;

        let mut next = self.clone();
        let conversation = &mut next.conversations[index];
        if !conversation.has_user_message() {
            conversation.title = title_from(&text, self.settings.title_max_chars);
        }
        let message_id = conversation.push(Role::User, text, attachments, now);

        debug!(conversation_id = %id, message_id = %message_id, "Appended user message");
        Ok(Transition {
            store: next,
            effects: vec![Effect::ScheduleReply(id)],
        })
    }

    fn assistant_reply_at(
        &self,
        id: ConversationId,
        now: DateTime<Utc>,
    ) -> Result<Transition, StoreError> {
        let index = self
            .position(id)
            .ok_or(StoreError::ConversationNotFound(id))?;

        let mut next = self.clone();
        let reply = self.settings.placeholder_reply.clone();
        next.conversations[index].push(Role::Assistant, reply, Vec::new(), now);
        Ok(Transition::quiet(next))
    }
}
