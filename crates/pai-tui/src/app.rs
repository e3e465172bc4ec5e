//! Application state and update logic for the pai TUI.

use crate::commands::{is_command, is_escaped_slash, parse_command, unescape_slash, Command};
use crate::composer::Composer;
use crate::event::{key_to_action, Action};
use crate::render::transcript_lines;
use crate::screens::chat::{max_scroll, message_viewport};
use crate::timestamps::TimestampTracker;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pai_engine::{
    AttachmentKind, Config, ConversationId, Effect, Profile, ProfileEditor, Role, Store,
    StoreError, StoreEvent,
};
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Ticks a status bar notification stays up.
const NOTIFICATION_TICKS: usize = 12;

/// Lines moved per PageUp/PageDown.
const SCROLL_STEP: usize = 5;

/// Terminal area assumed until the first frame is drawn.
const DEFAULT_VIEWPORT: Rect = Rect::new(0, 0, 80, 24);

/// Shown when the user tries to delete the only conversation.
pub const DELETE_LAST_NOTICE: &str = "Cannot delete the last conversation.";

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Chat,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub config: Config,

    /// Current screen.
    pub screen: Screen,

    /// Latest conversation snapshot.
    pub store: Store,

    pub composer: Composer,

    /// Which message timestamps are currently shown.
    pub timestamps: TimestampTracker,

    pub profile: ProfileEditor,

    /// Whether the profile dialog is open.
    pub profile_open: bool,

    /// Whether to show the help overlay.
    pub show_help: bool,

    /// Blocking notice; any key dismisses it.
    pub notice: Option<String>,

    pub sidebar_open: bool,

    /// Transcript lines scrolled up from the bottom, at most [`App::max_scroll`].
    pub scroll_offset: usize,

    /// Terminal area of the last frame.
    viewport: Rect,

    /// Temporary notification message (shown in status bar).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Whether the app should quit.
    pub should_quit: bool,

    /// Engine effects waiting for the run loop.
    effects: Vec<Effect>,

    /// Replies scheduled but not yet delivered, per conversation.
    awaiting: HashMap<ConversationId, usize>,
}

impl App {
    /// Create a new app instance.
    pub fn new(config: Config) -> Self {
        let store = Store::new(&config);
        let mut timestamps = TimestampTracker::new(config.timestamp_visible());
        timestamps.observe(store.active(), Instant::now());

        Self {
            config,
            screen: Screen::default(),
            store,
            composer: Composer::new(),
            timestamps,
            profile: ProfileEditor::new(Profile::default()),
            profile_open: false,
            show_help: false,
            notice: None,
            sidebar_open: true,
            scroll_offset: 0,
            viewport: DEFAULT_VIEWPORT,
            notification: None,
            notification_ttl: 0,
            should_quit: false,
            effects: Vec::new(),
            awaiting: HashMap::new(),
        }
    }

    /// An app with the stock configuration, for tests and snapshots.
    pub fn new_for_test() -> Self {
        Self::new(Config::default())
    }

    /// Route a key press to whatever currently has focus.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.take().is_some() {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.profile_open {
            self.handle_profile_key(key);
            return;
        }

        let action = key_to_action(key);
        match self.screen {
            Screen::Landing => match action {
                Action::None if key.code == KeyCode::Char('q') => self.should_quit = true,
                Action::Select => self.enter_chat(),
                Action::Quit | Action::Help => self.handle_action(action),
                _ => {}
            },
            Screen::Chat => {
                if action == Action::None {
                    self.edit_composer(key);
                } else {
                    self.handle_action(action);
                }
            }
        }
    }

    /// Handle a key action on the chat screen.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Help => self.show_help = true,
            Action::Back => self.screen = Screen::Landing,
            Action::Select => self.send(),
            Action::Up => self.composer.input.history_prev(),
            Action::Down => self.composer.input.history_next(),
            Action::NewChat => {
                self.dispatch(StoreEvent::Create);
            }
            Action::DeleteChat => {
                self.dispatch(StoreEvent::Delete(self.store.active_id()));
            }
            Action::ToggleSidebar => self.sidebar_open = !self.sidebar_open,
            Action::Profile => self.open_profile(),
            Action::PrevChat => self.select_neighbor(false),
            Action::NextChat => self.select_neighbor(true),
            Action::ScrollUp => {
                self.scroll_offset = (self.scroll_offset + SCROLL_STEP).min(self.max_scroll());
            }
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP),
            Action::NextField | Action::None => {}
        }
    }

    /// Switch from the landing page to the chat.
    pub fn enter_chat(&mut self) {
        self.screen = Screen::Chat;
        self.timestamps.reset(self.store.active(), Instant::now());
    }

    /// Apply a store event, queueing its effects. Returns false if it was refused.
    pub fn dispatch(&mut self, event: StoreEvent) -> bool {
        let previous = self.store.active_id();
        match self.store.apply(event) {
            Ok(transition) => {
                self.store = transition.store;
                for effect in &transition.effects {
                    match *effect {
                        Effect::ScheduleReply(id) => *self.awaiting.entry(id).or_default() += 1,
                        Effect::CancelReplies(id) => {
                            self.awaiting.remove(&id);
                        }
                    }
                }
                self.effects.extend(transition.effects);
                self.refresh_view(previous, Instant::now());
                true
            }
            Err(StoreError::CannotDeleteLast) => {
                self.notice = Some(DELETE_LAST_NOTICE.to_string());
                false
            }
            Err(StoreError::EmptyMessage) => false,
            Err(err @ StoreError::ConversationNotFound(_)) => {
                warn!(error = %err, "Store event refused");
                self.set_notification(err.to_string());
                false
            }
        }
    }

    /// Deliver a reply whose delay has elapsed.
    pub fn deliver_reply(&mut self, conversation_id: ConversationId) {
        if let Some(count) = self.awaiting.get_mut(&conversation_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.awaiting.remove(&conversation_id);
            }
        }

        let previous = self.store.active_id();
        match self.store.append_assistant_reply(conversation_id) {
            Ok(transition) => {
                self.store = transition.store;
                self.refresh_view(previous, Instant::now());
            }
            Err(err) => {
                debug!(conversation_id = %conversation_id, error = %err, "Dropped reply");
            }
        }
    }

    /// Effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Whether the active conversation is waiting for a reply.
    pub fn is_typing(&self) -> bool {
        self.awaiting
            .get(&self.store.active_id())
            .is_some_and(|count| *count > 0)
    }

    /// Record the terminal area, keeping the scroll offset inside the transcript.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        if self.scroll_offset > 0 {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll());
        }
    }

    /// How far the active transcript can scroll up in the current viewport.
    pub fn max_scroll(&self) -> usize {
        let viewport = message_viewport(self.viewport, self.sidebar_open);
        if viewport.width == 0 {
            return 0;
        }
        let lines = transcript_lines(
            self.store.active(),
            &self.timestamps,
            self.is_typing(),
            viewport.width,
        );
        max_scroll(lines.len(), viewport.height)
    }

    /// Update on tick (for animations, notifications, etc.).
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Like [`App::tick`] with an explicit clock reading.
    pub fn tick_at(&mut self, now: Instant) {
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
        self.timestamps.expire(now);
    }

    /// Set a temporary notification message.
    pub fn set_notification(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_ttl = NOTIFICATION_TICKS;
    }

    fn send(&mut self) {
        let content = self.composer.input.content();
        if is_command(content) {
            let command = parse_command(content);
            self.composer.input.submit();
            if let Some(command) = command {
                self.run_command(command);
            }
            return;
        }

        let Some(mut submission) = self.composer.submit() else {
            return;
        };
        if is_escaped_slash(&submission.text) {
            submission.text = unescape_slash(&submission.text);
        }
        self.scroll_offset = 0;
        self.dispatch(StoreEvent::AppendUser {
            conversation_id: self.store.active_id(),
            text: submission.text,
            attachments: submission.attachments,
        });
    }

    fn run_command(&mut self, command: Command) {
        debug!(?command, "Running command");
        match command {
            Command::Help => self.show_help = true,
            Command::Quit => self.should_quit = true,
            Command::New => {
                self.dispatch(StoreEvent::Create);
            }
            Command::Delete => {
                self.dispatch(StoreEvent::Delete(self.store.active_id()));
            }
            Command::Doc(path) => self.attach(AttachmentKind::Document, path.as_deref(), "/doc"),
            Command::Image(path) => self.attach(AttachmentKind::Image, path.as_deref(), "/image"),
            Command::Profile => self.open_profile(),
            Command::Copy => self.copy_last_reply(),
            Command::Sidebar => self.sidebar_open = !self.sidebar_open,
            Command::Unknown(name) => self.set_notification(format!("Unknown command: /{name}")),
        }
    }

    fn attach(&mut self, kind: AttachmentKind, path: Option<&str>, usage: &str) {
        let Some(path) = path else {
            self.set_notification(format!("Usage: {usage} <path>"));
            return;
        };
        match self.composer.attach(kind, Path::new(path)) {
            Some(name) => {
                info!(name = %name, ?kind, "Attached file");
                self.set_notification(format!("Attached {name}"));
            }
            None => self.set_notification(format!("Not a file: {path}")),
        }
    }

    fn copy_last_reply(&mut self) {
        let Some(text) = self
            .store
            .active()
            .messages()
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.clone())
        else {
            self.set_notification("Nothing to copy");
            return;
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_notification("Copied to clipboard"),
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                self.set_notification(format!("Clipboard unavailable: {e}"));
            }
        }
    }

    fn open_profile(&mut self) {
        self.profile.begin();
        self.profile_open = true;
    }

    fn handle_profile_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                self.profile.cancel();
                self.profile_open = false;
            }
            KeyCode::Enter => {
                if self.profile.is_dirty() {
                    self.profile.save();
                    info!("Profile saved");
                    self.set_notification("Profile saved");
                } else {
                    self.set_notification("No profile changes");
                }
                self.profile_open = false;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.profile.field = self.profile.field.toggle();
            }
            KeyCode::Backspace => {
                self.profile.field_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.profile.field_mut().push(c);
            }
            _ => {}
        }
    }

    fn edit_composer(&mut self, key: KeyEvent) {
        let input = &mut self.composer.input;
        match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                input.insert(c);
            }
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_left(),
            KeyCode::Right => input.move_right(),
            KeyCode::Home => input.move_home(),
            KeyCode::End => input.move_end(),
            _ => {}
        }
    }

    fn select_neighbor(&mut self, next: bool) {
        let Some(position) = self.store.position(self.store.active_id()) else {
            return;
        };
        let target = if next {
            position + 1
        } else if let Some(previous) = position.checked_sub(1) {
            previous
        } else {
            return;
        };
        if let Some(conversation) = self.store.conversations().get(target) {
            self.dispatch(StoreEvent::Select(conversation.id));
        }
    }

    /// Keep timestamps and scroll in step with the active conversation.
    fn refresh_view(&mut self, previous: ConversationId, now: Instant) {
        let active = self.store.active_id();
        if active != previous {
            self.scroll_offset = 0;
            self.timestamps.reset(self.store.active(), now);
            // Attachments belong to the conversation they were picked in
            let dropped = self.composer.discard_attachments();
            if dropped > 0 {
                debug!(dropped, conversation_id = %previous, "Discarded pending attachments");
                self.set_notification("Attachments discarded");
            }
        }
        self.timestamps.retain(|conversation_id, _| conversation_id == active);
        self.timestamps.observe(self.store.active(), now);
    }
}
