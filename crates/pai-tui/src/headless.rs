//! Headless mode for the pai TUI.
//!
//! Runs the same loop as the terminal UI against ratatui's `TestBackend`.
//! Keys are sent over a channel and the rendered screen is published through
//! a `watch` channel after every frame, which makes end-to-end tests of the
//! send and delayed-reply flow possible without a terminal.

use crate::app::{App, Screen};
use crate::{apply_effects, screens};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pai_engine::{Config, ReplyScheduler};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 100;
pub const DEFAULT_HEIGHT: u16 = 30;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Current screen being displayed.
    pub screen: Screen,
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
    /// Number of conversations in the store.
    pub conversations: usize,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    key_tx: mpsc::UnboundedSender<KeyEvent>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send a key to the TUI. Returns `true` if the loop is still listening.
    pub fn send_key(&self, key: KeyEvent) -> bool {
        self.key_tx.send(key).is_ok()
    }

    /// Send a key without modifiers.
    pub fn press(&self, code: KeyCode) -> bool {
        self.send_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Send a Ctrl+<c> chord.
    pub fn ctrl(&self, c: char) -> bool {
        self.send_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// Type each character of `text`.
    pub fn type_text(&self, text: &str) -> bool {
        text.chars().all(|c| self.press(KeyCode::Char(c)))
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                // Timed out, or the loop exited
                Ok(Err(_)) | Err(_) => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Wait for a specific screen to be displayed.
    pub async fn wait_for_screen(
        &mut self,
        screen: Screen,
        timeout: Duration,
    ) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen == screen, timeout).await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Start on the chat screen.
    pub skip_landing: bool,
    /// App configuration; its `tick_rate_ms` paces the loop.
    pub app: Config,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            skip_landing: false,
            app: Config::default(),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Must be called from within a tokio runtime. Returns a handle to control
/// the TUI and a join handle for the background task.
pub fn run_tui_headless(config: HeadlessConfig) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (key_tx, key_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(config, key_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    (HeadlessHandle { key_tx, state_rx }, task)
}

async fn run_headless_loop(
    config: HeadlessConfig,
    mut key_rx: mpsc::UnboundedReceiver<KeyEvent>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.app);
    if config.skip_landing {
        app.enter_chat();
    }
    let (mut scheduler, mut replies) = ReplyScheduler::new(app.config.reply_delay());
    let tick_duration = Duration::from_millis(app.config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.set_viewport(area);
            screens::render_app(&app, area, frame.buffer_mut());
        })?;

        let _ = state_tx.send(HeadlessState {
            screen: app.screen,
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            should_quit: app.should_quit,
            show_help: app.show_help,
            conversations: app.store.len(),
        });

        if app.should_quit {
            break;
        }

        tokio::select! {
            Some(key) = key_rx.recv() => app.handle_key(key),
            Some(ready) = replies.recv() => app.deliver_reply(ready.conversation_id),
            () = tokio::time::sleep(tick_duration) => app.tick(),
        }

        apply_effects(&mut app, &mut scheduler);
    }

    scheduler.shutdown();
    Ok(())
}

/// Convert a terminal buffer to plain text, one line per row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::chat::HEADER_TITLE;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.app.tick_rate_ms, Config::default().tick_rate_ms);
        assert!(!config.skip_landing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_app_tick_rate() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig {
            skip_landing: true,
            app: Config {
                tick_rate_ms: 1000,
                ..Config::default()
            },
            ..HeadlessConfig::default()
        });

        handle.type_text("/nope");
        handle.press(KeyCode::Enter);
        assert!(handle.wait_for_text("Unknown command: /nope", WAIT).await.is_some());

        // Twelve ticks of one second each before the notification clears
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(handle.state().screen_contents.contains("Unknown command: /nope"));
        assert!(handle
            .wait_for(|s| !s.screen_contents.contains("Unknown command"), Duration::from_secs(20))
            .await
            .is_some());

        handle.ctrl('c');
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_landing_to_chat_and_quit() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig::default());
        assert!(handle.wait_for_text("Get Started", WAIT).await.is_some());

        handle.press(KeyCode::Enter);
        let state = handle.wait_for_screen(Screen::Chat, WAIT).await.unwrap();
        assert_eq!(state.conversations, 4);

        handle.ctrl('c');
        assert!(handle.wait_for(|s| s.should_quit, WAIT).await.is_some());
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_hello_gets_title_and_delayed_reply() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig {
            skip_landing: true,
            ..HeadlessConfig::default()
        });
        assert!(handle.wait_for_text(HEADER_TITLE, WAIT).await.is_some());

        handle.type_text("Hello");
        handle.press(KeyCode::Enter);

        let state = handle
            .wait_for_text("Assistant is typing...", WAIT)
            .await
            .unwrap();
        assert!(state.screen_contents.contains("·  Hello"));
        assert!(!state.screen_contents.contains("I understand your query."));

        let state = handle
            .wait_for_text("I understand your query.", WAIT)
            .await
            .unwrap();
        assert!(!state.screen_contents.contains("Assistant is typing..."));

        handle.ctrl('c');
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleting_last_conversation_shows_notice() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig {
            skip_landing: true,
            app: Config {
                seed_demo_history: false,
                ..Config::default()
            },
            ..HeadlessConfig::default()
        });

        handle.ctrl('d');
        let state = handle
            .wait_for_text("Cannot delete the last conversation.", WAIT)
            .await
            .unwrap();
        assert_eq!(state.conversations, 1);

        handle.press(KeyCode::Char('x'));
        assert!(handle
            .wait_for(|s| !s.screen_contents.contains("Notice"), WAIT)
            .await
            .is_some());

        handle.ctrl('c');
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_for_deleted_chat_never_lands() {
        let (mut handle, task) = run_tui_headless(HeadlessConfig {
            skip_landing: true,
            ..HeadlessConfig::default()
        });

        handle.type_text("Hi");
        handle.press(KeyCode::Enter);
        handle.ctrl('d');
        let state = handle.wait_for(|s| s.conversations == 3, WAIT).await.unwrap();
        assert!(!state.screen_contents.contains("typing"));

        // Well past the reply delay
        tokio::time::sleep(Duration::from_secs(3)).await;
        let state = handle.state();
        assert_eq!(state.conversations, 3);
        assert!(!state.screen_contents.contains("I understand your query."));

        handle.ctrl('c');
        task.await.unwrap().unwrap();
    }
}
