//! pai-tui: Terminal UI for the pai demo assistant
//!
//! This crate provides the terminal layer, including:
//! - Landing page and chat screen (sidebar, messages, composer)
//! - Profile dialog, notices and help overlay
//! - Slash commands typed into the composer
//! - Headless mode for testing and automation

mod app;
pub mod commands;
mod composer;
mod event;
pub mod headless;
mod render;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod text;
mod timestamps;
mod ui;

pub use app::{App, Screen};
pub use event::{Action, Event, EventHandler};
pub use pai_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pai_engine::{Config, Effect, ReplyScheduler};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit. Pending replies are aborted when the loop ends.
pub async fn run_tui(config: Config, skip_landing: bool) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config);
    if skip_landing {
        app.enter_chat();
    }

    info!(conversations = app.store.len(), "Starting TUI");
    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut scheduler, mut replies) = ReplyScheduler::new(app.config.reply_delay());

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.set_viewport(area);
            screens::render_app(app, area, frame.buffer_mut());
        })?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Event::Key(key)) => app.handle_key(key),
                Some(Event::Tick) => app.tick(),
                // Redrawn on the next pass
                Some(Event::Resize(_, _)) => {}
                None => break,
            },
            Some(ready) = replies.recv() => app.deliver_reply(ready.conversation_id),
        }

        apply_effects(app, &mut scheduler);
    }

    if scheduler.is_busy() {
        info!("Aborting pending replies");
    }
    scheduler.shutdown();
    info!("TUI stopped");
    Ok(())
}

/// Carry out the effects the app queued since the last pass.
pub(crate) fn apply_effects(app: &mut App, scheduler: &mut ReplyScheduler) {
    for effect in app.take_effects() {
        match effect {
            Effect::ScheduleReply(id) => scheduler.schedule(id),
            Effect::CancelReplies(id) => {
                scheduler.cancel(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pai_engine::Role;
    use std::time::Duration;

    fn send(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_effects_drive_scheduler() {
        let mut app = App::new_for_test();
        app.enter_chat();
        let (mut scheduler, mut replies) = ReplyScheduler::new(app.config.reply_delay());
        let id = app.store.active_id();

        send(&mut app, "Hello");
        apply_effects(&mut app, &mut scheduler);
        assert_eq!(scheduler.pending(id), 1);

        let ready = replies.recv().await.unwrap();
        app.deliver_reply(ready.conversation_id);

        let last = app.store.active().last_message().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, app.config.placeholder_reply);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_aborts_scheduled_reply() {
        let mut app = App::new_for_test();
        app.enter_chat();
        let (mut scheduler, mut replies) = ReplyScheduler::new(app.config.reply_delay());
        let id = app.store.active_id();

        send(&mut app, "Hello");
        apply_effects(&mut app, &mut scheduler);
        app.handle_action(Action::DeleteChat);
        apply_effects(&mut app, &mut scheduler);
        assert_eq!(scheduler.pending(id), 0);

        let waited = tokio::time::timeout(Duration::from_secs(5), replies.recv()).await;
        assert!(waited.is_err());
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::app::DELETE_LAST_NOTICE;
    use crate::test_utils::*;
    use insta::assert_snapshot;
    use ratatui::{buffer::Buffer, layout::Rect};

    /// Draws only the overlays, so a snapshot shows them on a blank screen.
    struct Overlays;

    impl screens::Screen for Overlays {
        fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
            if app.profile_open {
                screens::render_profile_dialog(app, area, buf);
            }
            if let Some(notice) = &app.notice {
                screens::render_notice(notice, area, buf);
            }
        }
    }

    // ========================================================================
    // Screen Snapshot Tests
    // ========================================================================

    #[test]
    fn test_snapshot_landing_screen() {
        let app = create_test_app();
        let result = render_screen_to_string(&screens::LandingScreen, &app);
        assert_snapshot!("landing", result);
    }

    #[test]
    fn test_snapshot_chat_screen() {
        let app = create_test_app_at_screen(Screen::Chat);
        let result = render_screen_to_string_sized(&screens::ChatScreen, &app, 100, 30);
        insta::with_settings!({filters => vec![(r"\d{2}:\d{2}", "[time]")]}, {
            assert_snapshot!("chat", result);
        });
    }

    // ========================================================================
    // Overlay Snapshot Tests
    // ========================================================================

    #[test]
    fn test_snapshot_profile_dialog() {
        let mut app = create_test_app();
        app.profile.begin();
        app.profile.set_contact("me@example.com");
        app.profile_open = true;
        let result = render_screen_to_string_sized(&Overlays, &app, 60, 14);
        assert_snapshot!("profile_dialog", result);
    }

    #[test]
    fn test_snapshot_notice_overlay() {
        let mut app = create_test_app_at_screen(Screen::Chat);
        app.notice = Some(DELETE_LAST_NOTICE.to_string());
        let result = render_screen_to_string_sized(&Overlays, &app, 60, 10);
        assert_snapshot!("notice_overlay", result);
    }
}
