//! Screen definitions for the pai TUI.

pub mod chat;
pub mod landing;
pub mod profile;

use crate::app::{App, Screen as ScreenKind};
use crate::commands::COMMANDS;
use crate::ui::centered_fixed;
use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

pub use chat::ChatScreen;
pub use landing::LandingScreen;
pub use profile::render_profile_dialog;

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the current screen plus whatever overlay is open.
pub fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    match app.screen {
        ScreenKind::Landing => LandingScreen.render(app, area, buf),
        ScreenKind::Chat => ChatScreen.render(app, area, buf),
    }

    if app.profile_open {
        render_profile_dialog(app, area, buf);
    }
    if app.show_help {
        render_help_overlay(area, buf);
    }
    if let Some(notice) = &app.notice {
        render_notice(notice, area, buf);
    }
}

const KEYS: [(&str, &str); 10] = [
    ("Enter", "Send message"),
    ("Ctrl+N", "New chat"),
    ("Ctrl+D", "Delete chat"),
    ("Ctrl+Up/Down", "Previous/next chat"),
    ("Alt+k/j", "Previous/next chat"),
    ("Ctrl+B", "Toggle sidebar"),
    ("Ctrl+P", "Edit profile"),
    ("PgUp/PgDn", "Scroll messages"),
    ("Esc", "Back to landing"),
    ("Ctrl+C", "Quit"),
];

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let mut lines = vec![Line::from(Span::styled("  Keys", Styles::highlight()))];
    for (key, label) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("    {key:<16}"), Styles::accent()),
            Span::styled(label, Styles::default()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Commands", Styles::highlight())));
    for command in COMMANDS {
        let usage = match command.argument {
            Some(arg) => format!("/{} {arg}", command.name),
            None => format!("/{}", command.name),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("    {usage:<16}"), Styles::accent()),
            Span::styled(command.description, Styles::default()),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "    //text          Send text starting with /",
        Styles::dim(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  [Press any key to close]",
        Styles::dim(),
    )));

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let width = 56.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    Paragraph::new(lines)
        .block(block)
        .style(Styles::default())
        .render(overlay_area, buf);
}

/// Render a blocking notice.
pub fn render_notice(message: &str, area: Rect, buf: &mut Buffer) {
    let width = 48.min(area.width.saturating_sub(4));
    let overlay_area = centered_fixed(width, 6, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Notice ")
        .title_style(Styles::warning())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Styles::default())),
        Line::from(""),
        Line::from(Span::styled("[Press any key]", Styles::dim())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block)
    .render(overlay_area, buf);
}
