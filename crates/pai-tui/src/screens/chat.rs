//! Chat screen: sidebar, header, message list, composer and disclaimer.

use crate::app::App;
use crate::commands::{get_completions, is_command};
use crate::render::transcript_lines;
use crate::screens::Screen;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar};
use crate::ui::{chat_layout, main_layout};
use chrono::Utc;
use pai_engine::AttachmentKind;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Footer under the composer.
pub const DISCLAIMER: &str = "AI can make mistakes. Verify important information.";

/// Heading shown above every conversation.
pub const HEADER_TITLE: &str = "Personal AI Assistant";

const PLACEHOLDER: &str = "Ask anything...";

/// The chat screen.
pub struct ChatScreen;

impl Screen for ChatScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);
        let layout = chat_layout(main_area, app.sidebar_open);

        if let Some(sidebar) = layout.sidebar {
            render_sidebar(app, sidebar, buf);
        }
        render_header(app, layout.header, buf);
        render_messages(app, layout.messages, buf);
        render_composer(app, layout.composer, buf);
        render_footer(app, layout.disclaimer, buf);

        let mut status_bar = StatusBar::new("Chat").hints(vec![
            KeyHint::new("Enter", "Send"),
            KeyHint::new("^N", "New"),
            KeyHint::new("^D", "Delete"),
            KeyHint::new("^B", "Sidebar"),
            KeyHint::new("F1", "Help"),
        ]);
        if let Some(notification) = &app.notification {
            status_bar = status_bar.right(notification);
        }
        status_bar.render(status_area, buf);
    }
}

fn render_sidebar(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Styles::border())
        .style(Styles::sidebar());
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(inner);

    Paragraph::new(vec![
        Line::from(Span::styled(" PersonalAI", Styles::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ^N ", Styles::key_hint()),
            Span::styled(" New Chat", Styles::sidebar()),
        ]),
        Line::from(""),
    ])
    .style(Styles::sidebar())
    .render(rows[0], buf);

    // Two rows per conversation; keep the active one in view.
    let now = Utc::now();
    let active = app.store.active_id();
    let capacity = usize::from(rows[1].height.saturating_sub(1)) / 2;
    let position = app.store.position(active).unwrap_or(0);
    let skip = (position + 1).saturating_sub(capacity.max(1));

    let width = usize::from(rows[1].width);
    let mut lines = vec![Line::from(Span::styled(" Recent Chats", Styles::sidebar_dim()))];
    for conversation in app.store.conversations().iter().skip(skip) {
        let selected = conversation.id == active;
        let (title_style, label_style) = if selected {
            (Styles::sidebar_selected(), Styles::sidebar_selected())
        } else {
            (Styles::sidebar(), Styles::sidebar_dim())
        };
        lines.push(Line::from(Span::styled(
            pad_to(&format!(" {}", conversation.title), width),
            title_style,
        )));
        lines.push(Line::from(Span::styled(
            pad_to(&format!("   {}", conversation.activity_label(now)), width),
            label_style,
        )));
    }
    Paragraph::new(lines)
        .style(Styles::sidebar())
        .render(rows[1], buf);

    let profile = app.profile.profile();
    let contact = if profile.contact.is_empty() {
        "User Profile"
    } else {
        profile.contact.as_str()
    };
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {}", profile.display_name), Styles::sidebar())),
        Line::from(Span::styled(format!(" {contact}"), Styles::sidebar_dim())),
    ])
    .style(Styles::sidebar())
    .render(rows[2], buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Styles::border())
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(Line::from(vec![
        Span::styled(format!(" {HEADER_TITLE}"), Styles::title()),
        Span::styled("  ·  ", Styles::dim()),
        Span::styled(app.store.active().title.clone(), Styles::dim()),
    ]))
    .render(inner, buf);
}

/// Where the transcript is drawn on a terminal of size `area`.
pub fn message_viewport(area: Rect, sidebar_open: bool) -> Rect {
    let (main_area, _) = main_layout(area);
    chat_layout(main_area, sidebar_open)
        .messages
        .inner(Margin::new(1, 0))
}

/// How many lines a transcript of `total_lines` can scroll up from the bottom.
pub fn max_scroll(total_lines: usize, viewport_height: u16) -> usize {
    total_lines.saturating_sub(usize::from(viewport_height))
}

fn render_messages(app: &App, area: Rect, buf: &mut Buffer) {
    let area = area.inner(Margin::new(1, 0));
    if area.width == 0 || area.height == 0 {
        return;
    }

    let lines = transcript_lines(app.store.active(), &app.timestamps, app.is_typing(), area.width);
    let offset = app.scroll_offset.min(max_scroll(lines.len(), area.height));
    let bottom = lines.len() - offset;
    let top = bottom.saturating_sub(usize::from(area.height));

    Paragraph::new(lines[top..bottom].to_vec())
        .style(Styles::default())
        .render(area, buf);
}

fn render_composer(app: &App, area: Rect, buf: &mut Buffer) {
    let mut block = Block::default()
        .title(" Message ")
        .title_style(Styles::dim())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let attachments = app.composer.attachments();
    if !attachments.is_empty() {
        let names: Vec<String> = attachments
            .iter()
            .map(|a| match a.kind {
                AttachmentKind::Document => format!("[doc] {}", a.name),
                AttachmentKind::Image => format!("[img] {}", a.name),
            })
            .collect();
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", names.join("  ")),
            Styles::accent(),
        )));
    }

    let blocked = app.profile_open || app.show_help || app.notice.is_some();
    app.composer
        .input
        .widget()
        .placeholder(PLACEHOLDER)
        .focused(!blocked)
        .block(block)
        .render(area, buf);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let input = app.composer.input.content();
    if is_command(input) {
        let hints: Vec<Span<'static>> = get_completions(input.split_whitespace().next().unwrap_or("/"))
            .into_iter()
            .flat_map(|cmd| {
                [
                    Span::styled(format!(" /{}", cmd.name), Styles::accent()),
                    Span::styled(format!(" {} ", cmd.description), Styles::dim()),
                ]
            })
            .collect();
        Paragraph::new(Line::from(hints)).render(area, buf);
        return;
    }

    Paragraph::new(Span::styled(DISCLAIMER, Styles::dim()))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn pad_to(text: &str, width: usize) -> String {
    let used = unicode_width::UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_screen_to_string, render_screen_to_string_sized};
    use pai_engine::conversation::GREETING;

    fn chat_app() -> App {
        let mut app = create_test_app();
        app.enter_chat();
        app
    }

    #[test]
    fn test_chat_screen_frame() {
        let app = chat_app();
        let text = render_screen_to_string_sized(&ChatScreen, &app, 120, 30);
        assert!(text.contains("PersonalAI"));
        assert!(text.contains("New Chat"));
        assert!(text.contains(HEADER_TITLE));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn test_sidebar_lists_demo_history() {
        let app = chat_app();
        let text = render_screen_to_string_sized(&ChatScreen, &app, 120, 30);
        assert!(text.contains("Product Research"));
        assert!(text.contains("2 hours ago"));
        assert!(text.contains("Code Review Help"));
        assert!(text.contains("Yesterday"));
        assert!(text.contains("Document Analysis"));
        assert!(text.contains("2 days ago"));
        assert!(text.contains("Just now"));
    }

    #[test]
    fn test_sidebar_can_be_hidden() {
        let mut app = chat_app();
        app.sidebar_open = false;
        let text = render_screen_to_string_sized(&ChatScreen, &app, 120, 30);
        assert!(!text.contains("Recent Chats"));
        assert!(text.contains(HEADER_TITLE));
    }

    #[test]
    fn test_greeting_and_timestamp_shown() {
        let app = chat_app();
        let text = render_screen_to_string_sized(&ChatScreen, &app, 160, 30);
        assert!(text.contains("Assistant"));
        assert!(text.contains("Hello! I'm your Personal AI Assistant."));
        assert!(GREETING.starts_with("Hello! I'm your Personal AI Assistant."));

        let stamp = app.store.active().messages()[0]
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string();
        assert!(text.contains(&stamp));
    }

    #[test]
    fn test_typing_indicator_and_title() {
        let mut app = chat_app();
        for c in "Hello".chars() {
            app.composer.input.insert(c);
        }
        app.handle_action(crate::event::Action::Select);

        let text = render_screen_to_string_sized(&ChatScreen, &app, 120, 30);
        assert!(text.contains("Assistant is typing..."));
        assert!(text.contains("·  Hello"));
    }

    #[test]
    fn test_command_hints_replace_disclaimer() {
        let mut app = chat_app();
        app.composer.input.insert_str("/d");
        let text = render_screen_to_string(&ChatScreen, &app);
        assert!(text.contains("/delete"));
        assert!(text.contains("/doc"));
        assert!(!text.contains(DISCLAIMER));
    }

    #[test]
    fn test_pending_attachments_on_composer() {
        let mut app = chat_app();
        app.composer
            .attach(AttachmentKind::Document, std::path::Path::new("/tmp/plan.pdf"));
        let text = render_screen_to_string_sized(&ChatScreen, &app, 120, 30);
        assert!(text.contains("[doc] plan.pdf"));
    }
}
