//! Message rendering.
//!
//! Pure functions from messages to styled lines. Whether a timestamp is shown
//! is decided by the caller (see [`crate::timestamps`]); nothing here keeps
//! state.

use chrono::Local;
use pai_engine::{AttachmentKind, Conversation, Message, Role};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::text::{line_width, render_markdown, wrap_lines, MarkdownStyles};
use crate::timestamps::TimestampTracker;
use crate::ui::theme::Styles;

/// Share of the pane a bubble may take, in percent.
const BUBBLE_MAX_PERCENT: usize = 80;

/// Render one message as a left (assistant) or right (user) aligned bubble.
pub fn message_lines(message: &Message, show_timestamp: bool, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width);
    if width < 4 {
        return vec![Line::from(message.content.clone())];
    }

    let bubble_style = match message.role {
        Role::User => Styles::user_message(),
        Role::Assistant => Styles::assistant_message(),
    };
    let max_bubble = (width * BUBBLE_MAX_PERCENT / 100).max(4);
    let text_width = max_bubble - 2;

    let mut body = wrap_lines(
        render_markdown(&message.content, MarkdownStyles::over(bubble_style)),
        text_width,
    );
    if body.is_empty() {
        body.push(Line::from(""));
    }

    for attachment in &message.attachments {
        let tag = match attachment.kind {
            AttachmentKind::Document => "[doc]",
            AttachmentKind::Image => "[img]",
        };
        body.extend(wrap_lines(
            vec![Line::from(Span::styled(
                format!("{tag} {}", attachment.name),
                bubble_style.patch(Styles::accent().bg(bubble_style.bg.unwrap_or_default())),
            ))],
            text_width,
        ));
    }

    if show_timestamp {
        let local = message.timestamp.with_timezone(&Local);
        body.push(Line::from(Span::styled(
            local.format("%H:%M").to_string(),
            bubble_style.patch(Style::default().fg(crate::ui::theme::Palette::DIM)),
        )));
    }

    let inner_width = body.iter().map(line_width).max().unwrap_or(0);
    let bubble_width = inner_width + 2;

    let header_style = match message.role {
        Role::User => Styles::accent(),
        Role::Assistant => Styles::highlight(),
    };
    let header = Span::styled(message.role.label().to_string(), header_style);

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(align(vec![header], message.role, width));

    for line in body {
        let pad = inner_width.saturating_sub(line_width(&line));
        let mut spans = Vec::with_capacity(line.spans.len() + 2);
        spans.push(Span::styled(" ", bubble_style));
        spans.extend(line.spans);
        spans.push(Span::styled(" ".repeat(pad + 1), bubble_style));
        lines.push(align(spans, message.role, width.max(bubble_width)));
    }

    lines
}

/// Render a whole conversation, oldest first, with a blank line between messages.
pub fn transcript_lines(
    conversation: &Conversation,
    timestamps: &TimestampTracker,
    typing: bool,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in conversation.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let visible = timestamps.is_visible(conversation.id, message.id);
        lines.extend(message_lines(message, visible, width));
    }
    if typing {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Assistant is typing...", Styles::dim())));
    }
    lines
}

/// Right-align user lines; assistant lines stay at the left edge.
fn align(spans: Vec<Span<'static>>, role: Role, width: usize) -> Line<'static> {
    match role {
        Role::Assistant => Line::from(spans),
        Role::User => {
            let used: usize = spans
                .iter()
                .map(|s| unicode_width::UnicodeWidthStr::width(s.content.as_ref()))
                .sum();
            let mut aligned = Vec::with_capacity(spans.len() + 1);
            aligned.push(Span::raw(" ".repeat(width.saturating_sub(used))));
            aligned.extend(spans);
            Line::from(aligned)
        }
    }
}
