//! Profile dialog overlay.

use crate::app::App;
use crate::ui::centered_fixed;
use crate::ui::theme::Styles;
use pai_engine::ProfileField;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Render the profile editor over whatever is on screen.
pub fn render_profile_dialog(app: &App, area: Rect, buf: &mut Buffer) {
    let width = 50.min(area.width.saturating_sub(4));
    let dialog = centered_fixed(width, 10, area);
    Clear.render(dialog, buf);

    let block = Block::default()
        .title(" Profile ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let draft = app.profile.draft();
    let focused = app.profile.field;

    let lines = vec![
        Line::from(""),
        field_line("Name", &draft.display_name, focused == ProfileField::DisplayName),
        Line::from(""),
        field_line("Contact", &draft.contact, focused == ProfileField::Contact),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", Styles::accent()),
            Span::styled(" save  ", Styles::dim()),
            Span::styled("Tab", Styles::accent()),
            Span::styled(" switch field  ", Styles::dim()),
            Span::styled("Esc", Styles::accent()),
            Span::styled(" cancel", Styles::dim()),
        ]),
    ];

    Paragraph::new(lines).block(block).render(dialog, buf);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Styles::active()
    } else {
        Styles::default()
    };
    let mut spans = vec![
        Span::styled(marker.to_string(), Styles::accent()),
        Span::styled(format!("{label:<9}"), Styles::dim()),
        Span::styled(value.to_string(), value_style),
    ];
    if focused {
        spans.push(Span::styled("_", Styles::active()));
    }
    Line::from(spans)
}
