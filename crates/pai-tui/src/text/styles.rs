//! Markdown styling configuration.

use ratatui::style::{Modifier, Style};

use crate::ui::theme::Palette;

/// Styles for rendering markdown elements.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownStyles {
    /// H1 header style.
    pub h1: Style,
    /// H2 header style.
    pub h2: Style,
    /// H3+ header style.
    pub h3: Style,
    /// Inline code style.
    pub code: Style,
    /// Code block line style.
    pub code_block: Style,
    pub emphasis: Style,
    pub strong: Style,
    /// List marker (bullet/number) style.
    pub list_marker: Style,
    pub link: Style,
    pub blockquote: Style,
    /// Normal text style.
    pub text: Style,
}

impl MarkdownStyles {
    /// Styles layered over a base text style (e.g. a message bubble).
    pub fn over(base: Style) -> Self {
        Self {
            h1: base.fg(Palette::PRIMARY).add_modifier(Modifier::BOLD),
            h2: base.add_modifier(Modifier::BOLD),
            h3: base.fg(Palette::DIM).add_modifier(Modifier::BOLD),
            code: base.fg(Palette::ACCENT),
            code_block: base.fg(Palette::ACCENT),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            list_marker: base.fg(Palette::PRIMARY),
            link: Style::default()
                .fg(Palette::ACCENT)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: base.fg(Palette::DIM),
            text: base,
        }
    }
}
