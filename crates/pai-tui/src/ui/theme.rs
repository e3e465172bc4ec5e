//! Theme and styling definitions for the pai TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(18, 18, 28);
    pub const FG: Color = Color::Rgb(226, 226, 240);
    pub const DIM: Color = Color::Rgb(136, 136, 160);

    // Brand
    pub const PRIMARY: Color = Color::Rgb(168, 130, 255);
    pub const ACCENT: Color = Color::Rgb(96, 200, 230);

    // Sidebar
    pub const SIDEBAR_BG: Color = Color::Rgb(24, 24, 38);
    pub const SIDEBAR_SELECTED: Color = Color::Rgb(48, 44, 72);

    // Message bubbles
    pub const USER_BUBBLE: Color = Color::Rgb(88, 64, 160);
    pub const CARD: Color = Color::Rgb(30, 30, 46);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(40, 40, 58);
    pub const STATUS_KEY_BG: Color = Color::Rgb(84, 68, 140);

    pub const WARNING: Color = Color::Rgb(240, 200, 100);

    // Border colors
    pub const BORDER: Color = Color::Rgb(70, 70, 96);
    pub const BORDER_ACTIVE: Color = Color::Rgb(168, 130, 255);
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::PRIMARY)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::PRIMARY).bg(Palette::BG)
    }

    /// Secondary accent text.
    pub fn accent() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Ratings and notice titles.
    pub fn warning() -> Style {
        Style::default().fg(Palette::WARNING).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }

    /// Sidebar background.
    pub fn sidebar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::SIDEBAR_BG)
    }

    /// Secondary text on the sidebar.
    pub fn sidebar_dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::SIDEBAR_BG)
    }

    /// The active conversation row.
    pub fn sidebar_selected() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::SIDEBAR_SELECTED)
            .add_modifier(Modifier::BOLD)
    }

    /// Body text of a user message.
    pub fn user_message() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::USER_BUBBLE)
    }

    /// Body text of an assistant message.
    pub fn assistant_message() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::CARD)
    }
}
