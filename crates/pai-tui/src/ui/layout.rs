//! Layout helpers for the pai TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar width when open.
pub const SIDEBAR_WIDTH: u16 = 30;

/// Composer height including its border.
pub const COMPOSER_HEIGHT: u16 = 4;

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Create the main layout with status bar at bottom.
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Areas of the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    /// `None` when the sidebar is collapsed.
    pub sidebar: Option<Rect>,
    pub header: Rect,
    pub messages: Rect,
    pub composer: Rect,
    pub disclaimer: Rect,
}

/// Split the chat area into sidebar, header, messages, composer and disclaimer.
///
/// The sidebar is dropped when the terminal is too narrow to fit it next to
/// a usable message pane.
pub fn chat_layout(area: Rect, sidebar_open: bool) -> ChatLayout {
    let show_sidebar = sidebar_open && area.width >= SIDEBAR_WIDTH * 2;

    let (sidebar, main) = if show_sidebar {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
            .split(area);
        (Some(columns[0]), columns[1])
    } else {
        (None, area)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(COMPOSER_HEIGHT),
            Constraint::Length(1),
        ])
        .split(main);

    ChatLayout {
        sidebar,
        header: rows[0],
        messages: rows[1],
        composer: rows[2],
        disclaimer: rows[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_fixed(40, 4, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn test_chat_layout_with_sidebar() {
        let layout = chat_layout(Rect::new(0, 0, 100, 30), true);
        let sidebar = layout.sidebar.unwrap();
        assert_eq!(sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.header.x, SIDEBAR_WIDTH);
        assert_eq!(layout.composer.height, COMPOSER_HEIGHT);
        assert_eq!(layout.disclaimer.height, 1);
    }

    #[test]
    fn test_chat_layout_collapsed_sidebar() {
        let layout = chat_layout(Rect::new(0, 0, 100, 30), false);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.header.x, 0);
        assert_eq!(layout.messages.width, 100);
    }

    #[test]
    fn test_chat_layout_too_narrow_for_sidebar() {
        let layout = chat_layout(Rect::new(0, 0, 50, 30), true);
        assert!(layout.sidebar.is_none());
    }
}
