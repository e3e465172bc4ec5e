//! Landing screen: the product page shown before the chat.

use crate::app::App;
use crate::screens::Screen;
use crate::ui::main_layout;
use crate::ui::theme::Styles;
use crate::ui::widgets::{KeyHint, StatusBar};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const FEATURES: [(&str, &str); 4] = [
    (
        "Natural Conversations",
        "Engage in human-like conversations with advanced AI that understands context and nuance.",
    ),
    (
        "Document Analysis",
        "Upload and analyze documents instantly. Get insights, summaries, and answers from your files.",
    ),
    (
        "Image Understanding",
        "Share images and get detailed analysis, descriptions, and answers about visual content.",
    ),
    (
        "24/7 Availability",
        "Your AI assistant is always ready to help, any time of day or night.",
    ),
];

const BENEFITS: [(&str, &str); 3] = [
    (
        "Lightning Fast",
        "Get instant responses powered by cutting-edge AI technology",
    ),
    (
        "Secure & Private",
        "Your conversations and data are encrypted and protected",
    ),
    (
        "Always Learning",
        "Our AI continuously improves to serve you better",
    ),
];

const REVIEWS: [(&str, &str, &str); 3] = [
    (
        "Sarah Johnson",
        "Product Manager",
        "This AI chatbot has transformed how I work. It's like having a brilliant assistant available 24/7.",
    ),
    (
        "Michael Chen",
        "Software Engineer",
        "The document analysis feature is incredible. Saves me hours of reading through technical docs.",
    ),
    (
        "Emily Rodriguez",
        "Content Creator",
        "Best AI assistant I've used. The responses are accurate, helpful, and genuinely useful.",
    ),
];

const VISION: &str = "We envision a world where everyone has access to intelligent, helpful AI \
assistance. Our mission is to democratize AI technology, making it accessible, intuitive, and \
powerful for everyone.";

/// The landing screen.
pub struct LandingScreen;

impl Screen for LandingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let (main_area, status_area) = main_layout(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(11), Constraint::Min(0)])
            .split(main_area);

        render_hero(rows[0], buf);
        render_sections(rows[1], buf);

        let mut status_bar = StatusBar::new("PersonalAI").hints(vec![
            KeyHint::new("Enter", "Get Started"),
            KeyHint::new("F1", "Help"),
            KeyHint::new("q", "Quit"),
        ]);
        if let Some(notification) = &app.notification {
            status_bar = status_bar.right(notification);
        }
        status_bar.render(status_area, buf);
    }
}

fn render_hero(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Powered by Advanced AI", Styles::accent())),
        Line::from(""),
        Line::from(Span::styled("Your Personal", Styles::title())),
        Line::from(Span::styled("AI Assistant", Styles::highlight())),
        Line::from(""),
        Line::from(Span::styled(
            "Experience the future of AI conversations. Get instant answers, analyze documents, \
             understand images, and solve problems with your intelligent companion.",
            Styles::dim(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", Styles::key_hint()),
            Span::styled(" Get Started ", Styles::key_label()),
        ]),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Styles::default())
        .render(area, buf);
}

fn render_sections(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Styles::border())
        .style(Styles::default());
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from(Span::styled("Powerful Features", Styles::title()))];
    for (title, description) in FEATURES {
        lines.push(feature_line(title, description));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Why Choose PersonalAI", Styles::title())));
    for (title, description) in BENEFITS {
        lines.push(feature_line(title, description));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("What Users Say", Styles::title())));
    for (name, role, quote) in REVIEWS {
        lines.push(Line::from(vec![
            Span::styled("★★★★★ ", Styles::warning()),
            Span::styled(format!("\"{quote}\""), Styles::default()),
            Span::styled(format!(" - {name}, {role}"), Styles::dim()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Our Vision", Styles::title())));
    lines.push(Line::from(Span::styled(VISION, Styles::dim())));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Ready to Get Started?", Styles::title())));
    lines.push(Line::from(Span::styled(
        "Join thousands of users experiencing the power of AI assistance",
        Styles::dim(),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner.inner(Margin::new(2, 0)), buf);
}

fn feature_line(title: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  • ", Styles::accent()),
        Span::styled(title, Styles::highlight()),
        Span::styled(": ", Styles::dim()),
        Span::styled(description, Styles::default()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_app, render_screen_to_string, render_screen_to_string_sized};

    #[test]
    fn test_landing_shows_hero_and_call_to_action() {
        let app = create_test_app();
        let text = render_screen_to_string(&LandingScreen, &app);
        assert!(text.contains("Your Personal"));
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Get Started"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_landing_sections_on_tall_terminal() {
        let app = create_test_app();
        let text = render_screen_to_string_sized(&LandingScreen, &app, 160, 60);
        assert!(text.contains("Powerful Features"));
        assert!(text.contains("Natural Conversations"));
        assert!(text.contains("Why Choose PersonalAI"));
        assert!(text.contains("Sarah Johnson"));
        assert!(text.contains("Our Vision"));
    }
}
