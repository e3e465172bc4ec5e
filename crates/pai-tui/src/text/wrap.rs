//! Text wrapping for styled ratatui Lines.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Display width of a line in terminal columns.
pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| s.content.width()).sum()
}

/// Wrap every line to `width` columns, keeping span styles.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

/// Wrap a single Line to fit within the specified width.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line_width(&line) <= width {
        return vec![line];
    }

    let chars_with_styles: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain_text: String = chars_with_styles.iter().map(|(ch, _)| ch).collect();

    let mut result = Vec::new();
    let mut char_idx = 0;

    for wrapped in textwrap::wrap(&plain_text, width) {
        // textwrap drops the whitespace at break points; skip it here too
        while char_idx < chars_with_styles.len() {
            let (ch, _) = chars_with_styles[char_idx];
            if ch.is_whitespace() && !wrapped.starts_with(ch) {
                char_idx += 1;
            } else {
                break;
            }
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut current: Option<(Style, String)> = None;

        for expected in wrapped.chars() {
            let style = chars_with_styles
                .get(char_idx)
                .map_or(Style::default(), |(_, style)| *style);
            char_idx += 1;

            match &mut current {
                Some((s, text)) if *s == style => text.push(expected),
                _ => {
                    if let Some((s, text)) = current.take() {
                        spans.push(Span::styled(text, s));
                    }
                    current = Some((style, expected.to_string()));
                }
            }
        }
        if let Some((s, text)) = current {
            spans.push(Span::styled(text, s));
        }

        result.push(Line::from(spans));
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }
    result
}
