//! Text rendering utilities.
//!
//! - [`render_markdown`] - Render markdown to styled ratatui Lines
//! - [`MarkdownStyles`] - Style configuration for markdown elements
//! - [`wrap_lines`], [`line_width`] - Wrapping and measuring

mod markdown;
mod styles;
mod wrap;

pub use markdown::render_markdown;
pub use styles::MarkdownStyles;
pub use wrap::{line_width, wrap_lines};
