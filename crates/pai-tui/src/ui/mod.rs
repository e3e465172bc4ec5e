//! UI building blocks for the pai TUI.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::{centered_fixed, chat_layout, main_layout};
