//! Message composer: the input line plus attachments waiting to be sent.

use pai_engine::{Attachment, AttachmentKind};
use std::path::Path;

use crate::ui::widgets::TextInputState;

/// What the composer hands over when the user sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The text exactly as typed.
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    pub input: TextInputState,
    attachments: Vec<Attachment>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending text and attachments.
    ///
    /// Blank input yields `None` and leaves both untouched.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.input.is_blank() {
            return None;
        }
        Some(Submission {
            text: self.input.submit(),
            attachments: std::mem::take(&mut self.attachments),
        })
    }

    /// Record an attachment for the next message. Returns its display name.
    pub fn attach(&mut self, kind: AttachmentKind, path: &Path) -> Option<String> {
        let attachment = Attachment::from_path(kind, path)?;
        let name = attachment.name.clone();
        self.attachments.push(attachment);
        Some(name)
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Drop pending attachments, keeping the typed text. Returns how many were dropped.
    pub fn discard_attachments(&mut self) -> usize {
        let dropped = self.attachments.len();
        self.attachments.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_submit_changes_nothing() {
        let mut composer = Composer::new();
        composer.input.insert_str("   ");
        composer.attach(AttachmentKind::Document, Path::new("/tmp/a.txt"));

        assert!(composer.submit().is_none());
        assert_eq!(composer.input.content(), "   ");
        assert_eq!(composer.attachments().len(), 1);
    }

    #[test]
    fn test_submit_keeps_text_untrimmed() {
        let mut composer = Composer::new();
        composer.input.insert_str("  hello  ");

        let submission = composer.submit().unwrap();
        assert_eq!(submission.text, "  hello  ");
        assert!(submission.attachments.is_empty());
        assert!(composer.input.is_empty());
    }

    #[test]
    fn test_attachments_go_with_next_message() {
        let mut composer = Composer::new();
        let name = composer.attach(AttachmentKind::Image, Path::new("/home/me/pics/cat.png"));
        assert_eq!(name.as_deref(), Some("cat.png"));

        composer.input.insert_str("look");
        let submission = composer.submit().unwrap();
        assert_eq!(submission.attachments.len(), 1);
        assert_eq!(submission.attachments[0].name, "cat.png");
        assert_eq!(submission.attachments[0].kind, AttachmentKind::Image);
        assert!(composer.attachments().is_empty());
    }

    #[test]
    fn test_attach_without_file_name() {
        let mut composer = Composer::new();
        assert!(composer.attach(AttachmentKind::Document, Path::new("/")).is_none());
        assert!(composer.attachments().is_empty());
    }

    #[test]
    fn test_discard_attachments_keeps_text() {
        let mut composer = Composer::new();
        composer.input.insert_str("draft");
        composer.attach(AttachmentKind::Image, Path::new("/tmp/cat.png"));
        composer.attach(AttachmentKind::Document, Path::new("/tmp/a.txt"));

        assert_eq!(composer.discard_attachments(), 2);
        assert!(composer.attachments().is_empty());
        assert_eq!(composer.input.content(), "draft");
        assert_eq!(composer.discard_attachments(), 0);
    }
}
