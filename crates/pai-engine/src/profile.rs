//! Session profile and its editor.

use serde::{Deserialize, Serialize};

/// The user's display name and contact address.
///
/// Free-form text; nothing is validated and nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub contact: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "User".to_string(),
            contact: String::new(),
        }
    }
}

/// Which field of the editor is being typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileField {
    #[default]
    DisplayName,
    Contact,
}

impl ProfileField {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::DisplayName => Self::Contact,
            Self::Contact => Self::DisplayName,
        }
    }
}

/// Editable copies of the profile, committed only by [`ProfileEditor::save`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileEditor {
    committed: Profile,
    draft: Profile,
    pub field: ProfileField,
}

impl ProfileEditor {
    pub fn new(profile: Profile) -> Self {
        Self {
            draft: profile.clone(),
            committed: profile,
            field: ProfileField::default(),
        }
    }

    /// The last saved profile.
    pub fn profile(&self) -> &Profile {
        &self.committed
    }

    /// The edits in progress.
    pub fn draft(&self) -> &Profile {
        &self.draft
    }

    /// Start editing from the committed values.
    pub fn begin(&mut self) {
        self.draft = self.committed.clone();
        self.field = ProfileField::default();
    }

    /// Mutable access to the focused draft field.
    pub fn field_mut(&mut self) -> &mut String {
        match self.field {
            ProfileField::DisplayName => &mut self.draft.display_name,
            ProfileField::Contact => &mut self.draft.contact,
        }
    }

    pub fn set_display_name(&mut self, value: impl Into<String>) {
        self.draft.display_name = value.into();
    }

    pub fn set_contact(&mut self, value: impl Into<String>) {
        self.draft.contact = value.into();
    }

    /// Commit the draft.
    pub fn save(&mut self) {
        self.committed = self.draft.clone();
    }

    /// Throw the draft away.
    pub fn cancel(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Whether the draft differs from what is saved.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_are_not_committed_until_save() {
        let mut editor = ProfileEditor::default();
        editor.begin();
        editor.set_display_name("Ada");
        editor.set_contact("ada@example.com");

        assert!(editor.is_dirty());
        assert_eq!(editor.profile().display_name, "User");

        editor.save();
        assert!(!editor.is_dirty());
        assert_eq!(editor.profile().display_name, "Ada");
        assert_eq!(editor.profile().contact, "ada@example.com");
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut editor = ProfileEditor::new(Profile {
            display_name: "Ada".into(),
            contact: "ada@example.com".into(),
        });
        editor.begin();
        editor.set_display_name("Grace");
        editor.cancel();

        assert_eq!(editor.profile().display_name, "Ada");
        assert_eq!(editor.draft().display_name, "Ada");
    }

    #[test]
    fn test_field_mut_follows_focus() {
        let mut editor = ProfileEditor::default();
        editor.begin();
        editor.field_mut().push_str("!");
        editor.field = editor.field.toggle();
        editor.field_mut().push_str("x@y");

        assert_eq!(editor.draft().display_name, "User!");
        assert_eq!(editor.draft().contact, "x@y");
    }

    #[test]
    fn test_no_validation() {
        let mut editor = ProfileEditor::default();
        editor.set_contact("not an email");
        editor.set_display_name("");
        editor.save();
        assert_eq!(editor.profile().contact, "not an email");
        assert_eq!(editor.profile().display_name, "");
    }
}
