//! # Field Editor
//!
//! Focus-to-edit state machine for one scalar text field.
//!
//! ```text
//!            activate              Confirm (single-line) / blur
//! Display ─────────────► Editing ───────────────────────────► Display + commit
//!    ▲                      │
//!    └──────── Cancel ──────┘
//! ```
//!
//! A commit is handed back to the caller exactly once; the caller applies it
//! to the store.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldVariant {
    #[default]
    SingleLine,
    /// Confirm inserts a line break instead of committing
    MultiLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldState {
    Display,
    Editing { draft: String },
}

#[derive(Debug, Clone)]
pub struct FieldEditor {
    committed: String,
    state: FieldState,
    variant: FieldVariant,
    read_only: bool,
}

impl FieldEditor {
    pub fn new(value: impl Into<String>, variant: FieldVariant) -> Self {
        Self {
            committed: value.into(),
            state: FieldState::Display,
            variant,
            read_only: false,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Enter editing with the committed value as draft.
    ///
    /// Returns whether the editor is now editing.
    pub fn activate(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        if !self.is_editing() {
            self.state = FieldState::Editing {
                draft: self.committed.clone(),
            };
        }
        true
    }

    /// Replace the draft; ignored outside editing
    pub fn input(&mut self, text: impl Into<String>) {
        if let FieldState::Editing { draft } = &mut self.state {
            *draft = text.into();
        }
    }

    pub fn key(&mut self, key: EditKey) -> Option<String> {
        match (key, self.variant) {
            (EditKey::Cancel, _) => {
                self.state = FieldState::Display;
                None
            }
            (EditKey::Confirm, FieldVariant::SingleLine) => self.commit(),
            (EditKey::Confirm, FieldVariant::MultiLine) => {
                if let FieldState::Editing { draft } = &mut self.state {
                    draft.push('\n');
                }
                None
            }
        }
    }

    /// Losing focus commits the draft, changed or not
    pub fn blur(&mut self) -> Option<String> {
        self.commit()
    }

    /// Follow a value written elsewhere. A draft in progress is kept.
    pub fn sync_external(&mut self, value: impl Into<String>) {
        self.committed = value.into();
    }

    /// Text currently shown: the draft while editing
    pub fn displayed(&self) -> &str {
        match &self.state {
            FieldState::Display => &self.committed,
            FieldState::Editing { draft } => draft,
        }
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, FieldState::Editing { .. })
    }

    pub fn variant(&self) -> FieldVariant {
        self.variant
    }

    /// Ignored while editing so a draft keeps its key handling
    pub fn set_variant(&mut self, variant: FieldVariant) {
        if !self.is_editing() {
            self.variant = variant;
        }
    }

    fn commit(&mut self) -> Option<String> {
        match std::mem::replace(&mut self.state, FieldState::Display) {
            FieldState::Editing { draft } => {
                self.committed = draft.clone();
                Some(draft)
            }
            FieldState::Display => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reverts_without_commit() {
        let mut field = FieldEditor::new("A", FieldVariant::SingleLine);
        assert!(field.activate());
        field.input("B");
        assert_eq!(field.displayed(), "B");

        assert_eq!(field.key(EditKey::Cancel), None);
        assert_eq!(field.displayed(), "A");
        assert!(!field.is_editing());
    }

    #[test]
    fn test_blur_commits_once() {
        let mut field = FieldEditor::new("A", FieldVariant::SingleLine);
        field.activate();
        field.input("B");

        assert_eq!(field.blur().as_deref(), Some("B"));
        assert_eq!(field.blur(), None);
        assert_eq!(field.committed(), "B");
    }

    #[test]
    fn test_blur_commits_unchanged_draft() {
        let mut field = FieldEditor::new("same", FieldVariant::SingleLine);
        field.activate();
        assert_eq!(field.blur().as_deref(), Some("same"));
    }

    #[test]
    fn test_confirm_single_line_commits() {
        let mut field = FieldEditor::new("A", FieldVariant::SingleLine);
        field.activate();
        field.input("C");
        assert_eq!(field.key(EditKey::Confirm).as_deref(), Some("C"));
        assert!(!field.is_editing());
    }

    #[test]
    fn test_confirm_multi_line_inserts_break() {
        let mut field = FieldEditor::new("line", FieldVariant::MultiLine);
        field.activate();
        assert_eq!(field.key(EditKey::Confirm), None);
        assert!(field.is_editing());
        assert_eq!(field.displayed(), "line\n");
        assert_eq!(field.blur().as_deref(), Some("line\n"));
    }

    #[test]
    fn test_read_only_never_edits() {
        let mut field = FieldEditor::new("A", FieldVariant::SingleLine).read_only(true);
        assert!(!field.activate());
        field.input("B");
        assert_eq!(field.blur(), None);
        assert_eq!(field.displayed(), "A");
    }

    #[test]
    fn test_sync_external_keeps_draft() {
        let mut field = FieldEditor::new("A", FieldVariant::SingleLine);
        field.sync_external("X");
        assert_eq!(field.displayed(), "X");

        field.activate();
        field.input("mine");
        field.sync_external("theirs");
        assert_eq!(field.displayed(), "mine");
        assert_eq!(field.blur().as_deref(), Some("mine"));
    }
}
