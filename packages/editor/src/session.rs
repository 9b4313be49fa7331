//! # Edit Session
//!
//! Binds inline field editors to the store.
//!
//! At most one field is focused. Its commits go through the store's
//! path mutation entry point; every other editor only mirrors the document.
//! External syncs refresh the mirrors but leave an in-progress draft alone,
//! so the next commit overwrites the synced value.

use crate::errors::EditorError;
use crate::field::{EditKey, FieldEditor, FieldVariant};
use crate::mutations::MutationError;
use crate::storage::{Storage, StorageEvent};
use crate::store::Store;
use profile_schema::{FieldPath, FieldValue, PathError, ProfileData, ValueKind};
use std::collections::HashMap;

pub struct EditSession<S: Storage> {
    store: Store<S>,
    fields: HashMap<FieldPath, FieldEditor>,
    focused: Option<FieldPath>,
}

impl<S: Storage> EditSession<S> {
    pub fn new(store: Store<S>) -> Self {
        Self {
            store,
            fields: HashMap::new(),
            focused: None,
        }
    }

    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Direct store access; call [`EditSession::refresh`] after structural edits
    pub fn store_mut(&mut self) -> &mut Store<S> {
        &mut self.store
    }

    pub fn document(&self) -> &ProfileData {
        self.store.document()
    }

    pub fn focused(&self) -> Option<&FieldPath> {
        self.focused.as_ref()
    }

    /// Text shown for a field: the draft while it is being edited
    pub fn displayed(&self, path: &FieldPath) -> Option<&str> {
        match self.fields.get(path) {
            Some(field) => Some(field.displayed()),
            None => self.store.document().text_at(path),
        }
    }

    /// Focus a text field and start editing it.
    ///
    /// A previously focused field is blurred first, committing its draft.
    pub fn focus(&mut self, path: FieldPath, variant: FieldVariant) -> Result<(), EditorError> {
        if self.store.mode().is_view() {
            return Err(EditorError::ReadOnly);
        }
        if path.kind() != ValueKind::Text {
            return Err(path_error(PathError::type_mismatch(&path, "a text field")));
        }
        let current = self
            .store
            .document()
            .text_at(&path)
            .ok_or_else(|| path_error(PathError::invalid_value(&path, "no such field")))?
            .to_string();

        if self.focused.as_ref() != Some(&path) {
            self.blur()?;
        }

        let field = self
            .fields
            .entry(path.clone())
            .or_insert_with(|| FieldEditor::new(current.clone(), variant));
        if !field.is_editing() {
            field.sync_external(current);
            field.set_variant(variant);
        }
        field.activate();
        self.focused = Some(path);
        Ok(())
    }

    pub fn focus_dotted(&mut self, dotted: &str, variant: FieldVariant) -> Result<(), EditorError> {
        let path = FieldPath::parse_dotted(dotted).map_err(path_error)?;
        self.focus(path, variant)
    }

    /// Replace the focused field's draft
    pub fn type_text(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        let path = self.focused.as_ref().ok_or(EditorError::NoFocus)?;
        if let Some(field) = self.fields.get_mut(path) {
            field.input(text);
        }
        Ok(())
    }

    /// Send a key to the focused field. Returns whether a value was committed.
    pub fn press(&mut self, key: EditKey) -> Result<bool, EditorError> {
        let path = self.focused.clone().ok_or(EditorError::NoFocus)?;
        let commit = self.fields.get_mut(&path).and_then(|field| field.key(key));

        let still_editing = self
            .fields
            .get(&path)
            .map(FieldEditor::is_editing)
            .unwrap_or(false);
        if !still_editing {
            self.focused = None;
        }

        self.commit(path, commit)
    }

    /// Commit the focused field, if any, and drop focus
    pub fn blur(&mut self) -> Result<bool, EditorError> {
        let Some(path) = self.focused.take() else {
            return Ok(false);
        };
        let commit = self.fields.get_mut(&path).and_then(FieldEditor::blur);
        self.commit(path, commit)
    }

    /// Drop focus before rendering for export
    pub fn clear_focus(&mut self) -> Result<(), EditorError> {
        self.blur().map(|_| ())
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let undone = self.store.undo()?;
        if undone {
            self.refresh();
        }
        Ok(undone)
    }

    /// Adopt another writer's record and refresh every mirrored field
    pub fn apply_external(&mut self, event: &StorageEvent) -> bool {
        let applied = self.store.apply_external(event);
        if applied {
            self.refresh();
        }
        applied
    }

    /// Re-read every tracked field from the document.
    ///
    /// Fields that no longer exist are dropped unless they are being edited.
    pub fn refresh(&mut self) {
        let document = self.store.document();
        self.fields.retain(|path, field| match document.text_at(path) {
            Some(text) => {
                field.sync_external(text);
                true
            }
            None => field.is_editing(),
        });
    }

    fn commit(&mut self, path: FieldPath, value: Option<String>) -> Result<bool, EditorError> {
        match value {
            Some(text) => match self.store.set(path.clone(), FieldValue::Text(text)) {
                Ok(_) => Ok(true),
                Err(e) => {
                    // The editor already took the rejected draft as committed
                    match self.store.document().text_at(&path) {
                        Some(current) => {
                            if let Some(field) = self.fields.get_mut(&path) {
                                field.sync_external(current);
                            }
                        }
                        None => {
                            self.fields.remove(&path);
                        }
                    }
                    Err(e)
                }
            },
            None => Ok(false),
        }
    }
}

fn path_error(e: PathError) -> EditorError {
    EditorError::Mutation(MutationError::Path(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::EditMode;
    use crate::storage::MemoryStorage;
    use profile_schema::{serialize_document, Collection};

    fn session() -> EditSession<MemoryStorage> {
        EditSession::new(Store::load(MemoryStorage::new(), EditMode::Edit))
    }

    #[test]
    fn test_focus_type_blur_commits() {
        let mut session = session();
        session
            .focus_dotted("hero.brandName", FieldVariant::SingleLine)
            .unwrap();
        session.type_text("ACME").unwrap();

        assert_eq!(session.document().hero.brand_name, ProfileData::default().hero.brand_name);
        assert!(session.blur().unwrap());
        assert_eq!(session.document().hero.brand_name, "ACME");
        assert!(session.focused().is_none());
        assert_eq!(session.store().undo_levels(), 1);
    }

    #[test]
    fn test_cancel_does_not_touch_store() {
        let mut session = session();
        session
            .focus_dotted("about.description", FieldVariant::MultiLine)
            .unwrap();
        session.type_text("draft").unwrap();

        assert!(!session.press(EditKey::Cancel).unwrap());
        assert!(session.focused().is_none());
        assert_eq!(session.store().undo_levels(), 0);
    }

    #[test]
    fn test_focus_switch_commits_previous() {
        let mut session = session();
        session
            .focus_dotted("hero.subtitle", FieldVariant::SingleLine)
            .unwrap();
        session.type_text("first").unwrap();
        session
            .focus_dotted("hero.highlight", FieldVariant::SingleLine)
            .unwrap();

        assert_eq!(session.document().hero.subtitle, "first");
        assert_eq!(
            session.focused().map(ToString::to_string).as_deref(),
            Some("hero.highlight")
        );
    }

    #[test]
    fn test_focus_rejects_non_text_paths() {
        let mut session = session();
        assert!(session
            .focus_dotted("services.items", FieldVariant::SingleLine)
            .is_err());
        assert!(session
            .focus_dotted("values.items.7.title", FieldVariant::SingleLine)
            .is_err());
        assert!(matches!(session.type_text("x"), Err(EditorError::NoFocus)));
    }

    #[test]
    fn test_view_mode_refuses_focus() {
        let mut session = EditSession::new(Store::load(MemoryStorage::new(), EditMode::View));
        assert!(matches!(
            session.focus_dotted("hero.brandName", FieldVariant::SingleLine),
            Err(EditorError::ReadOnly)
        ));
    }

    #[test]
    fn test_failed_commit_does_not_leave_draft_on_screen() {
        let mut session = session();
        let last = session.document().item_count(Collection::Services) - 1;
        let title = FieldPath::parse_dotted(&format!("services.items.{}.title", last)).unwrap();
        session.focus(title.clone(), FieldVariant::SingleLine).unwrap();
        session.type_text("Half typed").unwrap();

        let mut theirs = session.document().clone();
        theirs.remove_item(Collection::Services, last).unwrap();
        let event = StorageEvent {
            key: session.store().storage().key().to_string(),
            new_value: Some(serialize_document(&theirs).unwrap()),
        };
        assert!(session.apply_external(&event));
        assert_eq!(session.displayed(&title), Some("Half typed"));

        assert!(session.blur().is_err());
        assert!(session.focused().is_none());
        assert_eq!(session.displayed(&title), None);
        assert_eq!(session.store().undo_levels(), 0);
    }

    #[test]
    fn test_refocus_uses_the_new_variant() {
        let mut session = session();
        let path = FieldPath::parse_dotted("about.description").unwrap();
        session.focus(path.clone(), FieldVariant::SingleLine).unwrap();
        session.blur().unwrap();

        session.focus(path.clone(), FieldVariant::MultiLine).unwrap();
        session.type_text("line").unwrap();
        assert!(!session.press(EditKey::Confirm).unwrap());
        assert_eq!(session.displayed(&path), Some("line\n"));
    }
}
