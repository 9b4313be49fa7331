//! # Document Store
//!
//! Single owner of the profile document, its undo history and the edit mode.
//!
//! ## Lifecycle
//!
//! ```text
//! load ──► mutate* ──► (undo | reset | external sync)*
//!            │
//!            ├─ snapshot previous document (bounded)
//!            ├─ persist full document
//!            └─ mark "saved"
//! ```
//!
//! Rejected mutations (bad path, index out of range, wrong value type,
//! view mode) leave document, history and storage untouched.

use crate::errors::EditorError;
use crate::mode::EditMode;
use crate::mutations::{Mutation, MutationError};
use crate::storage::{SaveIndicator, Storage, StorageEvent};
use crate::undo_stack::UndoStack;
use profile_schema::{
    parse_document, serialize_document, Collection, CollectionItem, FieldPath, FieldValue,
    IconSlot, ProfileData, NEW_POINT,
};
use tracing::{debug, error, info, warn};

pub struct Store<S: Storage> {
    document: ProfileData,
    history: UndoStack,
    mode: EditMode,
    storage: S,
    indicator: SaveIndicator,
}

impl<S: Storage> Store<S> {
    /// Hydrate from storage.
    ///
    /// A missing or unparseable record yields the defaults; this never fails.
    pub fn load(storage: S, mode: EditMode) -> Self {
        let document = match storage.read() {
            Ok(Some(json)) => match parse_document(&json) {
                Ok(mut document) => {
                    debug!(key = storage.key(), "Loaded stored profile");
                    drop_invalid_images(&mut document);
                    document
                }
                Err(e) => {
                    warn!(key = storage.key(), error = %e, "Stored profile is malformed, using defaults");
                    ProfileData::default()
                }
            },
            Ok(None) => {
                debug!(key = storage.key(), "No stored profile, using defaults");
                ProfileData::default()
            }
            Err(e) => {
                warn!(key = storage.key(), error = %e, "Failed to read stored profile, using defaults");
                ProfileData::default()
            }
        };

        Self {
            document,
            history: UndoStack::new(),
            mode,
            storage,
            indicator: SaveIndicator::new(),
        }
    }

    pub fn document(&self) -> &ProfileData {
        &self.document
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save_indicator(&self) -> &SaveIndicator {
        &self.indicator
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn undo_levels(&self) -> usize {
        self.history.undo_levels()
    }

    /// Write `value` at a path given as string keys,
    /// e.g. `["services", "items", "1", "title"]`
    pub fn set_path<K: AsRef<str>>(
        &mut self,
        keys: &[K],
        value: impl Into<FieldValue>,
    ) -> Result<&ProfileData, EditorError> {
        let path = match FieldPath::parse(keys) {
            Ok(path) => path,
            Err(e) => {
                let joined: Vec<&str> = keys.iter().map(|k| k.as_ref()).collect();
                warn!(path = %joined.join("."), error = %e, "Rejected path");
                return Err(MutationError::from(e).into());
            }
        };
        self.set(path, value)
    }

    /// Write raw user input at a dotted path, interpreting it by the path's kind
    pub fn set_raw(&mut self, dotted: &str, raw: &str) -> Result<&ProfileData, EditorError> {
        let parsed = FieldPath::parse_dotted(dotted).and_then(|path| {
            let value = path.parse_value(raw)?;
            Ok((path, value))
        });
        match parsed {
            Ok((path, value)) => self.set(path, value),
            Err(e) => {
                warn!(path = dotted, error = %e, "Rejected path");
                Err(MutationError::from(e).into())
            }
        }
    }

    pub fn set(
        &mut self,
        path: FieldPath,
        value: impl Into<FieldValue>,
    ) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::Set {
            path,
            value: value.into(),
        })
    }

    /// Apply a mutation: snapshot, mutate copy-on-write, persist
    pub fn apply(&mut self, mutation: Mutation) -> Result<&ProfileData, EditorError> {
        let name = mutation.name();

        if self.mode.is_view() {
            warn!(mutation = name, "Rejected mutation in view mode");
            return Err(EditorError::ReadOnly);
        }

        let mut next = self.document.clone();
        if let Err(e) = mutation.apply(&mut next) {
            warn!(mutation = name, error = %e, "Rejected mutation");
            return Err(e.into());
        }

        let previous = std::mem::replace(&mut self.document, next);
        self.history.push(previous);
        debug!(mutation = name, undo_levels = self.history.undo_levels(), "Applied mutation");

        self.persist();
        Ok(&self.document)
    }

    pub fn add_item(&mut self, item: CollectionItem) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::AddItem(item))
    }

    /// Append the default new item for `collection`
    pub fn add_new_item(&mut self, collection: Collection) -> Result<&ProfileData, EditorError> {
        self.add_item(CollectionItem::new_for(collection))
    }

    pub fn delete_item(
        &mut self,
        collection: Collection,
        index: usize,
    ) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::DeleteItem { collection, index })
    }

    pub fn delete_service_by_id(&mut self, id: &str) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::DeleteService { id: id.to_string() })
    }

    /// Append a placeholder point to a service or process step
    pub fn add_point(
        &mut self,
        collection: Collection,
        index: usize,
    ) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::AddPoint {
            collection,
            index,
            text: NEW_POINT.to_string(),
        })
    }

    pub fn delete_point(
        &mut self,
        collection: Collection,
        index: usize,
        point: usize,
    ) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::DeletePoint {
            collection,
            index,
            point,
        })
    }

    pub fn set_footer_visible(&mut self, visible: bool) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::SetFooterVisible(visible))
    }

    pub fn toggle_footer(&mut self) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::ToggleFooter)
    }

    pub fn cycle_floating_icon(&mut self, slot: IconSlot) -> Result<&ProfileData, EditorError> {
        self.apply(Mutation::CycleFloatingIcon(slot))
    }

    /// Restore the most recent snapshot.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        if self.mode.is_view() {
            return Err(EditorError::ReadOnly);
        }

        match self.history.pop() {
            Some(previous) => {
                self.document = previous;
                debug!(undo_levels = self.history.undo_levels(), "Undo");
                self.persist();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the document with the defaults if `confirm` agrees.
    ///
    /// History is cleared; the reset itself cannot be undone.
    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool, EditorError> {
        if self.mode.is_view() {
            return Err(EditorError::ReadOnly);
        }
        if !confirm() {
            return Ok(false);
        }

        self.document = ProfileData::default();
        self.history.clear();
        info!("Profile reset to defaults");
        self.persist();
        Ok(true)
    }

    /// Adopt a record written by another process.
    ///
    /// The document is replaced wholesale without a snapshot. Returns whether
    /// the event was applied.
    pub fn apply_external(&mut self, event: &StorageEvent) -> bool {
        if event.key != self.storage.key() {
            return false;
        }
        let Some(json) = event.new_value.as_deref() else {
            return false;
        };

        match parse_document(json) {
            Ok(mut document) => {
                drop_invalid_images(&mut document);
                self.document = document;
                debug!(key = %event.key, "Synced profile from another writer");
                true
            }
            Err(e) => {
                warn!(key = %event.key, error = %e, "Ignoring malformed external profile");
                false
            }
        }
    }

    fn persist(&mut self) {
        let json = match serialize_document(&self.document) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize profile");
                return;
            }
        };

        match self.storage.write(&json) {
            Ok(()) => self.indicator.mark_saved(),
            Err(e) => error!(key = self.storage.key(), error = %e, "Failed to save profile"),
        }
    }
}

/// Stored records may predate image checks or come from another writer
fn drop_invalid_images(document: &mut ProfileData) {
    for (path, reason) in document.clear_invalid_images() {
        warn!(path = %path, reason, "Dropped unrenderable image");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};
    use profile_schema::PathError;

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn key(&self) -> &str {
            "failing"
        }

        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        fn write(&self, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }
    }

    #[test]
    fn test_load_without_record_uses_defaults() {
        let store = Store::load(MemoryStorage::new(), EditMode::Edit);
        assert_eq!(store.document(), &ProfileData::default());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_load_malformed_record_uses_defaults() {
        let storage = MemoryStorage::new().with_value("{ nope");
        let store = Store::load(storage, EditMode::Edit);
        assert_eq!(store.document(), &ProfileData::default());
    }

    #[test]
    fn test_unrenderable_images_are_refused_and_dropped_on_load() {
        let storage = MemoryStorage::new().with_value(
            r#"{"hero":{"brandName":"Kept","logo":"data:application/octet-stream;base64,AA=="}}"#,
        );
        let mut store = Store::load(storage, EditMode::Edit);
        assert_eq!(store.document().hero.brand_name, "Kept");
        assert!(store.document().hero.logo.is_none());

        let err = store
            .set_raw("about.mainIcon", "file:///tmp/icon.heic")
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Mutation(MutationError::Path(PathError::InvalidValue { .. }))
        ));
        assert!(!store.can_undo());
        assert!(store.document().about.main_icon.is_none());
    }

    #[test]
    fn test_set_path_persists_and_snapshots() {
        let storage = MemoryStorage::new();
        let mut store = Store::load(storage.clone(), EditMode::Edit);

        store.set_path(&["hero", "brandName"], "ACME").unwrap();

        assert_eq!(store.document().hero.brand_name, "ACME");
        assert_eq!(store.undo_levels(), 1);
        assert!(storage.read().unwrap().unwrap().contains("\"brandName\":\"ACME\""));
        assert!(store.save_indicator().is_visible());
    }

    #[test]
    fn test_rejected_path_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = Store::load(storage.clone(), EditMode::Edit);

        let err = store
            .set_path(&["services", "items", "9", "title"], "x")
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Mutation(MutationError::Path(PathError::IndexOutOfRange { .. }))
        ));

        let err = store.set_path(&["hero", "nope"], "x").unwrap_err();
        assert!(matches!(
            err,
            EditorError::Mutation(MutationError::Path(PathError::UnknownField { .. }))
        ));

        assert_eq!(store.undo_levels(), 0);
        assert_eq!(storage.read().unwrap(), None);
        assert!(store.save_indicator().last_saved().is_none());
    }

    #[test]
    fn test_set_raw_interprets_value_kind() {
        let mut store = Store::load(MemoryStorage::new(), EditMode::Edit);
        store.set_raw("contact.showFooter", "false").unwrap();
        assert_eq!(store.document().contact.show_footer, Some(false));

        assert!(store.set_raw("contact.showFooter", "maybe").is_err());
        assert_eq!(store.undo_levels(), 1);
    }

    #[test]
    fn test_undo_restores_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = Store::load(storage.clone(), EditMode::Edit);
        let original = store.document().clone();

        store.set_path(&["ceoMessage", "name"], "Someone").unwrap();
        assert!(store.undo().unwrap());
        assert_eq!(store.document(), &original);
        assert!(!store.undo().unwrap());

        let stored = parse_document(&storage.read().unwrap().unwrap()).unwrap();
        assert_eq!(stored, original);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut store = Store::load(MemoryStorage::new(), EditMode::Edit);
        store.set_path(&["hero", "subtitle"], "changed").unwrap();

        assert!(!store.reset(|| false).unwrap());
        assert_eq!(store.document().hero.subtitle, "changed");

        assert!(store.reset(|| true).unwrap());
        assert_eq!(store.document(), &ProfileData::default());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_write_failure_keeps_mutation() {
        let mut store = Store::load(FailingStorage, EditMode::Edit);
        store.set_path(&["hero", "highlight"], "kept").unwrap();
        assert_eq!(store.document().hero.highlight, "kept");
        assert!(!store.save_indicator().is_visible());
    }

    #[test]
    fn test_view_mode_is_read_only() {
        let storage = MemoryStorage::new();
        let mut store = Store::load(storage.clone(), EditMode::View);

        assert!(matches!(
            store.set_path(&["hero", "brandName"], "x"),
            Err(EditorError::ReadOnly)
        ));
        assert!(matches!(store.toggle_footer(), Err(EditorError::ReadOnly)));
        assert!(matches!(store.undo(), Err(EditorError::ReadOnly)));
        assert!(matches!(store.reset(|| true), Err(EditorError::ReadOnly)));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_apply_external_ignores_other_keys_and_garbage() {
        let mut store = Store::load(MemoryStorage::new(), EditMode::Edit);

        assert!(!store.apply_external(&StorageEvent {
            key: "other".to_string(),
            new_value: Some("{}".to_string()),
        }));
        assert!(!store.apply_external(&StorageEvent {
            key: store.storage().key().to_string(),
            new_value: Some("garbage".to_string()),
        }));
        assert!(!store.apply_external(&StorageEvent {
            key: store.storage().key().to_string(),
            new_value: None,
        }));
        assert_eq!(store.document(), &ProfileData::default());
    }
}
