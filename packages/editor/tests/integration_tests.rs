//! Integration tests for editor crate

use profile_editor::schema::Collection;
use profile_editor::{
    EditKey, EditMode, EditSession, EditorError, FieldVariant, MemoryStorage, ProfileData, Storage,
    StorageEvent, Store,
};
use std::sync::Arc;

fn store() -> Store<MemoryStorage> {
    Store::load(MemoryStorage::new(), EditMode::Edit)
}

#[test]
fn test_undo_is_bounded_to_ten_snapshots() {
    let mut store = store();
    let mut states = vec![store.document().clone()];

    for i in 0..15 {
        store
            .set_path(&["hero", "mainTitle"], format!("Title {}", i))
            .unwrap();
        states.push(store.document().clone());
    }
    assert_eq!(store.undo_levels(), 10);

    // Each undo steps back exactly one state
    for expected in states.iter().rev().skip(1).take(10) {
        assert!(store.undo().unwrap());
        assert_eq!(store.document(), expected);
    }

    // The eleventh undo has nothing left
    let before = store.document().clone();
    assert!(!store.undo().unwrap());
    assert_eq!(store.document(), &before);
    assert_eq!(store.document().hero.main_title, "Title 4");
}

#[test]
fn test_path_mutation_is_isolated() {
    let mut store = store();
    let before = store.document().clone();

    store
        .set_path(&["services", "items", "1", "title"], "Growth marketing")
        .unwrap();
    let after = store.document();

    assert_eq!(after.services.items[1].title, "Growth marketing");
    assert_eq!(before.services.items[1].title, "Digital marketing");

    // Siblings and other sections keep their identity
    assert!(Arc::ptr_eq(&before.services.items[0], &after.services.items[0]));
    assert!(Arc::ptr_eq(&before.services.items[2], &after.services.items[2]));
    assert!(Arc::ptr_eq(&before.hero, &after.hero));
    assert!(Arc::ptr_eq(&before.contact, &after.contact));
    assert!(!Arc::ptr_eq(&before.services, &after.services));
}

#[test]
fn test_field_editor_commit_and_cancel() {
    let mut store = store();
    store.set_path(&["ceoMessage", "name"], "A").unwrap();
    let mut session = EditSession::new(store);

    session
        .focus_dotted("ceoMessage.name", FieldVariant::SingleLine)
        .unwrap();
    session.type_text("B").unwrap();
    assert!(!session.press(EditKey::Cancel).unwrap());
    assert_eq!(session.document().ceo_message.name, "A");
    assert_eq!(session.store().undo_levels(), 1);

    session
        .focus_dotted("ceoMessage.name", FieldVariant::SingleLine)
        .unwrap();
    session.type_text("B").unwrap();
    assert!(session.blur().unwrap());
    assert!(!session.blur().unwrap());
    assert_eq!(session.document().ceo_message.name, "B");
    assert_eq!(session.store().undo_levels(), 2);
}

#[test]
fn test_round_trip_persistence() {
    let storage = MemoryStorage::new();
    let mut store = Store::load(storage.clone(), EditMode::Edit);

    store.set_path(&["contact", "email"], "team@acme.test").unwrap();
    store.add_new_item(Collection::Values).unwrap();
    store.add_point(Collection::WorkProcess, 0).unwrap();
    store
        .set_path(&["hero", "logo"], "data:image/png;base64,AA==")
        .unwrap();
    store.toggle_footer().unwrap();

    let reloaded = Store::load(storage, EditMode::Edit);
    assert_eq!(reloaded.document(), store.document());
    assert!(!reloaded.can_undo());
}

#[test]
fn test_service_deletion_reindexes() {
    let mut store = store();
    let third = store.document().services.items[2].clone();

    store.delete_item(Collection::Services, 1).unwrap();

    let services = &store.document().services.items;
    assert_eq!(services.len(), 2);
    assert_eq!(services[1].id, third.id);
    assert!(Arc::ptr_eq(&services[1], &third));

    let err = store.delete_item(Collection::Services, 2).unwrap_err();
    assert!(matches!(err, EditorError::Mutation(_)));
    assert_eq!(store.document().services.items.len(), 2);
}

#[test]
fn test_footer_visibility_default() {
    let mut store = store();
    assert!(store.document().contact.show_footer.is_none());
    assert!(store.document().contact.footer_visible());

    store.set_footer_visible(false).unwrap();
    assert!(!store.document().contact.footer_visible());

    store.toggle_footer().unwrap();
    assert_eq!(store.document().contact.show_footer, Some(true));
}

#[test]
fn test_view_mode_renders_but_refuses_edits() {
    let storage = MemoryStorage::new();
    {
        let mut editor = Store::load(storage.clone(), EditMode::Edit);
        editor.set_path(&["hero", "brandName"], "Shared").unwrap();
    }

    let mut viewer = Store::load(storage.clone(), EditMode::from_address("/?mode=view"));
    assert_eq!(viewer.document().hero.brand_name, "Shared");
    assert!(matches!(
        viewer.add_new_item(Collection::Services),
        Err(EditorError::ReadOnly)
    ));
    assert_eq!(viewer.document().services.items.len(), 3);
}

#[test]
fn test_external_sync_between_writers() {
    let storage = MemoryStorage::new();
    let mut first = EditSession::new(Store::load(storage.clone(), EditMode::Edit));
    let mut second = Store::load(storage.clone(), EditMode::Edit);

    // Second writer changes the record; first adopts it wholesale
    second.set_path(&["about", "sectionTitle"], "Who we are").unwrap();
    let event = StorageEvent {
        key: storage.key().to_string(),
        new_value: storage.read().unwrap(),
    };

    first
        .focus_dotted("hero.subtitle", FieldVariant::SingleLine)
        .unwrap();
    first.type_text("local draft").unwrap();

    assert!(first.apply_external(&event));
    assert_eq!(first.document().about.section_title, "Who we are");
    assert_eq!(first.store().undo_levels(), 0);

    // The draft survived the sync and wins on commit
    assert!(first.blur().unwrap());
    assert_eq!(first.document().hero.subtitle, "local draft");
    assert_eq!(first.document().about.section_title, "Who we are");
}

#[test]
fn test_reset_restores_defaults_and_persists() {
    let storage = MemoryStorage::new();
    let mut store = Store::load(storage.clone(), EditMode::Edit);
    store.delete_service_by_id("s1").unwrap();

    assert!(store.reset(|| true).unwrap());

    let reloaded = Store::load(storage, EditMode::Edit);
    assert_eq!(reloaded.document(), &ProfileData::default());
}
