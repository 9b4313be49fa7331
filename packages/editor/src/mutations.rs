//! # Profile Mutations
//!
//! The closed set of edits the store accepts.
//!
//! ## Mutation Semantics
//!
//! ### Set
//! - Atomic replacement of the value at a schema-checked [`FieldPath`]
//! - Last write wins; no merge attempts
//!
//! ### Collections
//! - Add appends; delete removes and shifts later items down
//! - Out-of-range indices are rejected and leave the document untouched
//!
//! ### Points
//! - Same discipline for `services` and `workProcess` items
//! - Deleting point 0 of a service hands the lead role to the next point

use profile_schema::{
    Collection, CollectionItem, FieldPath, FieldValue, IconSlot, PathError, ProfileData,
};
use std::sync::Arc;
use thiserror::Error;

/// Semantic edits on the profile document
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Write a value at a path
    Set { path: FieldPath, value: FieldValue },

    /// Append an item to its collection
    AddItem(CollectionItem),

    /// Remove the item at `index`
    DeleteItem { collection: Collection, index: usize },

    /// Remove a service by its stable id
    DeleteService { id: String },

    /// Append a point to an item's point list
    AddPoint {
        collection: Collection,
        index: usize,
        text: String,
    },

    /// Remove one point from an item's point list
    DeletePoint {
        collection: Collection,
        index: usize,
        point: usize,
    },

    /// Show or hide the contact footer
    SetFooterVisible(bool),

    /// Flip footer visibility (absent counts as visible)
    ToggleFooter,

    /// Advance a floating icon on the about page to the next in its cycle
    CycleFloatingIcon(IconSlot),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),
}

impl Mutation {
    /// Apply to `doc` in place.
    ///
    /// On error `doc` may already hold copy-on-write clones of the touched
    /// section, but no value in it has changed.
    pub fn apply(self, doc: &mut ProfileData) -> Result<(), MutationError> {
        match self {
            Mutation::Set { path, value } => doc.set(&path, value)?,

            Mutation::AddItem(item) => doc.push_item(item),

            Mutation::DeleteItem { collection, index } => doc.remove_item(collection, index)?,

            Mutation::DeleteService { id } => {
                let index = doc
                    .service_index(&id)
                    .ok_or(MutationError::ServiceNotFound(id))?;
                doc.remove_item(Collection::Services, index)?;
            }

            Mutation::AddPoint {
                collection,
                index,
                text,
            } => doc.push_point(collection, index, text)?,

            Mutation::DeletePoint {
                collection,
                index,
                point,
            } => doc.remove_point(collection, index, point)?,

            Mutation::SetFooterVisible(visible) => {
                Arc::make_mut(&mut doc.contact).show_footer = Some(visible);
            }

            Mutation::ToggleFooter => {
                let visible = doc.contact.footer_visible();
                Arc::make_mut(&mut doc.contact).show_footer = Some(!visible);
            }

            Mutation::CycleFloatingIcon(slot) => {
                let next = slot.next(slot.current(&doc.about));
                let about = Arc::make_mut(&mut doc.about);
                match slot {
                    IconSlot::First => about.floating_icon1 = Some(next.to_string()),
                    IconSlot::Second => about.floating_icon2 = Some(next.to_string()),
                }
            }
        }

        Ok(())
    }

    /// Get a debug name for this mutation
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Set { .. } => "Set",
            Mutation::AddItem(_) => "AddItem",
            Mutation::DeleteItem { .. } => "DeleteItem",
            Mutation::DeleteService { .. } => "DeleteService",
            Mutation::AddPoint { .. } => "AddPoint",
            Mutation::DeletePoint { .. } => "DeletePoint",
            Mutation::SetFooterVisible(_) => "SetFooterVisible",
            Mutation::ToggleFooter => "ToggleFooter",
            Mutation::CycleFloatingIcon(_) => "CycleFloatingIcon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_footer_from_absent() {
        let mut doc = ProfileData::default();
        assert!(doc.contact.show_footer.is_none());

        Mutation::ToggleFooter.apply(&mut doc).unwrap();
        assert_eq!(doc.contact.show_footer, Some(false));

        Mutation::ToggleFooter.apply(&mut doc).unwrap();
        assert_eq!(doc.contact.show_footer, Some(true));
    }

    #[test]
    fn test_cycle_floating_icon() {
        let mut doc = ProfileData::default();
        Mutation::CycleFloatingIcon(IconSlot::First)
            .apply(&mut doc)
            .unwrap();
        assert_eq!(doc.about.floating_icon1.as_deref(), Some("zap"));
        assert!(doc.about.floating_icon2.is_none());
    }

    #[test]
    fn test_delete_service_by_id() {
        let mut doc = ProfileData::default();
        Mutation::DeleteService {
            id: "s2".to_string(),
        }
        .apply(&mut doc)
        .unwrap();
        let ids: Vec<&str> = doc.services.items.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);

        let err = Mutation::DeleteService {
            id: "s2".to_string(),
        }
        .apply(&mut doc)
        .unwrap_err();
        assert_eq!(err, MutationError::ServiceNotFound("s2".to_string()));
    }

    #[test]
    fn test_names() {
        assert_eq!(Mutation::ToggleFooter.name(), "ToggleFooter");
        assert_eq!(
            Mutation::DeleteItem {
                collection: Collection::Values,
                index: 0
            }
            .name(),
            "DeleteItem"
        );
    }
}
