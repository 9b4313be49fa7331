//! Copy-on-write edits on [`ProfileData`].
//!
//! Every edit goes through `Arc::make_mut`, so only the section and the item
//! on the edited path are cloned when a snapshot still shares them.

use crate::document::*;
use crate::error::{PathError, PathResult};
use crate::images::check_image_src;
use crate::path::{Collection, FieldPath, FieldValue, Section};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Title given to a newly added service
pub const NEW_SERVICE_TITLE: &str = "New service";
/// First point of a newly added service
pub const NEW_SERVICE_POINT: &str = "Supporting point 1";
/// Text of a newly added point
pub const NEW_POINT: &str = "New point";

/// An item ready to be appended to one of the collections
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionItem {
    Value(ValueItem),
    Service(ServiceItem),
    Process(ProcessItem),
}

impl CollectionItem {
    pub fn collection(&self) -> Collection {
        match self {
            CollectionItem::Value(_) => Collection::Values,
            CollectionItem::Service(_) => Collection::Services,
            CollectionItem::Process(_) => Collection::WorkProcess,
        }
    }

    /// Default item for a collection, as created by the "add" affordance
    pub fn new_for(collection: Collection) -> Self {
        match collection {
            Collection::Values => CollectionItem::Value(ValueItem {
                title: "New value".to_string(),
                description: "Describe this value".to_string(),
            }),
            Collection::Services => CollectionItem::Service(ServiceItem::new(
                NEW_SERVICE_TITLE,
                vec![NEW_SERVICE_POINT.to_string()],
            )),
            Collection::WorkProcess => CollectionItem::Process(ProcessItem {
                title: "New step".to_string(),
                points: vec![NEW_POINT.to_string()],
            }),
        }
    }
}

trait HasPoints {
    fn points_mut(&mut self) -> &mut Vec<String>;
}

impl HasPoints for ServiceItem {
    fn points_mut(&mut self) -> &mut Vec<String> {
        &mut self.points
    }
}

impl HasPoints for ProcessItem {
    fn points_mut(&mut self) -> &mut Vec<String> {
        &mut self.points
    }
}

impl ProfileData {
    /// Number of items in a collection
    pub fn item_count(&self, collection: Collection) -> usize {
        match collection {
            Collection::Values => self.values.items.len(),
            Collection::Services => self.services.items.len(),
            Collection::WorkProcess => self.work_process.items.len(),
        }
    }

    /// Position of a service by its stable id
    pub fn service_index(&self, id: &str) -> Option<usize> {
        self.services.items.iter().position(|s| s.id == id)
    }

    /// Current text at a text-valued path
    pub fn text_at(&self, path: &FieldPath) -> Option<&str> {
        match path {
            FieldPath::Text { section, field } => match section {
                Section::Hero => self.hero.text(field),
                Section::About => self.about.text(field),
                Section::CeoMessage => self.ceo_message.text(field),
                Section::VisionMission => self.vision_mission.text(field),
                Section::Values => self.values.text(field),
                Section::Services => self.services.text(field),
                Section::WorkProcess => self.work_process.text(field),
                Section::Contact => self.contact.text(field),
            },
            FieldPath::ItemText {
                collection,
                index,
                field,
            } => match collection {
                Collection::Values => self.values.items.get(*index)?.text(field),
                Collection::Services => self.services.items.get(*index)?.text(field),
                Collection::WorkProcess => self.work_process.items.get(*index)?.text(field),
            },
            FieldPath::Point {
                collection,
                index,
                point,
            } => self
                .points(*collection, *index)?
                .get(*point)
                .map(String::as_str),
            _ => None,
        }
    }

    fn points(&self, collection: Collection, index: usize) -> Option<&[String]> {
        match collection {
            Collection::Services => self.services.items.get(index).map(|s| s.points.as_slice()),
            Collection::WorkProcess => self
                .work_process
                .items
                .get(index)
                .map(|p| p.points.as_slice()),
            Collection::Values => None,
        }
    }

    /// Write `value` at `path`.
    ///
    /// The document is left untouched when the index is out of range or the
    /// value does not fit the target.
    pub fn set(&mut self, path: &FieldPath, value: FieldValue) -> PathResult<()> {
        match path {
            FieldPath::Text { section, field } => {
                let text = expect_text(path, value)?;
                if path.is_image() && !text.is_empty() {
                    check_image_src(&text).map_err(|reason| PathError::invalid_value(path, reason))?;
                }
                let slot = match section {
                    Section::Hero => Arc::make_mut(&mut self.hero).text_slot(field),
                    Section::About => Arc::make_mut(&mut self.about).text_slot(field),
                    Section::CeoMessage => Arc::make_mut(&mut self.ceo_message).text_slot(field),
                    Section::VisionMission => {
                        Arc::make_mut(&mut self.vision_mission).text_slot(field)
                    }
                    Section::Values => Arc::make_mut(&mut self.values).text_slot(field),
                    Section::Services => Arc::make_mut(&mut self.services).text_slot(field),
                    Section::WorkProcess => Arc::make_mut(&mut self.work_process).text_slot(field),
                    Section::Contact => Arc::make_mut(&mut self.contact).text_slot(field),
                };
                slot.ok_or_else(|| PathError::unknown_field(section.key(), *field))?
                    .set(text);
                Ok(())
            }

            FieldPath::ShowFooter => match value {
                FieldValue::Flag(visible) => {
                    Arc::make_mut(&mut self.contact).show_footer = Some(visible);
                    Ok(())
                }
                _ => Err(PathError::type_mismatch(path, "boolean")),
            },

            FieldPath::Items(collection) => {
                let json = expect_json(path, value)?;
                match collection {
                    Collection::Values => {
                        Arc::make_mut(&mut self.values).items = decode(path, json)?;
                    }
                    Collection::Services => {
                        Arc::make_mut(&mut self.services).items = decode(path, json)?;
                    }
                    Collection::WorkProcess => {
                        Arc::make_mut(&mut self.work_process).items = decode(path, json)?;
                    }
                }
                Ok(())
            }

            FieldPath::Item { collection, index } => {
                self.check_index(*collection, *index)?;
                let json = expect_json(path, value)?;
                match collection {
                    Collection::Values => {
                        Arc::make_mut(&mut self.values).items[*index] = decode(path, json)?;
                    }
                    Collection::Services => {
                        Arc::make_mut(&mut self.services).items[*index] = decode(path, json)?;
                    }
                    Collection::WorkProcess => {
                        Arc::make_mut(&mut self.work_process).items[*index] = decode(path, json)?;
                    }
                }
                Ok(())
            }

            FieldPath::ItemText {
                collection,
                index,
                field,
            } => {
                self.check_index(*collection, *index)?;
                let text = expect_text(path, value)?;
                let slot = match collection {
                    Collection::Values => {
                        item_mut(&mut Arc::make_mut(&mut self.values).items, *index).text_slot(field)
                    }
                    Collection::Services => {
                        item_mut(&mut Arc::make_mut(&mut self.services).items, *index)
                            .text_slot(field)
                    }
                    Collection::WorkProcess => {
                        item_mut(&mut Arc::make_mut(&mut self.work_process).items, *index)
                            .text_slot(field)
                    }
                };
                slot.ok_or_else(|| PathError::unknown_field(path.to_string(), *field))?
                    .set(text);
                Ok(())
            }

            FieldPath::Points { collection, index } => {
                self.check_index(*collection, *index)?;
                let points: Vec<String> = decode(path, expect_json(path, value)?)?;
                *self.points_mut(*collection, *index)? = points;
                Ok(())
            }

            FieldPath::Point {
                collection,
                index,
                point,
            } => {
                self.check_point(*collection, *index, *point)?;
                let text = expect_text(path, value)?;
                self.points_mut(*collection, *index)?[*point] = text;
                Ok(())
            }
        }
    }

    /// Append an item to its collection.
    ///
    /// A service whose id is already taken gets a fresh suffix so ids stay
    /// unique even when two services are created within the same millisecond.
    pub fn push_item(&mut self, item: CollectionItem) {
        match item {
            CollectionItem::Value(value) => {
                Arc::make_mut(&mut self.values).items.push(Arc::new(value));
            }
            CollectionItem::Service(mut service) => {
                if self.service_index(&service.id).is_some() {
                    let base = service.id.clone();
                    let mut n = 1;
                    while self.service_index(&format!("{}-{}", base, n)).is_some() {
                        n += 1;
                    }
                    service.id = format!("{}-{}", base, n);
                }
                Arc::make_mut(&mut self.services).items.push(Arc::new(service));
            }
            CollectionItem::Process(process) => {
                Arc::make_mut(&mut self.work_process)
                    .items
                    .push(Arc::new(process));
            }
        }
    }

    /// Remove an item; later items shift down by one
    pub fn remove_item(&mut self, collection: Collection, index: usize) -> PathResult<()> {
        self.check_index(collection, index)?;
        match collection {
            Collection::Values => {
                Arc::make_mut(&mut self.values).items.remove(index);
            }
            Collection::Services => {
                Arc::make_mut(&mut self.services).items.remove(index);
            }
            Collection::WorkProcess => {
                Arc::make_mut(&mut self.work_process).items.remove(index);
            }
        }
        Ok(())
    }

    pub fn push_point(
        &mut self,
        collection: Collection,
        index: usize,
        text: String,
    ) -> PathResult<()> {
        self.check_index(collection, index)?;
        self.points_mut(collection, index)?.push(text);
        Ok(())
    }

    /// Remove a point. Removing point 0 hands the lead role to the next point.
    pub fn remove_point(
        &mut self,
        collection: Collection,
        index: usize,
        point: usize,
    ) -> PathResult<()> {
        self.check_point(collection, index, point)?;
        self.points_mut(collection, index)?.remove(point);
        Ok(())
    }

    fn check_index(&self, collection: Collection, index: usize) -> PathResult<()> {
        let len = self.item_count(collection);
        if index < len {
            Ok(())
        } else {
            Err(PathError::out_of_range(collection.to_string(), index, len))
        }
    }

    fn check_point(&self, collection: Collection, index: usize, point: usize) -> PathResult<()> {
        self.check_index(collection, index)?;
        let points = self
            .points(collection, index)
            .ok_or_else(|| PathError::unknown_field(format!("{}.{}", collection, index), "points"))?;
        if point < points.len() {
            Ok(())
        } else {
            Err(PathError::out_of_range(
                format!("{}.{}.points", collection, index),
                point,
                points.len(),
            ))
        }
    }

    fn points_mut(&mut self, collection: Collection, index: usize) -> PathResult<&mut Vec<String>> {
        match collection {
            Collection::Services => Ok(item_mut(
                &mut Arc::make_mut(&mut self.services).items,
                index,
            )
            .points_mut()),
            Collection::WorkProcess => Ok(item_mut(
                &mut Arc::make_mut(&mut self.work_process).items,
                index,
            )
            .points_mut()),
            Collection::Values => Err(PathError::unknown_field(
                format!("{}.{}", collection, index),
                "points",
            )),
        }
    }
}

/// Index must already be range-checked
fn item_mut<T: Clone>(items: &mut [Arc<T>], index: usize) -> &mut T {
    Arc::make_mut(&mut items[index])
}

fn expect_text(path: &FieldPath, value: FieldValue) -> PathResult<String> {
    match value {
        FieldValue::Text(text) => Ok(text),
        _ => Err(PathError::type_mismatch(path, "text")),
    }
}

fn expect_json(path: &FieldPath, value: FieldValue) -> PathResult<serde_json::Value> {
    match value {
        FieldValue::Json(json) => Ok(json),
        _ => Err(PathError::type_mismatch(path, "JSON structure")),
    }
}

fn decode<T: DeserializeOwned>(path: &FieldPath, json: serde_json::Value) -> PathResult<T> {
    serde_json::from_value(json).map_err(|e| PathError::invalid_value(path, e))
}
