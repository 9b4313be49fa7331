//! # Field Paths
//!
//! String key paths (`["services", "items", "1", "title"]`) are resolved once
//! into a typed [`FieldPath`]. Only locations that exist in the schema can be
//! expressed, so a path that drifted from the schema is rejected up front
//! instead of growing a stray field on the document.

use crate::document::*;
use crate::error::{PathError, PathResult};
use std::fmt;

/// Top-level sections, in page order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    CeoMessage,
    VisionMission,
    Values,
    Services,
    WorkProcess,
    Contact,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Hero,
        Section::About,
        Section::CeoMessage,
        Section::VisionMission,
        Section::Values,
        Section::Services,
        Section::WorkProcess,
        Section::Contact,
    ];

    /// JSON key of the section
    pub fn key(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::About => "about",
            Section::CeoMessage => "ceoMessage",
            Section::VisionMission => "visionMission",
            Section::Values => "values",
            Section::Services => "services",
            Section::WorkProcess => "workProcess",
            Section::Contact => "contact",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    /// The ordered collection held by this section, if any
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Section::Values => Some(Collection::Values),
            Section::Services => Some(Collection::Services),
            Section::WorkProcess => Some(Collection::WorkProcess),
            _ => None,
        }
    }

    fn field_name(&self, field: &str) -> Option<&'static str> {
        match self {
            Section::Hero => Hero::field_name(field),
            Section::About => About::field_name(field),
            Section::CeoMessage => CeoMessage::field_name(field),
            Section::VisionMission => VisionMission::field_name(field),
            Section::Values => Values::field_name(field),
            Section::Services => Services::field_name(field),
            Section::WorkProcess => WorkProcess::field_name(field),
            Section::Contact => Contact::field_name(field),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Editable ordered collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Values,
    Services,
    WorkProcess,
}

impl Collection {
    pub fn section(&self) -> Section {
        match self {
            Collection::Values => Section::Values,
            Collection::Services => Section::Services,
            Collection::WorkProcess => Section::WorkProcess,
        }
    }

    /// Whether items carry an ordered `points` list
    pub fn has_points(&self) -> bool {
        matches!(self, Collection::Services | Collection::WorkProcess)
    }

    /// Accepts either the section key (`services`) or the collection path
    /// (`services.items`)
    pub fn from_key(key: &str) -> Option<Self> {
        let section = key.strip_suffix(".items").unwrap_or(key);
        Section::from_key(section).and_then(|s| s.collection())
    }

    fn item_field_name(&self, field: &str) -> Option<&'static str> {
        match self {
            Collection::Values => ValueItem::field_name(field),
            Collection::Services => ServiceItem::field_name(field),
            Collection::WorkProcess => ProcessItem::field_name(field),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.items", self.section())
    }
}

/// A schema-checked location in the document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// Scalar text field on a section (`hero.brandName`)
    Text { section: Section, field: &'static str },

    /// `contact.showFooter`
    ShowFooter,

    /// A whole collection (`services.items`)
    Items(Collection),

    /// A whole collection item (`services.items.1`)
    Item { collection: Collection, index: usize },

    /// Scalar text field on an item (`values.items.0.description`)
    ItemText {
        collection: Collection,
        index: usize,
        field: &'static str,
    },

    /// The point list of an item (`workProcess.items.2.points`)
    Points { collection: Collection, index: usize },

    /// One point (`services.items.1.points.0`)
    Point {
        collection: Collection,
        index: usize,
        point: usize,
    },
}

/// Shape of the value a path accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
    Json,
}

/// Value written through a [`FieldPath`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    /// Replacement sub-structure (collections, items, point lists)
    Json(serde_json::Value),
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Json(v)
    }
}

impl FieldPath {
    /// Resolve a sequence of keys against the schema.
    ///
    /// Index ranges are not checked here; they depend on the document and are
    /// checked when the path is applied.
    pub fn parse<S: AsRef<str>>(segments: &[S]) -> PathResult<Self> {
        let keys: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
        let (first, rest) = keys.split_first().ok_or(PathError::Empty)?;

        let section =
            Section::from_key(first).ok_or_else(|| PathError::UnknownSection(first.to_string()))?;

        match rest {
            [] => Err(PathError::Incomplete(first.to_string())),
            [field] => {
                if let Some(name) = section.field_name(field) {
                    return Ok(FieldPath::Text {
                        section,
                        field: name,
                    });
                }
                match (section, *field, section.collection()) {
                    (Section::Contact, "showFooter", _) => Ok(FieldPath::ShowFooter),
                    (_, "items", Some(collection)) => Ok(FieldPath::Items(collection)),
                    _ => Err(PathError::unknown_field(section.key(), *field)),
                }
            }
            ["items", tail @ ..] => {
                let collection = section
                    .collection()
                    .ok_or_else(|| PathError::unknown_field(section.key(), "items"))?;
                Self::parse_item(collection, tail)
            }
            [field, ..] => Err(PathError::unknown_field(section.key(), *field)),
        }
    }

    fn parse_item(collection: Collection, tail: &[&str]) -> PathResult<Self> {
        let (index_key, rest) = match tail.split_first() {
            Some(split) => split,
            None => return Ok(FieldPath::Items(collection)),
        };
        let index = parse_index(index_key)?;

        match rest {
            [] => Ok(FieldPath::Item { collection, index }),
            ["points"] if collection.has_points() => Ok(FieldPath::Points { collection, index }),
            ["points", point] if collection.has_points() => Ok(FieldPath::Point {
                collection,
                index,
                point: parse_index(point)?,
            }),
            [field] => collection
                .item_field_name(field)
                .map(|name| FieldPath::ItemText {
                    collection,
                    index,
                    field: name,
                })
                .ok_or_else(|| PathError::unknown_field(format!("{}.{}", collection, index), *field)),
            [field, ..] => Err(PathError::unknown_field(
                format!("{}.{}", collection, index),
                *field,
            )),
        }
    }

    /// Parse a dotted path such as `services.items.1.title`
    pub fn parse_dotted(path: &str) -> PathResult<Self> {
        if path.trim().is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<&str> = path.split('.').collect();
        Self::parse(&segments)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            FieldPath::Text { .. } | FieldPath::ItemText { .. } | FieldPath::Point { .. } => {
                ValueKind::Text
            }
            FieldPath::ShowFooter => ValueKind::Flag,
            FieldPath::Items(_) | FieldPath::Item { .. } | FieldPath::Points { .. } => {
                ValueKind::Json
            }
        }
    }

    /// Interpret raw user input according to the path's [`ValueKind`]
    pub fn parse_value(&self, raw: &str) -> PathResult<FieldValue> {
        match self.kind() {
            ValueKind::Text => Ok(FieldValue::Text(raw.to_string())),
            ValueKind::Flag => raw
                .trim()
                .parse::<bool>()
                .map(FieldValue::Flag)
                .map_err(|_| PathError::type_mismatch(self, "true or false")),
            ValueKind::Json => serde_json::from_str(raw)
                .map(FieldValue::Json)
                .map_err(|e| PathError::invalid_value(self, e)),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Text { section, field } => write!(f, "{}.{}", section, field),
            FieldPath::ShowFooter => f.write_str("contact.showFooter"),
            FieldPath::Items(collection) => write!(f, "{}", collection),
            FieldPath::Item { collection, index } => write!(f, "{}.{}", collection, index),
            FieldPath::ItemText {
                collection,
                index,
                field,
            } => write!(f, "{}.{}.{}", collection, index, field),
            FieldPath::Points { collection, index } => {
                write!(f, "{}.{}.points", collection, index)
            }
            FieldPath::Point {
                collection,
                index,
                point,
            } => write!(f, "{}.{}.points.{}", collection, index, point),
        }
    }
}

fn parse_index(key: &str) -> PathResult<usize> {
    key.parse::<usize>()
        .map_err(|_| PathError::InvalidIndex(key.to_string()))
}
