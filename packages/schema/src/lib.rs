//! # Profile Schema
//!
//! Data model for the company profile document.
//!
//! ```text
//! ProfileData
//!  ├─ hero            cover page
//!  ├─ about           who we are + floating icons
//!  ├─ ceoMessage
//!  ├─ visionMission
//!  ├─ values          items: ValueItem[]
//!  ├─ services        items: ServiceItem[] (points[0] is the lead)
//!  ├─ workProcess     items: ProcessItem[]
//!  └─ contact         cards, socials, footer
//! ```
//!
//! Edits address the document through [`FieldPath`], a schema-checked
//! location parsed from string keys, and are applied copy-on-write.

pub mod defaults;
pub mod document;
pub mod error;
pub mod icons;
pub mod images;
pub mod links;
pub mod mutate;
pub mod path;

pub use defaults::DEFAULT_CONTACT_FOOTER_TEXT;
pub use document::*;
pub use error::{PathError, PathResult};
pub use icons::IconSlot;
pub use images::{check_image_src, IMAGE_FIELDS};
pub use links::{ContactCard, LinkKind, CONTACT_CARDS, SOCIAL_CARDS};
pub use mutate::{CollectionItem, NEW_POINT, NEW_SERVICE_POINT, NEW_SERVICE_TITLE};
pub use path::{Collection, FieldPath, FieldValue, Section, ValueKind};

/// Parse a stored document.
///
/// Sections and fields missing from `json` are filled from the compiled-in
/// defaults, one level deep per section; present values are kept as stored.
pub fn parse_document(json: &str) -> Result<ProfileData, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a document for storage
pub fn serialize_document(doc: &ProfileData) -> Result<String, serde_json::Error> {
    serde_json::to_string(doc)
}
