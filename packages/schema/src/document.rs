//! # Profile Document
//!
//! The nested record behind every page of the profile.
//!
//! Sections and collection items are held behind `Arc` so a document can be
//! cloned for undo in O(sections) and mutated copy-on-write: only the section
//! and item on the mutated path are cloned, every other subtree keeps its
//! identity.
//!
//! Missing sections and missing fields inside a section deserialize from the
//! compiled-in defaults (`#[serde(default)]` on every section), so a record
//! saved by an older schema never loses whole sections. A section that is
//! null or malformed falls back to its defaults alone; the other sections of
//! the record still load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// The whole profile document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    #[serde(deserialize_with = "lenient_section")]
    pub hero: Arc<Hero>,
    #[serde(deserialize_with = "lenient_section")]
    pub about: Arc<About>,
    #[serde(deserialize_with = "lenient_section")]
    pub ceo_message: Arc<CeoMessage>,
    #[serde(deserialize_with = "lenient_section")]
    pub vision_mission: Arc<VisionMission>,
    #[serde(deserialize_with = "lenient_section")]
    pub values: Arc<Values>,
    #[serde(deserialize_with = "lenient_section")]
    pub services: Arc<Services>,
    #[serde(deserialize_with = "lenient_section")]
    pub work_process: Arc<WorkProcess>,
    #[serde(deserialize_with = "lenient_section")]
    pub contact: Arc<Contact>,
}

fn lenient_section<'de, D, T>(deserializer: D) -> Result<Arc<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Arc::new(T::deserialize(value).unwrap_or_default()))
}

/// Cover page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub brand_name: String,
    pub main_title: String,
    pub highlight: String,
    pub subtitle: String,
    pub footer_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub section_title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_icon1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floating_icon2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CeoMessage {
    pub title: String,
    pub text: String,
    pub name: String,
    pub role: String,
    pub company: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisionMission {
    pub section_title: String,
    pub vision_title: String,
    pub vision_text: String,
    pub mission_title: String,
    pub mission_text: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Values {
    pub section_title: String,
    pub items: Vec<Arc<ValueItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Services {
    pub section_title: String,
    pub section_subtitle: String,
    pub items: Vec<Arc<ServiceItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkProcess {
    pub section_title: String,
    pub section_subtitle: String,
    pub items: Vec<Arc<ProcessItem>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub section_title: String,
    pub section_subtitle: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
    pub location: String,
    pub tiktok: String,
    pub snapchat: String,
    pub instagram: String,
    pub commercial_registration: String,
    pub footer_copyright: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_logo: Option<String>,
    /// Absent means the footer is shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

impl Contact {
    pub fn footer_visible(&self) -> bool {
        self.show_footer.unwrap_or(true)
    }
}

/// A service card. `points[0]` is rendered as the lead description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    pub points: Vec<String>,
}

impl ServiceItem {
    /// Build a service whose id is derived from the creation time (`s<millis>`)
    pub fn new(title: impl Into<String>, points: Vec<String>) -> Self {
        Self {
            id: format!("s{}", chrono::Utc::now().timestamp_millis()),
            title: title.into(),
            points,
        }
    }

    /// The lead description, if any
    pub fn lead(&self) -> Option<&str> {
        self.points.first().map(String::as_str)
    }

    /// Supplementary bullets (every point after the lead)
    pub fn bullets(&self) -> &[String] {
        self.points.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessItem {
    pub title: String,
    pub points: Vec<String>,
}

/// A mutable handle to one scalar text field.
///
/// Optional fields (images, icon names, footer text) are cleared by an
/// empty value.
pub enum TextSlot<'a> {
    Required(&'a mut String),
    Optional(&'a mut Option<String>),
}

impl TextSlot<'_> {
    pub fn set(self, value: String) {
        match self {
            TextSlot::Required(slot) => *slot = value,
            TextSlot::Optional(slot) => {
                *slot = if value.is_empty() { None } else { Some(value) };
            }
        }
    }
}

/// Scalar text fields addressable by their JSON key
pub trait TextFields {
    /// JSON keys of every scalar text field, in declaration order
    const FIELDS: &'static [&'static str];

    /// Current value; empty optional fields read as `""`
    fn text(&self, field: &str) -> Option<&str>;

    fn text_slot(&mut self, field: &str) -> Option<TextSlot<'_>>;

    /// Resolve a caller-supplied key to its static name
    fn field_name(field: &str) -> Option<&'static str> {
        Self::FIELDS.iter().copied().find(|name| *name == field)
    }
}

macro_rules! text_fields {
    (
        $ty:ty {
            $($key:literal => $field:ident),* $(,)?
        }
        $(optional {
            $($okey:literal => $ofield:ident),* $(,)?
        })?
    ) => {
        impl TextFields for $ty {
            const FIELDS: &'static [&'static str] = &[$($key,)* $($($okey,)*)?];

            fn text(&self, field: &str) -> Option<&str> {
                match field {
                    $($key => Some(self.$field.as_str()),)*
                    $($($okey => Some(self.$ofield.as_deref().unwrap_or("")),)*)?
                    _ => None,
                }
            }

            fn text_slot(&mut self, field: &str) -> Option<TextSlot<'_>> {
                match field {
                    $($key => Some(TextSlot::Required(&mut self.$field)),)*
                    $($($okey => Some(TextSlot::Optional(&mut self.$ofield)),)*)?
                    _ => None,
                }
            }
        }
    };
}

text_fields!(Hero {
    "brandName" => brand_name,
    "mainTitle" => main_title,
    "highlight" => highlight,
    "subtitle" => subtitle,
    "footerText" => footer_text,
} optional {
    "logo" => logo,
});

text_fields!(About {
    "sectionTitle" => section_title,
    "description" => description,
} optional {
    "mainIcon" => main_icon,
    "floatingIcon1" => floating_icon1,
    "floatingIcon2" => floating_icon2,
});

text_fields!(CeoMessage {
    "title" => title,
    "text" => text,
    "name" => name,
    "role" => role,
    "company" => company,
});

text_fields!(VisionMission {
    "sectionTitle" => section_title,
    "visionTitle" => vision_title,
    "visionText" => vision_text,
    "missionTitle" => mission_title,
    "missionText" => mission_text,
    "year" => year,
} optional {
    "mainImage" => main_image,
});

text_fields!(Values {
    "sectionTitle" => section_title,
});

text_fields!(Services {
    "sectionTitle" => section_title,
    "sectionSubtitle" => section_subtitle,
});

text_fields!(WorkProcess {
    "sectionTitle" => section_title,
    "sectionSubtitle" => section_subtitle,
});

text_fields!(Contact {
    "sectionTitle" => section_title,
    "sectionSubtitle" => section_subtitle,
    "email" => email,
    "phone" => phone,
    "website" => website,
    "address" => address,
    "location" => location,
    "tiktok" => tiktok,
    "snapchat" => snapchat,
    "instagram" => instagram,
    "commercialRegistration" => commercial_registration,
    "footerCopyright" => footer_copyright,
} optional {
    "footerLogo" => footer_logo,
    "footerText" => footer_text,
});

text_fields!(ServiceItem {
    "title" => title,
});

text_fields!(ValueItem {
    "title" => title,
    "description" => description,
});

text_fields!(ProcessItem {
    "title" => title,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_slot_clears_on_empty() {
        let mut hero = Hero::default();
        hero.text_slot("logo").unwrap().set("data:image/png;base64,AA==".to_string());
        assert_eq!(hero.logo.as_deref(), Some("data:image/png;base64,AA=="));

        hero.text_slot("logo").unwrap().set(String::new());
        assert!(hero.logo.is_none());
        assert_eq!(hero.text("logo"), Some(""));
    }

    #[test]
    fn test_unknown_field_has_no_slot() {
        let mut ceo = CeoMessage::default();
        assert!(ceo.text_slot("signature").is_none());
        assert!(CeoMessage::field_name("signature").is_none());
        assert_eq!(CeoMessage::field_name("role"), Some("role"));
    }

    #[test]
    fn test_footer_visible_defaults_to_true() {
        let mut contact = Contact::default();
        contact.show_footer = None;
        assert!(contact.footer_visible());
        contact.show_footer = Some(false);
        assert!(!contact.footer_visible());
    }

    #[test]
    fn test_service_lead_and_bullets() {
        let service = ServiceItem {
            id: "s1".to_string(),
            title: "Consulting".to_string(),
            points: vec!["Lead".to_string(), "One".to_string(), "Two".to_string()],
        };
        assert_eq!(service.lead(), Some("Lead"));
        assert_eq!(service.bullets(), &["One".to_string(), "Two".to_string()]);

        let empty = ServiceItem::default();
        assert_eq!(empty.lead(), None);
        assert!(empty.bullets().is_empty());
    }

    #[test]
    fn test_service_id_from_timestamp() {
        let service = ServiceItem::new("New", vec![]);
        assert!(service.id.starts_with('s'));
        assert!(service.id[1..].parse::<i64>().is_ok());
    }
}
