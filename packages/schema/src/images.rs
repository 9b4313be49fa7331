//! Image fields and what they may hold.
//!
//! An image value is either empty, a base64 `data:image/...` URL, or an
//! http(s) URL. Anything else cannot be rendered.

use crate::document::ProfileData;
use crate::path::{FieldPath, FieldValue, Section};

/// Every image field, as `(section, field)`
pub const IMAGE_FIELDS: [(Section, &str); 4] = [
    (Section::Hero, "logo"),
    (Section::About, "mainIcon"),
    (Section::VisionMission, "mainImage"),
    (Section::Contact, "footerLogo"),
];

/// Check a non-empty image value; the error names what is wrong with it
pub fn check_image_src(src: &str) -> Result<(), &'static str> {
    let lower = src.trim_start().to_ascii_lowercase();
    if lower.starts_with("data:image/") {
        if !lower.contains(";base64,") {
            return Err("data URL is not base64 encoded");
        }
        return Ok(());
    }
    if lower.starts_with("https://") || lower.starts_with("http://") {
        return Ok(());
    }
    Err("expected a data:image URL")
}

impl FieldPath {
    pub fn is_image(&self) -> bool {
        match self {
            FieldPath::Text { section, field } => IMAGE_FIELDS
                .iter()
                .any(|(s, f)| s == section && f == field),
            _ => false,
        }
    }
}

impl ProfileData {
    /// Clear image fields that cannot be rendered.
    ///
    /// Returns the cleared paths with the reason each was rejected.
    pub fn clear_invalid_images(&mut self) -> Vec<(FieldPath, &'static str)> {
        let mut cleared = Vec::new();
        for (section, field) in IMAGE_FIELDS {
            let path = FieldPath::Text { section, field };
            let reason = match self.text_at(&path) {
                Some(value) if !value.is_empty() => check_image_src(value).err(),
                _ => None,
            };
            if let Some(reason) = reason {
                if self.set(&path, FieldValue::Text(String::new())).is_ok() {
                    cleared.push((path, reason));
                }
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_accepted_image_values() {
        assert!(check_image_src("data:image/png;base64,AA==").is_ok());
        assert!(check_image_src("data:image/avif;base64,AA==").is_ok());
        assert!(check_image_src("https://cdn.tivro.sa/logo.svg").is_ok());
        assert!(check_image_src("data:image/svg+xml,<svg/>").is_err());
        assert!(check_image_src("data:application/octet-stream;base64,AA==").is_err());
        assert!(check_image_src("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_image_paths() {
        let logo = FieldPath::parse_dotted("contact.footerLogo").unwrap();
        assert!(logo.is_image());
        let email = FieldPath::parse_dotted("contact.email").unwrap();
        assert!(!email.is_image());
    }

    #[test]
    fn test_clear_invalid_images_keeps_good_ones() {
        let mut doc = ProfileData::default();
        Arc::make_mut(&mut doc.hero).logo = Some("data:image/png;base64,AA==".to_string());
        Arc::make_mut(&mut doc.vision_mission).main_image = Some("file:///etc/passwd".to_string());
        let untouched = doc.about.clone();

        let cleared = doc.clear_invalid_images();

        assert_eq!(cleared.len(), 1);
        assert_eq!(cleared[0].0.to_string(), "visionMission.mainImage");
        assert!(doc.vision_mission.main_image.is_none());
        assert!(doc.hero.logo.is_some());
        assert!(Arc::ptr_eq(&doc.about, &untouched));
    }
}
