//! Compiled-in profile content.
//!
//! Every section's `Default` is the seeded content, not an empty record: serde
//! fills missing fields of a stored section from these values.

use crate::document::*;
use std::sync::Arc;

/// Fallback line shown under the contact heading when `footerText` is unset
pub const DEFAULT_CONTACT_FOOTER_TEXT: &str =
    "We are here to answer your questions and help you reach your goals";

impl Default for Hero {
    fn default() -> Self {
        Self {
            brand_name: "TIVRO".to_string(),
            main_title: "We build brands".to_string(),
            highlight: "that lead markets".to_string(),
            subtitle: "Strategy, design and growth under one roof".to_string(),
            footer_text: "Company Profile 2025".to_string(),
            logo: None,
        }
    }
}

impl Default for About {
    fn default() -> Self {
        Self {
            section_title: "Who we are".to_string(),
            description: "Tivro is a marketing and digital transformation studio. \
                We combine research, creative direction and engineering to help \
                ambitious companies turn their vision into measurable growth."
                .to_string(),
            main_icon: None,
            floating_icon1: None,
            floating_icon2: None,
        }
    }
}

impl Default for CeoMessage {
    fn default() -> Self {
        Self {
            title: "A word from our CEO".to_string(),
            text: "Every partnership starts with listening. Our promise is simple: \
                understand your market deeply, move fast, and stay accountable for \
                results long after launch."
                .to_string(),
            name: "Chief Executive Officer".to_string(),
            role: "Founder & CEO".to_string(),
            company: "Tivro".to_string(),
        }
    }
}

impl Default for VisionMission {
    fn default() -> Self {
        Self {
            section_title: "Vision & Mission".to_string(),
            vision_title: "Our vision".to_string(),
            vision_text: "To be the region's most trusted partner for brands that \
                want to grow with clarity and confidence."
                .to_string(),
            mission_title: "Our mission".to_string(),
            mission_text: "To deliver integrated marketing solutions that pair \
                creative excellence with data-driven decisions."
                .to_string(),
            year: "2025".to_string(),
            main_image: None,
        }
    }
}

impl Default for Values {
    fn default() -> Self {
        Self {
            section_title: "Our values".to_string(),
            items: vec![
                value("Innovation", "We question the obvious and prototype the new."),
                value("Focus", "Every deliverable is tied to a business outcome."),
                value("Speed", "Short cycles, honest feedback, continuous delivery."),
            ],
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self {
            section_title: "Our services".to_string(),
            section_subtitle: "From the first insight to lasting impact".to_string(),
            items: vec![
                service(
                    "s1",
                    "Brand strategy",
                    &[
                        "Positioning and identity systems built on market research.",
                        "Competitive analysis",
                        "Brand architecture",
                    ],
                ),
                service(
                    "s2",
                    "Digital marketing",
                    &[
                        "Campaigns that turn attention into revenue.",
                        "Paid media management",
                        "Content and social programs",
                    ],
                ),
                service(
                    "s3",
                    "Digital products",
                    &[
                        "Websites and apps designed around your customers.",
                        "UX research and design",
                        "Web and mobile development",
                    ],
                ),
            ],
        }
    }
}

impl Default for WorkProcess {
    fn default() -> Self {
        Self {
            section_title: "How we work".to_string(),
            section_subtitle: "A clear path from brief to results".to_string(),
            items: vec![
                process("Discover", &["Stakeholder interviews", "Market and audience research"]),
                process("Plan", &["Strategy and roadmap", "Success metrics"]),
                process("Execute", &["Creative production", "Launch and optimisation"]),
                process("Measure", &["Performance reporting", "Continuous improvement"]),
            ],
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            section_title: "Let's talk".to_string(),
            section_subtitle: "Contact us".to_string(),
            email: "hello@tivro.sa".to_string(),
            phone: "+966 50 000 0000".to_string(),
            website: "www.tivro.sa".to_string(),
            address: "Riyadh, Saudi Arabia".to_string(),
            location: "King Fahd Road".to_string(),
            tiktok: "@tivro".to_string(),
            snapchat: "@tivro".to_string(),
            instagram: "@tivro".to_string(),
            commercial_registration: "1010000000".to_string(),
            footer_copyright: "© 2025 Tivro. All rights reserved.".to_string(),
            footer_logo: None,
            show_footer: None,
            footer_text: None,
        }
    }
}

fn value(title: &str, description: &str) -> Arc<ValueItem> {
    Arc::new(ValueItem {
        title: title.to_string(),
        description: description.to_string(),
    })
}

fn service(id: &str, title: &str, points: &[&str]) -> Arc<ServiceItem> {
    Arc::new(ServiceItem {
        id: id.to_string(),
        title: title.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    })
}

fn process(title: &str, points: &[&str]) -> Arc<ProcessItem> {
    Arc::new(ProcessItem {
        title: title.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    })
}
