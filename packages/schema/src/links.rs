//! Contact cards and the outbound links they become in view mode.

use crate::document::{Contact, TextFields};

/// How a contact value turns into an outbound link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Email,
    WhatsApp,
    Website,
    TikTok,
    Snapchat,
    Instagram,
}

impl LinkKind {
    pub fn href(&self, value: &str) -> String {
        match self {
            LinkKind::Email => format!("mailto:{}", value),
            LinkKind::WhatsApp => {
                let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
                format!("https://wa.me/{}", digits)
            }
            LinkKind::Website => {
                if value.starts_with("http") {
                    value.to_string()
                } else {
                    format!("https://{}", value)
                }
            }
            LinkKind::TikTok => social(value, "https://www.tiktok.com/", "@"),
            LinkKind::Snapchat => social(value, "https://www.snapchat.com/", "add/"),
            LinkKind::Instagram => social(value, "https://www.instagram.com/", ""),
        }
    }
}

/// Handles may be bare, `@`-prefixed or full URLs
fn social(value: &str, root: &str, handle_prefix: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return root.to_string();
    }
    if value.starts_with("http") {
        return value.to_string();
    }
    let username = value.strip_prefix('@').unwrap_or(value);
    format!("{}{}{}", root, handle_prefix, username)
}

/// One card in the contact section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactCard {
    pub field: &'static str,
    pub label: &'static str,
    pub link: Option<LinkKind>,
}

impl ContactCard {
    pub fn value<'a>(&self, contact: &'a Contact) -> &'a str {
        contact.text(self.field).unwrap_or("")
    }

    /// Outbound link, only produced in view mode
    pub fn href(&self, contact: &Contact, view_mode: bool) -> Option<String> {
        if !view_mode {
            return None;
        }
        self.link.map(|kind| kind.href(self.value(contact)))
    }
}

const fn card(field: &'static str, label: &'static str, link: Option<LinkKind>) -> ContactCard {
    ContactCard { field, label, link }
}

/// Main contact grid
pub const CONTACT_CARDS: [ContactCard; 5] = [
    card("email", "Email", Some(LinkKind::Email)),
    card("phone", "Phone (WhatsApp)", Some(LinkKind::WhatsApp)),
    card("website", "Website", Some(LinkKind::Website)),
    card("location", "Location", None),
    card("commercialRegistration", "Commercial registration", None),
];

/// Social channel row
pub const SOCIAL_CARDS: [ContactCard; 3] = [
    card("tiktok", "TikTok", Some(LinkKind::TikTok)),
    card("snapchat", "Snapchat", Some(LinkKind::Snapchat)),
    card("instagram", "Instagram", Some(LinkKind::Instagram)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_links() {
        assert_eq!(LinkKind::Email.href("a@b.co"), "mailto:a@b.co");
        assert_eq!(
            LinkKind::WhatsApp.href("+966 50 123-4567"),
            "https://wa.me/966501234567"
        );
        assert_eq!(LinkKind::Website.href("www.tivro.sa"), "https://www.tivro.sa");
        assert_eq!(
            LinkKind::Website.href("http://tivro.sa"),
            "http://tivro.sa"
        );
    }

    #[test]
    fn test_social_links() {
        assert_eq!(
            LinkKind::TikTok.href("@tivro"),
            "https://www.tiktok.com/@tivro"
        );
        assert_eq!(
            LinkKind::Snapchat.href(" tivro "),
            "https://www.snapchat.com/add/tivro"
        );
        assert_eq!(
            LinkKind::Instagram.href("@tivro"),
            "https://www.instagram.com/tivro"
        );
        assert_eq!(LinkKind::Instagram.href(""), "https://www.instagram.com/");
        assert_eq!(
            LinkKind::TikTok.href("https://tiktok.com/@x"),
            "https://tiktok.com/@x"
        );
    }

    #[test]
    fn test_cards_only_link_in_view_mode() {
        let contact = Contact::default();
        let email = CONTACT_CARDS[0];
        assert_eq!(email.href(&contact, false), None);
        assert_eq!(
            email.href(&contact, true).as_deref(),
            Some("mailto:hello@tivro.sa")
        );
        assert_eq!(CONTACT_CARDS[3].href(&contact, true), None);
    }
}
