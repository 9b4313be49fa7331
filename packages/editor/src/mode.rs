//! Edit/view mode, chosen once from the address the profile was opened with.

use std::fmt;

/// Page that always opens read-only
pub const VIEW_PAGE: &str = "tivro-profile-view.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Edit,
    View,
}

impl EditMode {
    /// Select the mode from an address such as `/profile?mode=view` or
    /// `/tivro-profile-view.html`. Anything else edits.
    pub fn from_address(address: &str) -> Self {
        let without_fragment = address.split('#').next().unwrap_or("");
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        let view_query = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .any(|(key, value)| key == "mode" && value == "view");

        if view_query || path.contains(VIEW_PAGE) {
            EditMode::View
        } else {
            EditMode::Edit
        }
    }

    pub fn is_view(&self) -> bool {
        matches!(self, EditMode::View)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Edit => f.write_str("edit"),
            EditMode::View => f.write_str("view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parameter_selects_view() {
        assert_eq!(EditMode::from_address("/?mode=view"), EditMode::View);
        assert_eq!(
            EditMode::from_address("https://example.com/index.html?lang=ar&mode=view#contact"),
            EditMode::View
        );
        assert_eq!(EditMode::from_address("/?mode=edit"), EditMode::Edit);
    }

    #[test]
    fn test_view_page_selects_view() {
        assert_eq!(
            EditMode::from_address("/share/tivro-profile-view.html"),
            EditMode::View
        );
    }

    #[test]
    fn test_default_is_edit() {
        assert_eq!(EditMode::from_address(""), EditMode::Edit);
        assert_eq!(EditMode::from_address("/index.html#mode=view"), EditMode::Edit);
        assert_eq!(EditMode::default(), EditMode::Edit);
    }
}
