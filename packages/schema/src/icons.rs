//! Decorative floating icons on the about page.
//!
//! Each slot cycles through a fixed set of icon names; an unset slot shows
//! the first icon of its set.

use crate::document::About;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSlot {
    First,
    Second,
}

impl IconSlot {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(IconSlot::First),
            2 => Some(IconSlot::Second),
            _ => None,
        }
    }

    /// JSON key of the `about` field backing this slot
    pub fn field(&self) -> &'static str {
        match self {
            IconSlot::First => "floatingIcon1",
            IconSlot::Second => "floatingIcon2",
        }
    }

    pub fn cycle(&self) -> &'static [&'static str] {
        match self {
            IconSlot::First => &["lightbulb", "zap", "star"],
            IconSlot::Second => &["rocket", "target", "award"],
        }
    }

    /// Icon currently shown in this slot
    pub fn current<'a>(&self, about: &'a About) -> &'a str {
        let stored = match self {
            IconSlot::First => about.floating_icon1.as_deref(),
            IconSlot::Second => about.floating_icon2.as_deref(),
        };
        stored.filter(|s| !s.is_empty()).unwrap_or(self.cycle()[0])
    }

    /// Icon that follows `current`; unknown names restart the cycle
    pub fn next(&self, current: &str) -> &'static str {
        let icons = self.cycle();
        let next = icons
            .iter()
            .position(|icon| *icon == current)
            .map(|i| (i + 1) % icons.len())
            .unwrap_or(0);
        icons[next]
    }
}
