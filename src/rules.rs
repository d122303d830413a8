// SPDX-License-Identifier: PMPL-1.0-or-later
//! Static rule catalog.
//!
//! Every finding the auditor emits references one of these rules, except
//! the single failure finding produced when a whole category could not be
//! evaluated (which carries the category slug instead).

use serde::{Deserialize, Serialize};
use std::fmt;

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Rule category; each one is evaluated as an isolated check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Color,
    Keyboard,
    ScreenReader,
    Focus,
    Structure,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Color,
        Category::Keyboard,
        Category::ScreenReader,
        Category::Focus,
        Category::Structure,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Keyboard => "keyboard",
            Category::ScreenReader => "screen-reader",
            Category::Focus => "focus",
            Category::Structure => "structure",
        }
    }

    /// Lowest conformance level among this category's rules
    pub fn base_level(&self) -> WcagLevel {
        for_category(*self)
            .map(|r| r.level)
            .min()
            .unwrap_or(WcagLevel::A)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A named, leveled, categorized check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub level: WcagLevel,
    pub category: Category,
    /// WCAG success criterion, e.g. "1.4.3"
    pub criterion: &'static str,
    /// Remediation text used when the rule fails
    pub suggestion: &'static str,
}

pub const COLOR_CONTRAST: Rule = Rule {
    id: "color-contrast",
    name: "Contrast (Minimum)",
    description: "Text and background colors have sufficient contrast",
    level: WcagLevel::AA,
    category: Category::Color,
    criterion: "1.4.3",
    suggestion: "Increase the contrast between text color and background color to at least 4.5:1",
};

pub const KEYBOARD_NAVIGATION: Rule = Rule {
    id: "keyboard-navigation",
    name: "Keyboard",
    description: "All interactive elements are reachable and operable from the keyboard",
    level: WcagLevel::A,
    category: Category::Keyboard,
    criterion: "2.1.1",
    suggestion: "Remove tabindex=\"-1\" from enabled controls and use native <button> elements or add keyboard handlers to custom role=\"button\" elements",
};

pub const ACCESSIBLE_LABELS: Rule = Rule {
    id: "accessible-labels",
    name: "Name, Role, Value",
    description: "Buttons, controls and form inputs have an accessible name",
    level: WcagLevel::A,
    category: Category::ScreenReader,
    criterion: "4.1.2",
    suggestion: "Give every control an accessible name with a <label>, aria-label, aria-labelledby or visible text",
};

pub const IMAGE_ALT_TEXT: Rule = Rule {
    id: "image-alt-text",
    name: "Non-text Content",
    description: "Images have alternative text or are marked decorative",
    level: WcagLevel::A,
    category: Category::ScreenReader,
    criterion: "1.1.1",
    suggestion: "Add alt=\"description\" to informative images or role=\"presentation\" to decorative ones",
};

pub const HEADING_STRUCTURE: Rule = Rule {
    id: "heading-structure",
    name: "Info and Relationships: Headings",
    description: "Heading levels do not skip when descending",
    level: WcagLevel::A,
    category: Category::ScreenReader,
    criterion: "1.3.1",
    suggestion: "Do not skip heading levels; follow an <h1> with <h2> before using <h3>",
};

pub const FOCUS_MANAGEMENT: Rule = Rule {
    id: "focus-management",
    name: "Focus Visible",
    description: "Focusable elements show a visible focus indicator and follow a logical tab order",
    level: WcagLevel::AA,
    category: Category::Focus,
    criterion: "2.4.7",
    suggestion: "Provide a visible :focus style (outline or box-shadow) and keep positive tabindex values in document order",
};

pub const SEMANTIC_STRUCTURE: Rule = Rule {
    id: "semantic-structure",
    name: "Info and Relationships: Landmarks",
    description: "The page exposes a main content landmark or explicit landmark roles",
    level: WcagLevel::A,
    category: Category::Structure,
    criterion: "1.3.1",
    suggestion: "Wrap the primary content in <main> or add landmark roles (main, navigation, banner, contentinfo)",
};

/// The full catalog in evaluation order
pub const RULES: &[Rule] = &[
    COLOR_CONTRAST,
    KEYBOARD_NAVIGATION,
    ACCESSIBLE_LABELS,
    IMAGE_ALT_TEXT,
    HEADING_STRUCTURE,
    FOCUS_MANAGEMENT,
    SEMANTIC_STRUCTURE,
];

/// Rules belonging to a category
pub fn for_category(category: Category) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |r| r.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_ids_unique() {
        let ids: HashSet<_> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RULES.len());
    }

    #[test]
    fn test_every_category_has_rules() {
        for category in Category::ALL {
            assert!(for_category(category).next().is_some(), "{} has no rules", category);
        }
        assert_eq!(for_category(Category::ScreenReader).count(), 3);
    }

    #[test]
    fn test_base_level() {
        assert_eq!(Category::Color.base_level(), WcagLevel::AA);
        assert_eq!(Category::ScreenReader.base_level(), WcagLevel::A);
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(serde_json::to_string(&Category::ScreenReader).unwrap(), "\"screen-reader\"");
    }
}
