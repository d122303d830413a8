// SPDX-License-Identifier: PMPL-1.0-or-later
//! Keyboard navigation check - WCAG 2.1.1 Keyboard (Level A)
//!
//! One aggregate finding for the whole interactive set. It fails when an
//! enabled control is pulled out of the tab order with `tabindex="-1"`, or
//! when a non-native element claims `role="button"` without any key event
//! handler attribute.

use crate::checks::{subject_list, AuditContext, Check, NodeFacts};
use crate::error::Result;
use crate::finding::AuditFinding;
use crate::rules::{Category, KEYBOARD_NAVIGATION};

/// Keyboard reachability check
pub struct KeyboardCheck;

impl Check for KeyboardCheck {
    fn name(&self) -> &str {
        "Keyboard Navigation"
    }

    fn category(&self) -> Category {
        Category::Keyboard
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>> {
        let facts = ctx.facts()?;
        let interactive: Vec<&NodeFacts> = facts.iter().filter(|f| f.is_interactive()).collect();
        let problems: Vec<(String, String)> = interactive
            .iter()
            .filter_map(|f| keyboard_problem(f).map(|p| (f.describe(), p)))
            .collect();

        if problems.is_empty() {
            return Ok(vec![AuditFinding::pass(&KEYBOARD_NAVIGATION)]);
        }

        let subjects: Vec<String> = problems.iter().map(|(s, _)| s.clone()).collect();
        let issue = format!(
            "{} of {} interactive element(s) are not keyboard accessible: {}",
            problems.len(),
            interactive.len(),
            problems.iter().map(|(_, p)| p.as_str()).collect::<Vec<_>>().join("; ")
        );

        Ok(vec![AuditFinding::fail(&KEYBOARD_NAVIGATION, &issue).with_subject(&subject_list(&subjects))])
    }
}

/// Why an interactive element cannot be used from the keyboard, if it cannot
fn keyboard_problem(facts: &NodeFacts) -> Option<String> {
    if facts.tabindex == Some(-1) && !facts.disabled {
        return Some(format!(
            "{} has tabindex=\"-1\" and cannot be reached with Tab",
            facts.describe()
        ));
    }

    // A native button or anchor is operable regardless of handlers. For custom
    // buttons only the presence of a key handler attribute is checked.
    let native = matches!(facts.tag.as_str(), "button" | "a");
    if facts.role_is("button") && !native && !facts.has_key_handler {
        return Some(format!(
            "{} has role=\"button\" but no keyboard event handler",
            facts.describe()
        ));
    }

    None
}
