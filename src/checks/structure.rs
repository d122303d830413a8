// SPDX-License-Identifier: PMPL-1.0-or-later
//! Semantic structure check - WCAG 1.3.1 Info and Relationships (Level A)
//!
//! Passes when the tree exposes a `<main>` element or any explicit landmark role.

use crate::checks::{AuditContext, Check};
use crate::error::Result;
use crate::finding::AuditFinding;
use crate::rules::{Category, SEMANTIC_STRUCTURE};

/// Landmark roles assistive technology navigates by
const LANDMARK_ROLES: &[&str] = &["main", "navigation", "banner", "contentinfo"];

/// Landmark presence check
pub struct StructureCheck;

impl Check for StructureCheck {
    fn name(&self) -> &str {
        "Semantic Structure"
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>> {
        let has_landmark = ctx.facts()?.iter().any(|f| {
            f.tag == "main"
                || f.role
                    .as_deref()
                    .map(|r| LANDMARK_ROLES.contains(&r))
                    .unwrap_or(false)
        });

        let finding = if has_landmark {
            AuditFinding::pass(&SEMANTIC_STRUCTURE)
        } else {
            AuditFinding::fail(
                &SEMANTIC_STRUCTURE,
                "No <main> element or landmark role (main, navigation, banner, contentinfo) found",
            )
        };
        Ok(vec![finding])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::tree::{Attribute, Element, MemoryTree};

    fn passed(tree: &MemoryTree) -> bool {
        let config = AuditConfig::default();
        let ctx = AuditContext { tree, styles: tree, root: tree.root(), config: &config };
        StructureCheck.evaluate(&ctx).unwrap()[0].passed
    }

    #[test]
    fn test_main_element() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("main"));
        assert!(passed(&tree));
    }

    #[test]
    fn test_landmark_role() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("div").attr(Attribute::Role, "navigation"));
        assert!(passed(&tree));
    }

    #[test]
    fn test_div_soup_fails() {
        let mut tree = MemoryTree::new(Element::new("body"));
        let outer = tree.append(tree.root(), Element::new("div"));
        tree.append(outer, Element::new("div").attr(Attribute::Role, "region"));
        assert!(!passed(&tree));
    }
}
