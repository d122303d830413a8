// SPDX-License-Identifier: PMPL-1.0-or-later
//! Focus management check - WCAG 2.4.7 Focus Visible (Level AA), 2.4.3 Focus Order (Level A)
//!
//! Bundles two properties into one finding:
//! - every focusable element paints an outline or box-shadow while focused
//! - positive tabindex values never decrease in document order (tabindex 0
//!   follows natural order and takes no part in the comparison)

use crate::checks::{readable, subject_list, AuditContext, Check, NodeFacts};
use crate::error::Result;
use crate::finding::AuditFinding;
use crate::rules::{Category, FOCUS_MANAGEMENT};

/// Focus visibility and ordering check
pub struct FocusCheck;

impl Check for FocusCheck {
    fn name(&self) -> &str {
        "Focus Management"
    }

    fn category(&self) -> Category {
        Category::Focus
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>> {
        let facts = ctx.facts()?;

        let invisible: Vec<String> = facts
            .iter()
            .filter(|f| f.is_focusable())
            .filter(|f| {
                readable(f.node, ctx.styles.focused_style(f.node))
                    .map(|style| !style.has_visible_focus_indicator())
                    .unwrap_or(false)
            })
            .map(NodeFacts::describe)
            .collect();

        let order_breaks = tab_order_breaks(&facts);

        let mut problems = Vec::new();
        if !invisible.is_empty() {
            problems.push(format!(
                "{} focusable element(s) have no visible focus indicator",
                invisible.len()
            ));
        }
        problems.extend(order_breaks.iter().map(|(_, msg)| msg.clone()));

        if problems.is_empty() {
            return Ok(vec![AuditFinding::pass(&FOCUS_MANAGEMENT)]);
        }

        let subjects: Vec<String> = invisible
            .into_iter()
            .chain(order_breaks.into_iter().map(|(subject, _)| subject))
            .collect();

        Ok(vec![AuditFinding::fail(&FOCUS_MANAGEMENT, &problems.join("; "))
            .with_subject(&subject_list(&subjects))])
    }
}

/// Elements whose positive tabindex is lower than the one before them
fn tab_order_breaks(facts: &[NodeFacts]) -> Vec<(String, String)> {
    let positive: Vec<(&NodeFacts, i32)> = facts
        .iter()
        .filter_map(|f| f.tabindex.filter(|t| *t > 0).map(|t| (f, t)))
        .collect();

    positive
        .windows(2)
        .filter(|w| w[1].1 < w[0].1)
        .map(|w| {
            let subject = w[1].0.describe();
            let msg = format!(
                "{} has tabindex=\"{}\" after tabindex=\"{}\"",
                subject, w[1].1, w[0].1
            );
            (subject, msg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::tree::{Attribute, ComputedStyle, Element, MemoryTree};

    fn ring() -> ComputedStyle {
        ComputedStyle { outline: "2px solid #005fcc".to_string(), ..ComputedStyle::default() }
    }

    fn evaluate(tree: &MemoryTree) -> AuditFinding {
        let config = AuditConfig::default();
        let ctx = AuditContext { tree, styles: tree, root: tree.root(), config: &config };
        let mut findings = FocusCheck.evaluate(&ctx).unwrap();
        assert_eq!(findings.len(), 1);
        findings.remove(0)
    }

    #[test]
    fn test_visible_focus_passes() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("button").text("OK").focus_style(ring()));
        let shadow = ComputedStyle { box_shadow: "0 0 0 3px rgba(0, 95, 204, 0.5)".to_string(), ..ComputedStyle::default() };
        tree.append(tree.root(), Element::new("a").attr(Attribute::Href, "/").focus_style(shadow));
        assert!(evaluate(&tree).passed);
    }

    #[test]
    fn test_suppressed_focus_fails() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("button").attr(Attribute::Id, "go"));
        let finding = evaluate(&tree);
        assert!(!finding.passed);
        assert_eq!(finding.subject.as_deref(), Some("button#go"));
    }

    #[test]
    fn test_disabled_controls_ignored() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("button").attr(Attribute::Disabled, "disabled"));
        assert!(evaluate(&tree).passed);
    }

    #[test]
    fn test_tab_order() {
        let mut tree = MemoryTree::new(Element::new("body"));
        for t in ["1", "0", "2", "2", "-1"] {
            tree.append(tree.root(), Element::new("div").attr(Attribute::Tabindex, t).focus_style(ring()));
        }
        assert!(evaluate(&tree).passed);

        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("input").attr(Attribute::Tabindex, "3").focus_style(ring()));
        tree.append(
            tree.root(),
            Element::new("input").attr(Attribute::Id, "first").attr(Attribute::Tabindex, "1").focus_style(ring()),
        );
        let finding = evaluate(&tree);
        assert!(!finding.passed);
        assert!(finding.issue.unwrap().contains("input#first has tabindex=\"1\" after tabindex=\"3\""));
    }
}
