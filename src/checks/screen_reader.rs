// SPDX-License-Identifier: PMPL-1.0-or-later
//! Screen-reader support checks
//!
//! Three findings per audit:
//! - Labels (4.1.2): every control has a non-empty accessible name
//! - Alt text (1.1.1): every `<img>` has `alt` unless marked decorative
//! - Heading structure (1.3.1): heading levels never skip when descending

use crate::checks::{readable, subject_list, AuditContext, Check, NodeFacts};
use crate::error::{NodeReadError, Result};
use crate::finding::AuditFinding;
use crate::rules::{Category, ACCESSIBLE_LABELS, HEADING_STRUCTURE, IMAGE_ALT_TEXT};
use crate::tree::{Attribute, DocumentTree, NodeId};
use std::collections::HashSet;

/// Roles whose accessible name may come from their text content
const NAME_FROM_CONTENT_ROLES: &[&str] = &[
    "button", "link", "tab", "menuitem", "option", "switch", "checkbox", "radio",
];

/// Roles that mark an image as decorative
const DECORATIVE_ROLES: &[&str] = &["presentation", "none"];

/// Screen-reader support check
pub struct ScreenReaderCheck;

impl Check for ScreenReaderCheck {
    fn name(&self) -> &str {
        "Screen Reader Support"
    }

    fn category(&self) -> Category {
        Category::ScreenReader
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>> {
        let facts = ctx.facts()?;
        Ok(vec![
            check_labels(ctx.tree, &facts),
            check_alt_text(ctx.tree, &facts),
            check_headings(&facts),
        ])
    }
}

fn check_labels(tree: &dyn DocumentTree, facts: &[NodeFacts]) -> AuditFinding {
    let labelled_ids = labelled_ids(tree, facts);

    let unnamed: Vec<String> = facts
        .iter()
        .filter(|f| needs_name(f))
        .filter(|f| !readable(f.node, has_accessible_name(tree, f, &labelled_ids)).unwrap_or(true))
        .map(NodeFacts::describe)
        .collect();

    if unnamed.is_empty() {
        return AuditFinding::pass(&ACCESSIBLE_LABELS);
    }

    AuditFinding::fail(
        &ACCESSIBLE_LABELS,
        &format!("{} control(s) have no accessible name", unnamed.len()),
    )
    .with_subject(&subject_list(&unnamed))
}

/// Controls and inputs that must expose a name
fn needs_name(facts: &NodeFacts) -> bool {
    facts.is_native_control() || facts.has_interactive_role()
}

/// Ids referenced by a `<label for>` with visible text
fn labelled_ids(tree: &dyn DocumentTree, facts: &[NodeFacts]) -> HashSet<String> {
    facts
        .iter()
        .filter(|f| f.tag == "label")
        .filter_map(|f| {
            let target = readable(f.node, tree.attribute(f.node, Attribute::For))??;
            let text = readable(f.node, tree.text_content(f.node))?;
            (!text.trim().is_empty()).then(|| target.trim().to_string())
        })
        .collect()
}

fn non_empty(value: Option<String>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

fn has_accessible_name(
    tree: &dyn DocumentTree,
    facts: &NodeFacts,
    labelled_ids: &HashSet<String>,
) -> std::result::Result<bool, NodeReadError> {
    let node = facts.node;

    if non_empty(tree.attribute(node, Attribute::AriaLabel)?)
        || non_empty(tree.attribute(node, Attribute::AriaLabelledby)?)
    {
        return Ok(true);
    }

    if let Some(id) = &facts.id {
        if labelled_ids.contains(id.trim()) {
            return Ok(true);
        }
    }

    if wrapped_in_label(tree, node) {
        return Ok(true);
    }

    if facts.tag == "input" {
        match facts.input_type.as_deref() {
            // browsers supply "Submit" and "Reset"
            Some("submit") | Some("reset") => return Ok(true),
            Some("button") => return Ok(non_empty(tree.attribute(node, Attribute::Value)?)),
            Some("image") => return Ok(non_empty(tree.attribute(node, Attribute::Alt)?)),
            _ => {}
        }
    }

    let name_from_content = matches!(facts.tag.as_str(), "button" | "a")
        || facts
            .role
            .as_deref()
            .map(|r| NAME_FROM_CONTENT_ROLES.contains(&r))
            .unwrap_or(false);
    if name_from_content {
        return content_name(tree, node);
    }

    Ok(false)
}

/// A `<label>` ancestor with visible text
fn wrapped_in_label(tree: &dyn DocumentTree, node: NodeId) -> bool {
    tree.ancestors(node).into_iter().any(|a| {
        tree.tag_name(a).map(|t| t == "label").unwrap_or(false)
            && tree.text_content(a).map(|t| !t.trim().is_empty()).unwrap_or(false)
    })
}

/// Text content, or the alt text of a contained image
fn content_name(tree: &dyn DocumentTree, node: NodeId) -> std::result::Result<bool, NodeReadError> {
    if !tree.text_content(node)?.trim().is_empty() {
        return Ok(true);
    }
    let image_alt = tree.descendants(node)?.into_iter().skip(1).any(|n| {
        tree.tag_name(n).map(|t| t == "img").unwrap_or(false)
            && tree.attribute(n, Attribute::Alt).map(non_empty).unwrap_or(false)
    });
    Ok(image_alt)
}

fn check_alt_text(tree: &dyn DocumentTree, facts: &[NodeFacts]) -> AuditFinding {
    let missing: Vec<String> = facts
        .iter()
        .filter(|f| f.tag == "img")
        .filter(|f| !f.role.as_deref().map(|r| DECORATIVE_ROLES.contains(&r)).unwrap_or(false))
        .filter(|f| {
            readable(f.node, tree.has_attribute(f.node, Attribute::Alt))
                .map(|has_alt| !has_alt)
                .unwrap_or(false)
        })
        .map(NodeFacts::describe)
        .collect();

    if missing.is_empty() {
        return AuditFinding::pass(&IMAGE_ALT_TEXT);
    }

    AuditFinding::fail(
        &IMAGE_ALT_TEXT,
        &format!("{} image(s) are missing an alt attribute", missing.len()),
    )
    .with_subject(&subject_list(&missing))
}

fn check_headings(facts: &[NodeFacts]) -> AuditFinding {
    let levels: Vec<u8> = facts.iter().filter_map(NodeFacts::heading_level).collect();
    let skips: Vec<String> = levels
        .windows(2)
        .filter(|w| w[1] > w[0] + 1)
        .map(|w| format!("h{} followed by h{}", w[0], w[1]))
        .collect();

    if skips.is_empty() {
        return AuditFinding::pass(&HEADING_STRUCTURE);
    }

    AuditFinding::fail(
        &HEADING_STRUCTURE,
        &format!("Heading levels skipped: {}", skips.join(", ")),
    )
}
