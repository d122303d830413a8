// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility checks, one per rule category.
//!
//! Each check walks the audited subtree through the capabilities held by an
//! [`AuditContext`] and maps it to findings. A node whose reads fail is
//! skipped; an error returned from [`Check::evaluate`] is turned into a
//! single failing finding by the auditor.

pub mod contrast;
pub mod focus;
pub mod keyboard;
pub mod screen_reader;
pub mod structure;

use crate::config::AuditConfig;
use crate::error::{NodeReadError, Result};
use crate::finding::AuditFinding;
use crate::rules::Category;
use crate::tree::{Attribute, DocumentTree, NodeId, StyleReader};
use tracing::debug;

/// Trait implemented by all checks
pub trait Check: Send + Sync {
    /// Human-readable name of this check
    fn name(&self) -> &str;

    /// Category this check covers
    fn category(&self) -> Category;

    /// Evaluate the check against the audited subtree
    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>>;
}

/// The default battery, in evaluation order
pub fn all_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(contrast::ContrastCheck),
        Box::new(keyboard::KeyboardCheck),
        Box::new(screen_reader::ScreenReaderCheck),
        Box::new(focus::FocusCheck),
        Box::new(structure::StructureCheck),
    ]
}

/// Everything a check may read during one audit pass
pub struct AuditContext<'a> {
    pub tree: &'a dyn DocumentTree,
    pub styles: &'a dyn StyleReader,
    pub root: NodeId,
    pub config: &'a AuditConfig,
}

impl<'a> AuditContext<'a> {
    /// The audited subtree in document order
    pub fn nodes(&self) -> Result<Vec<NodeId>> {
        Ok(self.tree.descendants(self.root)?)
    }

    /// Facts for every readable node of the subtree
    pub fn facts(&self) -> Result<Vec<NodeFacts>> {
        Ok(self
            .nodes()?
            .into_iter()
            .filter_map(|node| readable(node, NodeFacts::read(self.tree, node)))
            .collect())
    }
}

/// Log and drop a failed node read
pub(crate) fn readable<T>(node: NodeId, result: std::result::Result<T, NodeReadError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(%node, error = %e, "Skipping unreadable node");
            None
        }
    }
}

/// Roles that make an element interactive
const INTERACTIVE_ROLES: &[&str] = &[
    "button", "link", "checkbox", "radio", "tab", "menuitem", "switch", "textbox", "combobox",
    "slider", "option",
];

/// Attribute facts read once per node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFacts {
    pub node: NodeId,
    pub tag: String,
    pub id: Option<String>,
    /// First token of the role attribute, lowercased
    pub role: Option<String>,
    /// Parsed tabindex; unparseable values count as absent
    pub tabindex: Option<i32>,
    pub disabled: bool,
    pub has_href: bool,
    /// Lowercased input type
    pub input_type: Option<String>,
    pub has_key_handler: bool,
}

impl NodeFacts {
    pub fn read(tree: &dyn DocumentTree, node: NodeId) -> std::result::Result<Self, NodeReadError> {
        let tag = tree.tag_name(node)?;
        let role = tree
            .attribute(node, Attribute::Role)?
            .and_then(|r| r.split_whitespace().next().map(str::to_ascii_lowercase));
        let tabindex = tree
            .attribute(node, Attribute::Tabindex)?
            .and_then(|t| t.trim().parse::<i32>().ok());
        let has_key_handler = tree.has_attribute(node, Attribute::OnKeyDown)?
            || tree.has_attribute(node, Attribute::OnKeyUp)?
            || tree.has_attribute(node, Attribute::OnKeyPress)?;

        Ok(Self {
            node,
            id: tree.attribute(node, Attribute::Id)?.filter(|id| !id.trim().is_empty()),
            role,
            tabindex,
            disabled: tree.has_attribute(node, Attribute::Disabled)?,
            has_href: tree.has_attribute(node, Attribute::Href)?,
            input_type: tree
                .attribute(node, Attribute::Type)?
                .map(|t| t.trim().to_ascii_lowercase()),
            has_key_handler,
            tag,
        })
    }

    pub fn role_is(&self, role: &str) -> bool {
        self.role.as_deref() == Some(role)
    }

    /// Native button, link or form control
    pub fn is_native_control(&self) -> bool {
        match self.tag.as_str() {
            "button" | "select" | "textarea" => true,
            "a" => self.has_href,
            "input" => self.input_type.as_deref() != Some("hidden"),
            _ => false,
        }
    }

    pub fn has_interactive_role(&self) -> bool {
        self.role
            .as_deref()
            .map(|r| INTERACTIVE_ROLES.contains(&r))
            .unwrap_or(false)
    }

    /// Buttons, links, form controls, explicit tabindex or interactive roles
    pub fn is_interactive(&self) -> bool {
        self.is_native_control() || self.tabindex.is_some() || self.has_interactive_role()
    }

    /// Interactive and not disabled
    pub fn is_focusable(&self) -> bool {
        self.is_interactive() && !self.disabled
    }

    /// Heading level for h1-h6
    pub fn heading_level(&self) -> Option<u8> {
        let level = self.tag.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    /// Short selector-like label, e.g. `button#save` or `div[role=button]`
    pub fn describe(&self) -> String {
        match (&self.id, &self.role) {
            (Some(id), _) => format!("{}#{}", self.tag, id),
            (None, Some(role)) => format!("{}[role={}]", self.tag, role),
            (None, None) => self.tag.clone(),
        }
    }
}

/// Maximum number of elements named in a subject
const SUBJECT_LIMIT: usize = 5;

/// Join element labels for a finding subject, capping the list
pub(crate) fn subject_list(labels: &[String]) -> String {
    if labels.len() <= SUBJECT_LIMIT {
        labels.join(", ")
    } else {
        format!(
            "{} and {} more",
            labels[..SUBJECT_LIMIT].join(", "),
            labels.len() - SUBJECT_LIMIT
        )
    }
}
