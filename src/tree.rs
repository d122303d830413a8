// SPDX-License-Identifier: PMPL-1.0-or-later
//! UI-tree capabilities consumed by the auditor.
//!
//! The auditor never touches a host tree directly. It reads structure
//! through [`UiTree`], attributes through [`AttributeReader`] and computed
//! styles through [`StyleReader`]. Every read returns a `Result` so a node
//! that disappears mid-audit can be skipped instead of aborting the pass.
//!
//! [`MemoryTree`] is an owned, in-memory implementation of all three. It is
//! what the HTML adapter produces and what tests build by hand.

use crate::error::NodeReadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to a node of a host tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Attributes the auditor knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Role,
    AriaLabel,
    AriaLabelledby,
    Alt,
    Tabindex,
    Disabled,
    For,
    Id,
    Href,
    Type,
    Value,
    OnKeyDown,
    OnKeyUp,
    OnKeyPress,
}

impl Attribute {
    pub const ALL: [Attribute; 14] = [
        Attribute::Role,
        Attribute::AriaLabel,
        Attribute::AriaLabelledby,
        Attribute::Alt,
        Attribute::Tabindex,
        Attribute::Disabled,
        Attribute::For,
        Attribute::Id,
        Attribute::Href,
        Attribute::Type,
        Attribute::Value,
        Attribute::OnKeyDown,
        Attribute::OnKeyUp,
        Attribute::OnKeyPress,
    ];

    /// Markup name of the attribute
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Role => "role",
            Attribute::AriaLabel => "aria-label",
            Attribute::AriaLabelledby => "aria-labelledby",
            Attribute::Alt => "alt",
            Attribute::Tabindex => "tabindex",
            Attribute::Disabled => "disabled",
            Attribute::For => "for",
            Attribute::Id => "id",
            Attribute::Href => "href",
            Attribute::Type => "type",
            Attribute::Value => "value",
            Attribute::OnKeyDown => "onkeydown",
            Attribute::OnKeyUp => "onkeyup",
            Attribute::OnKeyPress => "onkeypress",
        }
    }

    /// Map a markup attribute name (case-insensitive) to a known attribute
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let canonical = match lower.as_str() {
            // JSX spelling
            "htmlfor" => "for",
            other => other,
        };
        Self::ALL.into_iter().find(|a| a.name() == canonical)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved style facts for one node, as CSS value strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub color: String,
    pub background_color: String,
    pub outline: String,
    pub box_shadow: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: "rgb(0, 0, 0)".to_string(),
            background_color: "rgba(0, 0, 0, 0)".to_string(),
            outline: "none".to_string(),
            box_shadow: "none".to_string(),
        }
    }
}

impl ComputedStyle {
    /// Whether outline or box-shadow paints something
    pub fn has_visible_focus_indicator(&self) -> bool {
        paints_indicator(&self.outline) || paints_indicator(&self.box_shadow)
    }
}

fn paints_indicator(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    if lower.is_empty() || lower == "0" || lower == "0px" {
        return false;
    }
    !lower.split_whitespace().any(|t| t == "none" || t == "hidden")
}

/// Structural access to a host tree
pub trait UiTree {
    /// The subtree rooted at `root` in document order, root first
    fn descendants(&self, root: NodeId) -> Result<Vec<NodeId>, NodeReadError>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Lowercase tag name
    fn tag_name(&self, node: NodeId) -> Result<String, NodeReadError>;

    /// All text within the node, descendants included
    fn text_content(&self, node: NodeId) -> Result<String, NodeReadError>;

    /// Text held directly by the node, excluding child elements
    fn own_text(&self, node: NodeId) -> Result<String, NodeReadError>;

    /// Ancestors from the parent upwards
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        std::iter::successors(self.parent(node), |n| self.parent(*n)).collect()
    }
}

/// Typed attribute access
pub trait AttributeReader {
    fn attribute(&self, node: NodeId, attr: Attribute) -> Result<Option<String>, NodeReadError>;

    fn has_attribute(&self, node: NodeId, attr: Attribute) -> Result<bool, NodeReadError> {
        Ok(self.attribute(node, attr)?.is_some())
    }
}

/// Computed style access
pub trait StyleReader {
    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError>;

    /// Style while the node has keyboard focus
    fn focused_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError> {
        self.computed_style(node)
    }
}

/// Structure plus attributes; what the checks walk
pub trait DocumentTree: UiTree + AttributeReader {}

impl<T: UiTree + AttributeReader + ?Sized> DocumentTree for T {}

/// Element description used to build a [`MemoryTree`]
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<Attribute, String>,
    pub text: String,
    pub style: ComputedStyle,
    pub focus_style: Option<ComputedStyle>,
    pub detached: bool,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            text: String::new(),
            style: ComputedStyle::default(),
            focus_style: None,
            detached: false,
        }
    }

    pub fn attr(mut self, attr: Attribute, value: &str) -> Self {
        self.attributes.insert(attr, value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    /// Set text and background colors
    pub fn colors(mut self, color: &str, background: &str) -> Self {
        self.style.color = color.to_string();
        self.style.background_color = background.to_string();
        self
    }

    pub fn focus_style(mut self, style: ComputedStyle) -> Self {
        self.focus_style = Some(style);
        self
    }

    /// Every read against this node fails, as if it left the host tree after enumeration
    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Owned in-memory UI tree
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<MemoryNode>,
}

impl MemoryTree {
    /// Create a tree holding only `root`
    pub fn new(root: Element) -> Self {
        Self {
            nodes: vec![MemoryNode { element: root, parent: None, children: Vec::new() }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(MemoryNode { element, parent: Some(parent), children: Vec::new() });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).map(|n| &n.element)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn readable(&self, node: NodeId) -> Result<&Element, NodeReadError> {
        let element = self.element(node).ok_or(NodeReadError::UnknownNode(node))?;
        if element.detached {
            return Err(NodeReadError::Detached(node));
        }
        Ok(element)
    }
}

impl UiTree for MemoryTree {
    fn descendants(&self, root: NodeId) -> Result<Vec<NodeId>, NodeReadError> {
        if root.0 >= self.nodes.len() {
            return Err(NodeReadError::UnknownNode(root));
        }
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        Ok(order)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn tag_name(&self, node: NodeId) -> Result<String, NodeReadError> {
        Ok(self.readable(node)?.tag.clone())
    }

    fn text_content(&self, node: NodeId) -> Result<String, NodeReadError> {
        self.readable(node)?;
        let text = self
            .descendants(node)?
            .into_iter()
            .filter_map(|n| self.readable(n).ok())
            .map(|e| e.text.as_str())
            .collect::<String>();
        Ok(text)
    }

    fn own_text(&self, node: NodeId) -> Result<String, NodeReadError> {
        Ok(self.readable(node)?.text.clone())
    }
}

impl AttributeReader for MemoryTree {
    fn attribute(&self, node: NodeId, attr: Attribute) -> Result<Option<String>, NodeReadError> {
        Ok(self.readable(node)?.attributes.get(&attr).cloned())
    }
}

impl StyleReader for MemoryTree {
    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError> {
        Ok(self.readable(node)?.style.clone())
    }

    fn focused_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError> {
        let element = self.readable(node)?;
        Ok(element.focus_style.clone().unwrap_or_else(|| element.style.clone()))
    }
}
