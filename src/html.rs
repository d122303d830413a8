// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML host adapter.
//!
//! Parses a document with `scraper` and flattens its element tree into a
//! [`MemoryTree`], rooted at `<html>`. Computed styles come from a small
//! cascade over `<style>` blocks and inline `style` attributes:
//! - rules apply in source order, specificity is not modelled
//! - `color` inherits from the parent, the other properties do not
//! - `:focus` and `:focus-visible` rules only feed the focused style
//! - the focused style starts from the user-agent `outline: auto`
//!
//! Content of `<head>`, `<script>`, `<style>`, `<template>` and `<noscript>`
//! is not part of the audited tree.

use crate::contrast::parse_color;
use crate::error::NodeReadError;
use crate::tree::{
    Attribute, AttributeReader, ComputedStyle, Element, MemoryTree, NodeId, StyleReader, UiTree,
};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::debug;

/// Elements whose subtrees never render as content
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Suffixes marking a rule as focus-only; longest first
const FOCUS_PSEUDO_CLASSES: &[&str] = &[":focus-visible", ":focus"];

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"))
}

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").expect("valid regex"))
}

/// One `selector { declarations }` rule
struct StyleRule {
    selector: Selector,
    declarations: Vec<(String, String)>,
    focus: bool,
}

/// A parsed HTML document exposing all three tree capabilities
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    tree: MemoryTree,
}

impl HtmlDocument {
    /// Parse markup. Parsing is lenient; malformed markup still yields a tree.
    pub fn parse(content: &str) -> Self {
        let document = Html::parse_document(content);
        let rules = collect_rules(&document);
        debug!(rules = rules.len(), "Collected stylesheet rules");

        let root_el = document.root_element();
        let root_style = resolve_styles(root_el, &rules, None);
        let mut tree = MemoryTree::new(to_element(root_el, root_style));
        let root = tree.root();
        append_subtree(&mut tree, root, root_el, &rules);

        Self { tree }
    }

    /// The `<html>` element
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

}

impl UiTree for HtmlDocument {
    fn descendants(&self, root: NodeId) -> Result<Vec<NodeId>, NodeReadError> {
        self.tree.descendants(root)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    fn tag_name(&self, node: NodeId) -> Result<String, NodeReadError> {
        self.tree.tag_name(node)
    }

    fn text_content(&self, node: NodeId) -> Result<String, NodeReadError> {
        self.tree.text_content(node)
    }

    fn own_text(&self, node: NodeId) -> Result<String, NodeReadError> {
        self.tree.own_text(node)
    }
}

impl AttributeReader for HtmlDocument {
    fn attribute(&self, node: NodeId, attr: Attribute) -> Result<Option<String>, NodeReadError> {
        self.tree.attribute(node, attr)
    }
}

impl StyleReader for HtmlDocument {
    fn computed_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError> {
        self.tree.computed_style(node)
    }

    fn focused_style(&self, node: NodeId) -> Result<ComputedStyle, NodeReadError> {
        self.tree.focused_style(node)
    }
}

/// Flatten the children of `root_el` under `root` in document order.
///
/// Iterative; nesting depth never grows the call stack.
fn append_subtree(tree: &mut MemoryTree, root: NodeId, root_el: ElementRef<'_>, rules: &[StyleRule]) {
    let root_color = tree
        .element(root)
        .map(|e| e.style.color.clone())
        .unwrap_or_else(|| ComputedStyle::default().color);

    let mut stack: Vec<(NodeId, ElementRef<'_>, String)> = Vec::new();
    push_children(&mut stack, root, root_el, &root_color);

    while let Some((parent, el, inherited)) = stack.pop() {
        let styles = resolve_styles(el, rules, Some(&inherited));
        let color = styles.0.color.clone();
        let id = tree.append(parent, to_element(el, styles));
        push_children(&mut stack, id, el, &color);
    }
}

/// Queue rendered element children, reversed so they pop in document order
fn push_children<'a>(
    stack: &mut Vec<(NodeId, ElementRef<'a>, String)>,
    parent: NodeId,
    parent_el: ElementRef<'a>,
    inherited: &str,
) {
    let children: Vec<ElementRef<'a>> = parent_el
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| !SKIPPED_ELEMENTS.contains(&child.value().name()))
        .collect();
    stack.extend(children.into_iter().rev().map(|child| (parent, child, inherited.to_string())));
}

fn to_element(el: ElementRef<'_>, (style, focus_style): (ComputedStyle, ComputedStyle)) -> Element {
    let mut element = Element::new(el.value().name())
        .text(&own_text(el))
        .style(style)
        .focus_style(focus_style);

    for (name, value) in el.value().attrs() {
        if let Some(attr) = Attribute::from_name(name) {
            element = element.attr(attr, value);
        }
    }
    element
}

/// Text nodes that are direct children of `el`
fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|n| n.value().as_text().map(|t| String::from(&**t)))
        .collect()
}

fn collect_rules(document: &Html) -> Vec<StyleRule> {
    let Ok(style_selector) = Selector::parse("style") else {
        return Vec::new();
    };

    document
        .select(&style_selector)
        .flat_map(|el| parse_stylesheet(&el.text().collect::<String>()))
        .collect()
}

fn parse_stylesheet(css: &str) -> Vec<StyleRule> {
    let css = comment_re().replace_all(css, "");
    let mut rules = Vec::new();

    for caps in block_re().captures_iter(&css) {
        let declarations = parse_declarations(&caps[2]);
        if declarations.is_empty() {
            continue;
        }

        for raw in caps[1].split(',') {
            let (text, focus) = strip_focus(raw.trim());
            let parsed = Selector::parse(&text);
            match parsed {
                Ok(selector) => rules.push(StyleRule {
                    selector,
                    declarations: declarations.clone(),
                    focus,
                }),
                Err(_) => debug!(selector = raw.trim(), "Skipping unsupported selector"),
            };
        }
    }

    rules
}

/// Split a trailing focus pseudo-class off a selector
fn strip_focus(selector: &str) -> (String, bool) {
    for pseudo in FOCUS_PSEUDO_CLASSES {
        if let Some(base) = selector.strip_suffix(pseudo) {
            let base = base.trim();
            let base = if base.is_empty() { "*" } else { base };
            return (base.to_string(), true);
        }
    }
    (selector.to_string(), false)
}

/// `prop: value; ...` into lowercase property names and trimmed values
fn parse_declarations(block: &str) -> Vec<(String, String)> {
    block
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let value = strip_important(value.trim());
            if value.is_empty() {
                return None;
            }
            Some((prop.trim().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lower = value.to_ascii_lowercase();
    match lower.rfind("!important") {
        Some(idx) => value[..idx].trim(),
        None => value,
    }
}

/// Resolve the base and focused style of one element
fn resolve_styles(
    el: ElementRef<'_>,
    rules: &[StyleRule],
    inherited_color: Option<&str>,
) -> (ComputedStyle, ComputedStyle) {
    let inherited = inherited_color
        .map(str::to_string)
        .unwrap_or_else(|| ComputedStyle::default().color);

    let mut base = ComputedStyle { color: inherited.clone(), ..ComputedStyle::default() };
    let mut focused = ComputedStyle {
        color: inherited.clone(),
        outline: "auto".to_string(),
        ..ComputedStyle::default()
    };

    let matching: Vec<&StyleRule> = rules.iter().filter(|r| r.selector.matches(&el)).collect();

    for rule in matching.iter().filter(|r| !r.focus) {
        apply(&mut base, &rule.declarations, &inherited);
        apply(&mut focused, &rule.declarations, &inherited);
    }
    for rule in matching.iter().filter(|r| r.focus) {
        apply(&mut focused, &rule.declarations, &inherited);
    }

    if let Some(inline) = el.value().attr("style") {
        let declarations = parse_declarations(inline);
        apply(&mut base, &declarations, &inherited);
        apply(&mut focused, &declarations, &inherited);
    }

    (base, focused)
}

fn apply(style: &mut ComputedStyle, declarations: &[(String, String)], inherited_color: &str) {
    for (prop, value) in declarations {
        match prop.as_str() {
            "color" => {
                style.color = if value.eq_ignore_ascii_case("inherit") {
                    inherited_color.to_string()
                } else {
                    value.clone()
                };
            }
            "background-color" => style.background_color = value.clone(),
            "background" => {
                if let Some(color) = background_color(value) {
                    style.background_color = color;
                }
            }
            "outline" | "outline-style" => style.outline = value.clone(),
            "box-shadow" => style.box_shadow = value.clone(),
            _ => {}
        }
    }
}

/// Color component of a `background` shorthand
fn background_color(value: &str) -> Option<String> {
    if parse_color(value).is_ok() {
        return Some(value.to_string());
    }
    // rgb() tokens contain spaces; scan whitespace tokens outside of them
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                let token = value[start..i].trim();
                if !token.is_empty() && parse_color(token).is_ok() {
                    return Some(token.to_string());
                }
                start = i;
            }
            _ => {}
        }
    }
    let last = value[start..].trim();
    parse_color(last).is_ok().then(|| last.to_string())
}
