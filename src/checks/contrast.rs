// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast check - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Collects the unique foreground/background pairs painted behind text and
//! evaluates each one. Pairs with a fully transparent background take their
//! backdrop from an ancestor and are left out. Fully transparent text paints
//! nothing and is left out too, as are colors that do not parse.

use crate::checks::{readable, AuditContext, Check};
use crate::contrast::{meets_threshold, parse_color, ColorSample, ContrastResult};
use crate::error::Result;
use crate::finding::AuditFinding;
use crate::rules::{Category, COLOR_CONTRAST};
use crate::tree::NodeId;
use std::collections::HashSet;
use tracing::debug;

/// Contrast check over text-bearing nodes
pub struct ContrastCheck;

impl Check for ContrastCheck {
    fn name(&self) -> &str {
        "Color Contrast"
    }

    fn category(&self) -> Category {
        Category::Color
    }

    fn evaluate(&self, ctx: &AuditContext<'_>) -> Result<Vec<AuditFinding>> {
        let minimum = ctx.config.contrast.minimum_ratio;
        let mut seen = HashSet::new();

        let findings = ctx
            .nodes()?
            .into_iter()
            .filter_map(|node| text_colors(ctx, node))
            .filter(|pair| seen.insert(*pair))
            .map(|(fg, bg)| pair_finding(fg, bg, minimum))
            .collect();

        Ok(findings)
    }
}

/// Resolved colors of a node that directly holds text
fn text_colors(ctx: &AuditContext<'_>, node: NodeId) -> Option<(ColorSample, ColorSample)> {
    let text = readable(node, ctx.tree.own_text(node))?;
    if text.trim().is_empty() {
        return None;
    }

    let style = readable(node, ctx.styles.computed_style(node))?;
    let background = match parse_color(&style.background_color) {
        Ok(c) if c.is_transparent() => return None,
        Ok(c) => c,
        Err(e) => {
            debug!(%node, error = %e, "Skipping unparseable background color");
            return None;
        }
    };
    let foreground = match parse_color(&style.color) {
        Ok(c) if c.is_transparent() => return None,
        Ok(c) => c,
        Err(e) => {
            debug!(%node, error = %e, "Skipping unparseable text color");
            return None;
        }
    };

    Some((foreground, background))
}

fn pair_finding(foreground: ColorSample, background: ColorSample, minimum: f64) -> AuditFinding {
    let result = ContrastResult::between(foreground, background);
    let subject = format!("{} on {}", foreground, background);

    let finding = if meets_threshold(result.ratio, minimum) {
        AuditFinding::pass(&COLOR_CONTRAST)
    } else {
        AuditFinding::fail(
            &COLOR_CONTRAST,
            &format!(
                "Contrast ratio {:.2}:1 is below the {}:1 minimum (WCAG level: {})",
                result.ratio, minimum, result.level
            ),
        )
        .with_suggestion(&format!(
            "Increase the contrast between text color and background color to at least {}:1",
            minimum
        ))
    };

    finding.with_subject(&subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::tree::{Element, MemoryTree};

    fn evaluate(tree: &MemoryTree, config: &AuditConfig) -> Vec<AuditFinding> {
        let ctx = AuditContext { tree, styles: tree, root: tree.root(), config };
        ContrastCheck.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_pair_per_unique_colors() {
        let mut tree = MemoryTree::new(Element::new("body").colors("#000", "#fff"));
        let root = tree.root();
        tree.append(root, Element::new("p").text("one").colors("#000000", "#ffffff"));
        tree.append(root, Element::new("p").text("two").colors("rgb(0, 0, 0)", "white"));
        tree.append(root, Element::new("p").text("three").colors("#777777", "#ffffff"));

        let findings = evaluate(&tree, &AuditConfig::default());
        assert_eq!(findings.len(), 2);
        assert!(findings[0].passed);
        assert_eq!(findings[0].subject.as_deref(), Some("#000000 on #ffffff"));
        assert!(!findings[1].passed);
        assert!(findings[1].issue.as_deref().unwrap().contains("4.48"));
    }

    #[test]
    fn test_transparent_background_excluded() {
        let mut tree = MemoryTree::new(Element::new("body"));
        let root = tree.root();
        tree.append(root, Element::new("span").text("x").colors("#eee", "transparent"));
        tree.append(root, Element::new("span").text("y").colors("#eee", "rgba(255, 255, 255, 0)"));
        assert!(evaluate(&tree, &AuditConfig::default()).is_empty());
    }

    #[test]
    fn test_transparent_text_excluded() {
        let mut tree = MemoryTree::new(Element::new("body"));
        let root = tree.root();
        tree.append(root, Element::new("span").text("x").colors("transparent", "#ffffff"));
        tree.append(root, Element::new("span").text("y").colors("rgba(0, 0, 0, 0)", "#f0f0f0"));
        assert!(evaluate(&tree, &AuditConfig::default()).is_empty());
    }

    #[test]
    fn test_nearly_transparent_background_evaluated() {
        let mut tree = MemoryTree::new(Element::new("body"));
        tree.append(tree.root(), Element::new("p").text("x").colors("#777777", "rgba(255, 255, 255, 0.001)"));
        let findings = evaluate(&tree, &AuditConfig::default());
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].passed);
    }

    #[test]
    fn test_unparseable_and_empty_text_skipped() {
        let mut tree = MemoryTree::new(Element::new("body"));
        let root = tree.root();
        tree.append(root, Element::new("p").text("x").colors("hsl(0, 0%, 0%)", "#fff"));
        tree.append(root, Element::new("p").text("   ").colors("#eee", "#fff"));
        tree.append(root, Element::new("p").text("gone").colors("#eee", "#fff").detached());
        assert!(evaluate(&tree, &AuditConfig::default()).is_empty());
    }

    #[test]
    fn test_configured_minimum() {
        let mut tree = MemoryTree::new(Element::new("body"));
        let root = tree.root();
        // ~5.33:1, passes AA but not a 7:1 minimum
        tree.append(root, Element::new("p").text("x").colors("#6b6b6b", "#ffffff"));

        assert!(evaluate(&tree, &AuditConfig::default())[0].passed);

        let mut strict = AuditConfig::default();
        strict.contrast.minimum_ratio = 7.0;
        let findings = evaluate(&tree, &strict);
        assert!(!findings[0].passed);
        assert!(findings[0].suggestion.as_deref().unwrap().contains("7:1"));
    }
}
