// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit findings.
//!
//! One [`AuditFinding`] is created per rule evaluation (or per colour pair
//! for the contrast rule) and never mutated once it lands in a report.

use crate::error::AuditError;
use crate::rules::{Category, Rule, WcagLevel};
use serde::{Deserialize, Serialize};

/// The outcome of evaluating one rule during an audit pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFinding {
    /// Rule identifier (e.g., "image-alt-text")
    pub rule: String,
    /// What the rule checks
    pub description: String,
    /// WCAG conformance level
    pub level: WcagLevel,
    /// Rule category
    pub category: Category,
    /// WCAG criterion reference
    pub criterion: Option<String>,
    pub passed: bool,
    /// Offending element or color pair
    pub subject: Option<String>,
    /// Human-readable diagnosis
    pub issue: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl AuditFinding {
    /// A passing finding for a rule
    pub fn pass(rule: &Rule) -> Self {
        Self {
            rule: rule.id.to_string(),
            description: rule.description.to_string(),
            level: rule.level,
            category: rule.category,
            criterion: Some(rule.criterion.to_string()),
            passed: true,
            subject: None,
            issue: None,
            suggestion: None,
        }
    }

    /// A failing finding for a rule, carrying the rule's default suggestion
    pub fn fail(rule: &Rule, issue: &str) -> Self {
        Self {
            passed: false,
            issue: Some(issue.to_string()),
            suggestion: Some(rule.suggestion.to_string()),
            ..Self::pass(rule)
        }
    }

    /// The single failing finding standing in for a category that could not be evaluated
    pub fn evaluation_failure(category: Category, error: &AuditError) -> Self {
        Self {
            rule: category.slug().to_string(),
            description: format!("{} checks", category),
            level: category.base_level(),
            category,
            criterion: None,
            passed: false,
            subject: None,
            issue: Some(error.to_string()),
            suggestion: None,
        }
    }

    /// Set the subject
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Replace the suggestion
    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn failed(&self) -> bool {
        !self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{HEADING_STRUCTURE, IMAGE_ALT_TEXT};

    #[test]
    fn test_pass_has_no_issue() {
        let f = AuditFinding::pass(&IMAGE_ALT_TEXT);
        assert!(f.passed);
        assert_eq!(f.rule, "image-alt-text");
        assert_eq!(f.criterion.as_deref(), Some("1.1.1"));
        assert!(f.issue.is_none() && f.suggestion.is_none());
    }

    #[test]
    fn test_fail_carries_suggestion() {
        let f = AuditFinding::fail(&HEADING_STRUCTURE, "h1 followed by h3");
        assert!(f.failed());
        assert_eq!(f.issue.as_deref(), Some("h1 followed by h3"));
        assert_eq!(f.suggestion.as_deref(), Some(HEADING_STRUCTURE.suggestion));
    }

    #[test]
    fn test_evaluation_failure() {
        let err = AuditError::RuleEvaluation {
            category: Category::Focus,
            message: "tree unavailable".to_string(),
        };
        let f = AuditFinding::evaluation_failure(Category::Focus, &err);
        assert!(f.failed());
        assert_eq!(f.rule, "focus");
        assert_eq!(f.level, WcagLevel::AA);
        assert!(f.issue.unwrap().contains("tree unavailable"));
        assert!(f.suggestion.is_none());
    }
}
