// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-auditor - WCAG accessibility and visual compliance auditing
//!
//! Evaluates a UI tree against a battery of WCAG checks and reduces the
//! results into a report with a summary and deduplicated recommendations.
//! The auditor reads its host through three capabilities
//! ([`tree::UiTree`], [`tree::AttributeReader`], [`tree::StyleReader`]), so
//! any tree can be audited. Two hosts ship with the crate: the in-memory
//! [`MemoryTree`] and the HTML adapter [`HtmlDocument`].
//!
//! ## Checks
//!
//! - **Color** (1.4.3): Text/background contrast ratio per unique color pair
//! - **Keyboard** (2.1.1): Interactive elements reachable and operable by keyboard
//! - **Screen reader** (4.1.2/1.1.1/1.3.1): Accessible names, alt text, heading order
//! - **Focus** (2.4.7/2.4.3): Visible focus indicator and positive tabindex order
//! - **Structure** (1.3.1): Landmark presence
//!
//! ## Contrast
//!
//! ```
//! use a11y_auditor::{evaluate_contrast, ContrastLevel};
//!
//! let result = evaluate_contrast("#595959", "#ffffff").unwrap();
//! assert_eq!(result.level, ContrastLevel::AAA);
//! ```

pub mod auditor;
pub mod checks;
pub mod config;
pub mod contrast;
pub mod error;
pub mod finding;
pub mod html;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod tree;

pub use auditor::{run_audit, ComplianceAuditor};
pub use config::AuditConfig;
pub use contrast::{evaluate_contrast, ColorSample, ContrastLevel, ContrastResult};
pub use error::{AuditError, ColorParseError, NodeReadError};
pub use finding::AuditFinding;
pub use html::HtmlDocument;
pub use report::{AuditReport, OutputFormat, Summary};
pub use rules::{Category, Rule, WcagLevel};
pub use tree::{Attribute, ComputedStyle, Element, MemoryTree, NodeId};
