// SPDX-License-Identifier: PMPL-1.0-or-later
//! The compliance auditor.
//!
//! A single synchronous pass: every enabled check runs in turn against the
//! same subtree and its findings are concatenated. A check that returns an
//! error contributes one failing finding instead; the remaining checks
//! still run, so an audit always yields a report.

use crate::checks::{all_checks, AuditContext, Check};
use crate::config::AuditConfig;
use crate::finding::AuditFinding;
use crate::report::AuditReport;
use crate::tree::{DocumentTree, NodeId, StyleReader};
use tracing::{debug, info, warn};

/// Runs the check battery over UI trees
pub struct ComplianceAuditor {
    config: AuditConfig,
    checks: Vec<Box<dyn Check>>,
}

impl Default for ComplianceAuditor {
    fn default() -> Self {
        Self::new(AuditConfig::default())
    }
}

impl ComplianceAuditor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config, checks: all_checks() }
    }

    /// Replace the check battery
    pub fn with_checks(mut self, checks: Vec<Box<dyn Check>>) -> Self {
        self.checks = checks;
        self
    }

    /// Audit a tree that also resolves its own styles
    pub fn run_audit<T>(&self, tree: &T, root: NodeId) -> AuditReport
    where
        T: DocumentTree + StyleReader,
    {
        self.run_audit_with(tree, tree, root)
    }

    /// Audit a tree with styles injected separately
    pub fn run_audit_with(
        &self,
        tree: &dyn DocumentTree,
        styles: &dyn StyleReader,
        root: NodeId,
    ) -> AuditReport {
        info!(%root, "Starting accessibility audit");

        let ctx = AuditContext { tree, styles, root, config: &self.config };

        let findings: Vec<AuditFinding> = self
            .checks
            .iter()
            .filter(|check| self.config.checks.enabled(check.category()))
            .flat_map(|check| run_check(check.as_ref(), &ctx))
            .collect();

        let report = AuditReport::from_findings(findings);
        info!(
            total = report.summary.total,
            passed = report.summary.passed,
            failed = report.summary.failed,
            "Audit complete"
        );
        report
    }
}

fn run_check(check: &dyn Check, ctx: &AuditContext<'_>) -> Vec<AuditFinding> {
    debug!(check = check.name(), "Running check");
    match check.evaluate(ctx) {
        Ok(findings) => findings,
        Err(e) => {
            warn!(check = check.name(), error = %e, "Check failed to evaluate");
            vec![AuditFinding::evaluation_failure(check.category(), &e)]
        }
    }
}

/// Audit `root` with the default configuration
pub fn run_audit<T>(tree: &T, root: NodeId) -> AuditReport
where
    T: DocumentTree + StyleReader,
{
    ComplianceAuditor::default().run_audit(tree, root)
}
