// SPDX-License-Identifier: PMPL-1.0-or-later
//! Audit reports and their rendering.
//!
//! An [`AuditReport`] is a snapshot reduced from the findings of one audit
//! pass. Supported output formats:
//! - Text: human-readable findings with WCAG criterion references
//! - JSON: structured report for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

mod sarif;

use crate::finding::AuditFinding;
use crate::rules::{Category, WcagLevel};
use crate::scanner::ScanResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Passed/failed counts for one grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Aggregate counts over a report's findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passing findings; 100 when there are none
    pub pass_rate: f64,
    pub by_level: BTreeMap<WcagLevel, Tally>,
    pub by_category: BTreeMap<Category, Tally>,
}

impl Summary {
    pub fn from_findings(findings: &[AuditFinding]) -> Self {
        let mut overall = Tally::default();
        let mut by_level: BTreeMap<WcagLevel, Tally> = BTreeMap::new();
        let mut by_category: BTreeMap<Category, Tally> = BTreeMap::new();

        for f in findings {
            overall.record(f.passed);
            by_level.entry(f.level).or_default().record(f.passed);
            by_category.entry(f.category).or_default().record(f.passed);
        }

        let pass_rate = if overall.total == 0 {
            100.0
        } else {
            overall.passed as f64 / overall.total as f64 * 100.0
        };

        Self {
            total: overall.total,
            passed: overall.passed,
            failed: overall.failed,
            pass_rate,
            by_level,
            by_category,
        }
    }
}

/// The result of one audit pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Unique identifier of this snapshot
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub findings: Vec<AuditFinding>,
    pub summary: Summary,
    /// Deduplicated suggestions of failing findings, first occurrence first
    pub recommendations: Vec<String>,
}

impl AuditReport {
    pub fn from_findings(findings: Vec<AuditFinding>) -> Self {
        let summary = Summary::from_findings(&findings);
        let recommendations = recommendations(&findings);
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            findings,
            summary,
            recommendations,
        }
    }

    /// Failing findings
    pub fn failures(&self) -> Vec<&AuditFinding> {
        self.findings.iter().filter(|f| f.failed()).collect()
    }

    pub fn is_compliant(&self) -> bool {
        self.summary.failed == 0
    }

    /// Findings for a rule id
    pub fn for_rule(&self, rule: &str) -> Vec<&AuditFinding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    /// First finding for a rule id
    pub fn finding(&self, rule: &str) -> Option<&AuditFinding> {
        self.findings.iter().find(|f| f.rule == rule)
    }
}

fn recommendations(findings: &[AuditFinding]) -> Vec<String> {
    let mut seen = HashSet::new();
    findings
        .iter()
        .filter(|f| f.failed())
        .filter_map(|f| f.suggestion.clone())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Render a single report
pub fn render_report(report: &AuditReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("=== Accessibility Audit Report ===\n\n");
            write_text_body(&mut output, report);
            write_result_line(&mut output, report.is_compliant());
            output
        }
        OutputFormat::Json => to_json(report),
        OutputFormat::Sarif => sarif::render(&[(None, report)]),
    }
}

/// Render the per-file reports of a directory scan
pub fn render_scan(scan: &ScanResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("=== Accessibility Audit Report ===\n\n");
            if scan.files.is_empty() {
                output.push_str("No auditable files found.\n");
            }
            for file in &scan.files {
                output.push_str(&format!("### {}\n\n", file.path.display()));
                write_text_body(&mut output, &file.report);
            }
            write_result_line(&mut output, !scan.has_failures());
            output
        }
        OutputFormat::Json => to_json(scan),
        OutputFormat::Sarif => {
            let runs: Vec<_> = scan
                .files
                .iter()
                .map(|f| (Some(f.path.as_path()), &f.report))
                .collect();
            sarif::render(&runs)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize report: {}\"}}", e)
    })
}

fn write_text_body(output: &mut String, report: &AuditReport) {
    let s = &report.summary;
    output.push_str(&format!(
        "{} finding(s): {} passed, {} failed ({:.1}% pass rate)\n\n",
        s.total, s.passed, s.failed, s.pass_rate
    ));

    for category in Category::ALL {
        let findings: Vec<&AuditFinding> =
            report.findings.iter().filter(|f| f.category == category).collect();
        if findings.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", category, findings.len()));

        for finding in findings {
            let status = if finding.passed { "PASS" } else { "FAIL" };
            output.push_str(&format!("[{}] {}: {}\n", status, finding.rule, finding.description));

            if let Some(ref subject) = finding.subject {
                output.push_str(&format!("  Subject: {}\n", subject));
            }

            match finding.criterion {
                Some(ref criterion) => {
                    output.push_str(&format!("  WCAG: {} (Level {})\n", criterion, finding.level))
                }
                None => output.push_str(&format!("  WCAG Level {}\n", finding.level)),
            }

            if let Some(ref issue) = finding.issue {
                output.push_str(&format!("  Issue: {}\n", issue));
            }
        }
        output.push('\n');
    }

    if !report.recommendations.is_empty() {
        output.push_str("Recommendations:\n");
        for rec in &report.recommendations {
            output.push_str(&format!("  - {}\n", rec));
        }
        output.push('\n');
    }
}

fn write_result_line(output: &mut String, compliant: bool) {
    if compliant {
        output.push_str("RESULT: PASS\n");
    } else {
        output.push_str("RESULT: FAIL (accessibility issues found)\n");
    }
}
