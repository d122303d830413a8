// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for a11y-auditor

use a11y_auditor::config::AuditConfig;
use a11y_auditor::report::{render_report, render_scan, OutputFormat};
use a11y_auditor::rules::{Category, IMAGE_ALT_TEXT};
use a11y_auditor::scanner;
use a11y_auditor::ComplianceAuditor;
use std::path::Path;

fn audit(fixture: &str) -> a11y_auditor::AuditReport {
    scanner::scan_file(
        &Path::new("tests/fixtures").join(fixture),
        &ComplianceAuditor::default(),
    )
    .expect("scan should succeed")
    .report
}

fn failed_rules(report: &a11y_auditor::AuditReport) -> Vec<&str> {
    report.findings.iter().filter(|f| !f.passed).map(|f| f.rule.as_str()).collect()
}

#[test]
fn test_scan_accessible_fixture() {
    let report = audit("accessible.html");

    assert!(
        report.is_compliant(),
        "Accessible fixture should pass, got failures: {:?}",
        failed_rules(&report)
    );
    assert!(report.recommendations.is_empty());
    assert!(report.finding("color-contrast").map(|f| f.passed).unwrap_or(false));
    for category in Category::ALL {
        assert!(report.summary.by_category.contains_key(&category), "missing {}", category);
    }
}

#[test]
fn test_scan_inaccessible_fixture() {
    let report = audit("inaccessible.html");
    let failed = failed_rules(&report);

    for rule in [
        "color-contrast",
        "keyboard-navigation",
        "accessible-labels",
        "image-alt-text",
        "heading-structure",
        "focus-management",
        "semantic-structure",
    ] {
        assert!(failed.contains(&rule), "expected {} to fail, failures: {:?}", rule, failed);
    }

    // two distinct low-contrast pairs
    let contrast: Vec<_> = report.for_rule("color-contrast");
    assert_eq!(contrast.len(), 2);
    assert!(contrast.iter().all(|f| !f.passed));
    assert!(contrast.iter().any(|f| f.subject.as_deref() == Some("#777777 on #ffffff")));

    let keyboard = report.finding("keyboard-navigation").unwrap();
    let issue = keyboard.issue.as_deref().unwrap();
    assert!(issue.contains("tabindex=\"-1\""));
    assert!(issue.contains("role=\"button\""));

    let focus = report.finding("focus-management").unwrap();
    assert!(focus.issue.as_deref().unwrap().contains("after tabindex=\"3\""));
}

#[test]
fn test_scan_partial_fixture() {
    let report = audit("partial.html");

    assert_eq!(failed_rules(&report), vec!["image-alt-text"]);
    assert_eq!(report.recommendations, vec![IMAGE_ALT_TEXT.suggestion.to_string()]);
}

#[test]
fn test_scan_fixtures_directory() {
    let scan = scanner::scan_directory(Path::new("tests/fixtures"), &ComplianceAuditor::default())
        .expect("scan should succeed");

    assert_eq!(scan.files.len(), 3);
    assert!(scan.has_failures());
    assert!(scan.total_failures() >= 8);
}

#[test]
fn test_disabled_category_skipped() {
    let mut config = AuditConfig::default();
    config.checks.color = false;
    config.checks.focus = false;

    let report = scanner::scan_file(
        Path::new("tests/fixtures/inaccessible.html"),
        &ComplianceAuditor::new(config),
    )
    .expect("scan should succeed")
    .report;

    assert!(report.for_rule("color-contrast").is_empty());
    assert!(report.for_rule("focus-management").is_empty());
    assert!(!report.is_compliant());
}

#[test]
fn test_json_report_valid() {
    let report = audit("inaccessible.html");
    let rendered = render_report(&report, OutputFormat::Json);
    let parsed: serde_json::Value =
        serde_json::from_str(&rendered).expect("JSON report should be valid JSON");

    assert!(parsed["findings"].is_array());
    assert_eq!(parsed["summary"]["failed"], report.summary.failed);
    assert!(parsed["recommendations"].as_array().unwrap().len() >= 5);
}

#[test]
fn test_sarif_report_valid() {
    let scan = scanner::scan_directory(Path::new("tests/fixtures"), &ComplianceAuditor::default())
        .expect("scan should succeed");

    let rendered = render_scan(&scan, OutputFormat::Sarif);
    let parsed: serde_json::Value =
        serde_json::from_str(&rendered).expect("SARIF report should be valid JSON");

    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "a11y-auditor");
    let results = parsed["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), scan.total_failures());
    assert!(results.iter().all(|r| r["locations"][0]["physicalLocation"]["artifactLocation"]["uri"]
        .as_str()
        .map(|uri| uri.ends_with(".html"))
        .unwrap_or(false)));
}

#[test]
fn test_text_report_format() {
    let report = audit("inaccessible.html");
    let rendered = render_report(&report, OutputFormat::Text);

    assert!(rendered.contains("Accessibility Audit Report"));
    assert!(rendered.contains("[FAIL] image-alt-text"));
    assert!(rendered.contains("WCAG: 2.1.1 (Level A)"));
    assert!(rendered.contains("RESULT: FAIL"));

    let scan = scanner::scan_directory(Path::new("tests/fixtures"), &ComplianceAuditor::default())
        .expect("scan should succeed");
    let rendered = render_scan(&scan, OutputFormat::Text);
    assert!(rendered.contains("accessible.html"));
    assert!(rendered.contains("partial.html"));
}
