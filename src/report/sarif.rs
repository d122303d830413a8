// SPDX-License-Identifier: PMPL-1.0-or-later
//! SARIF 2.1.0 rendering (simplified)
//!
//! Only failing findings become results. The rule catalog is published as
//! the driver's rule list so viewers can resolve rule ids.

use crate::finding::AuditFinding;
use crate::report::AuditReport;
use crate::rules::{WcagLevel, RULES};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Debug, Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    help: SarifMessage,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

/// Render reports, each optionally tied to a source file, into one SARIF run
pub(crate) fn render(reports: &[(Option<&Path>, &AuditReport)]) -> String {
    let results: Vec<SarifResult> = reports
        .iter()
        .flat_map(|(path, report)| {
            report
                .findings
                .iter()
                .filter(|f| f.failed())
                .map(move |f| result_for(f, *path))
        })
        .collect();

    let rules = RULES
        .iter()
        .map(|r| SarifRule {
            id: r.id.to_string(),
            name: r.name.to_string(),
            short_description: SarifMessage { text: r.description.to_string() },
            help: SarifMessage { text: r.suggestion.to_string() },
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "a11y-auditor".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

fn result_for(finding: &AuditFinding, path: Option<&Path>) -> SarifResult {
    let level = match finding.level {
        WcagLevel::A | WcagLevel::AA => "error",
        WcagLevel::AAA => "warning",
    };

    let mut text = finding.description.clone();
    if let Some(ref issue) = finding.issue {
        text = format!("{}: {}", text, issue);
    }
    if let Some(ref subject) = finding.subject {
        text = format!("{} [{}]", text, subject);
    }

    SarifResult {
        rule_id: finding.rule.clone(),
        level: level.to_string(),
        message: SarifMessage { text },
        locations: path
            .map(|p| SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: p.display().to_string() },
                },
            })
            .into_iter()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{IMAGE_ALT_TEXT, SEMANTIC_STRUCTURE};

    #[test]
    fn test_sarif_report() {
        let report = AuditReport::from_findings(vec![
            AuditFinding::fail(&IMAGE_ALT_TEXT, "missing").with_subject("img#hero"),
            AuditFinding::pass(&SEMANTIC_STRUCTURE),
        ]);
        let sarif = render(&[(Some(Path::new("index.html")), &report)]);
        let parsed: serde_json::Value = serde_json::from_str(&sarif).expect("valid JSON");

        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "a11y-auditor");
        let results = parsed["runs"][0]["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["ruleId"], "image-alt-text");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "index.html"
        );
        assert_eq!(
            parsed["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap().len(),
            RULES.len()
        );
    }

    #[test]
    fn test_sarif_without_location() {
        let report = AuditReport::from_findings(vec![AuditFinding::fail(&IMAGE_ALT_TEXT, "missing")]);
        let parsed: serde_json::Value = serde_json::from_str(&render(&[(None, &report)])).unwrap();
        assert!(parsed["runs"][0]["results"][0].get("locations").is_none());
    }
}
