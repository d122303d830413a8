// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for auditing HTML files across a project.
//!
//! Walks directory trees, picks up HTML documents, and audits each one.

use crate::auditor::ComplianceAuditor;
use crate::error::Result;
use crate::html::HtmlDocument;
use crate::report::AuditReport;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build",
    "_build", "vendor", ".next", ".nuxt", "coverage",
];

/// Audit result for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub report: AuditReport,
}

/// Audit results for every file of a scan, in walk order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    pub files: Vec<FileReport>,
}

impl ScanResult {
    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| !f.report.is_compliant())
    }

    /// Findings across all files
    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.report.summary.total).sum()
    }

    /// Failed findings across all files
    pub fn total_failures(&self) -> usize {
        self.files.iter().map(|f| f.report.summary.failed).sum()
    }
}

/// Whether `path` names a file the scanner audits
pub fn is_scannable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SCANNABLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Audit every HTML file under `dir`
pub fn scan_directory(dir: &Path, auditor: &ComplianceAuditor) -> Result<ScanResult> {
    let mut result = ScanResult::default();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories, but never the scan root
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_scannable(entry.path()) {
            continue;
        }

        match scan_file(entry.path(), auditor) {
            Ok(file) => result.files.push(file),
            Err(e) => info!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    info!(
        "Scanned {} files, {} of {} findings failed",
        result.files.len(),
        result.total_failures(),
        result.total_findings()
    );

    Ok(result)
}

/// Audit a single HTML file
pub fn scan_file(path: &Path, auditor: &ComplianceAuditor) -> Result<FileReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(FileReport {
        path: path.to_path_buf(),
        report: audit_html(&content, auditor),
    })
}

/// Audit markup held in memory
pub fn audit_html(content: &str, auditor: &ComplianceAuditor) -> AuditReport {
    let document = HtmlDocument::parse(content);
    auditor.run_audit(&document, document.root())
}
