// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-auditor CLI - WCAG accessibility and visual compliance auditor

use a11y_auditor::config::{default_config_path, load_config};
use a11y_auditor::report::{render_report, render_scan, OutputFormat};
use a11y_auditor::rules::RULES;
use a11y_auditor::{evaluate_contrast, scanner, AuditConfig, ComplianceAuditor};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// WCAG accessibility and visual compliance auditor
#[derive(Parser)]
#[command(name = "a11y-auditor")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit an HTML file or every HTML file under a directory
    Audit {
        /// File or directory to audit
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to .a11y-auditor.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Evaluate the contrast of a foreground/background color pair
    Contrast {
        /// Foreground (text) color, e.g. "#777" or "rgb(119, 119, 119)"
        foreground: String,

        /// Background color
        background: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: ContrastFormatArg,
    },

    /// List the rule catalog
    Rules,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

/// Output format of the contrast subcommand
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContrastFormatArg {
    Text,
    Json,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_auditor=debug")
    } else {
        EnvFilter::new("a11y_auditor=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { path, format, output, config, verbose } => {
            init_logging(verbose);
            let config = resolve_config(config.as_deref())?;
            let auditor = ComplianceAuditor::new(config);

            let (rendered, failed) = if path.is_dir() {
                let scan = scanner::scan_directory(&path, &auditor)?;
                (render_scan(&scan, format.into()), scan.has_failures())
            } else {
                let file = scanner::scan_file(&path, &auditor)
                    .with_context(|| format!("Failed to audit {}", path.display()))?;
                (render_report(&file.report, format.into()), !file.report.is_compliant())
            };
            write_output(&rendered, output.as_deref())?;

            if failed {
                std::process::exit(1);
            }
        }

        Commands::Contrast { foreground, background, format } => {
            init_logging(false);
            let result = evaluate_contrast(&foreground, &background)?;
            match format {
                ContrastFormatArg::Text => {
                    println!("Foreground: {}", result.foreground);
                    println!("Background: {}", result.background);
                    println!("Ratio:      {:.2}:1", result.ratio);
                    println!("Level:      {}", result.level);
                }
                ContrastFormatArg::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            }

            if !result.passed {
                std::process::exit(1);
            }
        }

        Commands::Rules => {
            for rule in RULES {
                println!(
                    "{:<20} {:<14} WCAG {} (Level {:<3}) {}",
                    rule.id,
                    rule.category.slug(),
                    rule.criterion,
                    rule.level.to_string(),
                    rule.description
                );
            }
        }
    }

    Ok(())
}

/// An explicit config path must exist; the default one is optional
fn resolve_config(path: Option<&Path>) -> anyhow::Result<AuditConfig> {
    match path {
        Some(p) => {
            anyhow::ensure!(p.exists(), "Config file not found: {}", p.display());
            Ok(load_config(p)?)
        }
        None => Ok(load_config(&default_config_path())?),
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
