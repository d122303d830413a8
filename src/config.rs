// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for the auditor

use crate::contrast::AA_NORMAL_TEXT;
use crate::error::{AuditError, Result};
use crate::rules::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Contrast rule settings
    #[serde(default)]
    pub contrast: ContrastConfig,

    /// Which check categories run
    #[serde(default)]
    pub checks: CheckToggles,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            contrast: ContrastConfig::default(),
            checks: CheckToggles::default(),
        }
    }
}

impl AuditConfig {
    /// Reject values the auditor cannot work with
    pub fn validate(&self) -> Result<()> {
        let min = self.contrast.minimum_ratio;
        if !(1.0..=21.0).contains(&min) {
            return Err(AuditError::Config(format!(
                "contrast.minimum_ratio must be between 1 and 21, got {}",
                min
            )));
        }
        Ok(())
    }
}

/// Contrast rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Ratio a color pair must reach to pass
    #[serde(default = "default_minimum_ratio")]
    pub minimum_ratio: f64,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            minimum_ratio: default_minimum_ratio(),
        }
    }
}

fn default_minimum_ratio() -> f64 {
    AA_NORMAL_TEXT
}

fn default_true() -> bool {
    true
}

/// Per-category enable switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckToggles {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_true")]
    pub keyboard: bool,
    #[serde(default = "default_true")]
    pub screen_reader: bool,
    #[serde(default = "default_true")]
    pub focus: bool,
    #[serde(default = "default_true")]
    pub structure: bool,
}

impl Default for CheckToggles {
    fn default() -> Self {
        Self {
            color: true,
            keyboard: true,
            screen_reader: true,
            focus: true,
            structure: true,
        }
    }
}

impl CheckToggles {
    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Color => self.color,
            Category::Keyboard => self.keyboard,
            Category::ScreenReader => self.screen_reader,
            Category::Focus => self.focus,
            Category::Structure => self.structure,
        }
    }
}

/// Load configuration from a path; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<AuditConfig> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(AuditConfig::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: AuditConfig = if path.extension().map(|e| e == "toml").unwrap_or(false) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    config.validate()?;
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config location relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".a11y-auditor.toml")
}
