// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for the auditor.
//!
//! Only host-facing operations (loading configuration, reading files,
//! serialising reports) ever surface an [`AuditError`] to callers. Errors
//! raised while auditing a tree are folded into findings by the auditor.

use crate::rules::Category;
use crate::tree::NodeId;
use thiserror::Error;

/// A color string that could not be resolved to a [`ColorSample`](crate::contrast::ColorSample)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unrecognised color value: {0:?}")]
    Unrecognised(String),

    #[error("color channel out of range in {0:?}")]
    ChannelOutOfRange(String),
}

/// A single node read against the host tree failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeReadError {
    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("node {0} is detached from the host tree")]
    Detached(NodeId),
}

/// Main error type for the auditor
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("{category} checks could not be evaluated: {message}")]
    RuleEvaluation { category: Category, message: String },

    #[error("Node read failed: {0}")]
    NodeRead(#[from] NodeReadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuditError>;
