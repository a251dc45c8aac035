//! Audit logging configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Storage backend.
    #[serde(default)]
    pub backend: AuditBackend,

    /// File path (for the file backend). Defaults to `lexgate-audit.log`
    /// in the working directory.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Also echo records to stdout as human-readable lines.
    #[serde(default)]
    pub stdout: bool,
}

/// Audit storage backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuditBackend {
    /// Keep records in memory (queryable; lifecycle = process).
    #[default]
    Memory,
    /// Append JSON Lines to a file.
    File,
    /// Print human-readable lines to stdout.
    Console,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: AuditBackend::default(),
            file_path: None,
            stdout: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}
