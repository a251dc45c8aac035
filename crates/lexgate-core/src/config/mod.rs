//! Configuration types for the Lexgate privilege gate.
//!
//! This module provides the unified configuration types used across all
//! Lexgate crates. Configuration is loaded from YAML (`lexgate.yaml`,
//! optionally supplemented by per-language indicator files) and combined
//! into a single `LexgateConfig` structure.
//!
//! # Configuration Files
//!
//! - **lexgate.yaml**: Main configuration file with corpus, scanner, policy,
//!   and audit settings
//! - **corpus/*.yaml**: Individual indicator definition files merged into
//!   the corpus section

pub mod audit;
pub mod corpus;
pub mod policy;
pub mod scanner;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use audit::{AuditBackend, AuditConfig};
pub use corpus::{CorpusConfig, IndicatorDef, IndicatorFile};
pub use policy::{DestinationPolicy, PolicyConfig};
pub use scanner::ScannerConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Complete Lexgate configuration loaded from files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexgateConfig {
    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Configuration version.
    #[serde(default)]
    pub version: Option<String>,

    /// Indicator corpus configuration.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Scanner settings (window size, latency budget).
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Decision thresholds and per-destination overrides.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl LexgateConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration and resolve all external references.
    ///
    /// Indicator files referenced via `corpus.corpus_dir` and
    /// `corpus.indicator_files` are read and merged into
    /// `corpus.indicators`. A missing referenced file is an error: a
    /// silently thinner corpus would weaken the gate.
    pub fn load_with_context(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = Self::from_file(path)?;

        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        if let Some(corpus_dir) = &config.corpus.corpus_dir {
            let dir = resolve(&base_dir, corpus_dir);
            if !dir.is_dir() {
                return Err(ConfigError::Config(format!(
                    "corpus_dir '{}' does not exist or is not a directory",
                    dir.display()
                )));
            }
            let mut entries: Vec<PathBuf> = fs::read_dir(&dir)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .map(|e| e == "yaml" || e == "yml")
                        .unwrap_or(false)
                })
                .collect();
            // Stable merge order regardless of directory iteration order.
            entries.sort();
            for entry in entries {
                let file = IndicatorFile::from_file(&entry)?;
                config.corpus.indicators.extend(file.indicators);
            }
        }

        for file_ref in &config.corpus.indicator_files.clone() {
            let file_path = resolve(&base_dir, file_ref);
            if !file_path.exists() {
                return Err(ConfigError::Config(format!(
                    "indicator file '{}' does not exist",
                    file_path.display()
                )));
            }
            let file = IndicatorFile::from_file(&file_path)?;
            config.corpus.indicators.extend(file.indicators);
        }

        Ok(config)
    }

    /// Per-destination policy override, if configured.
    pub fn destination_policy(&self, destination: &str) -> Option<&DestinationPolicy> {
        self.policy.destinations.get(destination)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
