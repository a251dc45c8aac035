//! Indicator corpus configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::ConfigError;
use crate::{IndicatorCategory, Language};

/// A single indicator definition as it appears in configuration.
///
/// Identity is the (category, language, pattern) triple; duplicate
/// identities fail corpus load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorDef {
    /// Indicator category.
    pub category: IndicatorCategory,

    /// Language the pattern belongs to.
    pub language: Language,

    /// Regular expression, compiled case-insensitively at load time.
    pub pattern: String,

    /// Contribution per match, in (0, 1].
    pub weight: f64,
}

/// Configuration for the indicator corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Languages the corpus must cover. Corpus load fails if a required
    /// language ends up with no indicators.
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,

    /// Whether to start from the built-in indicator sets.
    #[serde(default = "default_true")]
    pub include_builtin: bool,

    /// Directory of indicator definition files merged into the corpus.
    #[serde(default)]
    pub corpus_dir: Option<PathBuf>,

    /// Individual indicator definition files.
    #[serde(default)]
    pub indicator_files: Vec<PathBuf>,

    /// Inline indicator definitions.
    #[serde(default)]
    pub indicators: Vec<IndicatorDef>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            include_builtin: true,
            corpus_dir: None,
            indicator_files: Vec::new(),
            indicators: Vec::new(),
        }
    }
}

/// An indicator definition file (`corpus/*.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFile {
    /// Indicator definitions.
    pub indicators: Vec<IndicatorDef>,
}

impl IndicatorFile {
    /// Load an indicator file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(ConfigError::from)
    }
}

fn default_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

fn default_true() -> bool {
    true
}
