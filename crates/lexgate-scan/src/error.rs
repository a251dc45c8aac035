//! Error types for corpus loading and scanning.

use lexgate_core::{IndicatorCategory, Language};
use thiserror::Error;

/// Errors that can occur while loading the indicator corpus.
///
/// Corpus load is all-or-nothing: any malformed entry fails the whole load,
/// so the gate never serves scans against a silently weakened corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A required language has no indicators.
    #[error("no indicators loaded for required language '{language}'")]
    MissingLanguage { language: Language },

    /// An indicator pattern failed to compile.
    #[error("invalid pattern '{pattern}' ({language}/{category}): {message}")]
    InvalidPattern {
        category: IndicatorCategory,
        language: Language,
        pattern: String,
        message: String,
    },

    /// An indicator weight is outside (0, 1].
    #[error("invalid weight {weight} for pattern '{pattern}': must be in (0, 1]")]
    InvalidWeight { pattern: String, weight: f64 },

    /// The same (category, language, pattern) triple appears twice.
    #[error("duplicate indicator ({language}/{category}) '{pattern}'")]
    DuplicateIndicator {
        category: IndicatorCategory,
        language: Language,
        pattern: String,
    },

    /// IO error while reading indicator files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse error in an indicator file.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors a payload scanner can report.
///
/// The bundled [`Scorer`](crate::Scorer) is infallible once its corpus is
/// loaded; this type exists for the scanner seam, where external
/// implementations can fail at scan time.
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// The scanner's corpus is not available.
    #[error("corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// The payload could not be decoded.
    #[error("payload encoding error: {0}")]
    Encoding(String),
}
