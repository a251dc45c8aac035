use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Configuration types shared across all Lexgate crates
pub mod config;

// Re-export commonly used config types for convenience
pub use config::{
    AuditBackend, AuditConfig, ConfigError, CorpusConfig, DestinationPolicy, IndicatorDef,
    LexgateConfig, PolicyConfig, ScannerConfig,
};

/// Languages the corpus covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    Fr,
    It,
    En,
}

impl Language {
    /// All supported languages, in canonical order.
    pub const ALL: [Language; 4] = [Language::De, Language::Fr, Language::It, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::Fr => "fr",
            Language::It => "it",
            Language::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "de" => Ok(Language::De),
            "fr" => Ok(Language::Fr),
            "it" => Ok(Language::It),
            "en" => Ok(Language::En),
            other => Err(format!("unknown language code '{}' (expected de|fr|it|en)", other)),
        }
    }
}

/// Category of a privilege indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorCategory {
    /// Explicit invocation of confidentiality or professional secrecy.
    PrivilegeAssertion,
    /// File notes, internal memoranda, collegial correspondence markers.
    InternalMemo,
    /// Mandate/client identifiers and "our client" formulas.
    ClientIdentifier,
    /// Internal case-file reference formats.
    CaseFileRef,
}

impl std::fmt::Display for IndicatorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PrivilegeAssertion => write!(f, "PRIVILEGE_ASSERTION"),
            Self::InternalMemo => write!(f, "INTERNAL_MEMO"),
            Self::ClientIdentifier => write!(f, "CLIENT_IDENTIFIER"),
            Self::CaseFileRef => write!(f, "CASE_FILE_REF"),
        }
    }
}

/// Outcome of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// Payload may leave the local environment.
    Allow,
    /// Payload is forwarded but flagged; the caller may require explicit
    /// user confirmation before issuing the call.
    Warn,
    /// Payload must not leave the local environment.
    Block,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "ALLOW"),
            Self::Warn => write!(f, "WARN"),
            Self::Block => write!(f, "BLOCK"),
        }
    }
}

/// The policy rule that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRule {
    /// A block-grade category reached its per-category threshold.
    CategoryBlock,
    /// The severity-weighted aggregate reached the high threshold.
    HighRisk,
    /// The severity-weighted aggregate reached the low threshold.
    Elevated,
    /// The payload was truncated before scanning; zero risk cannot be trusted.
    Truncated,
    /// No rule fired.
    Default,
    /// The scorer failed; resolved to BLOCK.
    ScanUnavailable,
    /// The scan exceeded its latency budget; resolved to BLOCK.
    ScanTimeout,
}

impl std::fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CategoryBlock => write!(f, "CATEGORY_BLOCK"),
            Self::HighRisk => write!(f, "HIGH_RISK"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Truncated => write!(f, "TRUNCATED"),
            Self::Default => write!(f, "DEFAULT"),
            Self::ScanUnavailable => write!(f, "SCAN_UNAVAILABLE"),
            Self::ScanTimeout => write!(f, "SCAN_TIMEOUT"),
        }
    }
}

/// A single outbound-call scan request.
///
/// Consumed synchronously; never persisted beyond the audit record
/// (which carries metadata only, not the payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The payload that is about to leave the local environment.
    pub payload: String,
    /// Identifier of the external service the call targets.
    pub destination: String,
    /// Declared or detected source language, if known.
    pub declared_language: Option<Language>,
    /// When the outbound call was attempted.
    pub requested_at: DateTime<Utc>,
}

impl ScanRequest {
    pub fn new(destination: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            destination: destination.into(),
            declared_language: None,
            requested_at: Utc::now(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.declared_language = Some(language);
        self
    }
}

/// A matched indicator, as recorded in a [`CategoryScore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedIndicator {
    pub language: Language,
    pub pattern: String,
    pub weight: f64,
    /// How many times the pattern matched within the scanned window.
    pub occurrences: usize,
}

/// Accumulated score for one indicator category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: IndicatorCategory,
    /// Matched indicators in corpus load order.
    pub matched: Vec<MatchedIndicator>,
    /// Sum of `weight * occurrences` over matched indicators, capped at 1.0.
    pub weight: f64,
}

impl CategoryScore {
    pub fn new(category: IndicatorCategory) -> Self {
        Self {
            category,
            matched: Vec::new(),
            weight: 0.0,
        }
    }
}

/// Output of scoring one payload against the corpus.
///
/// Categories with no matches are absent from `scores`; an empty payload
/// therefore produces an empty map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: BTreeMap<IndicatorCategory, CategoryScore>,
    /// Whether the payload exceeded the scan window and only a prefix was
    /// scanned. Carried into the verdict; truncated scans never ALLOW.
    pub truncated: bool,
    /// Number of characters actually scanned.
    pub scanned_chars: usize,
}

impl ScoreReport {
    /// Score for a category, or 0.0 if it did not match.
    pub fn category_weight(&self, category: IndicatorCategory) -> f64 {
        self.scores.get(&category).map(|s| s.weight).unwrap_or(0.0)
    }
}

/// The decision for one scan request. Immutable once produced; a `Block`
/// verdict is never downgraded downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: Outcome,
    /// Severity-weighted aggregate risk, 0.0..=1.0.
    pub risk_score: f64,
    /// Categories that contributed to the outcome, in canonical order.
    pub categories: Vec<IndicatorCategory>,
    /// The rule that produced the outcome.
    pub rule: PolicyRule,
    /// Whether the scanned payload was truncated.
    pub truncated: bool,
}

impl Verdict {
    pub fn is_block(&self) -> bool {
        self.outcome == Outcome::Block
    }

    pub fn is_allow(&self) -> bool {
        self.outcome == Outcome::Allow
    }
}
