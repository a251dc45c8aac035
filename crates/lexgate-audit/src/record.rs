//! Audit record types.
//!
//! One record per scan request, carrying scan metadata and the verdict.
//! Records never contain payload text or matched fragments.

use chrono::{DateTime, Utc};
use lexgate_core::{IndicatorCategory, Language, Outcome, PolicyRule, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique record ID.
    pub record_id: Uuid,

    /// Position in the process-wide total order. Assigned by the storage
    /// backend at append time; strictly increasing.
    pub sequence: u64,

    /// When the record was created.
    pub occurred_at: DateTime<Utc>,

    /// External service the outbound call targeted.
    pub destination: String,

    /// Declared source language, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_language: Option<Language>,

    /// Payload length in characters (the payload itself is not stored).
    pub payload_chars: usize,

    /// Whether only a prefix of the payload was scanned.
    pub truncated: bool,

    /// Verdict outcome.
    pub outcome: Outcome,

    /// Aggregate risk score, 0.0..=1.0.
    pub risk_score: f64,

    /// Categories that contributed to the outcome.
    pub categories: Vec<IndicatorCategory>,

    /// The policy rule that produced the outcome.
    pub rule: PolicyRule,

    /// Error kind for fail-closed verdicts (timeout, scorer failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Decision latency in milliseconds.
    pub latency_ms: u64,
}

impl AuditRecord {
    /// Create a builder for a record.
    pub fn builder(destination: impl Into<String>) -> AuditRecordBuilder {
        AuditRecordBuilder::new(destination)
    }

    /// Format the record as a human-readable log line.
    ///
    /// Format: `[timestamp] #seq OUTCOME dest=... rule=... risk=... [categories=...]`
    pub fn to_log_line(&self) -> String {
        let mut line = format!(
            "[{}] #{} {} dest={} rule={} risk={:.2} chars={}",
            self.occurred_at.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.sequence,
            self.outcome,
            self.destination,
            self.rule,
            self.risk_score,
            self.payload_chars,
        );
        if self.truncated {
            line.push_str(" truncated=true");
        }
        if !self.categories.is_empty() {
            let names: Vec<String> = self.categories.iter().map(|c| c.to_string()).collect();
            line.push_str(&format!(" categories={}", names.join(",")));
        }
        if let Some(ref error) = self.error {
            line.push_str(&format!(" error=\"{}\"", error));
        }
        line.push_str(&format!(" latency_ms={}", self.latency_ms));
        line
    }
}

/// Builder for [`AuditRecord`].
#[derive(Debug, Clone)]
pub struct AuditRecordBuilder {
    destination: String,
    occurred_at: Option<DateTime<Utc>>,
    declared_language: Option<Language>,
    payload_chars: usize,
    truncated: bool,
    outcome: Outcome,
    risk_score: f64,
    categories: Vec<IndicatorCategory>,
    rule: PolicyRule,
    error: Option<String>,
    latency_ms: u64,
}

impl AuditRecordBuilder {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            occurred_at: None,
            declared_language: None,
            payload_chars: 0,
            truncated: false,
            outcome: Outcome::Block,
            risk_score: 1.0,
            categories: Vec::new(),
            rule: PolicyRule::ScanUnavailable,
            error: None,
            latency_ms: 0,
        }
    }

    /// Timestamp of the scan request this record describes. Defaults to
    /// the build time when not set.
    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    pub fn declared_language(mut self, language: Option<Language>) -> Self {
        self.declared_language = language;
        self
    }

    pub fn payload_chars(mut self, chars: usize) -> Self {
        self.payload_chars = chars;
        self
    }

    /// Take outcome, risk, categories, rule, and truncation from a verdict.
    pub fn verdict(mut self, verdict: &Verdict) -> Self {
        self.outcome = verdict.outcome;
        self.risk_score = verdict.risk_score;
        self.categories = verdict.categories.clone();
        self.rule = verdict.rule;
        self.truncated = verdict.truncated;
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn build(self) -> AuditRecord {
        AuditRecord {
            record_id: Uuid::new_v4(),
            sequence: 0,
            occurred_at: self.occurred_at.unwrap_or_else(Utc::now),
            destination: self.destination,
            declared_language: self.declared_language,
            payload_chars: self.payload_chars,
            truncated: self.truncated,
            outcome: self.outcome,
            risk_score: self.risk_score,
            categories: self.categories,
            rule: self.rule,
            error: self.error,
            latency_ms: self.latency_ms,
        }
    }
}
