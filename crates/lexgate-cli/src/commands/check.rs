//! `lexgate check` command implementation.
//!
//! Validates the configuration for consistency and correctness:
//! - Configuration file parsing and external indicator file resolution
//! - Corpus load (pattern compilation, weights, language coverage)
//! - Policy thresholds and per-destination overrides
//! - Audit sink settings

use lexgate_core::config::AuditBackend;
use lexgate_core::{IndicatorCategory, LexgateConfig};
use lexgate_policy::DecisionEngine;
use lexgate_scan::Corpus;
use std::path::Path;

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning - may indicate a potential issue.
    Warning,
    /// Error - configuration is invalid.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    pub category: String,
    pub message: String,
}

impl CheckFinding {
    fn new(severity: Severity, category: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message: message.into(),
        }
    }
}

pub fn run(config_path: &Path) -> anyhow::Result<i32> {
    let mut findings = Vec::new();

    let config = load_checked(config_path, &mut findings);
    if let Some(config) = &config {
        check_corpus(config, &mut findings);
        check_policy(config, &mut findings);
        check_audit(config, &mut findings);
    }

    for finding in &findings {
        println!("[{}] {}: {}", finding.severity, finding.category, finding.message);
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .count();
    println!();
    println!("{} error(s), {} warning(s)", errors, warnings);

    Ok(if errors > 0 { 1 } else { 0 })
}

fn load_checked(config_path: &Path, findings: &mut Vec<CheckFinding>) -> Option<LexgateConfig> {
    if !config_path.exists() {
        findings.push(CheckFinding::new(
            Severity::Warning,
            "config",
            format!(
                "no configuration file at {}, checking built-in defaults",
                config_path.display()
            ),
        ));
        return Some(LexgateConfig::default());
    }

    match LexgateConfig::load_with_context(config_path) {
        Ok(config) => {
            findings.push(CheckFinding::new(
                Severity::Info,
                "config",
                format!("loaded {}", config_path.display()),
            ));
            Some(config)
        }
        Err(e) => {
            findings.push(CheckFinding::new(Severity::Error, "config", e.to_string()));
            None
        }
    }
}

fn check_corpus(config: &LexgateConfig, findings: &mut Vec<CheckFinding>) {
    match Corpus::load(&config.corpus) {
        Ok(corpus) => {
            findings.push(CheckFinding::new(
                Severity::Info,
                "corpus",
                format!(
                    "{} indicators across {} language(s)",
                    corpus.len(),
                    corpus.languages().len()
                ),
            ));
            for category in [
                IndicatorCategory::PrivilegeAssertion,
                IndicatorCategory::InternalMemo,
                IndicatorCategory::ClientIdentifier,
                IndicatorCategory::CaseFileRef,
            ] {
                let count = corpus.count_for_category(category);
                if count == 0 {
                    findings.push(CheckFinding::new(
                        Severity::Warning,
                        "corpus",
                        format!("no indicators for category {}", category),
                    ));
                }
            }
        }
        Err(e) => {
            findings.push(CheckFinding::new(Severity::Error, "corpus", e.to_string()));
        }
    }
}

fn check_policy(config: &LexgateConfig, findings: &mut Vec<CheckFinding>) {
    match DecisionEngine::try_new(config.policy.clone()) {
        Ok(engine) => {
            findings.push(CheckFinding::new(
                Severity::Info,
                "policy",
                format!(
                    "thresholds valid (low {:.2}, high {:.2}, category block {:.2}, {} destination override(s))",
                    engine.config().low_threshold,
                    engine.config().high_threshold,
                    engine.config().category_block_threshold,
                    engine.config().destinations.len()
                ),
            ));
        }
        Err(e) => {
            // The gate would still run: invalid policy reverts to defaults.
            findings.push(CheckFinding::new(
                Severity::Error,
                "policy",
                format!("{} (at runtime the gate reverts to the default policy)", e),
            ));
        }
    }
}

fn check_audit(config: &LexgateConfig, findings: &mut Vec<CheckFinding>) {
    if !config.audit.enabled {
        findings.push(CheckFinding::new(
            Severity::Warning,
            "audit",
            "audit logging is disabled; scans will leave no records",
        ));
        return;
    }
    if config.audit.backend == AuditBackend::File && config.audit.file_path.is_none() {
        findings.push(CheckFinding::new(
            Severity::Info,
            "audit",
            "file backend without file_path, defaulting to lexgate-audit.log",
        ));
    }
}
