//! The interception hook.

use crate::error::GateError;
use lexgate_audit::{AuditLogger, AuditRecord};
use lexgate_core::{IndicatorCategory, Language, LexgateConfig, PolicyRule, ScanRequest, Verdict};
use lexgate_policy::DecisionEngine;
use lexgate_scan::{Corpus, PayloadScanner, Scorer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Descriptor of an outbound call about to leave the local environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundCall {
    /// Identifier of the external service the call targets.
    pub destination: String,
    /// Serialized payload.
    pub payload: String,
    /// Declared or detected source language, if known.
    pub declared_language: Option<Language>,
}

impl OutboundCall {
    pub fn new(destination: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            payload: payload.into(),
            declared_language: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.declared_language = Some(language);
        self
    }
}

/// Structured rejection returned to the dispatch layer on BLOCK.
///
/// Carries the category and rule so the refusal can be surfaced to the end
/// user, and nothing that would leak the privileged text itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedCall {
    pub blocked: bool,
    pub categories: Vec<IndicatorCategory>,
    pub rule: PolicyRule,
    pub message: String,
}

impl BlockedCall {
    fn from_verdict(destination: &str, verdict: &Verdict) -> Self {
        let reason = match verdict.rule {
            PolicyRule::ScanTimeout => {
                "the privilege scan did not complete within its latency budget".to_string()
            }
            PolicyRule::ScanUnavailable => "the privilege scanner was unavailable".to_string(),
            _ if !verdict.categories.is_empty() => {
                let names: Vec<String> =
                    verdict.categories.iter().map(|c| c.to_string()).collect();
                format!("the payload shows indicators of {}", names.join(", "))
            }
            _ => "the payload's aggregate privilege risk is too high".to_string(),
        };
        Self {
            blocked: true,
            categories: verdict.categories.clone(),
            rule: verdict.rule,
            message: format!(
                "outbound call to '{}' blocked: {}; the payload stays local, please route it to manual review",
                destination, reason
            ),
        }
    }
}

/// The gate's answer for one outbound call.
#[derive(Debug, Clone)]
pub enum GateDecision {
    /// Forward the call. The verdict may be WARN, in which case the caller
    /// may require explicit user confirmation before issuing it.
    Forward { call: OutboundCall, verdict: Verdict },
    /// Do not issue the call.
    Blocked(BlockedCall),
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Blocked(_))
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            GateDecision::Forward { verdict, .. } => Some(verdict),
            GateDecision::Blocked(_) => None,
        }
    }
}

/// The privilege gate.
///
/// Holds the immutable corpus, the decision engine, and the audit logger;
/// cheap to clone and safe to share across concurrent call paths.
#[derive(Clone)]
pub struct Gate {
    scanner: Arc<dyn PayloadScanner>,
    engine: Arc<DecisionEngine>,
    audit: Arc<AuditLogger>,
    scan_timeout: Duration,
}

impl Gate {
    /// Build a gate from configuration.
    ///
    /// Corpus load and audit init failures are fatal here; nothing else is.
    pub fn from_config(config: &LexgateConfig) -> Result<Self, GateError> {
        let corpus = Corpus::load(&config.corpus)?;
        let scorer = Scorer::new(Arc::new(corpus), &config.scanner);
        let engine = DecisionEngine::new_or_default(config.policy.clone());
        let audit = AuditLogger::new(config.audit.clone())?;
        Ok(Self::new(
            Arc::new(scorer),
            engine,
            Arc::new(audit),
            Duration::from_millis(config.scanner.scan_timeout_ms),
        ))
    }

    /// Build a gate from parts (custom scanner, pre-validated engine).
    pub fn new(
        scanner: Arc<dyn PayloadScanner>,
        engine: DecisionEngine,
        audit: Arc<AuditLogger>,
        scan_timeout: Duration,
    ) -> Self {
        Self {
            scanner,
            engine: Arc::new(engine),
            audit,
            scan_timeout,
        }
    }

    /// The audit logger, for tooling that queries scan history.
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Intercept an outbound call.
    ///
    /// Always resolves to a decision, never an error, and always appends
    /// exactly one audit record. The verdict pipeline runs on a detached
    /// task, so a caller dropping this future does not abandon the record.
    pub async fn intercept(&self, call: OutboundCall) -> GateDecision {
        let this = self.clone();
        let destination = call.destination.clone();
        let handle = tokio::spawn(async move { this.process(call).await });
        match handle.await {
            Ok(decision) => decision,
            Err(err) => {
                tracing::error!(error = %err, destination = %destination, "gate task failed");
                GateDecision::Blocked(BlockedCall::from_verdict(
                    &destination,
                    &DecisionEngine::scan_unavailable(),
                ))
            }
        }
    }

    async fn process(&self, call: OutboundCall) -> GateDecision {
        let started = Instant::now();

        let mut request = ScanRequest::new(call.destination.clone(), call.payload.clone());
        if let Some(language) = call.declared_language {
            request = request.with_language(language);
        }
        let requested_at = request.requested_at;
        let payload_chars = request.payload.chars().count();

        let scanner = Arc::clone(&self.scanner);
        let declared = request.declared_language;
        let scan =
            tokio::task::spawn_blocking(move || scanner.scan(&request.payload, declared));

        let (verdict, error) = match tokio::time::timeout(self.scan_timeout, scan).await {
            Ok(Ok(Ok(report))) => (self.engine.decide(&report, &call.destination), None),
            Ok(Ok(Err(scan_err))) => {
                tracing::error!(
                    error = %scan_err,
                    destination = %call.destination,
                    "scorer failed, failing closed"
                );
                (
                    DecisionEngine::scan_unavailable(),
                    Some(scan_err.to_string()),
                )
            }
            Ok(Err(join_err)) => {
                tracing::error!(
                    error = %join_err,
                    destination = %call.destination,
                    "scan task failed, failing closed"
                );
                (
                    DecisionEngine::scan_unavailable(),
                    Some(join_err.to_string()),
                )
            }
            Err(_) => {
                tracing::warn!(
                    destination = %call.destination,
                    timeout_ms = self.scan_timeout.as_millis() as u64,
                    "scan exceeded latency budget, failing closed"
                );
                (
                    DecisionEngine::scan_timeout(),
                    Some(format!(
                        "scan exceeded {} ms budget",
                        self.scan_timeout.as_millis()
                    )),
                )
            }
        };

        let latency_ms = started.elapsed().as_millis() as u64;
        let mut builder = AuditRecord::builder(&call.destination)
            .occurred_at(requested_at)
            .declared_language(call.declared_language)
            .payload_chars(payload_chars)
            .verdict(&verdict)
            .latency_ms(latency_ms);
        if let Some(ref kind) = error {
            builder = builder.error(kind.clone());
        }
        if let Err(err) = self.audit.append(builder.build()).await {
            // The verdict stands either way; a logging outage must not
            // become an open gate.
            tracing::error!(error = %err, "failed to append audit record");
        }

        if verdict.is_block() {
            GateDecision::Blocked(BlockedCall::from_verdict(&call.destination, &verdict))
        } else {
            GateDecision::Forward { call, verdict }
        }
    }
}
