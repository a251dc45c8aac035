//! Integration tests for the privilege gate.
//!
//! These exercise the full pipeline: corpus → scorer → decision engine →
//! audit log, through the public `Gate::intercept` entry point.
//!
//! Run with: cargo test --package lexgate-gate --test gate_tests

use lexgate_audit::{AuditFilter, AuditLogger};
use lexgate_core::{
    IndicatorCategory, Language, LexgateConfig, Outcome, PolicyRule, ScoreReport,
};
use lexgate_gate::{Gate, GateDecision, OutboundCall};
use lexgate_policy::DecisionEngine;
use lexgate_scan::{PayloadScanner, ScanError};
use std::sync::Arc;
use std::time::Duration;

fn default_gate() -> Gate {
    Gate::from_config(&LexgateConfig::default()).unwrap()
}

/// A scanner that always fails, standing in for an unavailable corpus.
struct FailingScanner;

impl PayloadScanner for FailingScanner {
    fn scan(
        &self,
        _payload: &str,
        _declared_language: Option<Language>,
    ) -> Result<ScoreReport, ScanError> {
        Err(ScanError::CorpusUnavailable("indicator store offline".into()))
    }
}

/// A scanner that takes longer than any reasonable latency budget.
struct SlowScanner;

impl PayloadScanner for SlowScanner {
    fn scan(
        &self,
        _payload: &str,
        _declared_language: Option<Language>,
    ) -> Result<ScoreReport, ScanError> {
        std::thread::sleep(Duration::from_millis(500));
        Ok(ScoreReport::default())
    }
}

#[tokio::test]
async fn german_privilege_assertion_is_blocked() {
    let gate = default_gate();
    let call = OutboundCall::new(
        "precedent-search",
        "Sehr geehrter Herr Kollege, im Sinne des Anwaltsgeheimnisses teile ich Ihnen mit...",
    )
    .with_language(Language::De);

    match gate.intercept(call).await {
        GateDecision::Blocked(blocked) => {
            assert_eq!(blocked.rule, PolicyRule::CategoryBlock);
            assert!(blocked
                .categories
                .contains(&IndicatorCategory::PrivilegeAssertion));
            // The rejection names the category, never the matched text.
            assert!(blocked.message.contains("PRIVILEGE_ASSERTION"));
            assert!(!blocked.message.contains("Anwaltsgeheimnis"));
        }
        GateDecision::Forward { .. } => panic!("privileged payload was forwarded"),
    }
}

#[tokio::test]
async fn neutral_research_query_is_allowed() {
    let gate = default_gate();
    let call = OutboundCall::new(
        "precedent-search",
        "What is the statute of limitations for contract claims under OR Art. 127?",
    )
    .with_language(Language::En);

    match gate.intercept(call).await {
        GateDecision::Forward { verdict, .. } => {
            assert_eq!(verdict.outcome, Outcome::Allow);
            assert_eq!(verdict.risk_score, 0.0);
            assert_eq!(verdict.rule, PolicyRule::Default);
        }
        GateDecision::Blocked(blocked) => panic!("neutral query blocked: {}", blocked.message),
    }
}

#[tokio::test]
async fn mixed_language_weak_memo_match_warns() {
    let gate = default_gate();
    let call = OutboundCall::new(
        "translation",
        "Cher confrère, could you please double-check the delivery deadlines?",
    )
    .with_language(Language::Fr);

    match gate.intercept(call).await {
        GateDecision::Forward { verdict, .. } => {
            assert_eq!(verdict.outcome, Outcome::Warn);
            assert_eq!(verdict.rule, PolicyRule::Elevated);
            assert!(verdict.categories.contains(&IndicatorCategory::InternalMemo));
        }
        GateDecision::Blocked(blocked) => panic!("weak match blocked: {}", blocked.message),
    }
}

#[tokio::test]
async fn empty_payload_is_allowed() {
    let gate = default_gate();
    match gate.intercept(OutboundCall::new("drafting", "")).await {
        GateDecision::Forward { verdict, .. } => {
            assert_eq!(verdict.outcome, Outcome::Allow);
            assert_eq!(verdict.risk_score, 0.0);
        }
        GateDecision::Blocked(_) => panic!("empty payload blocked"),
    }
}

#[tokio::test]
async fn truncated_payload_never_allows() {
    let mut config = LexgateConfig::default();
    config.scanner.max_payload_chars = 16;
    let gate = Gate::from_config(&config).unwrap();

    let clean_but_long = "perfectly ordinary text ".repeat(10);
    match gate
        .intercept(OutboundCall::new("precedent-search", clean_but_long))
        .await
    {
        GateDecision::Forward { verdict, .. } => {
            assert_eq!(verdict.outcome, Outcome::Warn);
            assert_eq!(verdict.rule, PolicyRule::Truncated);
            assert!(verdict.truncated);
        }
        GateDecision::Blocked(_) => panic!("truncated clean payload blocked"),
    }
}

#[tokio::test]
async fn failing_scanner_blocks_with_scan_unavailable() {
    let gate = Gate::new(
        Arc::new(FailingScanner),
        DecisionEngine::default(),
        Arc::new(AuditLogger::in_memory()),
        Duration::from_secs(1),
    );

    match gate
        .intercept(OutboundCall::new("precedent-search", "any payload"))
        .await
    {
        GateDecision::Blocked(blocked) => {
            assert_eq!(blocked.rule, PolicyRule::ScanUnavailable);
        }
        GateDecision::Forward { .. } => panic!("scanner failure allowed a call through"),
    }

    let records = gate.audit().query(AuditFilter::default()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Block);
    assert_eq!(records[0].rule, PolicyRule::ScanUnavailable);
    assert!(records[0].error.is_some());
}

#[tokio::test]
async fn slow_scan_blocks_on_timeout() {
    let gate = Gate::new(
        Arc::new(SlowScanner),
        DecisionEngine::default(),
        Arc::new(AuditLogger::in_memory()),
        Duration::from_millis(20),
    );

    match gate
        .intercept(OutboundCall::new("precedent-search", "any payload"))
        .await
    {
        GateDecision::Blocked(blocked) => {
            assert_eq!(blocked.rule, PolicyRule::ScanTimeout);
        }
        GateDecision::Forward { .. } => panic!("timed-out scan allowed a call through"),
    }

    let records = gate.audit().query(AuditFilter::default()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rule, PolicyRule::ScanTimeout);
}

#[tokio::test]
async fn verdicts_are_deterministic() {
    let gate = default_gate();
    let payload = "Aktennotiz: unser Mandant verlangt eine Einschätzung zur Verjährung.";

    let first = gate
        .intercept(OutboundCall::new("precedent-search", payload))
        .await;
    let second = gate
        .intercept(OutboundCall::new("precedent-search", payload))
        .await;

    assert_eq!(first.is_blocked(), second.is_blocked());
    match (first, second) {
        (GateDecision::Blocked(a), GateDecision::Blocked(b)) => {
            assert_eq!(a.rule, b.rule);
            assert_eq!(a.categories, b.categories);
        }
        (GateDecision::Forward { verdict: a, .. }, GateDecision::Forward { verdict: b, .. }) => {
            assert_eq!(a.outcome, b.outcome);
            assert_eq!(a.rule, b.rule);
            assert_eq!(a.risk_score, b.risk_score);
        }
        _ => unreachable!(),
    }
}

#[tokio::test]
async fn every_intercept_appends_exactly_one_record() {
    let gate = default_gate();

    gate.intercept(OutboundCall::new("a", "nothing to see")).await;
    gate.intercept(OutboundCall::new("b", "Cher confrère, merci")).await;
    gate.intercept(OutboundCall::new("c", "privileged and confidential")).await;

    let records = gate.audit().query(AuditFilter::default()).await.unwrap();
    assert_eq!(records.len(), 3);
    let sequences: Vec<u64> = records.iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, vec![1, 2, 3]);
}

#[tokio::test]
async fn concurrent_scans_leave_a_total_order() {
    let gate = default_gate();

    let calls = (0..100).map(|i| {
        let gate = gate.clone();
        async move {
            gate.intercept(OutboundCall::new(
                "precedent-search",
                format!("Research question number {}", i),
            ))
            .await
        }
    });
    futures::future::join_all(calls).await;

    let records = gate.audit().query(AuditFilter::default()).await.unwrap();
    assert_eq!(records.len(), 100);

    let mut sequences: Vec<u64> = records.iter().map(|r| r.sequence).collect();
    sequences.sort_unstable();
    let expected: Vec<u64> = (1..=100).collect();
    assert_eq!(sequences, expected, "sequences must be gapless and unique");
}
