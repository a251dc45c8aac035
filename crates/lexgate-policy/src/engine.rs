//! Decision engine implementation.

use crate::error::PolicyError;
use lexgate_core::config::{DestinationPolicy, PolicyConfig};
use lexgate_core::{IndicatorCategory, Outcome, PolicyRule, ScoreReport, Verdict};

/// Categories that can block on their own and can never be exempted.
const BLOCK_GRADE: [IndicatorCategory; 2] = [
    IndicatorCategory::PrivilegeAssertion,
    IndicatorCategory::ClientIdentifier,
];

/// Applies policy rules to score reports.
///
/// Stateless per decision; safe to share across concurrent scans.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: PolicyConfig,
}

impl DecisionEngine {
    /// Create an engine after validating the policy configuration.
    pub fn try_new(config: PolicyConfig) -> Result<Self, PolicyError> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Create an engine, reverting to the default policy if the given
    /// configuration is invalid. The gate stays armed either way.
    pub fn new_or_default(config: PolicyConfig) -> Self {
        match Self::try_new(config) {
            Ok(engine) => engine,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "invalid policy configuration, reverting to default policy"
                );
                Self {
                    config: PolicyConfig::default(),
                }
            }
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    fn validate(config: &PolicyConfig) -> Result<(), PolicyError> {
        check_threshold("category_block_threshold", config.category_block_threshold)?;
        check_threshold("high_threshold", config.high_threshold)?;
        check_threshold("low_threshold", config.low_threshold)?;
        if config.low_threshold > config.high_threshold {
            return Err(PolicyError::ThresholdOrder {
                low: config.low_threshold,
                high: config.high_threshold,
            });
        }
        for (category, value) in &config.severity {
            if !(0.0..=1.0).contains(value) {
                return Err(PolicyError::InvalidSeverity {
                    category: *category,
                    value: *value,
                });
            }
        }
        for (destination, dest) in &config.destinations {
            if let Some(v) = dest.category_block_threshold {
                check_threshold("category_block_threshold", v)?;
            }
            if let Some(v) = dest.high_threshold {
                check_threshold("high_threshold", v)?;
            }
            if let Some(v) = dest.low_threshold {
                check_threshold("low_threshold", v)?;
            }
            let low = dest.low_threshold.unwrap_or(config.low_threshold);
            let high = dest.high_threshold.unwrap_or(config.high_threshold);
            if low > high {
                return Err(PolicyError::ThresholdOrder { low, high });
            }
            for category in &dest.exempt_categories {
                if BLOCK_GRADE.contains(category) {
                    return Err(PolicyError::ExemptionNotAllowed {
                        destination: destination.clone(),
                        category: *category,
                    });
                }
            }
        }
        Ok(())
    }

    /// Decide the verdict for one score report.
    ///
    /// Rules are evaluated in order; the first match wins.
    pub fn decide(&self, report: &ScoreReport, destination: &str) -> Verdict {
        let dest = self.config.destinations.get(destination);
        let category_block = override_or(dest, |d| d.category_block_threshold, self.config.category_block_threshold);
        let high = override_or(dest, |d| d.high_threshold, self.config.high_threshold);
        let low = override_or(dest, |d| d.low_threshold, self.config.low_threshold);
        let exempt: &[IndicatorCategory] = dest
            .map(|d| d.exempt_categories.as_slice())
            .unwrap_or(&[]);

        let offenders: Vec<IndicatorCategory> = BLOCK_GRADE
            .iter()
            .copied()
            .filter(|c| report.category_weight(*c) >= category_block)
            .collect();

        let mut risk = 0.0;
        let mut active = Vec::new();
        for (category, score) in &report.scores {
            if exempt.contains(category) {
                continue;
            }
            risk += self.config.severity_for(*category) * score.weight;
            if score.weight > 0.0 {
                active.push(*category);
            }
        }
        let risk_score = risk.min(1.0);

        if !offenders.is_empty() {
            return Verdict {
                outcome: Outcome::Block,
                risk_score,
                categories: offenders,
                rule: PolicyRule::CategoryBlock,
                truncated: report.truncated,
            };
        }

        if risk_score >= high {
            return Verdict {
                outcome: Outcome::Block,
                risk_score,
                categories: active,
                rule: PolicyRule::HighRisk,
                truncated: report.truncated,
            };
        }

        if risk_score >= low {
            return Verdict {
                outcome: Outcome::Warn,
                risk_score,
                categories: active,
                rule: PolicyRule::Elevated,
                truncated: report.truncated,
            };
        }

        // Truncation biases toward caution: a clean prefix says nothing
        // about the rest of the payload.
        if report.truncated {
            return Verdict {
                outcome: Outcome::Warn,
                risk_score,
                categories: active,
                rule: PolicyRule::Truncated,
                truncated: true,
            };
        }

        Verdict {
            outcome: Outcome::Allow,
            risk_score,
            categories: active,
            rule: PolicyRule::Default,
            truncated: false,
        }
    }

    /// Fail-closed verdict for a scorer failure.
    pub fn scan_unavailable() -> Verdict {
        Verdict {
            outcome: Outcome::Block,
            risk_score: 1.0,
            categories: Vec::new(),
            rule: PolicyRule::ScanUnavailable,
            truncated: false,
        }
    }

    /// Fail-closed verdict for a scan that exceeded its latency budget.
    pub fn scan_timeout() -> Verdict {
        Verdict {
            outcome: Outcome::Block,
            risk_score: 1.0,
            categories: Vec::new(),
            rule: PolicyRule::ScanTimeout,
            truncated: false,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self {
            config: PolicyConfig::default(),
        }
    }
}

fn override_or(
    dest: Option<&DestinationPolicy>,
    pick: impl Fn(&DestinationPolicy) -> Option<f64>,
    fallback: f64,
) -> f64 {
    dest.and_then(pick).unwrap_or(fallback)
}

fn check_threshold(name: &str, value: f64) -> Result<(), PolicyError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PolicyError::InvalidThreshold {
            name: name.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgate_core::CategoryScore;
    use std::collections::HashMap;

    fn report(weights: &[(IndicatorCategory, f64)]) -> ScoreReport {
        let mut report = ScoreReport::default();
        for (category, weight) in weights {
            report.scores.insert(
                *category,
                CategoryScore {
                    category: *category,
                    matched: Vec::new(),
                    weight: *weight,
                },
            );
        }
        report
    }

    #[test]
    fn empty_report_allows_with_zero_risk() {
        let verdict = DecisionEngine::default().decide(&ScoreReport::default(), "research");
        assert_eq!(verdict.outcome, Outcome::Allow);
        assert_eq!(verdict.risk_score, 0.0);
        assert_eq!(verdict.rule, PolicyRule::Default);
        assert!(verdict.categories.is_empty());
    }

    #[test]
    fn block_grade_category_blocks_alone() {
        let verdict = DecisionEngine::default()
            .decide(&report(&[(IndicatorCategory::ClientIdentifier, 0.7)]), "research");
        assert_eq!(verdict.outcome, Outcome::Block);
        assert_eq!(verdict.rule, PolicyRule::CategoryBlock);
        assert_eq!(verdict.categories, vec![IndicatorCategory::ClientIdentifier]);
    }

    #[test]
    fn weighted_sum_blocks_at_high_threshold() {
        // 0.5 * 1.0 + 0.4 * 0.9 = 0.86 >= 0.75, while no single block-grade
        // category reaches 0.6.
        let verdict = DecisionEngine::default().decide(
            &report(&[
                (IndicatorCategory::PrivilegeAssertion, 0.5),
                (IndicatorCategory::InternalMemo, 0.4),
            ]),
            "research",
        );
        assert_eq!(verdict.outcome, Outcome::Block);
        assert_eq!(verdict.rule, PolicyRule::HighRisk);
    }

    #[test]
    fn weak_memo_match_warns() {
        // 0.4 * 0.9 = 0.36 sits between the low and high thresholds.
        let verdict = DecisionEngine::default()
            .decide(&report(&[(IndicatorCategory::InternalMemo, 0.4)]), "research");
        assert_eq!(verdict.outcome, Outcome::Warn);
        assert_eq!(verdict.rule, PolicyRule::Elevated);
    }

    #[test]
    fn truncated_scan_never_allows() {
        let mut clean = ScoreReport::default();
        clean.truncated = true;
        let verdict = DecisionEngine::default().decide(&clean, "research");
        assert_eq!(verdict.outcome, Outcome::Warn);
        assert_eq!(verdict.rule, PolicyRule::Truncated);
        assert!(verdict.truncated);
    }

    #[test]
    fn decisions_are_deterministic() {
        let engine = DecisionEngine::default();
        let r = report(&[
            (IndicatorCategory::InternalMemo, 0.4),
            (IndicatorCategory::CaseFileRef, 0.6),
        ]);
        let a = engine.decide(&r, "research");
        let b = engine.decide(&r, "research");
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.rule, b.rule);
        assert_eq!(a.risk_score, b.risk_score);
        assert_eq!(a.categories, b.categories);
    }

    #[test]
    fn destination_override_tightens_thresholds() {
        let mut config = PolicyConfig::default();
        config.destinations.insert(
            "public-search".to_string(),
            DestinationPolicy {
                high_threshold: Some(0.3),
                low_threshold: Some(0.1),
                ..Default::default()
            },
        );
        let engine = DecisionEngine::try_new(config).unwrap();
        let r = report(&[(IndicatorCategory::InternalMemo, 0.4)]);

        // 0.36 blocks for the strict destination, warns elsewhere.
        assert_eq!(engine.decide(&r, "public-search").outcome, Outcome::Block);
        assert_eq!(engine.decide(&r, "drafting").outcome, Outcome::Warn);
    }

    #[test]
    fn exempt_category_is_ignored_for_destination() {
        let mut config = PolicyConfig::default();
        config.destinations.insert(
            "drafting".to_string(),
            DestinationPolicy {
                exempt_categories: vec![IndicatorCategory::InternalMemo],
                ..Default::default()
            },
        );
        let engine = DecisionEngine::try_new(config).unwrap();
        let r = report(&[(IndicatorCategory::InternalMemo, 0.4)]);

        assert_eq!(engine.decide(&r, "drafting").outcome, Outcome::Allow);
        assert_eq!(engine.decide(&r, "research").outcome, Outcome::Warn);
    }

    #[test]
    fn block_grade_categories_cannot_be_exempted() {
        let mut config = PolicyConfig::default();
        config.destinations.insert(
            "drafting".to_string(),
            DestinationPolicy {
                exempt_categories: vec![IndicatorCategory::PrivilegeAssertion],
                ..Default::default()
            },
        );
        assert!(matches!(
            DecisionEngine::try_new(config),
            Err(PolicyError::ExemptionNotAllowed { .. })
        ));
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let config = PolicyConfig {
            high_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            DecisionEngine::try_new(config),
            Err(PolicyError::InvalidThreshold { .. })
        ));

        let config = PolicyConfig {
            low_threshold: 0.8,
            high_threshold: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            DecisionEngine::try_new(config),
            Err(PolicyError::ThresholdOrder { .. })
        ));
    }

    #[test]
    fn invalid_severity_is_rejected() {
        let config = PolicyConfig {
            severity: HashMap::from([(IndicatorCategory::InternalMemo, 2.0)]),
            ..Default::default()
        };
        assert!(matches!(
            DecisionEngine::try_new(config),
            Err(PolicyError::InvalidSeverity { .. })
        ));
    }

    #[test]
    fn new_or_default_reverts_to_baseline_on_invalid_policy() {
        let config = PolicyConfig {
            high_threshold: 7.0,
            ..Default::default()
        };
        let engine = DecisionEngine::new_or_default(config);
        assert_eq!(engine.config().high_threshold, 0.75);
    }

    #[test]
    fn scanner_failure_verdicts_are_blocks() {
        let unavailable = DecisionEngine::scan_unavailable();
        assert_eq!(unavailable.outcome, Outcome::Block);
        assert_eq!(unavailable.rule, PolicyRule::ScanUnavailable);

        let timeout = DecisionEngine::scan_timeout();
        assert_eq!(timeout.outcome, Outcome::Block);
        assert_eq!(timeout.rule, PolicyRule::ScanTimeout);
    }
}
