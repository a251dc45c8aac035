//! Payload scoring against the indicator corpus.

use crate::corpus::Corpus;
use crate::error::ScanError;
use lexgate_core::config::ScannerConfig;
use lexgate_core::{CategoryScore, Language, MatchedIndicator, ScoreReport};
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// Scanner seam for the gate hook.
///
/// The bundled [`Scorer`] never fails; the trait models the failure modes
/// an external scanner implementation can have (corpus unavailable,
/// undecodable payload), which the gate resolves to BLOCK.
pub trait PayloadScanner: Send + Sync {
    fn scan(
        &self,
        payload: &str,
        declared_language: Option<Language>,
    ) -> Result<ScoreReport, ScanError>;
}

/// Scores payloads against an immutable corpus.
///
/// Stateless per scan; safe to share across concurrent gate invocations.
#[derive(Debug, Clone)]
pub struct Scorer {
    corpus: Arc<Corpus>,
    max_payload_chars: usize,
    restrict_to_declared_language: bool,
}

impl Scorer {
    pub fn new(corpus: Arc<Corpus>, config: &ScannerConfig) -> Self {
        Self {
            corpus,
            max_payload_chars: config.max_payload_chars,
            restrict_to_declared_language: config.restrict_to_declared_language,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Score a payload.
    ///
    /// The payload is NFC-normalized and scanned up to the configured
    /// window; each matching indicator contributes `weight * occurrences`
    /// to its category, capped at 1.0 per category. Deterministic:
    /// indicators are evaluated in corpus load order.
    pub fn score(&self, payload: &str, declared_language: Option<Language>) -> ScoreReport {
        if payload.is_empty() {
            return ScoreReport::default();
        }

        let (window, truncated) = self.window(payload);
        let text: String = window.nfc().collect();
        let scanned_chars = if truncated {
            self.max_payload_chars
        } else {
            window.chars().count()
        };

        let mut report = ScoreReport {
            truncated,
            scanned_chars,
            ..Default::default()
        };

        for indicator in self.corpus.indicators() {
            if self.restrict_to_declared_language {
                if let Some(lang) = declared_language {
                    if indicator.language != lang {
                        continue;
                    }
                }
            }

            let occurrences = indicator.count_matches(&text);
            if occurrences == 0 {
                continue;
            }

            let entry = report
                .scores
                .entry(indicator.category)
                .or_insert_with(|| CategoryScore::new(indicator.category));
            entry.matched.push(MatchedIndicator {
                language: indicator.language,
                pattern: indicator.pattern.clone(),
                weight: indicator.weight,
                occurrences,
            });
            entry.weight = (entry.weight + indicator.weight * occurrences as f64).min(1.0);
        }

        report
    }

    /// The scan window: the whole payload, or its first
    /// `max_payload_chars` characters.
    fn window<'a>(&self, payload: &'a str) -> (&'a str, bool) {
        match payload.char_indices().nth(self.max_payload_chars) {
            Some((idx, _)) => (&payload[..idx], true),
            None => (payload, false),
        }
    }
}

impl PayloadScanner for Scorer {
    fn scan(
        &self,
        payload: &str,
        declared_language: Option<Language>,
    ) -> Result<ScoreReport, ScanError> {
        Ok(self.score(payload, declared_language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgate_core::config::CorpusConfig;
    use lexgate_core::IndicatorCategory;

    fn scorer() -> Scorer {
        let corpus = Arc::new(Corpus::load(&CorpusConfig::default()).unwrap());
        Scorer::new(corpus, &ScannerConfig::default())
    }

    #[test]
    fn empty_payload_scores_zero() {
        let report = scorer().score("", None);
        assert!(report.scores.is_empty());
        assert!(!report.truncated);
        assert_eq!(report.scanned_chars, 0);
    }

    #[test]
    fn neutral_research_query_scores_zero() {
        let report = scorer().score(
            "What is the statute of limitations for contract claims under OR Art. 127?",
            Some(Language::En),
        );
        assert!(report.scores.is_empty());
    }

    #[test]
    fn german_privilege_assertion_scores_block_grade() {
        let report = scorer().score(
            "Sehr geehrter Herr Kollege, im Sinne des Anwaltsgeheimnisses teile ich Ihnen mit...",
            Some(Language::De),
        );
        assert!(report.category_weight(IndicatorCategory::PrivilegeAssertion) >= 0.6);
        assert!(report.category_weight(IndicatorCategory::InternalMemo) > 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let s = scorer();
        let payload = "Aktennotiz: unser Mandant verlangt vertraulich und privilegiert Auskunft.";
        let a = s.score(payload, None);
        let b = s.score(payload, None);
        assert_eq!(
            serde_yaml::to_string(&a).unwrap(),
            serde_yaml::to_string(&b).unwrap()
        );
    }

    #[test]
    fn repeated_phrase_is_capped_per_category() {
        let payload = "internal memo ".repeat(20);
        let report = scorer().score(&payload, Some(Language::En));
        let score = report.scores.get(&IndicatorCategory::InternalMemo).unwrap();
        assert_eq!(score.weight, 1.0);
        assert_eq!(score.matched[0].occurrences, 20);
    }

    #[test]
    fn decomposed_accents_match_composed_patterns() {
        // "confrère" with U+0300 combining grave instead of a precomposed è.
        let decomposed = "cher confre\u{0300}re, merci pour le dossier";
        let report = scorer().score(decomposed, Some(Language::Fr));
        assert!(report.category_weight(IndicatorCategory::InternalMemo) > 0.0);
    }

    #[test]
    fn cross_language_matches_accumulate_by_default() {
        // French payload with an English marker; declared language does not
        // restrict matching unless configured to.
        let report = scorer().score(
            "Note interne - privileged and confidential",
            Some(Language::Fr),
        );
        assert!(report.category_weight(IndicatorCategory::InternalMemo) > 0.0);
        assert!(report.category_weight(IndicatorCategory::PrivilegeAssertion) > 0.0);
    }

    #[test]
    fn declared_language_restriction_is_opt_in() {
        let corpus = Arc::new(Corpus::load(&CorpusConfig::default()).unwrap());
        let config = ScannerConfig {
            restrict_to_declared_language: true,
            ..Default::default()
        };
        let restricted = Scorer::new(corpus, &config);
        let report = restricted.score(
            "Note interne - privileged and confidential",
            Some(Language::Fr),
        );
        assert!(report.category_weight(IndicatorCategory::InternalMemo) > 0.0);
        assert_eq!(
            report.category_weight(IndicatorCategory::PrivilegeAssertion),
            0.0
        );
    }

    #[test]
    fn long_payload_is_truncated_and_flagged() {
        let corpus = Arc::new(Corpus::load(&CorpusConfig::default()).unwrap());
        let config = ScannerConfig {
            max_payload_chars: 32,
            ..Default::default()
        };
        let s = Scorer::new(corpus, &config);

        // The marker sits beyond the window, so it must not be scored,
        // but the truncation flag must be set.
        let payload = format!("{}{}", "x".repeat(40), " Anwaltsgeheimnis");
        let report = s.score(&payload, None);
        assert!(report.truncated);
        assert_eq!(report.scanned_chars, 32);
        assert!(report.scores.is_empty());
    }

    #[test]
    fn window_respects_char_boundaries() {
        let corpus = Arc::new(Corpus::load(&CorpusConfig::default()).unwrap());
        let config = ScannerConfig {
            max_payload_chars: 3,
            ..Default::default()
        };
        let s = Scorer::new(corpus, &config);
        // Multi-byte characters must not cause a mid-char slice.
        let report = s.score("äöüéàç", None);
        assert!(report.truncated);
        assert_eq!(report.scanned_chars, 3);
    }
}
