//! Indicator corpus loading and compilation.

use crate::builtin;
use crate::error::CorpusError;
use lexgate_core::config::CorpusConfig;
use lexgate_core::{IndicatorCategory, IndicatorDef, Language};
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeSet, HashSet};
use unicode_normalization::UnicodeNormalization;

/// A compiled indicator.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub category: IndicatorCategory,
    pub language: Language,
    pub pattern: String,
    pub weight: f64,
    regex: Regex,
}

impl Indicator {
    fn compile(def: &IndicatorDef) -> Result<Self, CorpusError> {
        if !(def.weight > 0.0 && def.weight <= 1.0) {
            return Err(CorpusError::InvalidWeight {
                pattern: def.pattern.clone(),
                weight: def.weight,
            });
        }

        // Patterns are NFC-normalized like payloads, so an indicator
        // authored with decomposed accents still matches.
        let pattern: String = def.pattern.nfc().collect();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CorpusError::InvalidPattern {
                category: def.category,
                language: def.language,
                pattern: def.pattern.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            category: def.category,
            language: def.language,
            pattern,
            weight: def.weight,
            regex,
        })
    }

    /// Number of (non-overlapping) matches in the given text.
    pub fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// The loaded indicator corpus.
///
/// Immutable after load; share via `Arc` and read concurrently without
/// locking. Load is all-or-nothing: any malformed entry fails the whole
/// corpus.
#[derive(Debug, Clone)]
pub struct Corpus {
    indicators: Vec<Indicator>,
    languages: BTreeSet<Language>,
}

impl Corpus {
    /// Load and compile the corpus described by `config`.
    ///
    /// Starts from the built-in sets (unless `include_builtin` is off) and
    /// appends configured indicators in order. Fails on the first invalid
    /// pattern, out-of-range weight, duplicate identity, or required
    /// language left without indicators.
    pub fn load(config: &CorpusConfig) -> Result<Self, CorpusError> {
        let mut defs: Vec<IndicatorDef> = Vec::new();
        if config.include_builtin {
            defs.extend(builtin::indicator_defs());
        }
        defs.extend(config.indicators.iter().cloned());

        let mut seen: HashSet<(IndicatorCategory, Language, String)> = HashSet::new();
        let mut indicators = Vec::with_capacity(defs.len());
        for def in &defs {
            let key = (def.category, def.language, def.pattern.clone());
            if !seen.insert(key) {
                return Err(CorpusError::DuplicateIndicator {
                    category: def.category,
                    language: def.language,
                    pattern: def.pattern.clone(),
                });
            }
            indicators.push(Indicator::compile(def)?);
        }

        let languages: BTreeSet<Language> = indicators.iter().map(|i| i.language).collect();
        for required in &config.languages {
            if !languages.contains(required) {
                return Err(CorpusError::MissingLanguage {
                    language: *required,
                });
            }
        }

        tracing::debug!(
            indicators = indicators.len(),
            languages = languages.len(),
            "corpus loaded"
        );

        Ok(Self {
            indicators,
            languages,
        })
    }

    /// Indicators in stable load order.
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// Languages present in the corpus.
    pub fn languages(&self) -> &BTreeSet<Language> {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Number of indicators for one category (corpus inspection/reporting).
    pub fn count_for_category(&self, category: IndicatorCategory) -> usize {
        self.indicators
            .iter()
            .filter(|i| i.category == category)
            .count()
    }
}
