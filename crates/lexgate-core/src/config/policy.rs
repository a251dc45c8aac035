//! Decision policy configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::IndicatorCategory;

/// Decision thresholds and per-destination overrides.
///
/// The documented baseline: a block-grade category at or above 0.6 blocks
/// outright; a severity-weighted aggregate at or above 0.75 blocks; at or
/// above 0.35 warns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Per-category block threshold for PRIVILEGE_ASSERTION and
    /// CLIENT_IDENTIFIER.
    #[serde(default = "default_category_block_threshold")]
    pub category_block_threshold: f64,

    /// Severity-weighted aggregate at or above this blocks.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: f64,

    /// Severity-weighted aggregate at or above this warns.
    #[serde(default = "default_low_threshold")]
    pub low_threshold: f64,

    /// Category severity weights applied when aggregating.
    #[serde(default = "default_severity")]
    pub severity: HashMap<IndicatorCategory, f64>,

    /// Per-destination overrides, keyed by destination identifier.
    #[serde(default)]
    pub destinations: HashMap<String, DestinationPolicy>,
}

/// Threshold overrides for a single destination.
///
/// A stricter profile for public search services and a looser one for
/// in-house drafting tools are the expected uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationPolicy {
    #[serde(default)]
    pub category_block_threshold: Option<f64>,

    #[serde(default)]
    pub high_threshold: Option<f64>,

    #[serde(default)]
    pub low_threshold: Option<f64>,

    /// Categories whose scores are ignored for this destination.
    ///
    /// PRIVILEGE_ASSERTION and CLIENT_IDENTIFIER cannot be exempted; the
    /// per-category block rule always applies.
    #[serde(default)]
    pub exempt_categories: Vec<IndicatorCategory>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            category_block_threshold: default_category_block_threshold(),
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
            severity: default_severity(),
            destinations: HashMap::new(),
        }
    }
}

impl PolicyConfig {
    /// Severity weight for a category (1.0 when not configured).
    pub fn severity_for(&self, category: IndicatorCategory) -> f64 {
        self.severity.get(&category).copied().unwrap_or(1.0)
    }
}

fn default_category_block_threshold() -> f64 {
    0.6
}

fn default_high_threshold() -> f64 {
    0.75
}

fn default_low_threshold() -> f64 {
    0.35
}

fn default_severity() -> HashMap<IndicatorCategory, f64> {
    HashMap::from([
        (IndicatorCategory::PrivilegeAssertion, 1.0),
        (IndicatorCategory::ClientIdentifier, 1.0),
        (IndicatorCategory::InternalMemo, 0.9),
        (IndicatorCategory::CaseFileRef, 0.6),
    ])
}
