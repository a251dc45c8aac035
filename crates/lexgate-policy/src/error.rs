//! Policy configuration validation errors.

use lexgate_core::IndicatorCategory;
use thiserror::Error;

/// Errors found while validating a policy configuration.
///
/// An invalid policy never disables the gate: the decision engine reverts
/// to the default policy instead.
#[derive(Debug, Clone, Error)]
pub enum PolicyError {
    /// A threshold is outside [0, 1].
    #[error("threshold '{name}' = {value} is outside [0, 1]")]
    InvalidThreshold { name: String, value: f64 },

    /// The low threshold exceeds the high threshold.
    #[error("low_threshold {low} exceeds high_threshold {high}")]
    ThresholdOrder { low: f64, high: f64 },

    /// A severity weight is outside [0, 1].
    #[error("severity for {category} = {value} is outside [0, 1]")]
    InvalidSeverity {
        category: IndicatorCategory,
        value: f64,
    },

    /// A destination tries to exempt a block-grade category.
    #[error("destination '{destination}' cannot exempt {category}")]
    ExemptionNotAllowed {
        destination: String,
        category: IndicatorCategory,
    },
}
