//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the payload scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum number of characters scanned per payload. Longer payloads
    /// are scanned up to this window and flagged as truncated.
    #[serde(default = "default_max_payload_chars")]
    pub max_payload_chars: usize,

    /// Latency budget for a single scan, in milliseconds. Exceeding it
    /// resolves to BLOCK.
    #[serde(default = "default_scan_timeout_ms")]
    pub scan_timeout_ms: u64,

    /// Restrict matching to the declared language's indicators.
    ///
    /// Off by default: mixed-language documents are common in Swiss
    /// practice, so the full multilingual corpus is evaluated.
    #[serde(default)]
    pub restrict_to_declared_language: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_payload_chars: default_max_payload_chars(),
            scan_timeout_ms: default_scan_timeout_ms(),
            restrict_to_declared_language: false,
        }
    }
}

fn default_max_payload_chars() -> usize {
    65_536
}

fn default_scan_timeout_ms() -> u64 {
    2_000
}
