//! CLI command implementations for the Lexgate privilege gate.

pub mod audit;
pub mod check;
pub mod scan;

use anyhow::Context;
use lexgate_core::LexgateConfig;
use std::path::Path;

/// Load configuration, falling back to the built-in defaults when no
/// configuration file is present.
pub fn load_config(path: &Path) -> anyhow::Result<LexgateConfig> {
    if path.exists() {
        LexgateConfig::load_with_context(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    } else {
        tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        Ok(LexgateConfig::default())
    }
}
