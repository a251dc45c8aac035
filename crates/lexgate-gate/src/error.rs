//! Error types for the gate crate.

use thiserror::Error;

/// Errors that can occur while constructing a gate.
///
/// There are deliberately no per-call variants: once the gate is built,
/// every per-call failure resolves to a BLOCK verdict instead of an error
/// that could bypass the hook.
#[derive(Debug, Error)]
pub enum GateError {
    /// The indicator corpus failed to load. Fatal at startup; the gate
    /// must not serve scans with a partially loaded corpus.
    #[error("corpus load failed: {0}")]
    Corpus(#[from] lexgate_scan::CorpusError),

    /// The audit logger failed to initialize.
    #[error("audit initialization failed: {0}")]
    Audit(#[from] lexgate_audit::AuditError),
}
