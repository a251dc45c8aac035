//! # lexgate-audit
//!
//! Audit logging for the Lexgate privilege gate.
//!
//! This crate provides functionality for:
//! - Recording one audit record per scan, whatever the verdict
//! - Storing records in memory, in a JSON Lines file, or on the console
//! - Assigning strictly increasing sequence numbers so concurrent scans
//!   leave a total order with no lost or duplicated entries
//! - Querying audit history with filters
//!
//! ## Record Contents
//!
//! Records carry scan metadata and the verdict only, never the payload
//! text and never matched fragments. The gate exists to keep privileged
//! material inside the local environment; its own log must not become the
//! leak.
//!
//! | Field | Description |
//! |-------|-------------|
//! | `destination` | External service the call targeted |
//! | `payload_chars` | Payload length in characters |
//! | `truncated` | Whether only a prefix was scanned |
//! | `outcome` / `rule` / `risk_score` | The verdict |
//! | `error` | Error kind for fail-closed verdicts |
//! | `latency_ms` | Decision latency |

pub mod error;
pub mod logger;
pub mod record;
pub mod storage;

pub use error::AuditError;
pub use logger::{AuditFilter, AuditLogger};
pub use record::{AuditRecord, AuditRecordBuilder};
pub use storage::{AuditStorage, ConsoleStorage, FileStorage, MemoryStorage, NullStorage};
