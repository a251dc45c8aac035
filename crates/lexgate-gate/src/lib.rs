//! # lexgate-gate
//!
//! Outbound-call interception hook for the Lexgate privilege gate.
//!
//! This crate implements the synchronous pre-call hook that:
//! - Scores the payload against the multilingual indicator corpus
//! - Applies the decision policy (per-destination thresholds)
//! - Enforces a latency budget, failing closed on timeout
//! - Appends exactly one audit record per call, whatever the outcome
//!
//! ## Architecture
//!
//! ```text
//! Agent / command dispatch
//!       │
//!       │ outbound-call descriptor
//!       ▼
//! ┌─────────────────┐
//! │  Lexgate Gate   │
//! │  1. Score       │  ← lexgate-scan
//! │  2. Decide      │  ← lexgate-policy
//! │  3. Audit       │  ← lexgate-audit
//! └────────┬────────┘
//!          │
//!    forward / blocked
//!          │
//!          ▼
//! External research / drafting service (forward only)
//! ```
//!
//! Every per-call failure (scorer crash, latency budget exceeded) resolves
//! to a BLOCK verdict. No error path lets a payload through unscanned.
//!
//! ## Usage
//!
//! ```no_run
//! use lexgate_core::LexgateConfig;
//! use lexgate_gate::{Gate, GateDecision, OutboundCall};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LexgateConfig::default();
//!     let gate = Gate::from_config(&config)?;
//!
//!     let call = OutboundCall::new("precedent-search", "Query text");
//!     match gate.intercept(call).await {
//!         GateDecision::Forward { call, verdict } => {
//!             // issue the call; verdict may be WARN
//!             let _ = (call, verdict);
//!         }
//!         GateDecision::Blocked(blocked) => {
//!             eprintln!("{}", blocked.message);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gate;

pub use error::GateError;
pub use gate::{BlockedCall, Gate, GateDecision, OutboundCall};
