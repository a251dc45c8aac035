//! Lexgate Decision Engine
//!
//! Turns a [`ScoreReport`](lexgate_core::ScoreReport) into a
//! [`Verdict`](lexgate_core::Verdict) by applying ordered policy rules:
//!
//! 1. A block-grade category (PRIVILEGE_ASSERTION, CLIENT_IDENTIFIER) at or
//!    above its threshold blocks outright.
//! 2. A severity-weighted aggregate at or above the high threshold blocks.
//! 3. An aggregate at or above the low threshold, or a truncated scan,
//!    warns.
//! 4. Otherwise the payload is allowed.
//!
//! First match wins. Thresholds and severity weights are configurable, with
//! per-destination overrides (stricter profiles for public search services,
//! looser ones for in-house drafting tools). Invalid policy configuration
//! reverts to the default policy; it never disables the gate.

pub mod engine;
pub mod error;

pub use engine::DecisionEngine;
pub use error::PolicyError;
