//! # lexgate-scan
//!
//! Indicator corpus and payload scoring for the Lexgate privilege gate.
//!
//! This crate provides functionality to:
//! - Load the multilingual indicator corpus (built-in sets plus YAML
//!   extensions), failing entirely on any malformed entry
//! - Score a payload against the corpus, accumulating per-category weights
//! - Normalize payloads (NFC) so de/fr/it diacritics match regardless of
//!   composed/decomposed encoding
//!
//! ## Data Flow
//!
//! ```text
//! outbound payload
//!       │
//!       ▼
//! ┌──────────────────┐
//! │  Scorer          │
//! │  1. NFC normalize│
//! │  2. Window/trunc │
//! │  3. Match corpus │  ← Corpus (immutable, shared)
//! │  4. Accumulate   │
//! └────────┬─────────┘
//!          │
//!          ▼
//!     ScoreReport (per-category weights, truncation flag)
//! ```
//!
//! Scoring is deterministic and order-independent: indicators are evaluated
//! in stable corpus load order and categories are keyed by a `BTreeMap`, so
//! the same payload always yields the same report.

pub mod builtin;
pub mod corpus;
pub mod error;
pub mod scorer;

pub use corpus::{Corpus, Indicator};
pub use error::{CorpusError, ScanError};
pub use scorer::{PayloadScanner, Scorer};
