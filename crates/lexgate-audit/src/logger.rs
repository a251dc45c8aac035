//! Audit logger implementation.
//!
//! Provides the main `AuditLogger` type: backend selection from
//! configuration, the append path used by the gate hook, and query helpers
//! for observability tooling.

use lexgate_core::config::{AuditBackend, AuditConfig};
use lexgate_core::{Outcome, PolicyRule};
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::AuditError;
use crate::record::AuditRecord;
use crate::storage::{AuditStorage, ConsoleStorage, FileStorage, MemoryStorage, NullStorage};

/// The main audit logger.
pub struct AuditLogger {
    config: AuditConfig,
    storage: Arc<dyn AuditStorage>,
}

impl AuditLogger {
    /// Create a new audit logger with the given configuration.
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        let storage: Arc<dyn AuditStorage> = if !config.enabled {
            Arc::new(NullStorage::new())
        } else {
            match config.backend {
                AuditBackend::Memory => Arc::new(MemoryStorage::new()),
                AuditBackend::File => {
                    let path = config
                        .file_path
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("lexgate-audit.log"));
                    Arc::new(FileStorage::new(path)?)
                }
                AuditBackend::Console => Arc::new(ConsoleStorage::new()),
            }
        };

        Ok(Self { config, storage })
    }

    /// Create a logger with a custom storage backend.
    pub fn with_storage(config: AuditConfig, storage: Arc<dyn AuditStorage>) -> Self {
        Self { config, storage }
    }

    /// Create a disabled (no-op) logger.
    pub fn disabled() -> Self {
        Self {
            config: AuditConfig {
                enabled: false,
                ..Default::default()
            },
            storage: Arc::new(NullStorage::new()),
        }
    }

    /// Create an in-memory logger (the default; useful in tests).
    pub fn in_memory() -> Self {
        Self {
            config: AuditConfig::default(),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// Create a console-only logger (useful for development).
    pub fn console_only() -> Self {
        Self {
            config: AuditConfig {
                enabled: true,
                backend: AuditBackend::Console,
                ..Default::default()
            },
            storage: Arc::new(ConsoleStorage::new()),
        }
    }

    /// Check if logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Append a record.
    ///
    /// Returns the record with its assigned sequence number, or `None`
    /// when logging is disabled.
    pub async fn append(&self, record: AuditRecord) -> Result<Option<AuditRecord>, AuditError> {
        if !self.config.enabled {
            return Ok(None);
        }

        // Also log to tracing for structured logging integration
        tracing::debug!(
            record_id = %record.record_id,
            destination = %record.destination,
            outcome = %record.outcome,
            rule = %record.rule,
            "audit record"
        );

        if self.config.stdout && self.config.backend != AuditBackend::Console {
            println!("{}", record.to_log_line());
        }

        self.storage.append(record).await.map(Some)
    }

    /// Query records with filters.
    pub async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        self.storage.query(filter).await
    }

    /// Count records matching a filter (ignores limit/offset).
    pub async fn count(&self, filter: AuditFilter) -> Result<usize, AuditError> {
        self.storage.count(filter).await
    }

    /// Get a record by ID.
    pub async fn get(&self, record_id: uuid::Uuid) -> Result<Option<AuditRecord>, AuditError> {
        self.storage.get(record_id).await
    }

    /// Get the most recent records.
    pub async fn recent(&self, limit: usize) -> Result<Vec<AuditRecord>, AuditError> {
        let total = self.count(AuditFilter::default()).await?;
        self.query(AuditFilter {
            offset: Some(total.saturating_sub(limit)),
            limit: Some(limit),
            ..Default::default()
        })
        .await
    }

    /// Get recent records for one destination.
    pub async fn recent_for_destination(
        &self,
        destination: &str,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        let filter = AuditFilter {
            destination: Some(destination.to_string()),
            ..Default::default()
        };
        let total = self.count(filter.clone()).await?;
        self.query(AuditFilter {
            offset: Some(total.saturating_sub(limit)),
            limit: Some(limit),
            ..filter
        })
        .await
    }
}

/// Filter for querying audit records.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by destination.
    pub destination: Option<String>,
    /// Filter by outcome.
    pub outcome: Option<Outcome>,
    /// Filter by policy rule.
    pub rule: Option<PolicyRule>,
    /// Filter by start time.
    pub since: Option<chrono::DateTime<chrono::Utc>>,
    /// Filter by end time.
    pub until: Option<chrono::DateTime<chrono::Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Offset into the result set.
    pub offset: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgate_core::{IndicatorCategory, Verdict};

    fn record(destination: &str, outcome: Outcome, rule: PolicyRule) -> AuditRecord {
        AuditRecord::builder(destination)
            .verdict(&Verdict {
                outcome,
                risk_score: 0.5,
                categories: vec![IndicatorCategory::InternalMemo],
                rule,
                truncated: false,
            })
            .build()
    }

    #[tokio::test]
    async fn disabled_logger_appends_nothing() {
        let logger = AuditLogger::disabled();
        assert!(!logger.is_enabled());

        let appended = logger
            .append(record("research", Outcome::Allow, PolicyRule::Default))
            .await
            .unwrap();
        assert!(appended.is_none());
        assert!(logger.query(AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn in_memory_logger_appends_and_queries() {
        let logger = AuditLogger::in_memory();
        assert!(logger.is_enabled());

        logger
            .append(record("research", Outcome::Allow, PolicyRule::Default))
            .await
            .unwrap();
        logger
            .append(record("research", Outcome::Block, PolicyRule::CategoryBlock))
            .await
            .unwrap();

        let blocks = logger
            .query(AuditFilter {
                outcome: Some(Outcome::Block),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rule, PolicyRule::CategoryBlock);
    }

    #[tokio::test]
    async fn recent_returns_last_records_in_order() {
        let logger = AuditLogger::in_memory();
        for i in 0..5 {
            logger
                .append(record(&format!("dest-{}", i), Outcome::Allow, PolicyRule::Default))
                .await
                .unwrap();
        }

        let recent = logger.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].destination, "dest-3");
        assert_eq!(recent[1].destination, "dest-4");
        assert!(recent[0].sequence < recent[1].sequence);
    }

    #[tokio::test]
    async fn file_backend_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuditConfig {
            enabled: true,
            backend: AuditBackend::File,
            file_path: Some(dir.path().join("audit.log")),
            stdout: false,
        };
        let logger = AuditLogger::new(config).unwrap();
        let appended = logger
            .append(record("research", Outcome::Warn, PolicyRule::Elevated))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(appended.sequence, 1);
    }
}
