//! Audit storage backends.

use crate::error::AuditError;
use crate::logger::AuditFilter;
use crate::record::AuditRecord;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

/// Trait for audit storage backends.
///
/// `append` assigns the record's sequence number: backends serialize
/// appends so sequence numbers form a strict total order across concurrent
/// scans.
#[async_trait]
pub trait AuditStorage: Send + Sync {
    /// Append a record, returning it with its assigned sequence number.
    async fn append(&self, record: AuditRecord) -> Result<AuditRecord, AuditError>;

    /// Query records with filters.
    async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError>;

    /// Count records matching a filter (ignores limit/offset).
    async fn count(&self, filter: AuditFilter) -> Result<usize, AuditError>;

    /// Get a record by ID.
    async fn get(&self, record_id: Uuid) -> Result<Option<AuditRecord>, AuditError>;
}

fn matches(record: &AuditRecord, filter: &AuditFilter) -> bool {
    if let Some(ref destination) = filter.destination {
        if &record.destination != destination {
            return false;
        }
    }
    if let Some(outcome) = filter.outcome {
        if record.outcome != outcome {
            return false;
        }
    }
    if let Some(rule) = filter.rule {
        if record.rule != rule {
            return false;
        }
    }
    if let Some(since) = filter.since {
        if record.occurred_at < since {
            return false;
        }
    }
    if let Some(until) = filter.until {
        if record.occurred_at > until {
            return false;
        }
    }
    true
}

fn apply_filter(records: &[AuditRecord], filter: &AuditFilter) -> Vec<AuditRecord> {
    let mut results: Vec<AuditRecord> = records
        .iter()
        .filter(|r| matches(r, filter))
        .cloned()
        .collect();
    if let Some(offset) = filter.offset {
        results = results.into_iter().skip(offset).collect();
    }
    if let Some(limit) = filter.limit {
        results.truncate(limit);
    }
    results
}

/// In-memory storage (queryable; lifecycle = process).
pub struct MemoryStorage {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStorage for MemoryStorage {
    async fn append(&self, mut record: AuditRecord) -> Result<AuditRecord, AuditError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AuditError::AppendFailed(format!("lock poisoned: {}", e)))?;
        record.sequence = records.len() as u64 + 1;
        records.push(record.clone());
        Ok(record)
    }

    async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(apply_filter(&records, &filter))
    }

    async fn count(&self, filter: AuditFilter) -> Result<usize, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(records.iter().filter(|r| matches(r, &filter)).count())
    }

    async fn get(&self, record_id: Uuid) -> Result<Option<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(records.iter().find(|r| r.record_id == record_id).cloned())
    }
}

/// File storage (appends JSON Lines; keeps an in-memory index for queries).
pub struct FileStorage {
    path: PathBuf,
    records: RwLock<Vec<AuditRecord>>,
}

impl FileStorage {
    /// Open a file storage, loading any existing records so the sequence
    /// continues across restarts.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let mut records = Vec::new();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let record: AuditRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }
}

#[async_trait]
impl AuditStorage for FileStorage {
    async fn append(&self, mut record: AuditRecord) -> Result<AuditRecord, AuditError> {
        // Sequence assignment and the file write happen under the same
        // write lock; that is what makes the order total.
        let mut records = self
            .records
            .write()
            .map_err(|e| AuditError::AppendFailed(format!("lock poisoned: {}", e)))?;
        record.sequence = records.last().map(|r| r.sequence).unwrap_or(0) + 1;

        let json = serde_json::to_string(&record)?;
        use std::io::Write;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", json)?;

        records.push(record.clone());
        Ok(record)
    }

    async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(apply_filter(&records, &filter))
    }

    async fn count(&self, filter: AuditFilter) -> Result<usize, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(records.iter().filter(|r| matches(r, &filter)).count())
    }

    async fn get(&self, record_id: Uuid) -> Result<Option<AuditRecord>, AuditError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditError::QueryFailed(format!("lock poisoned: {}", e)))?;
        Ok(records.iter().find(|r| r.record_id == record_id).cloned())
    }
}

/// Console storage (prints human-readable lines to stdout).
pub struct ConsoleStorage {
    sequence: AtomicU64,
}

impl ConsoleStorage {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for ConsoleStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStorage for ConsoleStorage {
    async fn append(&self, mut record: AuditRecord) -> Result<AuditRecord, AuditError> {
        record.sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        println!("{}", record.to_log_line());
        Ok(record)
    }

    async fn query(&self, _filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        // Console storage doesn't support querying
        Ok(vec![])
    }

    async fn count(&self, _filter: AuditFilter) -> Result<usize, AuditError> {
        Ok(0)
    }

    async fn get(&self, _record_id: Uuid) -> Result<Option<AuditRecord>, AuditError> {
        Ok(None)
    }
}

/// No-op storage used when audit logging is disabled.
pub struct NullStorage;

impl NullStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditStorage for NullStorage {
    async fn append(&self, record: AuditRecord) -> Result<AuditRecord, AuditError> {
        Ok(record)
    }

    async fn query(&self, _filter: AuditFilter) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(vec![])
    }

    async fn count(&self, _filter: AuditFilter) -> Result<usize, AuditError> {
        Ok(0)
    }

    async fn get(&self, _record_id: Uuid) -> Result<Option<AuditRecord>, AuditError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgate_core::{Outcome, PolicyRule, Verdict};

    fn allow_record(destination: &str) -> AuditRecord {
        AuditRecord::builder(destination)
            .verdict(&Verdict {
                outcome: Outcome::Allow,
                risk_score: 0.0,
                categories: Vec::new(),
                rule: PolicyRule::Default,
                truncated: false,
            })
            .build()
    }

    #[tokio::test]
    async fn memory_storage_assigns_sequences() {
        let storage = MemoryStorage::new();
        let first = storage.append(allow_record("a")).await.unwrap();
        let second = storage.append(allow_record("b")).await.unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(second.sequence, 2);
    }

    #[tokio::test]
    async fn memory_storage_filters_by_destination() {
        let storage = MemoryStorage::new();
        storage.append(allow_record("research")).await.unwrap();
        storage.append(allow_record("drafting")).await.unwrap();

        let filter = AuditFilter {
            destination: Some("research".to_string()),
            ..Default::default()
        };
        let results = storage.query(filter.clone()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].destination, "research");
        assert_eq!(storage.count(filter).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn file_storage_round_trips_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");

        let storage = FileStorage::new(&path).unwrap();
        let appended = storage.append(allow_record("research")).await.unwrap();
        assert_eq!(appended.sequence, 1);
        drop(storage);

        // Reopening continues the sequence from the persisted records.
        let reopened = FileStorage::new(&path).unwrap();
        let next = reopened.append(allow_record("drafting")).await.unwrap();
        assert_eq!(next.sequence, 2);

        let all = reopened.query(AuditFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].destination, "research");
    }

    #[tokio::test]
    async fn get_by_id() {
        let storage = MemoryStorage::new();
        let appended = storage.append(allow_record("research")).await.unwrap();
        let found = storage.get(appended.record_id).await.unwrap();
        assert!(found.is_some());
        assert!(storage.get(Uuid::new_v4()).await.unwrap().is_none());
    }
}
