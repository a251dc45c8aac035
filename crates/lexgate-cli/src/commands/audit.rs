//! `lexgate audit` command implementation.

use anyhow::bail;
use lexgate_audit::AuditLogger;
use lexgate_core::config::AuditBackend;
use std::path::Path;

pub async fn run(config_path: &Path, tail: usize, json: bool) -> anyhow::Result<i32> {
    let config = super::load_config(config_path)?;

    if config.audit.backend != AuditBackend::File {
        bail!(
            "audit history is only queryable across processes with the file backend; \
             set `audit.backend: file` in {}",
            config_path.display()
        );
    }

    let logger = AuditLogger::new(config.audit.clone())?;
    let records = logger.recent(tail).await?;

    if records.is_empty() {
        println!("no audit records");
        return Ok(0);
    }

    for record in &records {
        if json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            println!("{}", record.to_log_line());
        }
    }

    Ok(0)
}
