// SPDX-License-Identifier: Apache-2.0

//! Store status command: record count and resume checkpoint.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::output::StatusReport;
use repoharvest_core::AppConfig;
use repoharvest_core::store::{read_last_id, read_record_count};

/// Inspects the store without opening it for writing.
pub fn run(file: Option<PathBuf>, config: &AppConfig) -> Result<StatusReport> {
    let path = file.unwrap_or_else(|| config.harvest.output_file.clone());
    let exists = path.exists();

    let checkpoint = read_last_id(&path)
        .with_context(|| format!("Failed to derive checkpoint from {}", path.display()))?;
    let records = read_record_count(&path)
        .with_context(|| format!("Failed to read store {}", path.display()))?;

    Ok(StatusReport {
        file: path,
        exists,
        records,
        checkpoint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoharvest_core::{CsvStore, RepoRecord};
    use tempfile::tempdir;

    #[test]
    fn test_status_missing_store() {
        let dir = tempdir().unwrap();
        let config = AppConfig::default();
        let report = run(Some(dir.path().join("absent.csv")), &config).unwrap();
        assert!(!report.exists);
        assert_eq!(report.records, 0);
        assert_eq!(report.checkpoint, None);
    }

    #[test]
    fn test_status_reports_maximum_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let mut store = CsvStore::open(&path).unwrap();
        for id in [5, 12, 3] {
            let record = RepoRecord::project(&serde_json::json!({"id": id})).unwrap();
            store.append(&record).unwrap();
        }

        let report = run(Some(path), &AppConfig::default()).unwrap();
        assert!(report.exists);
        assert_eq!(report.records, 3);
        assert_eq!(report.checkpoint, Some(12));
    }
}
