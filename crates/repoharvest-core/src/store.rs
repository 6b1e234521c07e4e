// SPDX-License-Identifier: Apache-2.0

//! Append-only CSV store with checkpoint derivation.
//!
//! The store is the only durable state this tool keeps: the resume cursor
//! is not persisted separately but re-derived as the maximum `id` present
//! in the file. Invariants: the file is valid CSV at all times, rows are
//! flushed whole, and the header row is written at most once.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::debug;

use crate::error::HarvestError;
use crate::record::RepoRecord;

/// Append-only CSV store for harvested repository records.
pub struct CsvStore {
    path: PathBuf,
    writer: csv::Writer<File>,
    needs_header: bool,
}

impl CsvStore {
    /// Opens the store at `path`, creating the file if it does not exist.
    ///
    /// The header is written on the first append iff the file was empty
    /// when opened.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its metadata read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HarvestError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let needs_header = file.metadata()?.len() == 0;
        debug!(path = %path.display(), needs_header, "Opened CSV store");

        // Headers are managed manually: serde serialization must never
        // emit its own header row into a file that already has one.
        let writer = WriterBuilder::new().has_headers(false).from_writer(file);

        Ok(Self {
            path,
            writer,
            needs_header,
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record and flushes it to disk.
    ///
    /// The flush makes the row (and, on the first append into an empty
    /// file, the header) externally observable immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn append(&mut self, record: &RepoRecord) -> Result<(), HarvestError> {
        if self.needs_header {
            self.writer.write_record(RepoRecord::COLUMNS)?;
            self.needs_header = false;
        }
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Derives the checkpoint: the maximum `id` currently in the store.
    ///
    /// Returns `None` ("unset") for a missing or empty store. Derivation is
    /// idempotent: the same file contents always yield the same cursor.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Checkpoint`] when a non-empty store has no
    /// `id` column or an `id` cell does not parse as an integer; resumption
    /// cannot proceed safely past either.
    pub fn last_id(&self) -> Result<Option<u64>, HarvestError> {
        read_last_id(&self.path)
    }

    /// Counts the data rows currently in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as CSV.
    pub fn record_count(&self) -> Result<u64, HarvestError> {
        read_record_count(&self.path)
    }
}

/// Reads the maximum `id` from a store file without holding a writer.
pub fn read_last_id(path: impl AsRef<Path>) -> Result<Option<u64>, HarvestError> {
    let path = path.as_ref();
    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_index =
        headers
            .iter()
            .position(|h| h == "id")
            .ok_or_else(|| HarvestError::Checkpoint {
                message: format!("store {} has no `id` column", path.display()),
            })?;

    let mut max_id: Option<u64> = None;
    for row in reader.records() {
        let row = row?;
        let cell = row.get(id_index).unwrap_or("");
        let id = cell
            .trim()
            .parse::<u64>()
            .map_err(|_| HarvestError::Checkpoint {
                message: format!("store {} has non-integer id {cell:?}", path.display()),
            })?;
        max_id = Some(max_id.map_or(id, |m| m.max(id)));
    }

    Ok(max_id)
}

/// Counts the data rows in a store file.
pub fn read_record_count(path: impl AsRef<Path>) -> Result<u64, HarvestError> {
    let path = path.as_ref();
    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        return Ok(0);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut count = 0u64;
    for row in reader.records() {
        row?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn record(id: u64) -> RepoRecord {
        RepoRecord::project(&json!({
            "id": id,
            "name": format!("repo-{id}"),
            "owner": {"login": "octocat"},
            "private": false,
            "fork": false,
            "language": "C",
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_store_cursor_is_unset() {
        let dir = tempdir().unwrap();
        let store = CsvStore::open(dir.path().join("repos.csv")).unwrap();
        assert_eq!(store.last_id().unwrap(), None);
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[test]
    fn test_missing_store_cursor_is_unset() {
        let dir = tempdir().unwrap();
        assert_eq!(read_last_id(dir.path().join("absent.csv")).unwrap(), None);
    }

    #[test]
    fn test_cursor_is_maximum_id() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let mut store = CsvStore::open(&path).unwrap();
        for id in [5, 12, 3] {
            store.append(&record(id)).unwrap();
        }
        assert_eq!(store.last_id().unwrap(), Some(12));
    }

    #[test]
    fn test_cursor_derivation_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let mut store = CsvStore::open(&path).unwrap();
        store.append(&record(9)).unwrap();
        assert_eq!(store.last_id().unwrap(), store.last_id().unwrap());
    }

    #[test]
    fn test_header_written_once_across_open_cycles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        {
            let mut store = CsvStore::open(&path).unwrap();
            store.append(&record(1)).unwrap();
            store.append(&record(2)).unwrap();
        }
        {
            let mut store = CsvStore::open(&path).unwrap();
            store.append(&record(3)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let header_lines = contents
            .lines()
            .filter(|l| l.starts_with("id,name,"))
            .count();
        assert_eq!(header_lines, 1);
        assert_eq!(read_record_count(&path).unwrap(), 3);
        assert_eq!(read_last_id(&path).unwrap(), Some(3));
    }

    #[test]
    fn test_header_observable_after_first_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let mut store = CsvStore::open(&path).unwrap();
        store.append(&record(1)).unwrap();

        // Read back through an independent handle while the writer is open.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,name,"));
        assert_eq!(read_last_id(&path).unwrap(), Some(1));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        let mut store = CsvStore::open(&path).unwrap();
        let original = record(77);
        store.append(&original).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<RepoRecord> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(rows, vec![original]);
    }

    #[test]
    fn test_non_integer_id_cell_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        std::fs::write(&path, "id,name\nabc,broken\n").unwrap();
        let err = read_last_id(&path).unwrap_err();
        assert!(matches!(err, HarvestError::Checkpoint { .. }));
    }

    #[test]
    fn test_missing_id_column_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repos.csv");
        std::fs::write(&path, "name,language\nfoo,C\n").unwrap();
        let err = read_last_id(&path).unwrap_err();
        assert!(matches!(err, HarvestError::Checkpoint { .. }));
    }
}
