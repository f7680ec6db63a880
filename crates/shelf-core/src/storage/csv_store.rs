//! CSV-file storage backend.
//!
//! One file per entity kind inside a data directory: `books.csv`,
//! `members.csv`, `loans.csv`. Each file is a header row followed by one row
//! per record. Writes go through a temp file and a rename.
//!
//! There is no lock on the directory. Two processes saving the same kind
//! race, and the last save wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::traits::{Record, RecordStore};
use crate::error::{Result, ShelfError};
use crate::storage::EntityKind;

/// CSV-backed record store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    /// Create a store for `data_dir` without touching the filesystem.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create a store, creating the data directory if it is missing.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(data_dir);
        fs::create_dir_all(&store.data_dir).map_err(|e| {
            ShelfError::Storage(format!(
                "Failed to create data directory {}: {}",
                store.data_dir.display(),
                e
            ))
        })?;
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the backing file for `kind`.
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.data_dir.join(format!("{}.csv", kind.file_stem()))
    }

    fn encode<R: Record>(records: &[R]) -> Result<Vec<u8>> {
        // Header is written by hand so an empty collection still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(R::COLUMNS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer
            .into_inner()
            .map_err(|e| ShelfError::Storage(format!("CSV flush failed: {}", e)))
    }
}

impl RecordStore for CsvStore {
    fn load<R: Record>(&self) -> Result<Vec<R>> {
        let path = self.path_for(R::KIND);
        if !path.exists() {
            debug!(kind = %R::KIND, path = %path.display(), "no backing file, empty collection");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new().from_path(&path)?;
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        if !headers.iter().eq(R::COLUMNS.iter().copied()) {
            return Err(ShelfError::Storage(format!(
                "Unexpected header in {}: expected {}, found {}",
                path.display(),
                R::COLUMNS.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<R>, csv::Error>>()?;
        debug!(kind = %R::KIND, count = records.len(), "loaded records");
        Ok(records)
    }

    fn save<R: Record>(&self, records: &[R]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.path_for(R::KIND);
        let data = Self::encode(records)?;
        crate::fs::write_atomic(&path, &data).map_err(|e| {
            ShelfError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!(kind = %R::KIND, count = records.len(), "saved records");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Book, Loan};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let books: Vec<Book> = store.load().unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn test_empty_save_writes_header_only() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        store.save::<Loan>(&[]).unwrap();

        let contents = fs::read_to_string(store.path_for(EntityKind::Loan)).unwrap();
        assert_eq!(
            contents,
            "LoanID,ISBN,MemberID,IssueDate,DueDate,ReturnDate\n"
        );
    }

    #[test]
    fn test_active_loan_writes_empty_return_date() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        let issued = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store.save(&[Loan::issue(1001, "111", "M1", issued).unwrap()]).unwrap();

        let contents = fs::read_to_string(store.path_for(EntityKind::Loan)).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(row, "1001,111,M1,2024-01-01,2024-01-15,");
    }

    #[test]
    fn test_wrong_header_is_storage_error() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        fs::write(
            store.path_for(EntityKind::Book),
            "Title,ISBN,Author,CopiesTotal,CopiesAvailable\n",
        )
        .unwrap();

        let err = store.load::<Book>().unwrap_err();
        assert!(matches!(err, ShelfError::Storage(_)));
    }

    #[test]
    fn test_open_creates_data_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let store = CsvStore::open(&nested).unwrap();
        assert!(store.data_dir().is_dir());
    }
}
