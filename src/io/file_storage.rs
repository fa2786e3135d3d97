//! File-backed storage
//!
//! Stores each collection in its own text file inside a data directory:
//! `cars.txt`, `customers.txt` and `rentals.txt`. Writes truncate and
//! rewrite the whole file; there is no append or patching.

use crate::core::traits::Storage;
use crate::types::{Collection, FleetError};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

/// Storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name used for a collection
    pub fn file_name(collection: Collection) -> &'static str {
        match collection {
            Collection::Cars => "cars.txt",
            Collection::Customers => "customers.txt",
            Collection::Rentals => "rentals.txt",
        }
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(Self::file_name(collection))
    }
}

impl Storage for FileStorage {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, FleetError> {
        let path = self.path(collection);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(FleetError::persistence(
                collection,
                format!("failed to read '{}': {}", path.display(), e),
            )),
        }
    }

    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), FleetError> {
        let path = self.path(collection);

        fs::create_dir_all(&self.dir).map_err(|e| {
            FleetError::persistence(
                collection,
                format!("failed to create '{}': {}", self.dir.display(), e),
            )
        })?;

        fs::write(&path, contents).map_err(|e| {
            FleetError::persistence(
                collection,
                format!("failed to write '{}': {}", path.display(), e),
            )
        })?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "collection saved");
        Ok(())
    }
}
