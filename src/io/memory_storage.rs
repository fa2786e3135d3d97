//! In-memory storage
//!
//! Keeps each collection's encoded bytes in a map. Writes can be switched to
//! fail, which makes persistence failures reproducible without touching disk.

use crate::core::traits::Storage;
use crate::types::{Collection, FleetError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    resources: RefCell<HashMap<Collection, Vec<u8>>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection's resource, as if written by an earlier run
    pub fn with_contents(self, collection: Collection, contents: &str) -> Self {
        self.resources
            .borrow_mut()
            .insert(collection, contents.as_bytes().to_vec());
        self
    }

    /// Make every following write fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Current contents of a collection as text
    pub fn contents(&self, collection: Collection) -> Option<String> {
        self.resources
            .borrow()
            .get(&collection)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, FleetError> {
        Ok(self.resources.borrow().get(&collection).cloned())
    }

    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), FleetError> {
        if self.fail_writes.get() {
            return Err(FleetError::persistence(collection, "storage is read-only"));
        }
        self.resources
            .borrow_mut()
            .insert(collection, contents.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
