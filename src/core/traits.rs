//! Core traits for the fleet store
//!
//! This module defines the storage abstraction that lets the fleet repository
//! persist its collections to disk or to memory interchangeably.

use crate::types::{Collection, FleetError};

/// Backing resource for the three persisted collections
///
/// Each collection maps to one resource holding its encoded records.
/// Implementations only move bytes; encoding lives in [`crate::io::codec`].
pub trait Storage {
    /// Read a collection's resource
    ///
    /// Returns `Ok(None)` when the resource does not exist yet.
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, FleetError>;

    /// Replace a collection's resource with `contents`
    ///
    /// Truncate-and-rewrite: nothing from the previous contents survives.
    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), FleetError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, collection: Collection) -> Result<Option<Vec<u8>>, FleetError> {
        (**self).read(collection)
    }

    fn write(&self, collection: Collection, contents: &[u8]) -> Result<(), FleetError> {
        (**self).write(collection, contents)
    }
}
