//! Generic in-memory record collection
//!
//! This module provides the RecordStore component backing the car, customer
//! and rental repositories. Each store owns an ordered `Vec` of records and an
//! id allocator that is kept separate from the collection size.
//!
//! # Identifier Allocation
//!
//! Ids start at 1 and only ever grow. Deleting a record never frees its id, so
//! a later insert cannot collide with or impersonate a removed record. After a
//! load the allocator resumes above the highest persisted id, or above any
//! higher id the owner reserves because other records still refer to it.
//!
//! # Ordering
//!
//! Records keep insertion order. Removal is order-preserving compaction: the
//! records after the removed one shift left by one position, keeping their ids
//! and contents.

use crate::types::{FleetError, Record, RecordId};

/// Ordered collection of records with a monotonic id allocator
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    /// Next id to hand out, independent of `records.len()`
    next_id: RecordId,
    /// Maximum number of live records, if bounded
    capacity: Option<usize>,
}

impl<T: Record> RecordStore<T> {
    /// Create an empty, unbounded store
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
            next_id: 1,
            capacity: None,
        }
    }

    /// Create an empty store that refuses inserts beyond `capacity` records
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        RecordStore {
            capacity,
            ..Self::new()
        }
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    /// Check an insert would succeed without performing it
    pub fn ensure_room(&self) -> Result<(), FleetError> {
        match self.capacity {
            Some(capacity) if self.records.len() >= capacity => {
                Err(FleetError::capacity_exceeded(T::COLLECTION, capacity))
            }
            _ => Ok(()),
        }
    }

    /// Insert a record built from a freshly allocated id
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the store is bounded and full, or any
    /// error returned by `build`. Nothing is allocated on failure.
    pub fn insert<F>(&mut self, build: F) -> Result<RecordId, FleetError>
    where
        F: FnOnce(RecordId) -> Result<T, FleetError>,
    {
        self.ensure_room()?;

        let id = self.next_id;
        let record = build(id)?;
        self.records.push(record);
        self.next_id += 1;

        Ok(id)
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Like [`get`](Self::get) but reports a missing id as the collection's not-found error
    pub fn find(&self, id: RecordId) -> Result<&T, FleetError> {
        self.get(id).ok_or_else(|| T::COLLECTION.not_found(id))
    }

    /// All records in insertion order
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Records accepted by `predicate`, in insertion order
    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    /// Update a record using a closure
    ///
    /// The closure works on a copy; the stored record is replaced only when
    /// the closure succeeds, so a failed update leaves no partial changes.
    pub fn update<F, R>(&mut self, id: RecordId, f: F) -> Result<R, FleetError>
    where
        F: FnOnce(&mut T) -> Result<R, FleetError>,
    {
        let slot = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| T::COLLECTION.not_found(id))?;

        let mut draft = slot.clone();
        let result = f(&mut draft)?;
        *slot = draft;

        Ok(result)
    }

    /// Remove a record, shifting later records left
    pub fn remove(&mut self, id: RecordId) -> Result<T, FleetError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| T::COLLECTION.not_found(id))?;

        Ok(self.records.remove(index))
    }

    /// Discard current contents and rebuild from `records`
    ///
    /// The allocator resumes after the highest id seen. The capacity bound is
    /// not applied to loaded data.
    pub fn replace_all(&mut self, records: Vec<T>) {
        let max_id = records.iter().map(Record::id).max().unwrap_or(0);
        self.records = records;
        self.next_id = max_id.saturating_add(1).max(1);
    }

    /// Never hand out `id` or anything below it
    ///
    /// Used after a load for ids that no longer have a record but are still
    /// referenced elsewhere. Has no effect if the allocator is already past it.
    pub fn reserve_through(&mut self, id: RecordId) {
        self.next_id = self.next_id.max(id.saturating_add(1));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
