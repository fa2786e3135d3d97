//! Error types for the fleet store
//!
//! This module defines all error types that can occur while managing cars,
//! customers and rentals. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Not found**: a car, customer or rental id does not exist
//! - **Invalid state**: the operation is not legal in the record's current state
//! - **Capacity exceeded**: a bounded collection is full
//! - **Invalid input**: a value the store refuses before touching any state
//! - **Persistence failure**: a backing file could not be read or written
//!
//! Every error is recoverable: the failing operation leaves in-memory state
//! unchanged and the caller decides whether to abort.

use super::{Collection, Money, RecordId};
use thiserror::Error;

/// Broad failure category of a [`FleetError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    CapacityExceeded,
    InvalidInput,
    PersistenceFailure,
}

/// Main error type for the fleet store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    #[error("Car {id} not found")]
    CarNotFound { id: RecordId },

    #[error("Customer {id} not found")]
    CustomerNotFound { id: RecordId },

    #[error("Rental {id} not found")]
    RentalNotFound { id: RecordId },

    /// The car exists but is currently rented out
    #[error("Car {id} is not available for rent")]
    CarUnavailable { id: RecordId },

    /// Returns are one-shot; the late fee is never applied twice
    #[error("Rental {id} has already been returned")]
    RentalAlreadyReturned { id: RecordId },

    #[error("Car {id} has no reported damage")]
    NoDamageReported { id: RecordId },

    #[error("Cannot add to {collection}: capacity of {capacity} records reached")]
    CapacityExceeded {
        collection: Collection,
        capacity: usize,
    },

    /// A text field the flat-record format cannot store
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// A negative or overflowing currency amount
    #[error("Invalid amount {amount} for {field}")]
    InvalidAmount { field: &'static str, amount: Money },

    #[error("Rental days must be at least 1, got {days}")]
    InvalidDays { days: u32 },

    /// A backing resource could not be read or written
    #[error("Persistence error for {collection}: {message}")]
    Persistence {
        collection: Collection,
        message: String,
    },

    /// Malformed persisted record
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError { line: Option<u64>, message: String },
}

impl FleetError {
    /// Map the error onto its failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            FleetError::CarNotFound { .. }
            | FleetError::CustomerNotFound { .. }
            | FleetError::RentalNotFound { .. } => ErrorKind::NotFound,
            FleetError::CarUnavailable { .. }
            | FleetError::RentalAlreadyReturned { .. }
            | FleetError::NoDamageReported { .. } => ErrorKind::InvalidState,
            FleetError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            FleetError::InvalidField { .. }
            | FleetError::InvalidAmount { .. }
            | FleetError::InvalidDays { .. } => ErrorKind::InvalidInput,
            FleetError::Persistence { .. } | FleetError::ParseError { .. } => {
                ErrorKind::PersistenceFailure
            }
        }
    }
}

// Conversion from csv::Error to FleetError
impl From<csv::Error> for FleetError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FleetError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl FleetError {
    pub fn car_not_found(id: RecordId) -> Self {
        FleetError::CarNotFound { id }
    }

    pub fn customer_not_found(id: RecordId) -> Self {
        FleetError::CustomerNotFound { id }
    }

    pub fn rental_not_found(id: RecordId) -> Self {
        FleetError::RentalNotFound { id }
    }

    pub fn car_unavailable(id: RecordId) -> Self {
        FleetError::CarUnavailable { id }
    }

    pub fn rental_already_returned(id: RecordId) -> Self {
        FleetError::RentalAlreadyReturned { id }
    }

    pub fn no_damage_reported(id: RecordId) -> Self {
        FleetError::NoDamageReported { id }
    }

    pub fn capacity_exceeded(collection: Collection, capacity: usize) -> Self {
        FleetError::CapacityExceeded {
            collection,
            capacity,
        }
    }

    pub fn invalid_field(field: &'static str, reason: &str) -> Self {
        FleetError::InvalidField {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn invalid_amount(field: &'static str, amount: Money) -> Self {
        FleetError::InvalidAmount { field, amount }
    }

    /// Wrap an I/O failure on one collection's backing resource
    pub fn persistence(collection: Collection, error: impl std::fmt::Display) -> Self {
        FleetError::Persistence {
            collection,
            message: error.to_string(),
        }
    }
}
