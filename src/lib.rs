//! Fleet Rental Library
//! # Overview
//!
//! This library manages a small car-rental business: a catalog of cars, a
//! customer roster, and rentals linking the two. All state lives in memory and
//! is written through to flat `|`-delimited text files on every change.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Car, Customer, Rental, errors)
//! - [`cli`] - CLI arguments parsing and command dispatch
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - Ordered record collections with monotonic ids
//!   - [`core::lifecycle`] - Rental state machine and cost computation
//!   - [`core::fleet`] - Repository with write-through persistence
//! - [`io`] - Flat-record codec and storage backends
//!
//! # Rental Lifecycle
//!
//! A rental is **Active** from creation until it is returned, then
//! **Returned** for good:
//!
//! - **Rent**: requires an available car; cost = days × daily rent; the car
//!   becomes unavailable
//! - **Return**: adds late days × late fee rate to the cost; the car becomes
//!   available again
//!
//! Damage reports are independent of the rental state and never change a
//! car's availability.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{Fleet, FleetConfig, RecordStore, RentalEngine, ReturnOutcome, Storage};
pub use io::{FileStorage, MemoryStorage};
pub use types::{
    Car, CarDetails, Collection, Customer, CustomerDetails, ErrorKind, FleetError, Money,
    RecordId, Rental, RentalStatus,
};
