//! Core business logic module
//!
//! This module contains the record-keeping components:
//! - `traits` - Storage abstraction for interchangeable backends
//! - `record_store` - Generic ordered record collection with id allocation
//! - `lifecycle` - Rent/return state machine and cost computation
//! - `fleet` - Repository owning all collections with write-through persistence
//! - `config` - Runtime configuration

pub mod config;
pub mod fleet;
pub mod lifecycle;
pub mod record_store;
pub mod traits;

pub use config::{FleetConfig, DEFAULT_LATE_FEE_RATE};
pub use fleet::Fleet;
pub use lifecycle::{LifecyclePolicy, RentalEngine, ReturnOutcome};
pub use record_store::RecordStore;
pub use traits::Storage;
