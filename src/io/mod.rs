//! I/O module
//!
//! Handles persistence of the three collections.
//!
//! # Components
//!
//! - `codec` - Flat `|`-delimited record format (encoding, tolerant decoding)
//! - `file_storage` - One text file per collection under a data directory
//! - `memory_storage` - In-memory storage for tests and benchmarks

pub mod codec;
pub mod file_storage;
pub mod memory_storage;

pub use codec::{decode, encode, DelimitedRecord, DELIMITER};
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
