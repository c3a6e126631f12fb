#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Aggregate queries over a chained table.
pub mod aggregate;

/// A hash table resolving collisions by separate chaining.
pub mod chained_table;

/// A hash table using double hashing over a fixed slot array.
pub mod double_hash_table;

/// Errors returned by table construction and inserts.
pub mod error;

/// Home-index and step functions shared by every table.
pub mod hashing;

/// A hash table using linear or quadratic probing over a fixed slot array.
pub mod probed_table;

mod slot;

#[cfg(feature = "stats")]
pub mod stats;

/// A single interface over all four collision-resolution strategies.
pub mod table;

pub use chained_table::ChainedTable;
pub use double_hash_table::DoubleHashTable;
pub use error::TableError;
pub use hashing::BucketHash;
pub use hashing::Capacity;
pub use hashing::DEFAULT_CAPACITY;
pub use probed_table::Probing;
pub use probed_table::ProbedTable;
pub use slot::Slot;
pub use table::Listing;
pub use table::Strategy;
pub use table::Table;
