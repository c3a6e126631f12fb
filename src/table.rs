use alloc::vec::Vec;

use crate::chained_table::ChainedTable;
use crate::double_hash_table::DoubleHashTable;
use crate::error::TableError;
use crate::hashing::Capacity;
use crate::probed_table::Probing;
use crate::probed_table::ProbedTable;
use crate::slot::Slot;

/// Collision-resolution strategy chosen when a [`Table`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Separate chaining; inserts never fail.
    Chained,
    /// Open addressing, `idx(i) = (home + i) mod capacity`.
    Linear,
    /// Open addressing, `idx(i) = (home + i*i) mod capacity`.
    Quadratic,
    /// Open addressing, `idx(i) = (home + i*step) mod capacity`.
    DoubleHash,
}

/// One row of [`Table::display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    /// Keys of a chained bucket, in insertion order.
    Bucket(&'a [i64]),
    /// State of an open-addressing slot.
    Slot(Slot),
}

/// An `i64` table using any of the four strategies behind one interface.
///
/// ## Example
///
/// ```rust
/// use probe_hash::Strategy;
/// use probe_hash::Table;
///
/// for strategy in [
///     Strategy::Chained,
///     Strategy::Linear,
///     Strategy::Quadratic,
///     Strategy::DoubleHash,
/// ] {
///     let mut table = Table::new(10, strategy).unwrap();
///     table.insert(42).unwrap();
///     assert!(table.search(42));
///     assert!(table.delete(42));
///     assert!(!table.search(42));
/// }
/// ```
#[derive(Debug, Clone)]
pub enum Table {
    /// Separate chaining.
    Chained(ChainedTable<i64>),
    /// Linear or quadratic probing.
    Probed(ProbedTable),
    /// Double hashing.
    DoubleHash(DoubleHashTable),
}

impl Table {
    /// Creates an empty table of `capacity` slots using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, strategy: Strategy) -> Result<Self, TableError> {
        let capacity = Capacity::new(capacity)?;
        Ok(match strategy {
            Strategy::Chained => Table::Chained(ChainedTable::with_capacity(capacity)),
            Strategy::Linear => {
                Table::Probed(ProbedTable::with_capacity(capacity, Probing::Linear))
            }
            Strategy::Quadratic => {
                Table::Probed(ProbedTable::with_capacity(capacity, Probing::Quadratic))
            }
            Strategy::DoubleHash => Table::DoubleHash(DoubleHashTable::with_capacity(capacity)),
        })
    }

    /// Returns the strategy this table was built with.
    pub fn strategy(&self) -> Strategy {
        match self {
            Table::Chained(_) => Strategy::Chained,
            Table::Probed(table) => match table.probing() {
                Probing::Linear => Strategy::Linear,
                Probing::Quadratic => Strategy::Quadratic,
            },
            Table::DoubleHash(_) => Strategy::DoubleHash,
        }
    }

    /// Returns the fixed slot or bucket count.
    pub fn capacity(&self) -> usize {
        match self {
            Table::Chained(table) => table.capacity(),
            Table::Probed(table) => table.capacity(),
            Table::DoubleHash(table) => table.capacity(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        match self {
            Table::Chained(table) => table.len(),
            Table::Probed(table) => table.len(),
            Table::DoubleHash(table) => table.len(),
        }
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resets the table to its freshly constructed state.
    pub fn clear(&mut self) {
        match self {
            Table::Chained(table) => table.clear(),
            Table::Probed(table) => table.clear(),
            Table::DoubleHash(table) => table.clear(),
        }
    }

    /// Stores `key`.
    ///
    /// # Errors
    ///
    /// Open-addressing strategies return [`TableError::CapacityExceeded`] when
    /// no free slot is reachable; the table is left unchanged. Chaining never
    /// fails.
    pub fn insert(&mut self, key: i64) -> Result<(), TableError> {
        match self {
            Table::Chained(table) => {
                table.insert(key);
                Ok(())
            }
            Table::Probed(table) => table.insert(key).map(drop),
            Table::DoubleHash(table) => table.insert(key).map(drop),
        }
    }

    /// Returns `true` if `key` is stored.
    pub fn search(&self, key: i64) -> bool {
        match self {
            Table::Chained(table) => table.search(&key),
            Table::Probed(table) => table.search(key),
            Table::DoubleHash(table) => table.search(key),
        }
    }

    /// Removes one stored copy of `key`; returns `false` if there was none.
    pub fn delete(&mut self, key: i64) -> bool {
        match self {
            Table::Chained(table) => table.delete(&key),
            Table::Probed(table) => table.delete(key),
            Table::DoubleHash(table) => table.delete(key),
        }
    }

    /// Lists every bucket or slot index with its contents.
    pub fn display(&self) -> Vec<(usize, Listing<'_>)> {
        match self {
            Table::Chained(table) => table
                .display()
                .into_iter()
                .map(|(idx, keys)| (idx, Listing::Bucket(keys)))
                .collect(),
            Table::Probed(table) => table
                .display()
                .into_iter()
                .map(|(idx, slot)| (idx, Listing::Slot(slot)))
                .collect(),
            Table::DoubleHash(table) => table
                .display()
                .into_iter()
                .map(|(idx, slot)| (idx, Listing::Slot(slot)))
                .collect(),
        }
    }

    /// Returns the chained table, which carries the aggregate queries.
    pub fn as_chained(&self) -> Option<&ChainedTable<i64>> {
        match self {
            Table::Chained(table) => Some(table),
            _ => None,
        }
    }

    /// Mutable form of [`as_chained`](Self::as_chained).
    pub fn as_chained_mut(&mut self) -> Option<&mut ChainedTable<i64>> {
        match self {
            Table::Chained(table) => Some(table),
            _ => None,
        }
    }
}
