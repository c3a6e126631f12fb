use thiserror::Error;

/// Errors reported by table construction and open-addressing inserts.
///
/// A missing key is never an error: `search` returns `false` and `delete` is a
/// no-op.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// No `Empty` or `Tombstone` slot was reachable within `capacity` probe
    /// steps. The table is left unchanged.
    #[error("table full: no free slot reachable for key {key} within {capacity} probes")]
    CapacityExceeded {
        /// The key that could not be placed
        key: i64,
        /// The table's slot count
        capacity: usize,
    },

    /// A table was requested with zero slots.
    #[error("table capacity must be greater than zero")]
    InvalidCapacity,
}
