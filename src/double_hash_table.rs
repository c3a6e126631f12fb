use alloc::vec::Vec;
use core::fmt::Debug;

use log::debug;

use crate::error::TableError;
use crate::hashing::Capacity;
use crate::hashing::gcd;
use crate::hashing::mul_mod;
use crate::hashing::primary;
use crate::hashing::secondary;
use crate::slot::Slot;
use crate::slot::SlotArray;

/// Open-addressing table of `i64` keys using double hashing.
///
/// The probe sequence is `idx(i) = (home + i*step) mod capacity` with
/// `step = 5 - (key mod 5)`. The step is never zero, but it shares a factor
/// with some capacities: with 10 slots every multiple of 5 has step 5 and can
/// only ever reach two slots. [`probe_cycle_len`](Self::probe_cycle_len)
/// reports how many slots a key can reach.
///
/// ## Example
///
/// ```rust
/// use probe_hash::DoubleHashTable;
///
/// let mut table = DoubleHashTable::new(7).unwrap();
/// table.insert(3).unwrap();
/// table.insert(10).unwrap();
/// assert!(table.search(10));
/// assert_eq!(table.probe_cycle_len(10), 7);
/// ```
#[derive(Clone)]
pub struct DoubleHashTable {
    slots: SlotArray,
}

impl Debug for DoubleHashTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DoubleHashTable")
            .field("slots", &self.slots)
            .finish()
    }
}

impl DoubleHashTable {
    /// Creates a table with exactly `capacity` slots, all empty.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Creates a table from an already validated [`Capacity`].
    pub fn with_capacity(capacity: Capacity) -> Self {
        debug!("creating double hash table with {} slots", capacity.get());
        Self {
            slots: SlotArray::new(capacity),
        }
    }

    /// Returns the fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.capacity().get()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resets every slot to [`Slot::Empty`].
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the raw slot array.
    pub fn slots(&self) -> &[Slot] {
        self.slots.slots()
    }

    /// Number of distinct slots on `key`'s probe sequence:
    /// `capacity / gcd(step, capacity)`.
    pub fn probe_cycle_len(&self, key: i64) -> usize {
        let capacity = self.capacity();
        capacity / gcd(secondary(key), capacity)
    }

    #[inline(always)]
    fn probe_sequence(&self, key: i64) -> impl Fn(usize) -> usize + use<> {
        let capacity = self.slots.capacity();
        let home = primary(key, capacity);
        let step = secondary(key);
        let slots = capacity.get();
        move |i| (home + mul_mod(i, step, slots)) % slots
    }

    /// Places `key` in the first `Empty` or `Tombstone` slot of its probe
    /// sequence and returns that slot's index.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExceeded`] if no free slot is reached
    /// within `capacity` probe steps, which can happen while other slots are
    /// free when the key's probe cycle is short. The table is not modified.
    pub fn insert(&mut self, key: i64) -> Result<usize, TableError> {
        let probe = self.probe_sequence(key);
        self.slots.insert(key, probe)
    }

    /// Returns `true` if `key` is stored.
    pub fn search(&self, key: i64) -> bool {
        self.slots.find(key, self.probe_sequence(key)).is_some()
    }

    /// Replaces the first stored copy of `key` with a tombstone.
    pub fn delete(&mut self, key: i64) -> bool {
        let probe = self.probe_sequence(key);
        self.slots.remove(key, probe)
    }

    /// Lists every slot index with its raw state.
    pub fn display(&self) -> Vec<(usize, Slot)> {
        self.slots.display()
    }

    /// Computes a histogram of probe lengths: entry `n` counts stored keys
    /// found `n` steps from their home slot.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> Vec<usize> {
        crate::stats::histogram(self.slots().iter().enumerate().filter_map(|(idx, slot)| {
            let key = slot.key()?;
            self.slots.probe_distance(idx, self.probe_sequence(key))
        }))
    }

    /// Returns slot utilization statistics.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        crate::stats::DebugStats::from_slots(self.slots(), &self.probe_histogram())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn zero_capacity_fails() {
        assert_eq!(
            DoubleHashTable::new(0).unwrap_err(),
            TableError::InvalidCapacity
        );
    }

    #[test]
    fn step_follows_secondary_hash() {
        let mut table = DoubleHashTable::new(11).unwrap();
        // 3 and 14 both start at 3; 14 has step 5 - 4 = 1.
        assert_eq!(table.insert(3), Ok(3));
        assert_eq!(table.insert(14), Ok(4));
        // 25 starts at 3 with step 5: 3, 8.
        assert_eq!(table.insert(25), Ok(8));
        assert!(table.search(3));
        assert!(table.search(14));
        assert!(table.search(25));
        assert!(!table.search(36));
    }

    #[test]
    fn multiples_of_five_cycle_over_two_slots() {
        let mut table = DoubleHashTable::new(10).unwrap();
        assert_eq!(table.probe_cycle_len(15), 2);
        assert_eq!(table.probe_cycle_len(16), 5);
        assert_eq!(table.probe_cycle_len(17), 10);

        assert_eq!(table.insert(15), Ok(5));
        assert_eq!(table.insert(25), Ok(0));
        for key in [35, 15, 5, 20, 25] {
            assert_eq!(
                table.insert(key),
                Err(TableError::CapacityExceeded {
                    key,
                    capacity: 10
                })
            );
        }
        assert_eq!(table.len(), 2);

        let occupied: Vec<_> = table
            .display()
            .into_iter()
            .filter(|(_, slot)| !slot.is_free())
            .collect();
        assert_eq!(occupied, vec![(0, Slot::Occupied(25)), (5, Slot::Occupied(15))]);

        // Unrelated keys still find room.
        assert_eq!(table.insert(7), Ok(7));
    }

    #[test]
    fn tombstone_does_not_stop_search() {
        let mut table = DoubleHashTable::new(11).unwrap();
        table.insert(3).unwrap();
        table.insert(25).unwrap();
        assert!(table.delete(3));
        assert_eq!(table.slots()[3], Slot::Tombstone);
        assert!(table.search(25));
        assert!(!table.search(3));

        // 36 starts at 3 with step 4 and reuses the tombstone.
        assert_eq!(table.insert(36), Ok(3));
    }

    #[test]
    fn full_table_reports_and_is_unchanged() {
        let mut table = DoubleHashTable::new(3).unwrap();
        for key in [1, 2, 3] {
            table.insert(key).unwrap();
        }
        let before = table.display();
        assert!(table.insert(4).is_err());
        assert_eq!(table.display(), before);
    }

    #[test]
    fn delete_missing_key_is_noop() {
        let mut table = DoubleHashTable::new(5).unwrap();
        table.insert(1).unwrap();
        assert!(!table.delete(6));
        assert_eq!(table.len(), 1);
        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    #[cfg(feature = "stats")]
    fn probe_histogram_counts_steps() {
        let mut table = DoubleHashTable::new(11).unwrap();
        table.insert(3).unwrap();
        table.insert(14).unwrap();
        table.insert(25).unwrap();
        assert_eq!(table.probe_histogram(), vec![1, 2]);
        assert_eq!(table.debug_stats().occupied_slots, 3);
    }
}
