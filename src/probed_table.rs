use alloc::vec::Vec;
use core::fmt::Debug;

use log::debug;

use crate::error::TableError;
use crate::hashing::Capacity;
use crate::hashing::mul_mod;
use crate::hashing::primary;
use crate::slot::Slot;
use crate::slot::SlotArray;

/// Probe sequence used by a [`ProbedTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Probing {
    /// `idx(i) = (home + i) mod capacity`
    Linear,
    /// `idx(i) = (home + i*i) mod capacity`
    ///
    /// Only slots at a quadratic-residue offset from home are reachable, so an
    /// insert may report [`TableError::CapacityExceeded`] while other slots
    /// are still free.
    Quadratic,
}

impl Probing {
    #[inline(always)]
    fn index(self, home: usize, i: usize, capacity: usize) -> usize {
        match self {
            Probing::Linear => (home + i % capacity) % capacity,
            Probing::Quadratic => (home + mul_mod(i, i, capacity)) % capacity,
        }
    }
}

/// Open-addressing table of `i64` keys using linear or quadratic probing.
///
/// Deleted keys leave a [`Slot::Tombstone`] behind, so lookups keep probing
/// past them. The capacity is fixed: when no free slot is reachable an insert
/// fails with [`TableError::CapacityExceeded`] and the table is unchanged.
///
/// ## Example
///
/// ```rust
/// use probe_hash::ProbedTable;
/// use probe_hash::Probing;
///
/// let mut table = ProbedTable::new(10, Probing::Linear).unwrap();
/// table.insert(5).unwrap();
/// table.insert(15).unwrap();
///
/// table.delete(5);
/// // 15 sits one slot past the tombstone left by 5.
/// assert!(table.search(15));
/// assert!(!table.search(5));
/// ```
#[derive(Clone)]
pub struct ProbedTable {
    slots: SlotArray,
    probing: Probing,
}

impl Debug for ProbedTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbedTable")
            .field("probing", &self.probing)
            .field("slots", &self.slots)
            .finish()
    }
}

impl ProbedTable {
    /// Creates a table with exactly `capacity` slots, all empty.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize, probing: Probing) -> Result<Self, TableError> {
        Ok(Self::with_capacity(Capacity::new(capacity)?, probing))
    }

    /// Creates a table from an already validated [`Capacity`].
    pub fn with_capacity(capacity: Capacity, probing: Probing) -> Self {
        debug!(
            "creating {probing:?} probed table with {} slots",
            capacity.get()
        );
        Self {
            slots: SlotArray::new(capacity),
            probing,
        }
    }

    /// Returns the probe sequence this table was built with.
    pub fn probing(&self) -> Probing {
        self.probing
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

    /// Resets every slot, tombstones included, to [`Slot::Empty`].
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Returns the raw slot array.
    pub fn slots(&self) -> &[Slot] {
        self.slots.slots()
    }

    #[inline(always)]
    fn probe_sequence(&self, key: i64) -> impl Fn(usize) -> usize + use<> {
        let capacity = self.slots.capacity();
        let home = primary(key, capacity);
        let probing = self.probing;
        move |i| probing.index(home, i, capacity.get())
    }

    /// Places `key` in the first `Empty` or `Tombstone` slot of its probe
    /// sequence and returns that slot's index.
    ///
    /// Keys are not deduplicated; inserting a key twice occupies two slots.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::CapacityExceeded`] if no free slot is reached
    /// within `capacity` probe steps. The table is not modified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::ProbedTable;
    /// use probe_hash::Probing;
    /// use probe_hash::TableError;
    ///
    /// let mut table = ProbedTable::new(2, Probing::Linear).unwrap();
    /// assert_eq!(table.insert(4), Ok(0));
    /// assert_eq!(table.insert(6), Ok(1));
    /// assert_eq!(
    ///     table.insert(8),
    ///     Err(TableError::CapacityExceeded { key: 8, capacity: 2 })
    /// );
    /// ```
    pub fn insert(&mut self, key: i64) -> Result<usize, TableError> {
        let probe = self.probe_sequence(key);
        self.slots.insert(key, probe)
    }

    /// Returns `true` if `key` is stored.
    ///
    /// Stops at the first `Empty` slot or after `capacity` probes; tombstones
    /// are skipped.
    pub fn search(&self, key: i64) -> bool {
        self.slots.find(key, self.probe_sequence(key)).is_some()
    }

    /// Replaces the first stored copy of `key` with a tombstone.
    ///
    /// Returns `false`, leaving the table untouched, if `key` is not found.
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

    const SAMPLE: [i64; 7] = [15, 25, 35, 15, 5, 20, 25];

    fn filled(probing: Probing) -> ProbedTable {
        let mut table = ProbedTable::new(10, probing).unwrap();
        for key in SAMPLE {
            let _ = table.insert(key);
        }
        table
    }

    fn keys(table: &ProbedTable) -> Vec<Option<i64>> {
        table.slots().iter().map(Slot::key).collect()
    }

    #[test]
    fn zero_capacity_fails() {
        assert_eq!(
            ProbedTable::new(0, Probing::Linear).unwrap_err(),
            TableError::InvalidCapacity
        );
    }

    #[test]
    fn linear_layout_matches_probe_order() {
        let table = filled(Probing::Linear);
        assert_eq!(
            keys(&table),
            vec![
                Some(20),
                Some(25),
                None,
                None,
                None,
                Some(15),
                Some(25),
                Some(35),
                Some(15),
                Some(5)
            ]
        );
        assert_eq!(table.len(), 7);
        for key in SAMPLE {
            assert!(table.search(key), "{key} missing: {table:?}");
        }
        assert!(!table.search(45));
    }

    #[test]
    fn quadratic_reaches_only_residues() {
        let mut table = ProbedTable::new(10, Probing::Quadratic).unwrap();
        for key in &SAMPLE[..6] {
            table.insert(*key).unwrap();
        }
        assert_eq!(
            keys(&table),
            vec![
                Some(20),
                Some(5),
                None,
                None,
                Some(15),
                Some(15),
                Some(25),
                None,
                None,
                Some(35)
            ]
        );

        // Offsets {0, 1, 4, 5, 6, 9} from home 5 are all taken; slots 2, 3, 7
        // and 8 are free but unreachable.
        let before = table.display();
        assert_eq!(
            table.insert(25),
            Err(TableError::CapacityExceeded {
                key: 25,
                capacity: 10
            })
        );
        assert_eq!(table.display(), before);
    }

    #[test]
    fn tombstone_does_not_stop_search() {
        for probing in [Probing::Linear, Probing::Quadratic] {
            let mut table = ProbedTable::new(10, probing).unwrap();
            table.insert(5).unwrap();
            table.insert(15).unwrap();
            table.insert(25).unwrap();

            assert!(table.delete(5));
            assert_eq!(table.slots()[5], Slot::Tombstone);
            assert!(table.search(15), "{probing:?}");
            assert!(table.search(25), "{probing:?}");
            assert!(!table.search(5));

            assert!(table.delete(15));
            assert!(table.search(25), "{probing:?}");
        }
    }

    #[test]
    fn insert_reuses_tombstone() {
        let mut table = ProbedTable::new(10, Probing::Linear).unwrap();
        table.insert(5).unwrap();
        table.insert(15).unwrap();
        table.delete(5);
        assert_eq!(table.insert(25), Ok(5));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn full_table_reports_and_is_unchanged() {
        let mut table = ProbedTable::new(4, Probing::Linear).unwrap();
        for key in 0..4 {
            table.insert(key).unwrap();
        }
        let before = table.display();
        assert!(matches!(
            table.insert(4),
            Err(TableError::CapacityExceeded { key: 4, .. })
        ));
        assert_eq!(table.display(), before);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn search_terminates_without_empty_slots() {
        let mut table = ProbedTable::new(3, Probing::Linear).unwrap();
        for key in [0, 1, 2] {
            table.insert(key).unwrap();
        }
        table.delete(1);
        assert!(!table.search(7));
        assert!(!table.delete(7));
        assert!(table.search(2));
    }

    #[test]
    fn former_sentinel_values_are_plain_keys() {
        let mut table = ProbedTable::new(5, Probing::Linear).unwrap();
        table.insert(-1).unwrap();
        table.insert(-2).unwrap();
        assert!(table.search(-1));
        assert!(table.search(-2));
        assert_eq!(table.slots()[4], Slot::Occupied(-1));
        assert_eq!(table.slots()[3], Slot::Occupied(-2));
    }

    #[test]
    fn delete_removes_one_copy() {
        let mut table = ProbedTable::new(10, Probing::Linear).unwrap();
        table.insert(3).unwrap();
        table.insert(3).unwrap();
        assert!(table.delete(3));
        assert!(table.search(3));
        assert!(table.delete(3));
        assert!(!table.search(3));
        assert!(!table.delete(3));
        assert!(table.is_empty());
    }

    #[test]
    fn clear_drops_tombstones() {
        let mut table = filled(Probing::Linear);
        table.delete(15);
        table.clear();
        assert!(table.is_empty());
        assert!(table.slots().iter().all(|s| *s == Slot::Empty));
        assert_eq!(table.capacity(), 10);
    }

    #[test]
    #[cfg(feature = "stats")]
    fn probe_histogram_for_sample() {
        let table = filled(Probing::Linear);
        // 15, 35->2, 15->3, 5->4, 20, 25->1, 25->6
        assert_eq!(table.probe_histogram(), vec![2, 1, 1, 1, 1, 0, 1]);

        let stats = table.debug_stats();
        assert_eq!(stats.occupied_slots, 7);
        assert_eq!(stats.max_probe_length, 6);
    }
}
