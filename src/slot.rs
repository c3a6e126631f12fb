use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use log::debug;
use log::trace;

use crate::error::TableError;
use crate::hashing::Capacity;

/// State of a single open-addressing slot.
///
/// `Tombstone` marks a slot whose key was deleted: probing must continue past
/// it, but inserts may reuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot {
    /// Never written since the table was created or cleared.
    #[default]
    Empty,
    /// Previously occupied, now deleted.
    Tombstone,
    /// Holds a key.
    Occupied(i64),
}

impl Slot {
    /// Returns `true` if an insert may place a key here.
    #[inline(always)]
    pub fn is_free(&self) -> bool {
        !matches!(self, Slot::Occupied(_))
    }

    /// Returns the stored key, if any.
    #[inline(always)]
    pub fn key(&self) -> Option<i64> {
        match self {
            Slot::Occupied(key) => Some(*key),
            _ => None,
        }
    }
}

/// Fixed slot array driven by a caller-supplied probe sequence.
///
/// `probe(i)` must return the slot index visited at step `i`; every walk is
/// bounded to `capacity` steps, so a sequence that cycles over a subset of
/// the slots still terminates.
#[derive(Clone)]
pub(crate) struct SlotArray {
    slots: Vec<Slot>,
    populated: usize,
    capacity: Capacity,
}

impl SlotArray {
    pub(crate) fn new(capacity: Capacity) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity.get()],
            populated: 0,
            capacity,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    #[inline(always)]
    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.populated = 0;
    }

    pub(crate) fn insert(
        &mut self,
        key: i64,
        probe: impl Fn(usize) -> usize,
    ) -> Result<usize, TableError> {
        for i in 0..self.capacity.get() {
            let idx = probe(i);
            if self.slots[idx].is_free() {
                self.slots[idx] = Slot::Occupied(key);
                self.populated += 1;
                return Ok(idx);
            }
        }

        debug!(
            "no free slot for key {key} after {} probes",
            self.capacity.get()
        );
        Err(TableError::CapacityExceeded {
            key,
            capacity: self.capacity.get(),
        })
    }

    /// Walks the probe sequence until the key, an `Empty` slot, or the probe
    /// bound is reached.
    pub(crate) fn find(&self, key: i64, probe: impl Fn(usize) -> usize) -> Option<usize> {
        for i in 0..self.capacity.get() {
            let idx = probe(i);
            match self.slots[idx] {
                Slot::Occupied(k) if k == key => return Some(idx),
                Slot::Empty => return None,
                _ => {}
            }
        }
        None
    }

    pub(crate) fn remove(&mut self, key: i64, probe: impl Fn(usize) -> usize) -> bool {
        match self.find(key, probe) {
            Some(idx) => {
                trace!("tombstoning slot {idx} (key {key})");
                self.slots[idx] = Slot::Tombstone;
                self.populated -= 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn display(&self) -> Vec<(usize, Slot)> {
        self.slots.iter().copied().enumerate().collect()
    }

    /// Number of probe steps from the key's home to `target`, if `target`
    /// lies on the key's probe sequence.
    #[cfg(feature = "stats")]
    pub(crate) fn probe_distance(
        &self,
        target: usize,
        probe: impl Fn(usize) -> usize,
    ) -> Option<usize> {
        (0..self.capacity.get()).find(|&i| probe(i) == target)
    }
}

impl Debug for SlotArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::format;
        use alloc::string::String;
        use alloc::string::ToString;

        f.debug_struct("SlotArray")
            .field("populated", &self.populated)
            .field("capacity", &self.capacity.get())
            .field(
                "slots",
                &self
                    .slots
                    .chunks(16)
                    .map(|row| {
                        row.iter()
                            .map(|slot| match slot {
                                Slot::Empty => "..".to_string(),
                                Slot::Tombstone => "xx".to_string(),
                                Slot::Occupied(key) => format!("{key}"),
                            })
                            .collect::<Vec<String>>()
                            .join(", ")
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
