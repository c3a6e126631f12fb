//! Slot utilization statistics for the open-addressing tables.
//!
//! Compiled only with the `stats` feature.

use alloc::vec::Vec;

use crate::slot::Slot;

/// Utilization statistics for an open-addressing table.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugStats {
    /// Total number of slots
    pub capacity: usize,
    /// Slots currently holding a key
    pub occupied_slots: usize,
    /// Slots holding a tombstone
    pub tombstones: usize,
    /// Slots never written since the last reset
    pub empty_slots: usize,
    /// Load factor (occupied_slots / capacity)
    pub load_factor: f64,
    /// Fraction of slots that are tombstones
    pub tombstone_ratio: f64,
    /// Longest probe distance of any stored key
    pub max_probe_length: usize,
}

impl DebugStats {
    pub(crate) fn from_slots(slots: &[Slot], histogram: &[usize]) -> Self {
        let mut occupied_slots = 0;
        let mut tombstones = 0;
        for slot in slots {
            match slot {
                Slot::Occupied(_) => occupied_slots += 1,
                Slot::Tombstone => tombstones += 1,
                Slot::Empty => {}
            }
        }

        let capacity = slots.len();
        DebugStats {
            capacity,
            occupied_slots,
            tombstones,
            empty_slots: capacity - occupied_slots - tombstones,
            load_factor: occupied_slots as f64 / capacity as f64,
            tombstone_ratio: tombstones as f64 / capacity as f64,
            max_probe_length: histogram.len().saturating_sub(1),
        }
    }

    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.occupied_slots,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Tombstones: {} ({:.2}% of slots)",
            self.tombstones,
            self.tombstone_ratio * 100.0
        );
        println!("Empty: {}", self.empty_slots);
        println!("Longest probe: {}", self.max_probe_length);
    }
}

/// Builds a histogram where bucket `n` counts keys stored `n` probe steps away
/// from their home slot.
pub(crate) fn histogram(distances: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut hist = Vec::new();
    for distance in distances {
        if hist.len() <= distance {
            hist.resize(distance + 1, 0);
        }
        hist[distance] += 1;
    }
    hist
}

/// Pretty-prints a probe-length histogram horizontally using stdout.
#[cfg(feature = "std")]
pub fn print_histogram(hist: &[usize]) {
    let max = hist.iter().copied().max().unwrap_or(0);
    if max == 0 {
        println!("probe histogram: empty");
        return;
    }

    let max_bar = 60usize;
    let total_units = max_bar * 8;
    println!(
        "probe histogram ({} entries):",
        hist.iter().sum::<usize>()
    );

    let make_bar = |count: usize| -> alloc::string::String {
        if count == 0 {
            return alloc::string::String::new();
        }
        let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
        let mut bar = "█".repeat(units / 8);
        let partial = match units % 8 {
            1 => Some('▏'),
            2 => Some('▎'),
            3 => Some('▍'),
            4 => Some('▌'),
            5 => Some('▋'),
            6 => Some('▊'),
            7 => Some('▉'),
            _ => None,
        };
        bar.extend(partial);
        bar
    };

    for (distance, count) in hist.iter().enumerate() {
        println!("{distance:>3} | {:<60} {count}", make_bar(*count));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn histogram_counts_distances() {
        assert_eq!(histogram([0, 0, 2, 1, 0].into_iter()), vec![3, 1, 1]);
        assert!(histogram(core::iter::empty()).is_empty());
    }

    #[test]
    fn stats_from_slots() {
        let slots = [
            Slot::Occupied(1),
            Slot::Tombstone,
            Slot::Empty,
            Slot::Occupied(2),
        ];
        let stats = DebugStats::from_slots(&slots, &[1, 1]);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.occupied_slots, 2);
        assert_eq!(stats.tombstones, 1);
        assert_eq!(stats.empty_slots, 1);
        assert_eq!(stats.load_factor, 0.5);
        assert_eq!(stats.tombstone_ratio, 0.25);
        assert_eq!(stats.max_probe_length, 1);
    }
}
