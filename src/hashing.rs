use core::num::NonZeroUsize;

use crate::error::TableError;

/// Bucket count used by the reference string table.
pub const DEFAULT_CAPACITY: usize = 10;

/// Fixed slot/bucket count of a table.
///
/// Always non-zero: constructing one from `0` fails with
/// [`TableError::InvalidCapacity`], so every `mod capacity` below is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Creates a capacity, rejecting zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::Capacity;
    ///
    /// assert_eq!(Capacity::new(10).unwrap().get(), 10);
    /// assert!(Capacity::new(0).is_err());
    /// ```
    pub fn new(slots: usize) -> Result<Self, TableError> {
        NonZeroUsize::new(slots)
            .map(Capacity)
            .ok_or(TableError::InvalidCapacity)
    }

    /// Returns the number of slots.
    #[inline(always)]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for Capacity {
    type Error = TableError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Capacity::new(value)
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity(NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

/// Home index of an integer key: `key mod capacity`.
///
/// Uses the Euclidean remainder, so negative keys land in `0..capacity` as
/// well.
#[inline(always)]
pub fn primary(key: i64, capacity: Capacity) -> usize {
    (key as i128).rem_euclid(capacity.get() as i128) as usize
}

/// Probe step for double hashing: `5 - (key mod 5)`, always in `1..=5`.
///
/// This is not coprime with every capacity. A capacity divisible by the step
/// shortens the probe cycle, see
/// [`DoubleHashTable::probe_cycle_len`](crate::DoubleHashTable::probe_cycle_len).
#[inline(always)]
pub fn secondary(key: i64) -> usize {
    5 - key.rem_euclid(5) as usize
}

/// Home index of a string key: the sum of its character codes, `mod capacity`.
///
/// Anagrams always collide under this hash.
pub fn string_primary(key: &str, capacity: Capacity) -> usize {
    let sum = key
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(u64::from(u32::from(c))));
    (sum % capacity.get() as u64) as usize
}

/// Maps a key to its home bucket in a [`ChainedTable`](crate::ChainedTable).
///
/// Owned and borrowed forms of a key must agree (`String` and `str` hash the
/// same way), mirroring the contract `Borrow` places on `Hash`.
pub trait BucketHash {
    /// Returns the home bucket for this key in a table of `capacity` buckets.
    fn bucket(&self, capacity: Capacity) -> usize;
}

impl BucketHash for i64 {
    #[inline(always)]
    fn bucket(&self, capacity: Capacity) -> usize {
        primary(*self, capacity)
    }
}

impl BucketHash for str {
    #[inline(always)]
    fn bucket(&self, capacity: Capacity) -> usize {
        string_primary(self, capacity)
    }
}

impl BucketHash for alloc::string::String {
    #[inline(always)]
    fn bucket(&self, capacity: Capacity) -> usize {
        string_primary(self, capacity)
    }
}

/// Greatest common divisor, used to size double-hashing probe cycles.
pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `(a * b) mod m` without intermediate overflow.
#[inline(always)]
pub(crate) fn mul_mod(a: usize, b: usize, m: usize) -> usize {
    ((a as u128 * b as u128) % m as u128) as usize
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    fn cap(n: usize) -> Capacity {
        Capacity::new(n).unwrap()
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert_eq!(Capacity::new(0), Err(TableError::InvalidCapacity));
        assert_eq!(Capacity::try_from(0usize), Err(TableError::InvalidCapacity));
        assert_eq!(Capacity::default().get(), DEFAULT_CAPACITY);
    }

    #[test]
    fn primary_is_modulo() {
        assert_eq!(primary(15, cap(10)), 5);
        assert_eq!(primary(20, cap(10)), 0);
        assert_eq!(primary(7, cap(1)), 0);
    }

    #[test]
    fn primary_is_total_for_negative_keys() {
        assert_eq!(primary(-1, cap(10)), 9);
        assert_eq!(primary(-10, cap(10)), 0);
        assert_eq!(primary(i64::MIN, cap(10)), 2);
        assert_eq!(primary(i64::MAX, cap(10)), 7);
    }

    #[test]
    fn secondary_never_zero() {
        assert_eq!(secondary(15), 5);
        assert_eq!(secondary(16), 4);
        assert_eq!(secondary(19), 1);
        for key in -20..20 {
            let step = secondary(key);
            assert!((1..=5).contains(&step), "{key} -> {step}");
        }
    }

    #[test]
    fn string_hash_sums_characters() {
        let ten = cap(10);
        assert_eq!(string_primary("apple", ten), 0);
        assert_eq!(string_primary("banana", ten), 9);
        assert_eq!(string_primary("orange", ten), 6);
        assert_eq!(string_primary("kiwi", ten), 6);
        assert_eq!(string_primary("grape", ten), 7);
        assert_eq!(string_primary("", ten), 0);
    }

    #[test]
    fn anagrams_collide() {
        let ten = cap(10);
        assert_eq!(string_primary("listen", ten), string_primary("silent", ten));
    }

    #[test]
    fn owned_and_borrowed_strings_agree() {
        let ten = cap(10);
        let owned = String::from("mango");
        assert_eq!(owned.bucket(ten), "mango".bucket(ten));
    }

    #[test]
    fn gcd_and_mul_mod() {
        assert_eq!(gcd(5, 10), 5);
        assert_eq!(gcd(3, 10), 1);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(mul_mod(usize::MAX, usize::MAX, 10), 5);
        assert_eq!(mul_mod(9, 9, 10), 1);
    }
}
