//! Aggregate queries over a [`ChainedTable`].
//!
//! Every query scans the whole table in bucket order, then insertion order
//! within a bucket. "First" always refers to that scan order. Queries that
//! need set membership use a `hashbrown` set keyed by reference, hashed with
//! `foldhash` when that feature is enabled and SipHash-1-3 otherwise.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::Hash;

use log::trace;

use crate::chained_table::ChainedTable;
use crate::hashing::BucketHash;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        type SeenState = foldhash::fast::FixedState;
    } else {
        type SeenState = core::hash::BuildHasherDefault<siphasher::sip::SipHasher13>;
    }
}

type SeenSet<T> = hashbrown::HashSet<T, SeenState>;
type Tally<T> = hashbrown::HashMap<T, usize, SeenState>;

impl<K> ChainedTable<K>
where
    K: BucketHash + Eq + Hash,
{
    fn tally(&self) -> Tally<&K> {
        let mut tally = Tally::default();
        for key in self.iter() {
            *tally.entry(key).or_insert(0) += 1;
        }
        tally
    }

    /// Counts the copies of `key` in its home bucket.
    ///
    /// Equal keys always share a bucket, so this is also the table-wide count.
    pub fn count_occurrences<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: BucketHash + Eq + ?Sized,
    {
        self.buckets[self.home(key)]
            .iter()
            .filter(|k| <K as Borrow<Q>>::borrow(k) == key)
            .count()
    }

    /// Returns `true` if any two stored keys are equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::ChainedTable;
    ///
    /// let mut table = ChainedTable::new(10).unwrap();
    /// table.extend([1i64, 2, 3]);
    /// assert!(!table.has_duplicate());
    /// table.insert(2);
    /// assert!(table.has_duplicate());
    /// ```
    pub fn has_duplicate(&self) -> bool {
        let mut seen = SeenSet::default();
        self.iter().any(|key| !seen.insert(key))
    }

    /// Returns `true` if no two stored keys are equal.
    pub fn all_unique(&self) -> bool {
        !self.has_duplicate()
    }

    /// Returns the first key that occurs exactly once in the whole table.
    pub fn first_unique(&self) -> Option<&K> {
        let tally = self.tally();
        self.iter().find(|key| tally.get(*key) == Some(&1))
    }

    /// Returns the number of distinct keys.
    pub fn count_distinct(&self) -> usize {
        self.iter().collect::<SeenSet<&K>>().len()
    }

    /// Returns every key stored more than once, each listed once, in the order
    /// its first copy is met.
    pub fn duplicates(&self) -> Vec<&K> {
        let tally = self.tally();
        let mut reported = SeenSet::default();
        self.iter()
            .filter(|key| tally.get(*key).is_some_and(|&n| n > 1) && reported.insert(*key))
            .collect()
    }

    /// Returns the total number of stored keys.
    pub fn total(&self) -> usize {
        self.len()
    }

    /// Keeps only the first copy of every key and returns how many copies were
    /// dropped.
    ///
    /// Each bucket is rebuilt from the keys that survive and swapped in whole.
    /// Running it twice is the same as running it once.
    pub fn remove_duplicates(&mut self) -> usize {
        let keep: Vec<Vec<bool>> = {
            let mut seen = SeenSet::default();
            self.buckets
                .iter()
                .map(|bucket| bucket.iter().map(|key| seen.insert(key)).collect())
                .collect()
        };

        let mut removed = 0;
        for (bucket, keep) in self.buckets.iter_mut().zip(keep) {
            let dropped = keep.iter().filter(|&&k| !k).count();
            if dropped == 0 {
                continue;
            }
            removed += dropped;
            let rebuilt: Vec<K> = core::mem::take(bucket)
                .into_iter()
                .zip(keep)
                .filter_map(|(key, keep)| keep.then_some(key))
                .collect();
            *bucket = rebuilt;
        }

        trace!("removed {removed} duplicate keys");
        removed
    }
}

impl ChainedTable<i64> {
    /// Returns the largest stored key, or `None` if the table is empty.
    pub fn max(&self) -> Option<i64> {
        self.iter().copied().max()
    }

    /// Returns the smallest stored key, or `None` if the table is empty.
    pub fn min(&self) -> Option<i64> {
        self.iter().copied().min()
    }

    /// Returns `true` if two stored keys at different positions sum to
    /// `target`. A key may pair with another copy of itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_hash::ChainedTable;
    ///
    /// let mut table = ChainedTable::new(10).unwrap();
    /// table.extend([15i64, 4]);
    /// assert!(!table.two_sum(30));
    /// table.insert(15);
    /// assert!(table.two_sum(30));
    /// ```
    pub fn two_sum(&self, target: i64) -> bool {
        let mut seen = SeenSet::default();
        for &key in self.iter() {
            let wanted = i128::from(target) - i128::from(key);
            if i64::try_from(wanted).is_ok_and(|wanted| seen.contains(&wanted)) {
                return true;
            }
            seen.insert(key);
        }
        false
    }
}

impl ChainedTable<String> {
    /// Alias of [`total`](Self::total).
    pub fn total_strings(&self) -> usize {
        self.total()
    }

    /// Returns `true` if any string of `other` is stored in the table.
    pub fn has_common_string<I, S>(&self, other: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        other.into_iter().any(|s| self.search(s.as_ref()))
    }

    /// Returns every stored string in lexicographic (byte) order.
    pub fn all_strings_sorted(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.iter().map(String::as_str).collect();
        all.sort_unstable();
        all
    }

    /// Reverses the characters of every stored string in place.
    ///
    /// A reversed string has the same character sum, so no key changes
    /// bucket.
    pub fn reverse_all_strings(&mut self) {
        for key in self.buckets.iter_mut().flatten() {
            *key = key.chars().rev().collect();
        }
    }

    /// Counts stored strings starting with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.iter().filter(|s| s.starts_with(prefix)).count()
    }

    /// Returns the stored strings that are exactly `len` characters long.
    pub fn strings_of_length(&self, len: usize) -> Vec<&str> {
        self.iter()
            .filter(|s| s.chars().count() == len)
            .map(String::as_str)
            .collect()
    }

    /// Concatenates every stored string in scan order, without separators.
    pub fn concatenate_all(&self) -> String {
        self.iter().map(String::as_str).collect()
    }

    /// Returns the longest stored string, in characters; the first one met
    /// wins a tie.
    pub fn longest_string(&self) -> Option<&str> {
        let mut longest: Option<(&str, usize)> = None;
        for s in self.iter() {
            let len = s.chars().count();
            if longest.is_none_or(|(_, best)| len > best) {
                longest = Some((s, len));
            }
        }
        longest.map(|(s, _)| s)
    }
}
