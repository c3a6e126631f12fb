use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt::Debug;

use log::debug;

use crate::error::TableError;
use crate::hashing::BucketHash;
use crate::hashing::Capacity;

/// A fixed bucket array resolving collisions by separate chaining.
///
/// Every key lives in the bucket picked by its [`BucketHash`]; buckets are
/// ordered sequences, so duplicates are kept and insertion order is
/// preserved. Buckets never fill up.
///
/// `ChainedTable<i64>` and `ChainedTable<String>` carry additional aggregate
/// queries, see the [`aggregate`](crate::aggregate) module.
///
/// ## Example
///
/// ```rust
/// use probe_hash::ChainedTable;
///
/// let mut table = ChainedTable::new(10).unwrap();
/// for key in [15i64, 25, 15] {
///     table.insert(key);
/// }
/// assert!(table.search(&25));
///
/// // Only the first copy of 15 goes away.
/// assert!(table.delete(&15));
/// assert_eq!(table.display()[5], (5, &[25, 15][..]));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ChainedTable<K> {
    pub(crate) buckets: Vec<Vec<K>>,
    capacity: Capacity,
}

impl<K> Debug for ChainedTable<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().enumerate())
            .finish()
    }
}

impl<K> ChainedTable<K> {
    /// Creates a table with exactly `capacity` empty buckets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Ok(Self::with_capacity(Capacity::new(capacity)?))
    }

    /// Creates a table from an already validated [`Capacity`].
    pub fn with_capacity(capacity: Capacity) -> Self {
        debug!("creating chained table with {} buckets", capacity.get());
        let mut buckets = Vec::with_capacity(capacity.get());
        buckets.resize_with(capacity.get(), Vec::new);
        Self { buckets, capacity }
    }

    /// Returns the fixed number of buckets.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the total number of stored keys, duplicates included.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns `true` if every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Empties every bucket, keeping the bucket count.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    /// Iterates over the buckets in index order.
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = &[K]> {
        self.buckets.iter().map(Vec::as_slice)
    }

    /// Iterates over every key in bucket order, then insertion order within a
    /// bucket.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flatten()
    }

    /// Lists every bucket index with its keys in insertion order.
    pub fn display(&self) -> Vec<(usize, &[K])> {
        self.buckets().enumerate().collect()
    }
}

impl<K> ChainedTable<K>
where
    K: BucketHash,
{
    #[inline(always)]
    pub(crate) fn home<Q>(&self, key: &Q) -> usize
    where
        Q: BucketHash + ?Sized,
    {
        key.bucket(self.capacity)
    }

    /// Appends `key` to its home bucket. Duplicates are kept.
    pub fn insert(&mut self, key: K) {
        let idx = self.home(&key);
        self.buckets[idx].push(key);
    }

    /// Returns `true` if an equal key is stored in `key`'s home bucket.
    ///
    /// The key may be any borrowed form of `K` that hashes the same way, e.g.
    /// `&str` for a `ChainedTable<String>`.
    pub fn search<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: BucketHash + Eq + ?Sized,
    {
        self.buckets[self.home(key)]
            .iter()
            .any(|k| <K as Borrow<Q>>::borrow(k) == key)
    }

    /// Removes the first copy of `key` from its home bucket.
    ///
    /// Later copies stay in place. Returns `false` if `key` is absent.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: BucketHash + Eq + ?Sized,
    {
        let idx = self.home(key);
        let bucket = &mut self.buckets[idx];
        match bucket.iter().position(|k| <K as Borrow<Q>>::borrow(k) == key) {
            Some(pos) => {
                bucket.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl<K> Extend<K> for ChainedTable<K>
where
    K: BucketHash,
{
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K> Default for ChainedTable<K> {
    /// A table with [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) buckets.
    fn default() -> Self {
        Self::with_capacity(Capacity::default())
    }
}
