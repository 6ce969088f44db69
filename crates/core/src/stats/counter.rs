//! Frequency counter with optional contributor tracking.

use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use ordered_float::OrderedFloat;
use rustc_hash::FxBuildHasher;

/// Float key used by numeric counters.
pub type FloatKey = OrderedFloat<f64>;

/// Counter over float keys.
pub type FloatCounter<E = ()> = FrequencyCounter<FloatKey, E>;

#[inline]
pub const fn float_key(value: f64) -> FloatKey {
    OrderedFloat(value)
}

/// Contributing element -> number of live registrations of it under one key.
type Contributors<E> = IndexMap<E, usize, FxBuildHasher>;

#[derive(Debug, Clone)]
struct Bucket<E> {
    count: usize,
    contributors: Contributors<E>,
}

impl<E> Bucket<E> {
    fn new() -> Self {
        Self {
            count: 0,
            contributors: IndexMap::with_hasher(FxBuildHasher),
        }
    }
}

impl<E: Eq + Hash> PartialEq for Bucket<E> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.contributors == other.contributors
    }
}

/// Maps discrete keys to occurrence counts, optionally remembering which
/// elements contributed each key.
///
/// Keys with a count of zero are evicted, never stored. Keys are kept in
/// order, so `most_common` breaks ties by the smallest key and
/// `smallest_key`/`largest_key` are logarithmic.
///
/// Contributors are only recorded by `add_from`; counters fed through `add`
/// track counts alone.
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K, E = ()> {
    buckets: BTreeMap<K, Bucket<E>>,
    total: usize,
    most_common: OnceCell<Option<K>>,
    average: OnceCell<f64>,
}

impl<K, E> Default for FrequencyCounter<K, E> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            total: 0,
            most_common: OnceCell::new(),
            average: OnceCell::new(),
        }
    }
}

impl<K: Ord + Copy, E> FrequencyCounter<K, E> {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.most_common.take();
        self.average.take();
    }

    /// Counts one occurrence of `key` without recording a contributor.
    pub fn add(&mut self, key: K) {
        self.add_count(key, 1);
    }

    /// Counts `n` occurrences of `key` without recording a contributor.
    pub fn add_count(&mut self, key: K, n: usize) {
        if n == 0 {
            return;
        }
        self.buckets.entry(key).or_insert_with(Bucket::new).count += n;
        self.total += n;
        self.invalidate();
    }

    /// Removes one untracked occurrence of `key`. Returns false, leaving the
    /// counter untouched, if the key is absent or every remaining occurrence
    /// belongs to a contributor; those go through `remove`.
    pub fn remove_key(&mut self, key: K) -> bool {
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let tracked: usize = bucket.contributors.values().sum();
        if bucket.count <= tracked {
            return false;
        }
        bucket.count -= 1;
        if bucket.count == 0 {
            self.buckets.remove(&key);
        }
        self.total -= 1;
        self.invalidate();
        true
    }

    /// Number of occurrences of `key`.
    pub fn count(&self, key: K) -> usize {
        self.buckets.get(&key).map_or(0, |b| b.count)
    }

    /// Sum of all counts.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn contains_key(&self, key: K) -> bool {
        self.buckets.contains_key(&key)
    }

    /// Iterates `(key, count)` in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.buckets.iter().map(|(k, b)| (*k, b.count))
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.buckets.keys().copied()
    }

    /// The key with the highest count. Ties go to the smallest key.
    pub fn most_common(&self) -> Option<K> {
        *self.most_common.get_or_init(|| {
            let mut best: Option<(K, usize)> = None;
            for (key, bucket) in &self.buckets {
                if best.is_none_or(|(_, count)| bucket.count > count) {
                    best = Some((*key, bucket.count));
                }
            }
            best.map(|(key, _)| key)
        })
    }

    /// Count of the most common key, 0 when empty.
    pub fn most_common_count(&self) -> usize {
        self.most_common().map_or(0, |key| self.count(key))
    }

    pub fn smallest_key(&self) -> Option<K> {
        self.buckets.first_key_value().map(|(k, _)| *k)
    }

    pub fn largest_key(&self) -> Option<K> {
        self.buckets.last_key_value().map(|(k, _)| *k)
    }

    /// Elements registered under `key`.
    pub fn elements_with(&self, key: K) -> impl Iterator<Item = &E> + '_ {
        self.buckets
            .get(&key)
            .into_iter()
            .flat_map(|b| b.contributors.keys())
    }

    pub fn elements_with_most_common(&self) -> impl Iterator<Item = &E> + '_ {
        self.most_common()
            .and_then(|key| self.buckets.get(&key))
            .into_iter()
            .flat_map(|b| b.contributors.keys())
    }

    pub fn elements_with_smallest(&self) -> impl Iterator<Item = &E> + '_ {
        self.buckets
            .first_key_value()
            .into_iter()
            .flat_map(|(_, b)| b.contributors.keys())
    }

    pub fn elements_with_largest(&self) -> impl Iterator<Item = &E> + '_ {
        self.buckets
            .last_key_value()
            .into_iter()
            .flat_map(|(_, b)| b.contributors.keys())
    }

    pub fn clear(&mut self) {
        self.buckets = BTreeMap::new();
        self.total = 0;
        self.invalidate();
    }
}

impl<K: Ord + Copy, E: Clone + Eq + Hash> FrequencyCounter<K, E> {
    /// Counts one occurrence of `key` contributed by `element`.
    pub fn add_from(&mut self, key: K, element: &E) {
        let bucket = self.buckets.entry(key).or_insert_with(Bucket::new);
        bucket.count += 1;
        *bucket.contributors.entry(element.clone()).or_insert(0) += 1;
        self.total += 1;
        self.invalidate();
    }

    /// Removes one occurrence of `key` contributed by `element`.
    ///
    /// A key/element pair that was never added is left untouched and false is
    /// returned.
    pub fn remove(&mut self, key: K, element: &E) -> bool {
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(registrations) = bucket.contributors.get_mut(element) else {
            return false;
        };
        *registrations -= 1;
        if *registrations == 0 {
            bucket.contributors.swap_remove(element);
        }
        bucket.count -= 1;
        if bucket.count == 0 {
            self.buckets.remove(&key);
        }
        self.total -= 1;
        self.invalidate();
        true
    }

    /// Merges `other` into this counter: counts are summed and contributor
    /// sets unioned. Costs O(size of `other`).
    pub fn combine(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        for (key, theirs) in &other.buckets {
            let ours = self.buckets.entry(*key).or_insert_with(Bucket::new);
            ours.count += theirs.count;
            for (element, n) in &theirs.contributors {
                *ours.contributors.entry(element.clone()).or_insert(0) += n;
            }
        }
        self.total += other.total;
        self.invalidate();
    }

    /// Merges two counters, folding the smaller into the larger.
    pub fn merged(self, other: Self) -> Self {
        let (mut big, small) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        big.combine(&small);
        big
    }
}

impl<E> FrequencyCounter<FloatKey, E> {
    pub fn add_value(&mut self, value: f64) {
        self.add(float_key(value));
    }

    /// Most common value, NaN when empty.
    pub fn most_common_value(&self) -> f64 {
        self.most_common().map_or(f64::NAN, |k| k.0)
    }

    /// Count-weighted mean of all values, NaN when empty.
    pub fn average(&self) -> f64 {
        *self.average.get_or_init(|| {
            if self.total == 0 {
                return f64::NAN;
            }
            let sum: f64 = self
                .buckets
                .iter()
                .map(|(k, b)| k.0 * b.count as f64)
                .sum();
            sum / self.total as f64
        })
    }

    /// Smallest value, NaN when empty.
    pub fn smallest(&self) -> f64 {
        self.smallest_key().map_or(f64::NAN, |k| k.0)
    }

    /// Largest value, NaN when empty.
    pub fn largest(&self) -> f64 {
        self.largest_key().map_or(f64::NAN, |k| k.0)
    }
}

impl<K: Ord, E: Eq + Hash> PartialEq for FrequencyCounter<K, E> {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.buckets == other.buckets
    }
}

impl<K: Ord + Copy, E> FromIterator<K> for FrequencyCounter<K, E> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

impl<K: Ord + Copy, E> Extend<K> for FrequencyCounter<K, E> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}
