//! Dynamic tables: the same hashing and probing core with an unguarded
//! insert path.
//!
//! Differences from [`HashSet`](crate::HashSet) and
//! [`HashMap`](crate::HashMap):
//! - No lookup before insert. Under probing a repeated key overwrites its own
//!   slot; under chaining the set skips a key already in the chain while the
//!   map appends another pair.
//! - The element count tracks placements, so it can run ahead of the number
//!   of stored entries; `len` counts what is actually stored.
//! - No exhaustion flag. If the capacity source cannot supply a larger
//!   capacity, insert keeps the entry and reports
//!   [`InsertError::CapacityExhausted`], retrying on every later insert.

use crate::capacity::{CapacitySource, DoublingPrimes};
use crate::hash_map;
use crate::hash_set;
use crate::params::{ConfigError, Params};
use crate::slot_store::{Slot, DYNAMIC_MAP_STYLE, DYNAMIC_SET_STYLE};
use crate::table::{ChainDedup, Exhaustion, InsertError, RawTable};
use core::fmt;

#[derive(Debug)]
pub struct DynamicHashSet<C = DoublingPrimes> {
    raw: RawTable<String, C>,
}

impl DynamicHashSet {
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        Self::with_source(params, DoublingPrimes)
    }
}

impl<C: CapacitySource> DynamicHashSet<C> {
    pub fn with_source(params: Params, source: C) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawTable::new(params, source, ChainDedup::SkipSameKey, Exhaustion::Report)?,
        })
    }

    /// Place `key` without a prior lookup.
    ///
    /// Never returns `DuplicateKey`. Growth may return `CapacityExhausted`
    /// or `EntriesLost`; in both cases `key` itself was placed first.
    pub fn insert(&mut self, key: impl Into<String>) -> Result<(), InsertError> {
        self.raw.insert(key.into())
    }
}

impl<C> DynamicHashSet<C> {
    pub fn contains(&self, key: &str) -> bool {
        self.raw.find(key).is_some()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.raw.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.entries().next().is_none()
    }

    /// Placements counted since the last resize, including repeats; this is
    /// what drives the load factor.
    pub fn element_count(&self) -> usize {
        self.raw.count()
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    pub fn params(&self) -> &Params {
        self.raw.params()
    }

    pub fn capacity_source(&self) -> &C {
        self.raw.source()
    }

    pub fn slots(&self) -> &[Slot<String>] {
        self.raw.slots()
    }

    pub fn iter(&self) -> hash_set::Iter<'_> {
        hash_set::Iter {
            it: self.raw.entries(),
        }
    }
}

impl<'a, C> IntoIterator for &'a DynamicHashSet<C> {
    type Item = &'a str;
    type IntoIter = hash_set::Iter<'a>;

    fn into_iter(self) -> hash_set::Iter<'a> {
        self.iter()
    }
}

/// `<EMPTY> ; a | b ; c`: slots split by `;`, chains by `|`.
impl<C> fmt::Display for DynamicHashSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw
            .store()
            .render(f, DYNAMIC_SET_STYLE, |f, key| f.write_str(key))
    }
}

/// Map whose chaining insert appends unconditionally, so one key may hold
/// several pairs; lookups return the earliest in chain order.
#[derive(Debug)]
pub struct DynamicHashMap<V, C = DoublingPrimes> {
    raw: RawTable<(String, V), C>,
}

impl<V> DynamicHashMap<V> {
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        Self::with_source(params, DoublingPrimes)
    }
}

impl<V, C: CapacitySource> DynamicHashMap<V, C> {
    pub fn with_source(params: Params, source: C) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawTable::new(params, source, ChainDedup::AppendAlways, Exhaustion::Report)?,
        })
    }

    /// Place `key -> value` without a prior lookup.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<(), InsertError> {
        self.raw.insert((key.into(), value))
    }
}

impl<V, C> DynamicHashMap<V, C> {
    /// First value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.raw.find(key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.raw.find(key).is_some()
    }

    /// Number of stored pairs, counting repeated keys in a chain.
    pub fn len(&self) -> usize {
        self.raw.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.entries().next().is_none()
    }

    pub fn element_count(&self) -> usize {
        self.raw.count()
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    pub fn params(&self) -> &Params {
        self.raw.params()
    }

    pub fn capacity_source(&self) -> &C {
        self.raw.source()
    }

    pub fn slots(&self) -> &[Slot<(String, V)>] {
        self.raw.slots()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, V> {
        hash_map::Iter {
            it: self.raw.entries(),
        }
    }
}

impl<'a, V, C> IntoIterator for &'a DynamicHashMap<V, C> {
    type Item = (&'a str, &'a V);
    type IntoIter = hash_map::Iter<'a, V>;

    fn into_iter(self) -> hash_map::Iter<'a, V> {
        self.iter()
    }
}

/// `<EMPTY> ; k1: v1 ; k2: v2`: everything split by `;`, pairs as
/// `key: value`.
impl<V: fmt::Display, C> fmt::Display for DynamicHashMap<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw
            .store()
            .render(f, DYNAMIC_MAP_STYLE, |f, (k, v)| write!(f, "{}: {}", k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::SizeSequence;

    fn primes() -> SizeSequence {
        SizeSequence::new([11, 23, 47, 97, 197, 397])
    }

    #[test]
    fn chained_map_keeps_every_pair_and_returns_first() {
        let mut m = DynamicHashMap::with_source(Params::chain(31, 101), primes()).unwrap();
        m.insert("k", 1).unwrap();
        m.insert("k", 2).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.element_count(), 2);
        assert_eq!(m.get("k"), Some(&1));
        let pairs: Vec<(&str, &i32)> = m.iter().collect();
        assert_eq!(pairs, [("k", &1), ("k", &2)]);
    }

    #[test]
    fn probing_map_overwrites_in_place() {
        for params in [Params::linear(31, 101), Params::double(31, 37, 5, 101)] {
            let mut m = DynamicHashMap::with_source(params, primes()).unwrap();
            m.insert("k", 1).unwrap();
            m.insert("k", 2).unwrap();
            assert_eq!(m.len(), 1);
            assert_eq!(m.element_count(), 2);
            assert_eq!(m.get("k"), Some(&2));
        }
    }

    #[test]
    fn chained_set_skips_repeat_but_counts_it() {
        let mut s = DynamicHashSet::with_source(Params::chain(31, 101), primes()).unwrap();
        s.insert("a").unwrap();
        s.insert("a").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.element_count(), 2);
        assert!(s.contains("a"));
    }

    #[test]
    fn repeated_inserts_still_trigger_growth() {
        let mut s = DynamicHashSet::with_source(Params::linear(31, 3), primes()).unwrap();
        s.insert("a").unwrap();
        s.insert("a").unwrap();
        // Two placements over three slots crosses one half.
        assert_eq!(s.capacity(), 11);
        assert_eq!(s.len(), 1);
        assert_eq!(s.element_count(), 1, "replay recounts stored entries only");
    }

    #[test]
    fn exhaustion_is_reported_and_entry_kept() {
        let mut s = DynamicHashSet::with_source(Params::linear(31, 3), SizeSequence::new([5]))
            .unwrap();
        s.insert("a").unwrap();
        s.insert("b").unwrap(); // grows to 5
        assert_eq!(s.capacity(), 5);
        assert_eq!(
            s.insert("c"),
            Err(InsertError::CapacityExhausted { capacity: 5 })
        );
        assert!(s.contains("c"));
        assert_eq!(
            s.insert("d"),
            Err(InsertError::CapacityExhausted { capacity: 5 })
        );
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn rendering_uses_dynamic_separators() {
        let mut m = DynamicHashMap::with_source(Params::chain(31, 101), primes()).unwrap();
        m.insert("k", 1).unwrap();
        m.insert("k", 2).unwrap();
        let out = m.to_string();
        assert!(out.contains("k: 1 ; k: 2"));
        assert_eq!(out.matches("<EMPTY>").count(), 100);
        assert!(!out.contains(" | "));
    }

    #[test]
    fn rehash_losses_are_reported() {
        let mut m = DynamicHashMap::with_source(
            Params::double(31, 37, 20, 7),
            SizeSequence::new([20, 40]),
        )
        .unwrap();
        m.insert("k1", 1).unwrap();
        m.insert("k122", 2).unwrap();
        m.insert("zz", 3).unwrap();
        assert_eq!(m.insert("yy", 4), Err(InsertError::EntriesLost { count: 1 }));
        assert_eq!(m.len(), 3);
        assert_eq!(m.get("yy"), Some(&4));
        assert_eq!(m.get("k122"), None);
    }
}
