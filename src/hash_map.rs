//! HashMap: string-keyed map over `RawTable` that keeps the first value
//! inserted for each key.

use crate::capacity::{CapacitySource, DoublingPrimes};
use crate::params::{ConfigError, Params};
use crate::slot_store::{Entries, Slot, BASE_STYLE};
use crate::table::{ChainDedup, Exhaustion, InsertError, RawTable};
use core::fmt;

/// Map from strings to `V`.
///
/// A second insert for a present key is refused, never overwriting the
/// stored value. Growth and exhaustion behave as for
/// [`HashSet`](crate::HashSet).
#[derive(Debug)]
pub struct HashMap<V, C = DoublingPrimes> {
    raw: RawTable<(String, V), C>,
}

impl<V> HashMap<V> {
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        Self::with_source(params, DoublingPrimes)
    }
}

impl<V, C: CapacitySource> HashMap<V, C> {
    pub fn with_source(params: Params, source: C) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawTable::new(params, source, ChainDedup::SkipSameKey, Exhaustion::Flag)?,
        })
    }

    /// Insert `key -> value` unless `key` is present. On `DuplicateKey` the
    /// first value stays and `value` is dropped.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<(), InsertError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(InsertError::DuplicateKey);
        }
        self.raw.insert((key, value))
    }
}

impl<V, C> HashMap<V, C> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.raw.find(key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.raw.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.raw.count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.count() == 0
    }

    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.raw.load_factor()
    }

    pub fn is_exhausted(&self) -> bool {
        self.raw.is_exhausted()
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

    /// Pairs in slot order, chained pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.raw.entries(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<'a, V, C> IntoIterator for &'a HashMap<V, C> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// `<EMPTY> | k1, v1 ; k2, v2`: pairs render as `key, value`.
impl<V: fmt::Display, C> fmt::Display for HashMap<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw
            .store()
            .render(f, BASE_STYLE, |f, (k, v)| write!(f, "{}, {}", k, v))
    }
}

/// Iterator over `(key, value)` pairs of a map, in enumeration order.
pub struct Iter<'a, V> {
    pub(crate) it: Entries<'a, (String, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, v)| (k.as_str(), v))
    }
}
