//! HashSet: string set over `RawTable` that refuses duplicate keys.

use crate::capacity::{CapacitySource, DoublingPrimes};
use crate::params::{ConfigError, Params};
use crate::slot_store::{Entries, Slot, BASE_STYLE};
use crate::table::{ChainDedup, Exhaustion, InsertError, RawTable};
use core::fmt;

/// Set of strings. Every insert is guarded by a lookup, so a key is stored at
/// most once under every collision strategy.
///
/// When the capacity source runs dry the set stops growing, sets
/// [`HashSet::is_exhausted`], and keeps accepting keys above the usual load
/// factor until probing finds no room. Every later over-threshold insert asks
/// the source again, so a source that recovers lets the set grow once more.
#[derive(Debug)]
pub struct HashSet<C = DoublingPrimes> {
    raw: RawTable<String, C>,
}

impl HashSet {
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        Self::with_source(params, DoublingPrimes)
    }
}

impl<C: CapacitySource> HashSet<C> {
    pub fn with_source(params: Params, source: C) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawTable::new(params, source, ChainDedup::SkipSameKey, Exhaustion::Flag)?,
        })
    }

    /// Insert `key` unless it is already present.
    ///
    /// Returns `DuplicateKey` for a present key and `NoRoom` when probing
    /// wrapped around; the set is unchanged in both cases. `EntriesLost`
    /// means the key was added but the resize it triggered dropped keys that
    /// had no slot at the new capacity.
    pub fn insert(&mut self, key: impl Into<String>) -> Result<(), InsertError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(InsertError::DuplicateKey);
        }
        self.raw.insert(key)
    }
}

impl<C> HashSet<C> {
    pub fn contains(&self, key: &str) -> bool {
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

    /// True while the capacity source's latest answer was that it cannot
    /// grow further.
    pub fn is_exhausted(&self) -> bool {
        self.raw.is_exhausted()
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

    /// Keys in slot order, chained keys in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.raw.entries(),
        }
    }
}

impl<'a, C> IntoIterator for &'a HashSet<C> {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// `<EMPTY> | a ; b | c`: slots split by `|`, chains by `;`.
impl<C> fmt::Display for HashSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw
            .store()
            .render(f, BASE_STYLE, |f, key| f.write_str(key))
    }
}

/// Iterator over the keys of a set, in enumeration order.
pub struct Iter<'a> {
    pub(crate) it: Entries<'a, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(String::as_str)
    }
}
