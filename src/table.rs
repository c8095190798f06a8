//! RawTable: the strategy-agnostic core behind every set and map surface.
//!
//! Owns the slot store, the element count and the capacity source. Insert
//! places an entry through the probe engine, bumps the count and, once the
//! load factor reaches one half, rebuilds the store at the next capacity by
//! replaying every entry in enumeration order through the same insert path.
//! Replayed entries that find no slot at the new capacity are dropped and
//! reported to the caller as [`InsertError::EntriesLost`].

use crate::capacity::CapacitySource;
use crate::params::{Collision, ConfigError, Params};
use crate::slot_store::{Entries, Keyed, Slot, SlotStore};
use core::fmt;

/// Why an insert did not complete normally.
///
/// None of these are fatal: a caller that ignores them sees the table keep
/// working with the entry either dropped or, for `CapacityExhausted`, stored
/// without growth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertError {
    /// The key is already present; the table is unchanged.
    DuplicateKey,
    /// The probe sequence wrapped around without finding a slot; the entry
    /// was dropped.
    NoRoom,
    /// The entry was stored, but no larger capacity was available to grow
    /// into. The table remains at `capacity`.
    CapacityExhausted { capacity: usize },
    /// The entry was placed and the table grew, but `count` stored entries
    /// found no free slot while being replayed at the new capacity and were
    /// dropped. The dropped entries may include the one just inserted.
    EntriesLost { count: usize },
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey => write!(f, "key already present"),
            Self::NoRoom => write!(f, "probe sequence found no free slot"),
            Self::CapacityExhausted { capacity } => {
                write!(f, "capacity source exhausted at capacity {}", capacity)
            }
            Self::EntriesLost { count } => {
                write!(f, "{} entries found no free slot while rehashing", count)
            }
        }
    }
}

impl std::error::Error for InsertError {}

/// How a chain treats an entry whose key it already holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ChainDedup {
    SkipSameKey,
    AppendAlways,
}

/// What happens when the capacity source has nothing left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Exhaustion {
    /// Set the exhaustion flag and carry on above the load threshold. The
    /// source is asked again on every later over-threshold insert; the flag
    /// clears once it offers a larger capacity.
    Flag,
    /// Report `InsertError::CapacityExhausted` on every attempt.
    Report,
}

pub(crate) struct RawTable<E, C> {
    params: Params,
    store: SlotStore<E>,
    count: usize,
    source: C,
    exhausted: bool,
    dedup: ChainDedup,
    exhaustion: Exhaustion,
}

impl<E, C> RawTable<E, C> {
    pub(crate) fn params(&self) -> &Params {
        &self.params
    }

    pub(crate) fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn slots(&self) -> &[Slot<E>] {
        self.store.as_slice()
    }

    pub(crate) fn entries(&self) -> Entries<'_, E> {
        self.store.entries()
    }

    pub(crate) fn source(&self) -> &C {
        &self.source
    }

    pub(crate) fn store(&self) -> &SlotStore<E> {
        &self.store
    }
}

impl<E: Keyed, C> RawTable<E, C> {
    /// First stored entry with `key`, in chain order for chaining.
    pub(crate) fn find(&self, key: &str) -> Option<&E> {
        let index = self.params.collision.locate(key, self.slots())?;
        match &self.slots()[index] {
            Slot::Empty => None,
            Slot::Single(e) => (e.key() == key).then_some(e),
            Slot::Chain(list) => list.iter().find(|e| e.key() == key),
        }
    }
}

impl<E, C> RawTable<E, C>
where
    E: Keyed,
    C: CapacitySource,
{
    pub(crate) fn new(
        params: Params,
        source: C,
        dedup: ChainDedup,
        exhaustion: Exhaustion,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            store: SlotStore::new(params.initial_capacity),
            count: 0,
            source,
            exhausted: false,
            dedup,
            exhaustion,
        })
    }

    /// Place `entry`, count it and grow if the load factor reached one half.
    pub(crate) fn insert(&mut self, entry: E) -> Result<(), InsertError> {
        let collision = self.params.collision;
        let Some(index) = collision.locate(entry.key(), self.store.as_slice()) else {
            tracing::trace!(key = entry.key(), capacity = self.capacity(), "no room for key");
            return Err(InsertError::NoRoom);
        };
        let dedup = self.dedup;
        let slot = self.store.slot_mut(index);
        match collision {
            Collision::Chain { .. } => match slot {
                Slot::Chain(list) => {
                    let present = dedup == ChainDedup::SkipSameKey
                        && list.iter().any(|e| e.key() == entry.key());
                    if !present {
                        list.push(entry);
                    }
                }
                _ => *slot = Slot::Chain(vec![entry]),
            },
            Collision::Linear { .. } | Collision::Double { .. } => *slot = Slot::Single(entry),
        }
        self.count += 1;

        if 2 * self.count >= self.capacity() {
            self.grow()?;
        }
        Ok(())
    }

    fn grow(&mut self) -> Result<(), InsertError> {
        let current = self.capacity();
        let next = match self.source.next_capacity(current) {
            Some(next) if next > current => next,
            offered => {
                if self.exhausted {
                    tracing::trace!(capacity = current, ?offered, "capacity source still exhausted");
                } else {
                    tracing::warn!(capacity = current, ?offered, "capacity source exhausted");
                }
                return match self.exhaustion {
                    Exhaustion::Flag => {
                        self.exhausted = true;
                        Ok(())
                    }
                    Exhaustion::Report => Err(InsertError::CapacityExhausted { capacity: current }),
                };
            }
        };

        tracing::debug!(from = current, to = next, entries = self.count, "resizing table");
        self.exhausted = false;
        let old = core::mem::replace(&mut self.store, SlotStore::new(next));
        self.count = 0;

        // Nested growth reports its own drops; they add to this replay's.
        let mut lost = 0;
        let mut result = Ok(());
        for entry in old.into_entries() {
            match self.insert(entry) {
                Ok(()) => {}
                Err(InsertError::NoRoom) => {
                    tracing::warn!(capacity = self.capacity(), "entry lost while rehashing");
                    lost += 1;
                }
                Err(InsertError::EntriesLost { count }) => lost += count,
                Err(e) => result = Err(e),
            }
        }
        if lost > 0 {
            return Err(InsertError::EntriesLost { count: lost });
        }
        result
    }
}

impl<E: fmt::Debug, C> fmt::Debug for RawTable<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawTable")
            .field("params", &self.params)
            .field("count", &self.count)
            .field("exhausted", &self.exhausted)
            .field("slots", &self.store.as_slice())
            .finish()
    }
}
