//! prime-table: a single-threaded, string-keyed hash table offering three
//! collision strategies behind one interface, grown along an explicit
//! sequence of capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: reproduce a small, fully deterministic hash table whose layout
//!   (and therefore its rendering) is a pure function of its parameters and
//!   insert sequence.
//! - Layers:
//!   - `poly_hash`: term-wise reduced polynomial string hash.
//!   - `Collision::locate` (probe engine): home slot for chaining; probe
//!     sequence with full-cycle detection for linear probing and double
//!     hashing.
//!   - `SlotStore`: fixed slot array of `Empty` / `Single` / `Chain` slots with
//!     in-order enumeration and text rendering.
//!   - `RawTable<E, C>`: insert, find and resize over a store, driven by a
//!     `CapacitySource`.
//!   - Surfaces: `HashSet`, `HashMap` (lookup-guarded, no duplicate keys) and
//!     `DynamicHashSet`, `DynamicHashMap` (unguarded insert).
//!
//! Constraints
//! - Load factor stays below one half after every insert returns, unless the
//!   capacity source is exhausted.
//! - Resize snapshots entries in enumeration order and replays them through
//!   the ordinary insert path; nothing special-cases nested growth.
//! - No deletion, no shrinking, no internal synchronization. Mutation goes
//!   through `&mut self`, so a half-rebuilt store is never observable.
//!
//! Failure reporting
//! - Inserts return `Result<(), InsertError>`. `NoRoom` and `DuplicateKey`
//!   leave the table unchanged; ignoring the result reproduces silent no-op
//!   semantics.
//! - Base tables flag exhaustion (`is_exhausted`) and keep asking the source
//!   on every over-threshold insert. Dynamic tables report
//!   `CapacityExhausted` on every attempt.
//! - Entries dropped while a resize replays them come back to the caller as
//!   `EntriesLost`.
//!
//! Capacity sources
//! - Each table owns its source, so growth sequences are never shared.
//!   `SizeSequence` hands out a fixed list of sizes; `DoublingPrimes` picks
//!   the next prime past twice the current capacity; any
//!   `FnMut(usize) -> Option<usize>` also works.
//!
//! Logging
//! - Resizes are logged at `debug`, exhaustion and entries lost during a
//!   rehash at `warn`, no-room inserts at `trace`, through `tracing`.

pub mod capacity;
mod dynamic;
pub mod hash_map;
pub mod hash_set;
mod params;
pub mod poly_hash;
mod probe;
mod slot_store;
mod table;
mod table_proptest;

// Public surface
pub use capacity::{CapacitySource, DoublingPrimes, SizeSequence};
pub use dynamic::{DynamicHashMap, DynamicHashSet};
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use params::{Collision, CollisionKind, ConfigError, Params};
pub use slot_store::{Slot, EMPTY_MARKER};
pub use table::InsertError;
