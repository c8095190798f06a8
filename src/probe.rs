//! Probe engine: maps a key to the slot it lives in or should be placed in.

use crate::params::Collision;
use crate::poly_hash::{double_hash, poly_hash};
use crate::slot_store::{Keyed, Slot};

impl Collision {
    /// Slot for `key` over `slots`.
    ///
    /// Chaining returns the home slot. Probing returns the slot holding
    /// `key`, else the first empty slot on the probe sequence, else `None`
    /// once the sequence wraps back to its start.
    pub(crate) fn locate<E: Keyed>(&self, key: &str, slots: &[Slot<E>]) -> Option<usize> {
        let capacity = slots.len();
        match *self {
            Collision::Chain { z } => Some(poly_hash(key, z, capacity)),
            Collision::Linear { z } => probe(key, slots, poly_hash(key, z, capacity), 1),
            Collision::Double { z1, z2, c2 } => {
                let (start, step) = double_hash(key, z1, z2, c2, capacity);
                probe(key, slots, start, step)
            }
        }
    }
}

fn probe<E: Keyed>(key: &str, slots: &[Slot<E>], start: usize, step: usize) -> Option<usize> {
    let capacity = slots.len();
    let step = step % capacity;
    let mut slot = start;
    loop {
        match &slots[slot] {
            Slot::Empty => return Some(slot),
            Slot::Single(e) if e.key() == key => return Some(slot),
            _ => {}
        }
        slot = (slot + step) % capacity;
        if slot == start {
            return None;
        }
    }
}
