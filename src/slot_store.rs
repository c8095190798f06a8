//! Slot array shared by all strategies, plus in-order enumeration and the
//! slot-by-slot text rendering.

use core::fmt;

/// Entries stored in a table expose their string key.
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

impl<V> Keyed for (String, V) {
    fn key(&self) -> &str {
        &self.0
    }
}

/// State of one slot.
///
/// Probing tables only ever hold `Empty` or `Single`; chaining tables only
/// `Empty` or `Chain`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<E> {
    Empty,
    Single(E),
    /// Entries in insertion order; never reordered.
    Chain(Vec<E>),
}

impl<E> Slot<E> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    fn into_entries(self) -> SlotEntries<E> {
        match self {
            Slot::Empty => SlotEntries::Chain(Vec::new().into_iter()),
            Slot::Single(e) => SlotEntries::Single(Some(e)),
            Slot::Chain(list) => SlotEntries::Chain(list.into_iter()),
        }
    }
}

enum SlotEntries<E> {
    Single(Option<E>),
    Chain(std::vec::IntoIter<E>),
}

impl<E> Iterator for SlotEntries<E> {
    type Item = E;
    fn next(&mut self) -> Option<E> {
        match self {
            SlotEntries::Single(e) => e.take(),
            SlotEntries::Chain(it) => it.next(),
        }
    }
}

/// Fixed-size slot array. Its length is the table capacity.
#[derive(Clone, Debug)]
pub(crate) struct SlotStore<E> {
    slots: Vec<Slot<E>>,
}

impl<E> SlotStore<E> {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self { slots }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn as_slice(&self) -> &[Slot<E>] {
        &self.slots
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Slot<E> {
        &mut self.slots[index]
    }

    pub(crate) fn entries(&self) -> Entries<'_, E> {
        Entries::new(&self.slots)
    }

    /// Consume the store, yielding entries in the same order as `entries`.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = E> {
        self.slots.into_iter().flat_map(Slot::into_entries)
    }

    pub(crate) fn render<F>(
        &self,
        f: &mut fmt::Formatter<'_>,
        style: RenderStyle,
        mut entry: F,
    ) -> fmt::Result
    where
        F: FnMut(&mut fmt::Formatter<'_>, &E) -> fmt::Result,
    {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(style.slot_separator)?;
            }
            match slot {
                Slot::Empty => f.write_str(EMPTY_MARKER)?,
                Slot::Single(e) => entry(f, e)?,
                Slot::Chain(list) => {
                    for (j, e) in list.iter().enumerate() {
                        if j > 0 {
                            f.write_str(style.chain_separator)?;
                        }
                        entry(f, e)?;
                    }
                }
            }
        }
        Ok(())
    }
}

pub const EMPTY_MARKER: &str = "<EMPTY>";

/// Separators used by a table family's rendering.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RenderStyle {
    pub(crate) slot_separator: &'static str,
    pub(crate) chain_separator: &'static str,
}

/// Base family: slots split by `|`, chains by `;`.
pub(crate) const BASE_STYLE: RenderStyle = RenderStyle {
    slot_separator: " | ",
    chain_separator: " ; ",
};

/// Dynamic sets swap the two separators.
pub(crate) const DYNAMIC_SET_STYLE: RenderStyle = RenderStyle {
    slot_separator: " ; ",
    chain_separator: " | ",
};

pub(crate) const DYNAMIC_MAP_STYLE: RenderStyle = RenderStyle {
    slot_separator: " ; ",
    chain_separator: " ; ",
};

/// Iterator over stored entries in slot order, chains in list order.
pub struct Entries<'a, E> {
    slots: core::slice::Iter<'a, Slot<E>>,
    chain: core::slice::Iter<'a, E>,
}

impl<'a, E> Entries<'a, E> {
    fn new(slots: &'a [Slot<E>]) -> Self {
        Self {
            slots: slots.iter(),
            chain: <&[E]>::default().iter(),
        }
    }
}

impl<'a, E> Iterator for Entries<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                return Some(e);
            }
            match self.slots.next()? {
                Slot::Empty => {}
                Slot::Single(e) => return Some(e),
                Slot::Chain(list) => self.chain = list.iter(),
            }
        }
    }
}
