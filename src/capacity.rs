//! Capacity sources: where a table gets its next size when it grows.
//!
//! Each table owns its source, so two tables never advance one shared
//! growth sequence.

/// Supplies the next capacity for a growing table.
pub trait CapacitySource {
    /// Return a capacity to grow to from `current`, or `None` once the source
    /// has nothing further to offer.
    ///
    /// Tables treat any value not strictly larger than `current` as
    /// exhaustion.
    fn next_capacity(&mut self, current: usize) -> Option<usize>;
}

/// Covers plain closures and, through std's `FnMut` impls, `&mut F` and
/// `Box<dyn FnMut(usize) -> Option<usize>>` as well.
impl<F> CapacitySource for F
where
    F: FnMut(usize) -> Option<usize>,
{
    fn next_capacity(&mut self, current: usize) -> Option<usize> {
        self(current)
    }
}

/// A finite, caller-supplied list of sizes (conventionally primes) consumed
/// in order through a cursor.
///
/// Sizes not larger than the requested `current` are skipped, so a sequence
/// that starts below the table's initial capacity still behaves.
#[derive(Clone, Debug, Default)]
pub struct SizeSequence {
    sizes: Vec<usize>,
    cursor: usize,
}

impl SizeSequence {
    pub fn new<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self {
            sizes: sizes.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Sizes that have not been handed out yet.
    pub fn remaining(&self) -> &[usize] {
        &self.sizes[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.sizes.len()
    }
}

impl CapacitySource for SizeSequence {
    fn next_capacity(&mut self, current: usize) -> Option<usize> {
        while let Some(&size) = self.sizes.get(self.cursor) {
            self.cursor += 1;
            if size > current {
                return Some(size);
            }
        }
        None
    }
}

/// Unbounded source: the smallest prime at least `2 * current + 1`.
///
/// Only runs dry when that bound overflows `usize`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoublingPrimes;

impl CapacitySource for DoublingPrimes {
    fn next_capacity(&mut self, current: usize) -> Option<usize> {
        let floor = current.checked_mul(2)?.checked_add(1)?;
        next_prime(floor)
    }
}

/// Smallest prime `>= n`, or `None` if the search would overflow.
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(1)?;
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3usize;
    while d.checked_mul(d).map_or(false, |sq| sq <= n) {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
