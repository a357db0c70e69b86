//! Stack-discipline pool of pre-sized bit sets for the clique search.
//!
//! Every recursive activation of the search needs at most four live sets
//! (S, P, X and one pivot partition), and the recursion depth is bounded by
//! `1 + n`. The arena therefore allocates `4 * (1 + n)` sets once per search and
//! hands them out as [`Slot`] handles with a single advancing/retreating cursor.
//! No heap allocation happens on the hot path.
//!
//! Slots must be released in exactly the reverse order they were reserved. This
//! is checked in debug builds.

use crate::bitset::BitSet;

/// Handle to a set reserved from a [`SetArena`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Slot(usize);

impl Slot {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Sets live per search level: S, P, X and the partition Q.
pub const SETS_PER_LEVEL: usize = 4;

/// Pre-sized pool of [`BitSet`]s with LIFO reservation.
#[derive(Debug, Clone)]
pub struct SetArena {
    sets: Vec<BitSet>,
    /// Index of the next free slot.
    next: usize,
    /// Highest number of slots in use at once.
    peak: usize,
}

impl SetArena {
    /// Creates an arena of `slots` sets, each over the universe `[0, capacity)`.
    pub fn new(capacity: usize, slots: usize) -> Self {
        Self {
            sets: vec![BitSet::new(capacity); slots],
            next: 0,
            peak: 0,
        }
    }

    /// Creates an arena large enough for a full search over `vertices` vertices.
    pub fn for_search(vertices: usize) -> Self {
        Self::new(vertices, SETS_PER_LEVEL * (1 + vertices))
    }

    /// Total number of slots.
    pub fn slots(&self) -> usize {
        self.sets.len()
    }

    /// Number of slots currently reserved.
    pub fn in_use(&self) -> usize {
        self.next
    }

    /// Highest number of slots reserved at once since creation.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Reserves the next slot. Its contents are whatever the previous user left behind.
    #[inline]
    pub fn reserve(&mut self) -> Slot {
        assert!(self.next < self.sets.len(), "set arena exhausted ({} slots)", self.sets.len());
        let slot = Slot(self.next);
        self.next += 1;
        if self.next > self.peak {
            self.peak = self.next;
        }
        slot
    }

    /// Releases the most recently reserved slot.
    #[inline]
    pub fn release(&mut self, slot: Slot) {
        debug_assert!(self.next > 0, "release on empty arena");
        debug_assert_eq!(slot.0 + 1, self.next, "arena slots released out of order");
        self.next -= 1;
    }

    #[inline]
    pub fn get(&self, slot: Slot) -> &BitSet {
        &self.sets[slot.0]
    }

    #[inline]
    pub fn get_mut(&mut self, slot: Slot) -> &mut BitSet {
        &mut self.sets[slot.0]
    }

    /// Reserves a slot holding an empty set.
    pub fn reserve_empty(&mut self) -> Slot {
        let slot = self.reserve();
        self.get_mut(slot).clear();
        slot
    }

    /// Reserves a slot holding the whole universe.
    pub fn reserve_full(&mut self) -> Slot {
        let slot = self.reserve();
        self.get_mut(slot).fill();
        slot
    }

    /// Splits off the freshly reserved `dst` from the older slots below it.
    #[inline]
    fn split(&mut self, src: Slot, dst: Slot) -> (&BitSet, &mut BitSet) {
        debug_assert!(src.0 < dst.0);
        let (lo, hi) = self.sets.split_at_mut(dst.0);
        (&lo[src.0], &mut hi[0])
    }

    /// Reserves a slot holding `src ∩ other`.
    #[inline]
    pub fn intersect(&mut self, src: Slot, other: &BitSet) -> Slot {
        let dst = self.reserve();
        let (a, r) = self.split(src, dst);
        r.intersection(a, other);
        dst
    }

    /// Reserves a slot holding `src ∪ {value}`.
    #[inline]
    pub fn insert(&mut self, src: Slot, value: usize) -> Slot {
        let dst = self.reserve();
        let (a, r) = self.split(src, dst);
        r.copy_from(a);
        r.insert(value);
        dst
    }
}
