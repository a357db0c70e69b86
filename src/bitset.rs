//! Fixed-capacity bit set over packed `u64` words.
//!
//! This is the set type behind the whole clique search: candidate sets,
//! exclusion sets and neighbor rows are all [`BitSet`]s over the same universe
//! `[0, capacity)`, so every set-algebra operation is a single pass over words.
//!
//! # Tail invariant
//!
//! No bit at or beyond `capacity` is ever observably set. Operations that fill
//! or complement whole words ([`fill`][BitSet::fill], [`invert`][BitSet::invert],
//! [`set_capacity`][BitSet::set_capacity]) mask the last word afterwards.
//!
//! # Iteration under mutation
//!
//! [`BitSet::iter`] borrows the set, so the borrow checker forbids mutating it
//! during the loop. When a caller *needs* to mutate the set it is walking (the
//! Naudé pivot rule folds vertices into the clique mid-scan), it uses a
//! [`Cursor`] instead: the cursor holds no borrow, re-reads the live words on
//! every step, and only ever moves forward.

use std::fmt;

use crate::bits::{bit_to_index, count_bits, highest_bit_index, lowest_bit, lowest_bit_index, single_bit};

/// A set of integers in `[0, capacity)`, backed by a vector of u64 words.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
    /// Size of the universe (not the number of members)
    capacity: usize,
}

impl BitSet {
    /// Number of bits per word.
    pub const BITS_PER_WORD: usize = 64;

    /// Creates a new empty set over the universe `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; Self::words_for(capacity)],
            capacity,
        }
    }

    /// Creates a set containing the whole universe `[0, capacity)`.
    pub fn full(capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        set.fill();
        set
    }

    /// Creates a set from the given members.
    pub fn from_indices(capacity: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(capacity);
        set.extend(indices);
        set
    }

    #[inline]
    fn words_for(capacity: usize) -> usize {
        (capacity + Self::BITS_PER_WORD - 1) / Self::BITS_PER_WORD
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    /// Clears every bit at or beyond `capacity` in the last word.
    #[inline]
    fn mask_tail(&mut self) {
        let tail = self.capacity % Self::BITS_PER_WORD;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= single_bit(tail) - 1;
            }
        }
    }

    /// Returns the size of the universe.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the size of the universe.
    ///
    /// Members below the new capacity are preserved, members at or beyond it are dropped.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.words.resize(Self::words_for(capacity), 0);
        self.capacity = capacity;
        self.mask_tail();
    }

    /// Returns the raw words.
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Returns true if the bit at the given index is set.
    ///
    /// Indices outside the universe are never members.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        (self.words[word_idx] & single_bit(bit_idx)) != 0
    }

    /// Sets the bit at the given index. Returns true if the bit was not previously set.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        debug_assert!(index < self.capacity, "index {} out of range 0..{}", index, self.capacity);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let mask = single_bit(bit_idx);
        let was_clear = (self.words[word_idx] & mask) == 0;
        self.words[word_idx] |= mask;
        was_clear
    }

    /// Clears the bit at the given index. Returns true if the bit was previously set.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        debug_assert!(index < self.capacity, "index {} out of range 0..{}", index, self.capacity);
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        let mask = single_bit(bit_idx);
        let was_set = (self.words[word_idx] & mask) != 0;
        self.words[word_idx] &= !mask;
        was_set
    }

    /// Returns true if no bits are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns the smallest member, if any.
    pub fn first(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * Self::BITS_PER_WORD + lowest_bit_index(w))
    }

    /// Returns the largest member, if any.
    pub fn last(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * Self::BITS_PER_WORD + highest_bit_index(w))
    }

    /// Clears all bits.
    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    /// Sets every bit of the universe.
    pub fn fill(&mut self) {
        for word in &mut self.words {
            *word = u64::MAX;
        }
        self.mask_tail();
    }

    /// Replaces the set with its complement in the universe.
    pub fn invert(&mut self) {
        for word in &mut self.words {
            *word = !*word;
        }
        self.mask_tail();
    }

    /// Overwrites this set with the contents of `other`.
    #[inline]
    pub fn copy_from(&mut self, other: &BitSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        self.words.copy_from_slice(&other.words);
    }

    /// `self = self ∪ other`
    #[inline]
    pub fn union_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// `self = self ∩ other`
    #[inline]
    pub fn intersect_with(&mut self, other: &BitSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    /// `self = self \ other`
    #[inline]
    pub fn remove_all(&mut self, other: &BitSet) {
        debug_assert_eq!(self.capacity, other.capacity);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }

    /// `self = a ∩ b`, leaving both operands untouched.
    #[inline]
    pub fn intersection(&mut self, a: &BitSet, b: &BitSet) {
        debug_assert_eq!(self.capacity, a.capacity);
        debug_assert_eq!(self.capacity, b.capacity);
        for ((r, x), y) in self.words.iter_mut().zip(&a.words).zip(&b.words) {
            *r = x & y;
        }
    }

    /// Returns the number of members.
    pub fn count(&self) -> usize {
        self.words.iter().map(|&w| count_bits(w)).sum()
    }

    /// Counts members, but stops scanning once the count reaches `limit`.
    ///
    /// The result is exact when below `limit`, and otherwise some value `>= limit`.
    pub fn count_limit(&self, limit: usize) -> usize {
        let mut sum = 0;
        for &w in &self.words {
            sum += count_bits(w);
            if sum >= limit {
                break;
            }
        }
        sum
    }

    /// Returns `|self ∩ other|` without materializing the intersection.
    pub fn count_common(&self, other: &BitSet) -> usize {
        debug_assert_eq!(self.capacity, other.capacity);
        self.words
            .iter()
            .zip(&other.words)
            .map(|(&a, &b)| count_bits(a & b))
            .sum()
    }

    /// Like [`count_common`][BitSet::count_common], but stops once the count reaches `limit`.
    ///
    /// Also returns a witness: some member of `self ∩ other` seen during the scan,
    /// or `None` if the intersection is empty. The count never exceeds the true
    /// intersection size.
    pub fn count_common_limit(&self, other: &BitSet, limit: usize) -> (usize, Option<usize>) {
        debug_assert_eq!(self.capacity, other.capacity);
        let mut sum = 0;
        let mut witness = None;
        for (i, (&a, &b)) in self.words.iter().zip(&other.words).enumerate() {
            let bits = a & b;
            if bits != 0 {
                sum += count_bits(bits);
                witness = Some(i * Self::BITS_PER_WORD + lowest_bit_index(bits));
                if sum >= limit {
                    break;
                }
            }
        }
        (sum, witness)
    }

    /// Extends the set with all given members.
    pub fn extend(&mut self, iter: impl IntoIterator<Item = usize>) {
        for index in iter {
            self.insert(index);
        }
    }

    /// Returns an iterator over all members in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            bitset: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Returns a borrow-free cursor positioned before the smallest member.
    pub fn cursor(&self) -> Cursor {
        Cursor::default()
    }

    /// Collects the members into a vector.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = usize;
    type IntoIter = BitSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over set bits in a BitSet.
///
/// Zero words are skipped whole; a non-zero word costs one step per member.
pub struct BitSetIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit = lowest_bit(self.current_word);
                self.current_word ^= bit;
                return Some(self.word_idx * BitSet::BITS_PER_WORD + bit_to_index(bit));
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = self.bitset.words[self.word_idx];
        }
    }
}

/// Ascending walk over a set that may be mutated between steps.
///
/// Each call to [`next`][Cursor::next] reads the live word at the current
/// position, masked to the bits strictly above the last yielded member.
/// Members added below the cursor are never seen, members removed ahead of it
/// are never yielded, and nothing is yielded twice.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    word_idx: usize,
    /// Bits of the current word still eligible to be yielded.
    mask: u64,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            word_idx: 0,
            mask: u64::MAX,
        }
    }
}

impl Cursor {
    /// Returns the next member of `set` above the cursor, advancing past it.
    #[inline]
    pub fn next(&mut self, set: &BitSet) -> Option<usize> {
        let words = set.words();
        while self.word_idx < words.len() {
            let bits = words[self.word_idx] & self.mask;
            if bits != 0 {
                let bit = lowest_bit(bits);
                // Keep only the bits above `bit`.
                self.mask = !(bit - 1) ^ bit;
                return Some(self.word_idx * BitSet::BITS_PER_WORD + bit_to_index(bit));
            }
            self.word_idx += 1;
            self.mask = u64::MAX;
        }
        None
    }
}
