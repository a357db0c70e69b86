//! Word-level bit tricks used by [`BitSet`][crate::bitset::BitSet].
//!
//! The lowest set bit of a word is isolated with the two's-complement identity
//! `x & -x`. Since the isolated bit is a power of two, multiplying a De Bruijn
//! constant by it is a left shift, and the top 6 bits of the product form a
//! subsequence that is unique for every shift amount. A 64-entry inverse table
//! maps that subsequence back to the bit index, without any loop.
//!
//! Population counts sum an 8-bit lookup table over the eight bytes of a word.
//!
//! Both tables are computed at compile time.

/// De Bruijn sequence with 64 distinct 6-bit windows.
pub const DE_BRUIJN: u64 = 0x0431_4725_9A7A_BB7E;

/// Inverse of the window mapping: `DE_BRUIJN_INVERSE[(bit * DE_BRUIJN) >> 58]` is the index of `bit`.
pub const DE_BRUIJN_INVERSE: [u8; 64] = {
    let mut table = [u8::MAX; 64];
    let mut i = 0;
    while i < 64 {
        let window = ((1u64 << i).wrapping_mul(DE_BRUIJN) >> 58) as usize;
        assert!(table[window] == u8::MAX, "DE_BRUIJN windows are not unique");
        table[window] = i as u8;
        i += 1;
    }
    table
};

/// Number of set bits in every byte value.
pub const BIT_COUNT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 1;
    while i < 256 {
        table[i] = table[i >> 1] + (i & 1) as u8;
        i += 1;
    }
    table
};

/// Returns a word with only bit `index` set.
#[inline(always)]
pub const fn single_bit(index: usize) -> u64 {
    1u64 << index
}

/// Isolates the lowest set bit of `bits` (zero stays zero).
#[inline(always)]
pub const fn lowest_bit(bits: u64) -> u64 {
    bits & bits.wrapping_neg()
}

/// Index of a word that has exactly one bit set.
#[inline(always)]
pub const fn bit_to_index(bit: u64) -> usize {
    debug_assert!(bit.is_power_of_two());
    DE_BRUIJN_INVERSE[(bit.wrapping_mul(DE_BRUIJN) >> 58) as usize] as usize
}

/// Index of the lowest set bit. `bits` must be non-zero.
#[inline(always)]
pub const fn lowest_bit_index(bits: u64) -> usize {
    bit_to_index(lowest_bit(bits))
}

/// Index of the highest set bit, by binary narrowing. `bits` must be non-zero.
#[inline]
pub const fn highest_bit_index(mut bits: u64) -> usize {
    debug_assert!(bits != 0);
    let mut position = ((bits > 0xFFFF_FFFF) as usize) << 5;
    bits >>= position;

    let mut shift = ((bits > 0xFFFF) as usize) << 4;
    bits >>= shift;
    position |= shift;

    shift = ((bits > 0xFF) as usize) << 3;
    bits >>= shift;
    position |= shift;

    shift = ((bits > 0xF) as usize) << 2;
    bits >>= shift;
    position |= shift;

    shift = ((bits > 0x3) as usize) << 1;
    bits >>= shift;
    position |= shift;

    position | (bits >> 1) as usize
}

/// Population count of a word via the byte table.
#[inline(always)]
pub const fn count_bits(bits: u64) -> usize {
    BIT_COUNT[(bits & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 8) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 16) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 24) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 32) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 40) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 48) & 0xFF) as usize] as usize
        + BIT_COUNT[((bits >> 56) & 0xFF) as usize] as usize
}
