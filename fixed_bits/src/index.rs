//! Bit addressing shared by [`SequentialBitset`](crate::SequentialBitset) and
//! [`ConcurrentBitset`](crate::ConcurrentBitset).
//!
//! Both containers go through [`check_bounds`], so they can never disagree on
//! which word owns a bit or where inside that word it lives.

use core::sync::atomic::AtomicU64;

use crate::error::{BitsetError, Result};

/// Storage unit of both containers.
pub type Word = u64;

/// Atomic counterpart of [`Word`], used by the concurrent container.
pub type AtomicWord = AtomicU64;

/// Number of bits held by one [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

const SHIFT: u32 = WORD_BITS.trailing_zeros();
const LOW_MASK: usize = WORD_BITS - 1;

/// Location of a single bit: the owning word and the mask selecting it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitIndex {
    pub word: usize,
    pub mask: Word,
}

impl BitIndex {
    /// Returns `true` if this bit is set in `value`.
    #[inline(always)]
    pub const fn is_set_in(self, value: Word) -> bool {
        value & self.mask != 0
    }
}

/// Number of words needed to hold `capacity` bits.
#[inline]
pub const fn words_for_bits(capacity: usize) -> usize {
    capacity.div_ceil(WORD_BITS)
}

/// Maps a bit index onto its word and mask. Does not check bounds.
#[inline(always)]
pub const fn locate(k: usize) -> BitIndex {
    BitIndex {
        word: k >> SHIFT,
        mask: (1 as Word) << ((k & LOW_MASK) as u32),
    }
}

/// Validates `k` against `capacity` and locates it.
#[inline(always)]
pub fn check_bounds(k: usize, capacity: usize) -> Result<BitIndex> {
    if k < capacity {
        Ok(locate(k))
    } else {
        log::trace!("rejected bit index {k}, capacity is {capacity}");
        Err(BitsetError::OutOfBounds { index: k, capacity })
    }
}
