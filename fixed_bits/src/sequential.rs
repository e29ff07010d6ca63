//! Non-atomic bitset for single-owner use.
//!
//! # Examples
//!
//! ```rust
//! use fixed_bits::SequentialBitset;
//!
//! let mut seen = SequentialBitset::new(100);
//! assert!(seen.try_set(42));
//! assert!(!seen.try_set(42));
//!
//! seen.set(7).unwrap();
//! assert_eq!(seen.get(7), Ok(true));
//!
//! seen.clear(7).unwrap();
//! assert_eq!(seen.get(7), Ok(false));
//!
//! assert!(seen.get(100).is_err());
//! ```

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::error::Result;
use crate::index::{Word, WORD_BITS, check_bounds, words_for_bits};

/// Fixed-capacity bitset mutated through `&mut self`.
///
/// Bits `0..capacity` start clear. Indices at or past the capacity are
/// rejected by every operation and never touch storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequentialBitset {
    words: Vec<Word>,
    capacity: usize,
}

impl SequentialBitset {
    /// Creates a bitset holding `capacity` clear bits.
    ///
    /// A capacity of zero is allowed and rejects every index.
    pub fn new(capacity: usize) -> Self {
        let num_words = words_for_bits(capacity);
        log::trace!("sequential bitset: capacity={capacity} words={num_words}");
        Self {
            words: vec![0; num_words],
            capacity,
        }
    }

    pub(crate) fn from_words(words: Vec<Word>, capacity: usize) -> Self {
        debug_assert_eq!(words.len(), words_for_bits(capacity));
        Self { words, capacity }
    }

    pub(crate) fn into_words(self) -> (Vec<Word>, usize) {
        (self.words, self.capacity)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Sets bit `k` if it is clear.
    ///
    /// Returns `true` only when this call flipped the bit. An out-of-range
    /// `k` returns `false` without mutating anything; use [`set`](Self::set)
    /// when the two cases must be told apart.
    #[inline]
    pub fn try_set(&mut self, k: usize) -> bool {
        let Ok(idx) = check_bounds(k, self.capacity) else {
            return false;
        };
        let word = &mut self.words[idx.word];
        if idx.is_set_in(*word) {
            return false;
        }
        *word |= idx.mask;
        true
    }

    /// Sets bit `k`. Setting an already set bit is a no-op.
    #[inline]
    pub fn set(&mut self, k: usize) -> Result<()> {
        let idx = check_bounds(k, self.capacity)?;
        self.words[idx.word] |= idx.mask;
        Ok(())
    }

    /// Clears bit `k`. Clearing an already clear bit is a no-op.
    #[inline]
    pub fn clear(&mut self, k: usize) -> Result<()> {
        let idx = check_bounds(k, self.capacity)?;
        self.words[idx.word] &= !idx.mask;
        Ok(())
    }

    #[inline]
    pub fn get(&self, k: usize) -> Result<bool> {
        let idx = check_bounds(k, self.capacity)?;
        Ok(idx.is_set_in(self.words[idx.word]))
    }

    /// Counts set bits; never exceeds the capacity.
    pub fn count_ones(&self) -> usize {
        let total = self.words.iter().map(|w| w.count_ones() as usize).sum();
        debug_assert!(total <= self.capacity);
        total
    }

    /// Returns `true` when no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Clears every bit.
    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    /// Iterates over set bits in ascending order.
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
            capacity: self.capacity,
        }
    }

    #[inline]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Raw storage in host byte order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }
}

/// Iterator over set bit indices, produced by [`SequentialBitset::iter_ones`].
#[derive(Clone, Debug)]
pub struct IterOnes<'a> {
    words: &'a [Word],
    word_idx: usize,
    current: Word,
    capacity: usize,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                // Drop the lowest set bit.
                self.current &= self.current.wrapping_sub(1);

                let idx = self.word_idx * WORD_BITS + bit;
                if idx < self.capacity {
                    return Some(idx);
                }
                self.current = 0;
            }

            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}
