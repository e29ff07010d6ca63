//! Lock-free bitset shared between threads.
//!
//! Every word is mutated only through compare-and-swap. A failed CAS means
//! another thread changed the same word, so the loop reloads and re-checks;
//! no update to a neighbouring bit in the word can be lost.
//!
//! # Examples
//!
//! ```rust
//! use fixed_bits::ConcurrentBitset;
//! use std::thread;
//!
//! let visited = ConcurrentBitset::new(1024);
//! let winners: usize = thread::scope(|s| {
//!     let visited = &visited;
//!     let handles: Vec<_> = (0..4)
//!         .map(|_| s.spawn(move || visited.try_set(17) as usize))
//!         .collect();
//!     handles.into_iter().map(|h| h.join().unwrap()).sum()
//! });
//!
//! assert_eq!(winners, 1);
//! assert_eq!(visited.get(17), Ok(true));
//! ```

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use core::sync::atomic::Ordering;

use crate::error::Result;
use crate::index::{AtomicWord, BitIndex, Word, check_bounds, words_for_bits};
use crate::sequential::SequentialBitset;

const LOAD: Ordering = Ordering::Acquire;
const CAS_SUCCESS: Ordering = Ordering::AcqRel;
const CAS_FAILURE: Ordering = Ordering::Acquire;

/// Fixed-capacity bitset whose operations all take `&self`.
///
/// Reads are single atomic loads. Writes are CAS retry loops over the owning
/// word with no lock and no backoff; callers needing bounded latency must
/// bound the call themselves.
#[derive(Debug)]
pub struct ConcurrentBitset {
    words: Box<[AtomicWord]>,
    capacity: usize,
}

impl ConcurrentBitset {
    /// Creates a bitset holding `capacity` clear bits.
    pub fn new(capacity: usize) -> Self {
        let num_words = words_for_bits(capacity);
        log::trace!("concurrent bitset: capacity={capacity} words={num_words}");
        let words = (0..num_words).map(|_| AtomicWord::new(0)).collect();
        Self { words, capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    fn word(&self, idx: BitIndex) -> &AtomicWord {
        &self.words[idx.word]
    }

    /// Sets bit `k` if it is clear.
    ///
    /// Among any number of racing callers exactly one sees `true` for the
    /// clear-to-set transition. Returns `false` without a CAS when the bit is
    /// already set, and `false` for an out-of-range `k`.
    #[inline]
    pub fn try_set(&self, k: usize) -> bool {
        let Ok(idx) = check_bounds(k, self.capacity) else {
            return false;
        };
        let word = self.word(idx);
        Self::set_if_clear(word, idx.mask, word.load(LOAD))
    }

    /// [`try_set`](Self::try_set) starting from a word value the caller
    /// already loaded, typically through [`get_word`](Self::get_word).
    ///
    /// `observed` is only a hint to skip the initial load. A stale or even
    /// arbitrary value is safe: the CAS decides every mutation, and a hint
    /// claiming the bit is already set is confirmed with a fresh load before
    /// `false` is returned.
    #[inline]
    pub fn try_set_with(&self, observed: Word, k: usize) -> bool {
        let Ok(idx) = check_bounds(k, self.capacity) else {
            return false;
        };
        let word = self.word(idx);
        let old = if idx.is_set_in(observed) {
            word.load(LOAD)
        } else {
            observed
        };
        Self::set_if_clear(word, idx.mask, old)
    }

    fn set_if_clear(word: &AtomicWord, mask: Word, mut old: Word) -> bool {
        loop {
            if old & mask != 0 {
                return false;
            }
            match word.compare_exchange_weak(old, old | mask, CAS_SUCCESS, CAS_FAILURE) {
                Ok(_) => return true,
                Err(current) => old = current,
            }
        }
    }

    /// Replaces the word with `f(old)` via CAS, retrying until it sticks.
    fn update(word: &AtomicWord, f: impl Fn(Word) -> Word) {
        let mut old = word.load(LOAD);
        loop {
            let new = f(old);
            if new == old {
                return;
            }
            match word.compare_exchange_weak(old, new, CAS_SUCCESS, CAS_FAILURE) {
                Ok(_) => return,
                Err(current) => old = current,
            }
        }
    }

    /// Sets bit `k` regardless of its prior state.
    #[inline]
    pub fn set(&self, k: usize) -> Result<()> {
        let idx = check_bounds(k, self.capacity)?;
        Self::update(self.word(idx), |w| w | idx.mask);
        Ok(())
    }

    /// Clears bit `k` regardless of its prior state.
    #[inline]
    pub fn clear(&self, k: usize) -> Result<()> {
        let idx = check_bounds(k, self.capacity)?;
        Self::update(self.word(idx), |w| w & !idx.mask);
        Ok(())
    }

    #[inline]
    pub fn get(&self, k: usize) -> Result<bool> {
        let idx = check_bounds(k, self.capacity)?;
        Ok(idx.is_set_in(self.word(idx).load(LOAD)))
    }

    /// Loads the whole word owning bit `k`, so several bits sharing it can be
    /// tested with one load.
    #[inline]
    pub fn get_word(&self, k: usize) -> Result<Word> {
        let idx = check_bounds(k, self.capacity)?;
        Ok(self.word(idx).load(LOAD))
    }

    /// Loads the words owning four bits.
    ///
    /// All four indices are validated before any load. The loads are
    /// independent snapshots with no ordering among them.
    #[inline]
    pub fn get_words4(
        &self,
        a: usize,
        b: usize,
        c: usize,
        d: usize,
    ) -> Result<(Word, Word, Word, Word)> {
        let a = check_bounds(a, self.capacity)?;
        let b = check_bounds(b, self.capacity)?;
        let c = check_bounds(c, self.capacity)?;
        let d = check_bounds(d, self.capacity)?;
        Ok((
            self.word(a).load(LOAD),
            self.word(b).load(LOAD),
            self.word(c).load(LOAD),
            self.word(d).load(LOAD),
        ))
    }

    /// Counts set bits word by word; not a single atomic snapshot.
    pub fn count_ones(&self) -> usize {
        self.words
            .iter()
            .map(|w| w.load(LOAD).count_ones() as usize)
            .sum()
    }

    /// Copies the current contents into a [`SequentialBitset`].
    ///
    /// Each word is loaded atomically; concurrent writers may land between
    /// two word loads.
    pub fn snapshot(&self) -> SequentialBitset {
        let words: Vec<Word> = self.words.iter().map(|w| w.load(LOAD)).collect();
        SequentialBitset::from_words(words, self.capacity)
    }

    /// Converts into a [`SequentialBitset`] with the same bits.
    pub fn into_sequential(self) -> SequentialBitset {
        let words = self
            .words
            .into_vec()
            .into_iter()
            .map(AtomicWord::into_inner)
            .collect();
        SequentialBitset::from_words(words, self.capacity)
    }
}

impl From<SequentialBitset> for ConcurrentBitset {
    fn from(bits: SequentialBitset) -> Self {
        let (words, capacity) = bits.into_words();
        let words = words.into_iter().map(AtomicWord::new).collect();
        Self { words, capacity }
    }
}
