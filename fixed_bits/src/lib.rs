//! # fixed_bits
//!
//! Fixed-capacity bitsets in two flavours sharing one bit layout:
//!
//! - [`SequentialBitset`]: plain words, mutated through `&mut self`.
//! - [`ConcurrentBitset`]: atomic words, mutated through `&self` with
//!   lock-free compare-and-swap loops.
//!
//! ```rust
//! use fixed_bits::{ConcurrentBitset, SequentialBitset};
//!
//! let mut local = SequentialBitset::new(100);
//! local.set(99).unwrap();
//! assert_eq!(local.get(99), Ok(true));
//! assert!(local.get(100).is_err());
//!
//! let shared = ConcurrentBitset::from(local);
//! assert!(shared.try_set(5));
//! assert!(!shared.try_set(5));
//! assert_eq!(shared.count_ones(), 2);
//! ```
//!
//! ## Batched reads
//!
//! ```rust
//! use fixed_bits::{ConcurrentBitset, index::locate};
//!
//! let bits = ConcurrentBitset::new(256);
//! bits.set(3).unwrap();
//! bits.set(200).unwrap();
//!
//! let (w0, _, _, w3) = bits.get_words4(3, 70, 140, 200).unwrap();
//! assert!(locate(3).is_set_in(w0));
//! assert!(locate(200).is_set_in(w3));
//! ```
//!

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub use error::{BitsetError, Result};

pub mod index;
pub use index::{AtomicWord, WORD_BITS, Word};

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentBitset;
pub use sequential::{IterOnes, SequentialBitset};
