#[cfg(feature = "std")]
use thiserror::Error;

/// Errors reported by both bitset variants.
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsetError {
    /// The index is not below the capacity fixed at construction.
    #[cfg_attr(
        feature = "std",
        error("Index {index} is out of bounds for capacity {capacity}")
    )]
    OutOfBounds { index: usize, capacity: usize },
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitsetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitsetError::OutOfBounds { index, capacity } => {
                write!(f, "Index {} is out of bounds for capacity {}", index, capacity)
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, BitsetError>;
