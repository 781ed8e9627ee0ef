//! Core traits for streaming accumulators
//!
//! All accumulators implement the base [`Accumulator`] trait. Those that can
//! retract a previously inserted sample additionally implement [`Decremental`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during accumulator merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Accumulators have incompatible configurations
    IncompatibleConfig {
        expected: String,
        found: String,
    },
    /// The merged state would not fit in the accumulator
    Capacity(CapacityError),
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleConfig { expected, found } => {
                write!(f, "incompatible config: expected {}, found {}", expected, found)
            }
            MergeError::Capacity(err) => write!(f, "merge overflows capacity: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MergeError::Capacity(err) => Some(err),
            MergeError::IncompatibleConfig { .. } => None,
        }
    }
}

impl From<CapacityError> for MergeError {
    fn from(err: CapacityError) -> Self {
        MergeError::Capacity(err)
    }
}

/// A fixed-capacity accumulator has no room for another value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Width of the insertion counter, in bits
    pub capacity_bits: usize,
}

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "a {}-bit insertion counter holds at most 2^{} - 1 values",
            self.capacity_bits, self.capacity_bits
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}

/// Core trait for all streaming accumulators
pub trait Accumulator: Clone + Debug {
    /// The type of sample this accumulator ingests
    type Item;

    /// Add a sample to the accumulator
    fn update(&mut self, item: &Self::Item);

    /// Merge another accumulator into this one
    ///
    /// The result describes the union of both sample streams. Returns an error
    /// if the accumulators are incompatible.
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset accumulator to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of samples currently held
    fn count(&self) -> u64;

    /// Check if accumulator is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Accumulators that can retract a previously inserted sample
///
/// This is what makes sliding-window statistics possible without keeping a
/// copy of the raw window. No membership tracking is done: retracting a
/// sample that was never inserted silently corrupts the state.
pub trait Decremental: Accumulator {
    /// Retract one previously inserted sample
    ///
    /// Retracting from an accumulator holding zero or one sample resets it
    /// to the empty state.
    fn retract(&mut self, item: &Self::Item);
}
