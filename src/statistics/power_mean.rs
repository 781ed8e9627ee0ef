//! Running generalized (power) mean
//!
//! One exponent `p` selects the member of the family: `p = 1` arithmetic,
//! `p = 0` geometric, `p = -1` harmonic, `p = 2` quadratic.

use crate::math::Real;
use crate::traits::{Accumulator, MergeError};

#[cfg(not(feature = "std"))]
use alloc::format;

/// Running power mean `(Σ xᵢᵖ / n)^(1/p)`, or the geometric mean for `p = 0`
///
/// Samples are mapped to `xᵖ` (or `ln x` when `p = 0`) and the running
/// average of the mapped values is kept; [`result`](Self::result) maps it
/// back. Insert-only.
///
/// # Domain
///
/// For `p <= 0` every sample must be strictly positive. A zero or negative
/// sample makes the result meaningless, typically NaN or infinity. This is
/// not checked.
///
/// # Example
///
/// ```
/// use runstats::statistics::GeneralizedMean;
///
/// let mut geometric = GeneralizedMean::<f64>::geometric();
/// for x in [1.0, 2.0, 4.0, 8.0] {
///     geometric.insert(x);
/// }
/// assert!((geometric.result() - 8.0f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralizedMean<T: Real = f64> {
    exponent: T,
    count: u64,
    /// Running average of the transformed samples
    average: T,
}

impl<T: Real> GeneralizedMean<T> {
    /// Create an empty power mean with exponent `p`
    pub fn new(exponent: T) -> Self {
        Self {
            exponent,
            count: 0,
            average: T::ZERO,
        }
    }

    /// Arithmetic mean (`p = 1`)
    pub fn arithmetic() -> Self {
        Self::new(T::ONE)
    }

    /// Geometric mean (`p = 0`)
    pub fn geometric() -> Self {
        Self::new(T::ZERO)
    }

    /// Harmonic mean (`p = -1`)
    pub fn harmonic() -> Self {
        Self::new(-T::ONE)
    }

    /// Quadratic mean, root mean square (`p = 2`)
    pub fn quadratic() -> Self {
        Self::new(T::ONE + T::ONE)
    }

    /// Clear all samples and switch to a new exponent
    pub fn reset(&mut self, exponent: T) {
        *self = Self::new(exponent);
    }

    /// The exponent `p`
    pub fn exponent(&self) -> T {
        self.exponent
    }

    /// Get the number of samples
    pub fn samples(&self) -> u64 {
        self.count
    }

    fn transform(&self, x: T) -> T {
        if self.exponent.is_nonzero() {
            x.powf(self.exponent)
        } else {
            x.ln()
        }
    }

    /// Add a sample
    pub fn insert(&mut self, x: T) {
        let term = self.transform(x);
        self.count += 1;
        self.average -= (self.average - term) / T::from_count(self.count);
    }

    /// Current value of the mean (0 when empty)
    pub fn result(&self) -> T {
        if self.count == 0 {
            T::ZERO
        } else if self.exponent.is_nonzero() {
            self.average.powf(T::ONE / self.exponent)
        } else {
            self.average.exp()
        }
    }
}

impl<T: Real> Extend<T> for GeneralizedMean<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.insert(x);
        }
    }
}

/// Collects into an arithmetic mean; use [`extend`](Extend::extend) on a
/// [`GeneralizedMean::new`] for other exponents.
impl<T: Real> FromIterator<T> for GeneralizedMean<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut mean = Self::arithmetic();
        mean.extend(iter);
        mean
    }
}

impl<T: Real> Accumulator for GeneralizedMean<T> {
    type Item = T;

    fn update(&mut self, item: &Self::Item) {
        self.insert(*item);
    }

    /// Count-weighted combination of the transformed averages
    ///
    /// Both sides must use the same exponent.
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.exponent != other.exponent {
            log::debug!(
                "rejecting power mean merge: exponent {} vs {}",
                self.exponent,
                other.exponent
            );
            return Err(MergeError::IncompatibleConfig {
                expected: format!("exponent {}", self.exponent),
                found: format!("exponent {}", other.exponent),
            });
        }

        if other.count == 0 {
            return Ok(());
        }
        if self.count == 0 {
            *self = other.clone();
            return Ok(());
        }

        let combined = self.count + other.count;
        let share = T::from_count(other.count) / T::from_count(combined);
        self.average += (other.average - self.average) * share;
        self.count = combined;
        Ok(())
    }

    fn clear(&mut self) {
        self.reset(self.exponent);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}
