//! Carry-save pairwise summation in logarithmic space
//!
//! Values are combined the way a binary counter increments: slot `b` holds
//! the sum of a block of exactly `2^b` values, and a carry folds two equal
//! blocks into one of twice the size. Any stored partial sum has passed
//! through O(log n) additions, against O(n) for a plain running sum.

use core::fmt;
use core::iter::Sum;
use core::ops::AddAssign;

use crate::math::Real;
use crate::traits::{Accumulator, CapacityError, MergeError};

/// Pairwise summation of an arbitrarily long stream in O(log n) space
///
/// `BITS` is the width of the insertion counter and the number of slots.
/// The accumulator accepts up to `2^BITS - 1` nonzero values; zeros are
/// skipped and never counted.
///
/// # Capacity
///
/// [`try_add`](Self::try_add) and [`merge_sums`](Self::merge_sums) report an
/// exhausted counter as [`CapacityError`]. The infallible entry points
/// ([`add`](Self::add), `+`, `+=`, [`Accumulator::update`]) panic instead.
///
/// # Example
///
/// ```
/// use runstats::summation::PairwiseSummation;
///
/// let mut sum = PairwiseSummation::<f64>::new();
/// for i in 0..1_000 {
///     sum.add(1.0 / (i + 1) as f64);
/// }
/// sum.add(0.0); // not counted
///
/// assert_eq!(sum.len(), 1_000);
/// assert!((sum.total() - 7.485470860550345).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseSummation<T: Real = f64, const BITS: usize = 64> {
    /// Slot `b` is populated exactly when bit `b` of `index` is set;
    /// unpopulated slots hold zero
    slots: [T; BITS],
    /// Number of nonzero values added
    index: u128,
}

impl<T: Real, const BITS: usize> Default for PairwiseSummation<T, BITS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real, const BITS: usize> PairwiseSummation<T, BITS> {
    const BITS_IN_RANGE: () = assert!(
        BITS >= 1 && BITS <= 127,
        "PairwiseSummation needs between 1 and 127 bits"
    );

    /// Create an empty sum
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::BITS_IN_RANGE;
        Self {
            slots: [T::ZERO; BITS],
            index: 0,
        }
    }

    /// Largest number of nonzero values this accumulator can hold
    pub fn capacity() -> u128 {
        (1u128 << BITS) - 1
    }

    /// Number of nonzero values added
    pub fn len(&self) -> u128 {
        self.index
    }

    /// Check if no nonzero value has been added
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Partial sum held in slot `bit`, if that slot is populated
    ///
    /// A populated slot holds the sum of `2^bit` values.
    pub fn slot(&self, bit: usize) -> Option<T> {
        if bit < BITS && self.index >> bit & 1 == 1 {
            Some(self.slots[bit])
        } else {
            None
        }
    }

    /// Add a value
    ///
    /// Adding zero leaves the accumulator untouched.
    ///
    /// # Panics
    ///
    /// Panics if the accumulator already holds [`capacity`](Self::capacity)
    /// nonzero values.
    pub fn add(&mut self, value: T) {
        if let Err(err) = self.try_add(value) {
            panic!("{}", err);
        }
    }

    /// Add a value, failing once the insertion counter is exhausted
    ///
    /// On error the accumulator is unchanged.
    pub fn try_add(&mut self, value: T) -> Result<(), CapacityError> {
        if !value.is_nonzero() {
            return Ok(());
        }
        if self.index == Self::capacity() {
            log::warn!("pairwise summation full at {} values", self.index);
            return Err(CapacityError { capacity_bits: BITS });
        }
        self.carry_into(0, value);
        Ok(())
    }

    /// Binary-counter addition of one block of `2^bit` values summing to `carry`
    ///
    /// Walks up from `bit`: every populated slot is folded into the carry and
    /// emptied, the first unpopulated slot receives the carry. The caller
    /// guarantees `index + 2^bit <= capacity`, so that slot exists.
    fn carry_into(&mut self, bit: usize, mut carry: T) {
        let mut b = bit;
        while self.index >> b & 1 == 1 {
            carry += self.slots[b];
            self.slots[b] = T::ZERO;
            b += 1;
        }
        self.slots[b] = carry;
        self.index += 1u128 << bit;
    }

    /// Grand total of all values added
    ///
    /// Recomputed from the populated slots on every call.
    pub fn total(&self) -> T {
        let mut total = T::ZERO;
        let mut remaining = self.index;
        let mut bit = 0;
        while remaining != 0 {
            if remaining & 1 == 1 {
                total += self.slots[bit];
            }
            remaining >>= 1;
            bit += 1;
        }
        total
    }

    /// Discard everything and start over from a single value
    pub fn set(&mut self, value: T) {
        *self = Self::new();
        // A fresh accumulator always has room for one value
        self.carry_into_nonzero(value);
    }

    fn carry_into_nonzero(&mut self, value: T) {
        if value.is_nonzero() {
            self.carry_into(0, value);
        }
    }

    /// Fold another sum into this one
    ///
    /// Each populated slot of `other` is a block of `2^b` values and is added
    /// at bit `b`, exactly like adding the two insertion counters. Afterwards
    /// `len()` is the sum of both lengths and every slot still holds a
    /// `2^b`-value block, so the error bound is that of a single stream.
    /// On error the accumulator is unchanged.
    pub fn merge_sums(&mut self, other: &Self) -> Result<(), CapacityError> {
        match self.index.checked_add(other.index) {
            Some(combined) if combined <= Self::capacity() => {}
            _ => {
                log::warn!(
                    "pairwise summation merge of {} and {} values exceeds {} bits",
                    self.index,
                    other.index,
                    BITS
                );
                return Err(CapacityError { capacity_bits: BITS });
            }
        }

        for bit in 0..BITS {
            if other.index >> bit & 1 == 1 {
                self.carry_into(bit, other.slots[bit]);
            }
        }
        Ok(())
    }
}

impl<T: Real, const BITS: usize> From<T> for PairwiseSummation<T, BITS> {
    fn from(value: T) -> Self {
        let mut sum = Self::new();
        sum.carry_into_nonzero(value);
        sum
    }
}

impl<T: Real, const BITS: usize> AddAssign<T> for PairwiseSummation<T, BITS> {
    fn add_assign(&mut self, value: T) {
        self.add(value);
    }
}

// `Add` stays unimported here so that `sum.add(x)` keeps resolving to the
// inherent `&mut self` method.
impl<T: Real, const BITS: usize> core::ops::Add<T> for PairwiseSummation<T, BITS> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if the sum is already full.
    fn add(mut self, value: T) -> Self {
        PairwiseSummation::add(&mut self, value);
        self
    }
}

impl<T: Real, const BITS: usize> core::ops::Add for PairwiseSummation<T, BITS> {
    type Output = Self;

    /// Binary-counter merge of both sums, see [`merge_sums`](PairwiseSummation::merge_sums)
    ///
    /// # Panics
    ///
    /// Panics if the combined length exceeds the capacity.
    fn add(mut self, other: Self) -> Self {
        if let Err(err) = self.merge_sums(&other) {
            panic!("{}", err);
        }
        self
    }
}

impl<T: Real, const BITS: usize> Extend<T> for PairwiseSummation<T, BITS> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Real, const BITS: usize> FromIterator<T> for PairwiseSummation<T, BITS> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sum = Self::new();
        sum.extend(iter);
        sum
    }
}

impl<T: Real, const BITS: usize> Sum<T> for PairwiseSummation<T, BITS> {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.collect()
    }
}

impl<T: Real, const BITS: usize> fmt::Display for PairwiseSummation<T, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.total(), f)
    }
}

impl<T: Real, const BITS: usize> Accumulator for PairwiseSummation<T, BITS> {
    type Item = T;

    fn update(&mut self, item: &Self::Item) {
        self.add(*item);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_sums(other)?;
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    /// Saturates at `u64::MAX` for counters wider than 64 bits
    fn count(&self) -> u64 {
        u64::try_from(self.index).unwrap_or(u64::MAX)
    }
}
