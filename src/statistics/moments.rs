//! Rewindable running statistics (count, mean, variance)
//!
//! Computes streaming statistics using Welford's numerically stable online
//! algorithm. Samples can be retracted again, and partial accumulators can be
//! merged for distributed computation.

use crate::math::Real;
use crate::traits::{Accumulator, Decremental, MergeError};

/// Running mean and variance with insert and remove
///
/// Keeps the count, the running mean and the sum of squared deviations from
/// the mean (M2). Updating relative to the current mean avoids the
/// catastrophic cancellation of the naive sum/sum-of-squares formula.
///
/// # Example
///
/// ```
/// use runstats::statistics::StatisticsAccumulator;
///
/// let mut stats = StatisticsAccumulator::<f64>::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.insert(value);
/// }
///
/// assert!((stats.average() - 5.0).abs() < 0.001);
/// assert!((stats.variance_population() - 4.0).abs() < 0.001);
/// assert!((stats.stdev_population() - 2.0).abs() < 0.001);
///
/// // Slide the window: drop the oldest sample
/// stats.remove(2.0);
/// assert_eq!(stats.samples(), 7);
/// assert!((stats.average() - 38.0 / 7.0).abs() < 1e-12);
/// ```
///
/// # Distributed Usage
///
/// ```
/// use runstats::statistics::StatisticsAccumulator;
/// use runstats::traits::Accumulator;
///
/// let mut stats1 = StatisticsAccumulator::<f64>::new();
/// let mut stats2 = StatisticsAccumulator::<f64>::new();
///
/// // Worker 1
/// for v in [1.0, 2.0, 3.0] {
///     stats1.insert(v);
/// }
///
/// // Worker 2
/// for v in [4.0, 5.0, 6.0] {
///     stats2.insert(v);
/// }
///
/// // Merge
/// stats1.merge(&stats2).unwrap();
/// assert!((stats1.average() - 3.5).abs() < 0.001);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsAccumulator<T: Real = f64> {
    /// Number of samples held
    count: u64,
    /// Running mean
    mean: T,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: T,
}

impl<T: Real> Default for StatisticsAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> StatisticsAccumulator<T> {
    /// Create a new empty statistics accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: T::ZERO,
            m2: T::ZERO,
        }
    }

    /// Add a sample
    pub fn insert(&mut self, value: T) {
        let delta = value - self.mean;
        self.count += 1;
        self.mean += delta / T::from_count(self.count);
        self.m2 += delta * (value - self.mean);
    }

    /// Retract a previously inserted sample
    ///
    /// Applies the inverse Welford step. With one sample or none left the
    /// accumulator is cleared instead, so the count never goes negative.
    /// The caller must only remove values that were actually inserted.
    pub fn remove(&mut self, value: T) {
        if self.count > 1 {
            let delta = value - self.mean;
            self.count -= 1;
            self.mean -= delta / T::from_count(self.count);
            self.m2 -= delta * (value - self.mean);
        } else {
            if self.count == 0 {
                log::trace!("remove on empty statistics accumulator");
            }
            self.clear();
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Get the number of samples
    pub fn samples(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean (0 when empty)
    pub fn average(&self) -> T {
        if self.count == 0 {
            T::ZERO
        } else {
            self.mean
        }
    }

    /// Get the population variance
    ///
    /// Returns 0 for fewer than two samples and when rounding noise has
    /// driven M2 below zero.
    pub fn variance_population(&self) -> T {
        if self.count < 2 || self.m2 <= T::ZERO {
            T::ZERO
        } else {
            self.m2 / T::from_count(self.count)
        }
    }

    /// Get the sample variance
    ///
    /// This is the unbiased variance estimator (Bessel's correction).
    pub fn variance_sample(&self) -> T {
        if self.count < 2 || self.m2 <= T::ZERO {
            T::ZERO
        } else {
            self.m2 / T::from_count(self.count - 1)
        }
    }

    /// Get the population standard deviation
    pub fn stdev_population(&self) -> T {
        self.variance_population().sqrt()
    }

    /// Get the sample standard deviation
    pub fn stdev_sample(&self) -> T {
        self.variance_sample().sqrt()
    }

    /// Get the sum of all samples
    pub fn sum(&self) -> T {
        T::from_count(self.count) * self.mean
    }

    /// Merge with another accumulator using the parallel algorithm
    ///
    /// Uses Chan et al.'s pairwise combination of `(count, mean, M2)`.
    pub fn merge_stats(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let combined_count = self.count + other.count;
        let n_a = T::from_count(self.count);
        let n_b = T::from_count(other.count);
        let n = T::from_count(combined_count);
        let delta = other.mean - self.mean;

        self.mean += delta * (n_b / n);
        self.m2 = self.m2 + other.m2 + delta * delta * (n_a * n_b / n);
        self.count = combined_count;
    }
}

impl<T: Real> Extend<T> for StatisticsAccumulator<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Real> FromIterator<T> for StatisticsAccumulator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

impl<T: Real> Accumulator for StatisticsAccumulator<T> {
    type Item = T;

    fn update(&mut self, item: &Self::Item) {
        self.insert(*item);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_stats(other);
        Ok(())
    }

    fn clear(&mut self) {
        StatisticsAccumulator::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<T: Real> Decremental for StatisticsAccumulator<T> {
    fn retract(&mut self, item: &Self::Item) {
        self.remove(*item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut stats = StatisticsAccumulator::<f64>::new();

        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.insert(v);
        }

        assert_eq!(stats.samples(), 8);
        assert!((stats.average() - 5.0).abs() < 0.001);
        assert!((stats.variance_population() - 4.0).abs() < 0.001);
        assert!((stats.stdev_population() - 2.0).abs() < 0.001);
        assert!((stats.sum() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_to_hundred() {
        let stats: StatisticsAccumulator = (1..=100).map(|i| i as f64).collect();

        assert_eq!(stats.samples(), 100);
        assert!((stats.average() - 50.5).abs() < 1e-12);
        assert!((stats.stdev_population() - 28.866).abs() < 0.001);
        assert!((stats.stdev_sample() - 29.011).abs() < 0.001);
        assert!((stats.sum() - 5050.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_value() {
        let mut stats = StatisticsAccumulator::<f64>::new();
        stats.insert(42.0);

        assert_eq!(stats.samples(), 1);
        assert!((stats.average() - 42.0).abs() < 0.001);
        assert_eq!(stats.variance_population(), 0.0);
        assert_eq!(stats.variance_sample(), 0.0);
        assert_eq!(stats.stdev_sample(), 0.0);
    }

    #[test]
    fn test_empty() {
        let stats = StatisticsAccumulator::<f64>::new();

        assert!(stats.is_empty());
        assert_eq!(stats.average(), 0.0);
        assert_eq!(stats.variance_population(), 0.0);
        assert_eq!(stats.variance_sample(), 0.0);
        assert_eq!(stats.sum(), 0.0);
    }

    #[test]
    fn test_remove_undoes_insert() {
        let mut stats = StatisticsAccumulator::<f64>::new();
        for v in [3.5, -1.25, 8.0, 2.0, 11.0] {
            stats.insert(v);
        }
        let before = stats.clone();

        stats.insert(7.75);
        stats.remove(7.75);

        assert_eq!(stats.samples(), before.samples());
        assert!((stats.average() - before.average()).abs() < 1e-12);
        assert!((stats.variance_sample() - before.variance_sample()).abs() < 1e-12);
    }

    #[test]
    fn test_remove_out_of_order() {
        let mut stats = StatisticsAccumulator::<f64>::new();
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.insert(v);
        }

        // Remove the middle element, not the most recent one
        stats.remove(3.0);

        let expected: StatisticsAccumulator = [1.0, 2.0, 4.0, 5.0].into_iter().collect();
        assert_eq!(stats.samples(), 4);
        assert!((stats.average() - expected.average()).abs() < 1e-12);
        assert!((stats.variance_population() - expected.variance_population()).abs() < 1e-12);
    }

    #[test]
    fn test_remove_last_sample_clears() {
        let mut stats = StatisticsAccumulator::<f64>::new();
        stats.insert(10.0);
        stats.remove(10.0);

        assert_eq!(stats, StatisticsAccumulator::<f64>::new());

        // Removing from empty stays empty
        stats.remove(5.0);
        assert!(stats.is_empty());
        assert_eq!(stats.average(), 0.0);
    }

    #[test]
    fn test_merge() {
        let mut stats1 = StatisticsAccumulator::<f64>::new();
        let mut stats2 = StatisticsAccumulator::<f64>::new();

        // Split data: [1,2,3] and [4,5,6]
        for v in [1.0, 2.0, 3.0] {
            stats1.insert(v);
        }
        for v in [4.0, 5.0, 6.0] {
            stats2.insert(v);
        }

        stats1.merge(&stats2).unwrap();

        let sequential: StatisticsAccumulator = (1..=6).map(|i| i as f64).collect();
        assert_eq!(stats1.samples(), 6);
        assert!((stats1.average() - 3.5).abs() < 0.001);
        assert!((stats1.sum() - 21.0).abs() < 0.001);
        assert!((stats1.variance_sample() - sequential.variance_sample()).abs() < 1e-12);
    }

    #[test]
    fn test_merge_empty() {
        let mut stats1 = StatisticsAccumulator::<f64>::new();
        let stats2 = StatisticsAccumulator::<f64>::new();

        stats1.insert(1.0);
        stats1.insert(2.0);

        stats1.merge(&stats2).unwrap();
        assert_eq!(stats1.samples(), 2);
        assert!((stats1.average() - 1.5).abs() < 0.001);

        let mut empty = StatisticsAccumulator::<f64>::new();
        empty.merge(&stats1).unwrap();
        assert_eq!(empty, stats1);
    }

    #[test]
    fn test_clear() {
        let mut stats = StatisticsAccumulator::<f64>::new();

        stats.insert(1.0);
        stats.insert(2.0);
        stats.insert(3.0);

        Accumulator::clear(&mut stats);

        assert!(stats.is_empty());
        assert_eq!(stats.variance_sample(), 0.0);
    }

    #[test]
    fn test_numerical_stability() {
        // Large offset with small spread defeats the sum-of-squares formula
        let mut stats = StatisticsAccumulator::<f64>::new();

        let base = 1e9;
        for i in 0..1000 {
            stats.insert(base + i as f64);
        }

        let expected_mean = base + 499.5;
        assert!(
            (stats.average() - expected_mean).abs() < 1e-3,
            "Mean: {} expected: {}",
            stats.average(),
            expected_mean
        );

        // Variance of 0..1000 is (n^2 - 1) / 12
        let expected_var = (1000.0f64 * 1000.0 - 1.0) / 12.0;
        assert!(
            (stats.variance_population() - expected_var).abs() / expected_var < 1e-6,
            "Variance: {} expected: {}",
            stats.variance_population(),
            expected_var
        );
    }

    #[test]
    fn test_f32() {
        let mut stats = StatisticsAccumulator::<f32>::new();
        for v in [1.0f32, 2.0, 3.0, 4.0] {
            stats.insert(v);
        }
        assert!((stats.average() - 2.5).abs() < 1e-6);
        assert!((stats.variance_population() - 1.25).abs() < 1e-6);
    }
}
