//! Rewindable simple linear regression
//!
//! Bivariate extension of the Welford recurrence: running means of x and y,
//! running M2 of x and y, and the running co-moment. Samples can be retracted,
//! which keeps a regression over a sliding window exact without recomputing
//! from raw sums.

use crate::math::Real;
use crate::traits::{Accumulator, Decremental, MergeError};

/// What a query returns when its denominator is zero
///
/// A zero x-variance (all x equal, or fewer than two samples) leaves the
/// slope undefined; a zero slope leaves the inverse prediction undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Return 0 instead of dividing by zero
    #[default]
    Zero,
    /// Perform the division and let NaN or infinity propagate
    NonFinite,
}

/// Running least-squares fit `y = gain * x + bias`
///
/// # Example
///
/// ```
/// use runstats::statistics::RegressionAccumulator;
///
/// let mut fit = RegressionAccumulator::<f64>::new();
/// for (x, y) in [(1.0, 3.0), (2.0, 5.0), (3.0, 7.0)] {
///     fit.insert(x, y);
/// }
///
/// assert!((fit.gain() - 2.0).abs() < 1e-12);
/// assert!((fit.bias() - 1.0).abs() < 1e-12);
/// assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);
/// assert!((fit.predict_inverse(21.0) - 10.0).abs() < 1e-12);
///
/// // Window moves on: drop the oldest point, add a new one
/// fit.remove(1.0, 3.0);
/// fit.insert(4.0, 9.0);
/// assert_eq!(fit.samples(), 3);
/// assert!((fit.gain() - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionAccumulator<T: Real = f64> {
    count: u64,
    mean_x: T,
    mean_y: T,
    /// Sum of squared deviations of x
    m2_x: T,
    /// Sum of squared deviations of y
    m2_y: T,
    /// Sum of products of x and y deviations
    co_moment: T,
    policy: DegeneratePolicy,
}

impl<T: Real> Default for RegressionAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> RegressionAccumulator<T> {
    /// Create an empty accumulator that returns 0 for undefined quotients
    pub fn new() -> Self {
        Self::with_policy(DegeneratePolicy::Zero)
    }

    /// Create an empty accumulator with an explicit degenerate-input policy
    pub fn with_policy(policy: DegeneratePolicy) -> Self {
        Self {
            count: 0,
            mean_x: T::ZERO,
            mean_y: T::ZERO,
            m2_x: T::ZERO,
            m2_y: T::ZERO,
            co_moment: T::ZERO,
            policy,
        }
    }

    /// Policy applied by [`gain`](Self::gain), [`predict_inverse`](Self::predict_inverse)
    /// and [`correlation`](Self::correlation)
    pub fn policy(&self) -> DegeneratePolicy {
        self.policy
    }

    /// Add a point
    pub fn insert(&mut self, x: T, y: T) {
        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.count += 1;
        let n = T::from_count(self.count);
        self.mean_x += dx / n;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.co_moment += dx * (y - self.mean_y);
    }

    /// Retract a previously inserted point
    ///
    /// Exact inverse of [`insert`](Self::insert). With one point or none left
    /// the accumulator is cleared instead. The policy is kept.
    pub fn remove(&mut self, x: T, y: T) {
        if self.count > 1 {
            let dx = x - self.mean_x;
            let dy = y - self.mean_y;
            self.count -= 1;
            let n = T::from_count(self.count);
            self.mean_x -= dx / n;
            self.mean_y -= dy / n;
            self.m2_x -= dx * (x - self.mean_x);
            self.m2_y -= dy * (y - self.mean_y);
            self.co_moment -= dx * (y - self.mean_y);
        } else {
            if self.count == 0 {
                log::trace!("remove on empty regression accumulator");
            }
            self.clear();
        }
    }

    /// Reset to the empty state, keeping the policy
    pub fn clear(&mut self) {
        *self = Self::with_policy(self.policy);
    }

    /// Get the number of points
    pub fn samples(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean of x
    pub fn mean_x(&self) -> T {
        self.mean_x
    }

    /// Mean of y
    pub fn mean_y(&self) -> T {
        self.mean_y
    }

    /// Population variance of x
    pub fn variance_x(&self) -> T {
        self.population(self.m2_x)
    }

    /// Population variance of y
    pub fn variance_y(&self) -> T {
        self.population(self.m2_y)
    }

    /// Population covariance of x and y
    pub fn covariance(&self) -> T {
        if self.count < 2 {
            T::ZERO
        } else {
            self.co_moment / T::from_count(self.count)
        }
    }

    fn population(&self, m2: T) -> T {
        if self.count < 2 || m2 <= T::ZERO {
            T::ZERO
        } else {
            m2 / T::from_count(self.count)
        }
    }

    fn quotient(&self, numerator: T, denominator: T) -> T {
        match self.policy {
            DegeneratePolicy::Zero if denominator.is_nonzero() => numerator / denominator,
            DegeneratePolicy::Zero => T::ZERO,
            DegeneratePolicy::NonFinite => numerator / denominator,
        }
    }

    /// Slope of the fitted line
    pub fn gain(&self) -> T {
        let m2_x = if self.m2_x > T::ZERO { self.m2_x } else { T::ZERO };
        self.quotient(self.co_moment, m2_x)
    }

    /// Intercept of the fitted line
    pub fn bias(&self) -> T {
        self.mean_y - self.mean_x * self.gain()
    }

    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: T) -> T {
        self.mean_y + (x - self.mean_x) * self.gain()
    }

    /// Solve the fitted line for the `x` that yields `y`
    pub fn predict_inverse(&self, y: T) -> T {
        self.quotient(y - self.bias(), self.gain())
    }

    /// Pearson correlation coefficient of x and y
    pub fn correlation(&self) -> T {
        let spread = self.m2_x * self.m2_y;
        let spread = if spread > T::ZERO { spread.sqrt() } else { T::ZERO };
        self.quotient(self.co_moment, spread)
    }

    /// Merge with another accumulator using the parallel co-moment formulas
    pub fn merge_regression(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            let policy = self.policy;
            *self = other.clone();
            self.policy = policy;
            return;
        }

        let combined_count = self.count + other.count;
        let n_a = T::from_count(self.count);
        let n_b = T::from_count(other.count);
        let n = T::from_count(combined_count);
        let dx = other.mean_x - self.mean_x;
        let dy = other.mean_y - self.mean_y;
        let weight = n_a * n_b / n;

        self.mean_x += dx * (n_b / n);
        self.mean_y += dy * (n_b / n);
        self.m2_x = self.m2_x + other.m2_x + dx * dx * weight;
        self.m2_y = self.m2_y + other.m2_y + dy * dy * weight;
        self.co_moment = self.co_moment + other.co_moment + dx * dy * weight;
        self.count = combined_count;
    }
}

impl<T: Real> Extend<(T, T)> for RegressionAccumulator<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.insert(x, y);
        }
    }
}

impl<T: Real> FromIterator<(T, T)> for RegressionAccumulator<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut fit = Self::new();
        fit.extend(iter);
        fit
    }
}

impl<T: Real> Accumulator for RegressionAccumulator<T> {
    type Item = (T, T);

    fn update(&mut self, item: &Self::Item) {
        self.insert(item.0, item.1);
    }

    /// Merges the samples; the receiver's policy wins
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_regression(other);
        Ok(())
    }

    fn clear(&mut self) {
        RegressionAccumulator::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl<T: Real> Decremental for RegressionAccumulator<T> {
    fn retract(&mut self, item: &Self::Item) {
        self.remove(item.0, item.1);
    }
}
