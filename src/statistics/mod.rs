//! Statistical summaries for streaming data
//!
//! This module provides accumulators for computing statistics over streams
//! in a single pass with constant memory.
//!
//! # Algorithms
//!
//! - [`StatisticsAccumulator`]: count, mean, variance; supports removal
//! - [`RegressionAccumulator`]: simple linear regression and correlation; supports removal
//! - [`GeneralizedMean`]: arithmetic, geometric, harmonic, quadratic or any power mean
//!
//! # Example
//!
//! ```
//! use runstats::statistics::StatisticsAccumulator;
//!
//! let mut stats = StatisticsAccumulator::<f64>::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     stats.insert(value);
//! }
//!
//! println!("Mean: {}", stats.average());
//! println!("Stdev: {}", stats.stdev_sample());
//! ```

mod moments;
mod power_mean;
mod regression;

pub use moments::StatisticsAccumulator;
pub use power_mean::GeneralizedMean;
pub use regression::{DegeneratePolicy, RegressionAccumulator};
