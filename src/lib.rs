//! # Runstats
//!
//! Rewindable streaming accumulators for Rust.
//!
//! Runstats ingests samples one at a time and keeps derived statistics up to
//! date in constant or logarithmic memory, without storing the stream.
//!
//! ## Features
//!
//! - **Running Moments**: Count, mean and variance with Welford's recurrence
//! - **Linear Regression**: Slope, intercept and correlation of paired samples
//! - **Sliding Windows**: Both of the above can retract samples again
//! - **Power Means**: Arithmetic, geometric, harmonic and quadratic means
//! - **Pairwise Summation**: Long float streams summed with O(log n) error growth
//! - **Mergeability**: Partial accumulators from separate workers combine exactly
//!
//! ## Quick Start
//!
//! ```rust
//! use runstats::prelude::*;
//!
//! // Regression over the last three points
//! let mut fit = RegressionAccumulator::<f64>::new();
//! let points = [(1.0, 2.1), (2.0, 3.9), (3.0, 6.2), (4.0, 7.8)];
//! for (i, &(x, y)) in points.iter().enumerate() {
//!     fit.insert(x, y);
//!     if i >= 3 {
//!         let (ox, oy) = points[i - 3];
//!         fit.remove(ox, oy);
//!     }
//! }
//! println!("slope over window: {}", fit.gain());
//!
//! ```
//!
//! ## Distributed Computing
//!
//! All accumulators implement the [`Accumulator`](traits::Accumulator) trait
//! which includes a `merge` operation, so per-thread partials can be combined:
//!
//! ```rust
//! use runstats::statistics::StatisticsAccumulator;
//! use runstats::traits::Accumulator;
//!
//! let mut worker1 = StatisticsAccumulator::<f64>::new();
//! let mut worker2 = StatisticsAccumulator::<f64>::new();
//!
//! // Each worker processes its partition
//! worker1.insert(1.0);
//! worker2.insert(3.0);
//!
//! // Merge results
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.average(), 2.0);
//! ```
//!
//! ## Feature Flags
//!
//! Algorithm families:
//! - `statistics` (default): moments, regression, power means
//! - `summation` (default): pairwise summation
//! - `full`: Enable all algorithm families
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `libm`: Float math for `no_std` targets

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod math;
pub mod traits;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "summation")]
#[cfg_attr(docsrs, doc(cfg(feature = "summation")))]
pub mod summation;

pub mod prelude {
    pub use crate::math::Real;
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{
        DegeneratePolicy, GeneralizedMean, RegressionAccumulator, StatisticsAccumulator,
    };

    #[cfg(feature = "summation")]
    pub use crate::summation::PairwiseSummation;
}

#[cfg(feature = "statistics")]
pub use statistics::{GeneralizedMean, RegressionAccumulator, StatisticsAccumulator};

#[cfg(feature = "summation")]
pub use summation::PairwiseSummation;
