//! Accurate summation of long floating-point streams
//!
//! # Algorithms
//!
//! - [`PairwiseSummation`]: carry-save pairwise summation, O(log n) memory
//!
//! # Example
//!
//! ```
//! use runstats::summation::PairwiseSummation;
//!
//! let mut sum = PairwiseSummation::<f64>::new();
//! for _ in 0..10 {
//!     sum.add(0.1);
//! }
//!
//! let naive: f64 = [0.1; 10].iter().sum();
//! assert!((sum.total() - 1.0).abs() <= (naive - 1.0).abs());
//! ```

mod pairwise;

pub use pairwise::PairwiseSummation;
