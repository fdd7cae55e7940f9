//! # xs-combine
//!
//! Statistical operations across independently measured datasets that share
//! the same binning: a per-bin n-sigma compatibility test and an
//! inverse-variance-weighted average of two compatible datasets.
//!
//! ## Example
//!
//! ```
//! use xs_combine::{check_compatibility, combine};
//! use xs_data::Histogram;
//!
//! let a = Histogram::from_vectors(vec![0.0, 1.0], vec![10.0], vec![2.0]).unwrap();
//! let b = Histogram::from_vectors(vec![0.0, 1.0], vec![11.0], vec![2.0]).unwrap();
//!
//! assert_eq!(check_compatibility(&a, &b, 2.0).unwrap(), 0);
//!
//! let avg = combine(&a, &b).unwrap();
//! assert!((avg.measurement(0).unwrap() - 10.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod average;
pub mod compat;

pub use average::{
    average_with, average_with_policy, combine, combine_all, combine_all_with_policy,
    ZeroUncertaintyPolicy, DEFAULT_SIGMA_CHECK, EDGE_TOLERANCE,
};
pub use compat::{check_compatibility, compare, pairwise};
