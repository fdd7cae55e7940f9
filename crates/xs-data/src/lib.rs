//! # xs-data
//!
//! Binned measurement data for xscomb: the immutable [`Histogram`] value
//! type and a reader for the whitespace-delimited text format used to
//! exchange one-dimensional measurement series.
//!
//! ## Example
//!
//! ```no_run
//! use xs_data::read_histogram;
//!
//! let h = read_histogram("exp_a.txt").unwrap();
//! println!("bins: {}", h.n_bins());
//! for i in 0..h.n_bins() {
//!     println!(
//!         "[{}, {}): {} +- {}",
//!         h.bin_low(i).unwrap(),
//!         h.bin_high(i).unwrap(),
//!         h.measurement(i).unwrap(),
//!         h.error(i).unwrap(),
//!     );
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod histogram;
pub mod reader;

pub use histogram::Histogram;
pub use reader::{parse_histogram, read_histogram};
