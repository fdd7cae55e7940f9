//! Error types for xscomb.

use thiserror::Error;

/// xscomb error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The data source could not be opened or read.
    #[error("I/O error reading data source: {0}")]
    Io(#[from] std::io::Error),

    /// The source token stream or constructor input does not describe a
    /// structurally valid histogram.
    #[error("malformed source: {0}")]
    MalformedSource(String),

    /// A per-bin accessor was called with an index outside `[0, n_bins)`.
    #[error("bin index {index} out of range for histogram with {n_bins} bins")]
    IndexOutOfRange {
        /// Requested bin index.
        index: usize,
        /// Number of bins in the histogram.
        n_bins: usize,
    },

    /// Two histograms being compared or combined have different bin counts.
    #[error("size mismatch: {left} vs {right} bins")]
    SizeMismatch {
        /// Bin count of the left operand.
        left: usize,
        /// Bin count of the right operand.
        right: usize,
    },

    /// An argument violates an operation's precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bin edges differ beyond tolerance between two histograms being
    /// combined.
    #[error("binning mismatch: {0}")]
    BinningMismatch(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
