//! # xs-core
//!
//! Shared building blocks for the xscomb workspace: the common error
//! taxonomy and the serializable report types produced by the combination
//! operations and consumed by the CLI.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{CompatibilityReport, PairReport};

/// Workspace version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
