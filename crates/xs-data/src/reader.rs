//! Reader for the whitespace-delimited measurement exchange format.
//!
//! The format is a flat token stream with no header, comments, or
//! delimiters other than whitespace:
//!
//! ```text
//! <N>                         -- integer bin count
//! <edge_0> ... <edge_N>       -- N+1 reals, non-decreasing
//! <value_0> ... <value_{N-1}> -- N reals
//! <error_0> ... <error_{N-1}> -- N reals
//! ```
//!
//! The stream must contain exactly the declared number of tokens; a short
//! stream, an unparseable token, or trailing tokens all fail with
//! [`Error::MalformedSource`].

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use xs_core::{Error, Result};

use crate::histogram::Histogram;

/// Read a histogram from a text file.
///
/// Fails with [`Error::Io`] if the file cannot be opened or read, and with
/// [`Error::MalformedSource`] if the content does not describe a
/// structurally valid histogram.
pub fn read_histogram(path: impl AsRef<Path>) -> Result<Histogram> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_histogram(&text)
}

/// Parse a histogram from in-memory text in the exchange format.
pub fn parse_histogram(text: &str) -> Result<Histogram> {
    let mut tokens = text.split_whitespace();

    let count_tok = tokens
        .next()
        .ok_or_else(|| Error::MalformedSource("empty source: missing bin count".into()))?;
    let n_bins: usize = count_tok.parse().map_err(|_| {
        Error::MalformedSource(format!("bin count is not a non-negative integer: {count_tok:?}"))
    })?;
    if n_bins == 0 {
        return Err(Error::MalformedSource("declared bin count must be positive".into()));
    }

    let edges = take_reals(&mut tokens, n_bins + 1, "bin edge")?;
    let values = take_reals(&mut tokens, n_bins, "bin content")?;
    let uncertainties = take_reals(&mut tokens, n_bins, "bin uncertainty")?;

    if let Some(extra) = tokens.next() {
        return Err(Error::MalformedSource(format!(
            "trailing token {extra:?} after {n_bins}-bin payload"
        )));
    }

    Histogram::from_vectors(edges, values, uncertainties)
}

fn take_reals(tokens: &mut SplitWhitespace<'_>, count: usize, what: &str) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let tok = tokens.next().ok_or_else(|| {
            Error::MalformedSource(format!(
                "unexpected end of source: expected {count} {what} tokens, got {i}"
            ))
        })?;
        let value: f64 = tok
            .parse()
            .map_err(|_| Error::MalformedSource(format!("{what} token {i} is not a number: {tok:?}")))?;
        out.push(value);
    }
    Ok(out)
}
