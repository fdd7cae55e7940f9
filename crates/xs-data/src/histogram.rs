//! The binned measurement value type.

use serde::Serialize;
use xs_core::{Error, Result};

/// A 1D binned measurement series: bin edges, bin contents, and one
/// standard deviation per bin.
///
/// Instances are immutable once constructed; combining operations allocate
/// and return new histograms. Construction always goes through
/// [`Histogram::from_vectors`], which enforces the structural invariants, so
/// a histogram with mismatched vector lengths cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges (length = n_bins + 1), non-decreasing.
    edges: Vec<f64>,
    /// Bin contents (length = n_bins).
    values: Vec<f64>,
    /// Per-bin standard deviations (length = n_bins). Exactly zero marks a
    /// bin whose value is treated as known exactly.
    uncertainties: Vec<f64>,
}

impl Histogram {
    /// Build a histogram from explicit vectors.
    ///
    /// Requires at least one bin, `edges.len() == values.len() + 1 ==
    /// uncertainties.len() + 1`, and non-decreasing edges. Violations fail
    /// with [`Error::MalformedSource`].
    pub fn from_vectors(
        edges: Vec<f64>,
        values: Vec<f64>,
        uncertainties: Vec<f64>,
    ) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::MalformedSource(
                "histogram must have at least one bin".into(),
            ));
        }
        if edges.len() != values.len() + 1 {
            return Err(Error::MalformedSource(format!(
                "expected {} bin edges for {} bins, got {}",
                values.len() + 1,
                values.len(),
                edges.len()
            )));
        }
        if uncertainties.len() != values.len() {
            return Err(Error::MalformedSource(format!(
                "expected {} uncertainties for {} bins, got {}",
                values.len(),
                values.len(),
                uncertainties.len()
            )));
        }
        if let Some(i) = (1..edges.len()).find(|&i| edges[i] < edges[i - 1]) {
            return Err(Error::MalformedSource(format!(
                "bin edges must be non-decreasing: edge {} ({}) < edge {} ({})",
                i,
                edges[i],
                i - 1,
                edges[i - 1]
            )));
        }
        Ok(Self { edges, values, uncertainties })
    }

    /// Number of bins.
    pub fn n_bins(&self) -> usize {
        self.values.len()
    }

    /// Lower edge of bin `index`.
    pub fn bin_low(&self, index: usize) -> Result<f64> {
        self.check_bin(index)?;
        Ok(self.edges[index])
    }

    /// Upper edge of bin `index`.
    pub fn bin_high(&self, index: usize) -> Result<f64> {
        self.check_bin(index)?;
        Ok(self.edges[index + 1])
    }

    /// Center of bin `index`.
    pub fn bin_center(&self, index: usize) -> Result<f64> {
        Ok(0.5 * (self.bin_low(index)? + self.bin_high(index)?))
    }

    /// Measured value in bin `index`.
    pub fn measurement(&self, index: usize) -> Result<f64> {
        self.check_bin(index)?;
        Ok(self.values[index])
    }

    /// Standard deviation of the measurement in bin `index`.
    pub fn error(&self, index: usize) -> Result<f64> {
        self.check_bin(index)?;
        Ok(self.uncertainties[index])
    }

    /// All bin edges (length = `n_bins() + 1`).
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// All bin contents (length = `n_bins()`).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// All per-bin standard deviations (length = `n_bins()`).
    pub fn uncertainties(&self) -> &[f64] {
        &self.uncertainties
    }

    fn check_bin(&self, index: usize) -> Result<()> {
        if index >= self.n_bins() {
            return Err(Error::IndexOutOfRange { index, n_bins: self.n_bins() });
        }
        Ok(())
    }
}
