//! Report types produced by the combination operations.

use serde::{Deserialize, Serialize};

/// Outcome of an n-sigma compatibility comparison between two datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    /// Number of bins compared.
    pub n_bins: usize,

    /// Number of bins whose difference exceeds the threshold.
    pub n_incompatible: usize,

    /// Sigma multiplier the comparison was run with.
    pub n_sigma: f64,

    /// Per-bin pull `|y1 - y2| / sqrt(e1^2 + e2^2)`. Non-finite where the
    /// combined uncertainty is zero (serialized as `null`).
    pub pulls: Vec<f64>,
}

impl CompatibilityReport {
    /// Whether every bin passed the compatibility test.
    pub fn all_compatible(&self) -> bool {
        self.n_incompatible == 0
    }
}

/// One entry of an all-pairs compatibility table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    /// Index of the left dataset in the input slice.
    pub left: usize,

    /// Index of the right dataset in the input slice.
    pub right: usize,

    /// Comparison outcome for this pair.
    pub report: CompatibilityReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_compatible() {
        let r = CompatibilityReport { n_bins: 3, n_incompatible: 0, n_sigma: 2.0, pulls: vec![0.1, 0.2, 0.0] };
        assert!(r.all_compatible());

        let r = CompatibilityReport { n_bins: 3, n_incompatible: 1, n_sigma: 2.0, pulls: vec![0.1, 5.0, 0.0] };
        assert!(!r.all_compatible());
    }

    #[test]
    fn test_serialization_shape() {
        let r = CompatibilityReport { n_bins: 1, n_incompatible: 1, n_sigma: 2.0, pulls: vec![f64::INFINITY] };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["n_bins"], 1);
        assert_eq!(json["n_incompatible"], 1);
        // Non-finite pulls serialize as null rather than failing.
        assert!(json["pulls"][0].is_null());
    }
}
