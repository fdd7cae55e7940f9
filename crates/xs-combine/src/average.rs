//! Inverse-variance weighted averaging of binned measurements.

use xs_core::{Error, Result};
use xs_data::Histogram;

use crate::compat::check_compatibility;

/// Absolute tolerance for per-edge agreement between two datasets being
/// combined. Accommodates floating-point round-trip noise from the text
/// format, not genuine binning differences.
pub const EDGE_TOLERANCE: f64 = 1e-9;

/// Sigma threshold used for the advisory compatibility check by
/// [`combine`].
pub const DEFAULT_SIGMA_CHECK: f64 = 2.0;

/// How to treat a bin whose uncertainty is exactly zero during averaging.
///
/// A zero uncertainty makes the inverse-variance weight `1/e^2` infinite,
/// so the straightforward arithmetic no longer produces a finite average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ZeroUncertaintyPolicy {
    /// Let IEEE arithmetic run its course: an infinite weight yields a NaN
    /// mean and a zero combined uncertainty in that bin. Nothing is trapped.
    #[default]
    Propagate,
    /// Treat a zero-uncertainty side as exact: its value becomes the bin's
    /// combined value with zero uncertainty. If both sides are exact they
    /// must agree; conflicting exact values fail with
    /// [`Error::InvalidArgument`].
    Exact,
    /// Refuse to average datasets containing any zero uncertainty; fails
    /// with [`Error::InvalidArgument`] before any bin is computed.
    Reject,
}

/// Average two datasets bin-by-bin with inverse-variance weights, using the
/// default [`ZeroUncertaintyPolicy::Propagate`].
///
/// Preconditions: equal bin counts ([`Error::SizeMismatch`]) and bin edges
/// equal element-wise within [`EDGE_TOLERANCE`] ([`Error::BinningMismatch`]).
///
/// The pair is first run through the compatibility check at `n_sigma`; a
/// non-zero incompatible-bin count is advisory only — it is reported via
/// `tracing::warn!` and the averaging proceeds regardless.
///
/// Per bin: `w = 1/e^2` per side, `yavg = (w1*y1 + w2*y2)/(w1 + w2)`,
/// `eavg = sqrt(1/(w1 + w2))`. The output edges are copied from `a`;
/// neither input is mutated.
pub fn average_with(a: &Histogram, b: &Histogram, n_sigma: f64) -> Result<Histogram> {
    average_with_policy(a, b, n_sigma, ZeroUncertaintyPolicy::Propagate)
}

/// [`average_with`] with an explicit zero-uncertainty policy.
pub fn average_with_policy(
    a: &Histogram,
    b: &Histogram,
    n_sigma: f64,
    policy: ZeroUncertaintyPolicy,
) -> Result<Histogram> {
    if a.n_bins() != b.n_bins() {
        return Err(Error::SizeMismatch { left: a.n_bins(), right: b.n_bins() });
    }
    check_edges(a, b)?;

    // Also validates n_sigma.
    let n_incompatible = check_compatibility(a, b, n_sigma)?;
    if n_incompatible > 0 {
        tracing::warn!(
            n_incompatible,
            n_sigma,
            "datasets disagree beyond the check threshold; averaging anyway"
        );
    }

    if policy == ZeroUncertaintyPolicy::Reject {
        for (side, h) in [("left", a), ("right", b)] {
            if let Some(i) = h.uncertainties().iter().position(|&e| e == 0.0) {
                return Err(Error::InvalidArgument(format!(
                    "{side} dataset has zero uncertainty in bin {i}"
                )));
            }
        }
    }

    let mut values = Vec::with_capacity(a.n_bins());
    let mut uncertainties = Vec::with_capacity(a.n_bins());
    for i in 0..a.n_bins() {
        let (y1, e1) = (a.values()[i], a.uncertainties()[i]);
        let (y2, e2) = (b.values()[i], b.uncertainties()[i]);

        let (yavg, eavg) = match policy {
            ZeroUncertaintyPolicy::Exact if e1 == 0.0 || e2 == 0.0 => {
                if e1 == 0.0 && e2 == 0.0 && y1 != y2 {
                    return Err(Error::InvalidArgument(format!(
                        "bin {i}: conflicting exact values {y1} and {y2}"
                    )));
                }
                if e1 == 0.0 { (y1, 0.0) } else { (y2, 0.0) }
            }
            _ => weighted_mean(y1, e1, y2, e2),
        };
        values.push(yavg);
        uncertainties.push(eavg);
    }

    Histogram::from_vectors(a.edges().to_vec(), values, uncertainties)
}

/// [`average_with`] at the fixed [`DEFAULT_SIGMA_CHECK`] threshold.
pub fn combine(a: &Histogram, b: &Histogram) -> Result<Histogram> {
    average_with(a, b, DEFAULT_SIGMA_CHECK)
}

/// Fold two or more datasets into one by iterated pairwise averaging.
///
/// Strictly pairwise and left-associative: `combine_all([a, b, c], n)` is
/// `average_with(average_with(a, b, n), c, n)`. No provenance of how many
/// input datasets contributed to a weight is tracked.
pub fn combine_all(histograms: &[Histogram], n_sigma: f64) -> Result<Histogram> {
    combine_all_with_policy(histograms, n_sigma, ZeroUncertaintyPolicy::Propagate)
}

/// [`combine_all`] with an explicit zero-uncertainty policy applied to
/// every pairwise step.
pub fn combine_all_with_policy(
    histograms: &[Histogram],
    n_sigma: f64,
    policy: ZeroUncertaintyPolicy,
) -> Result<Histogram> {
    let (first, rest) = histograms.split_first().ok_or_else(|| {
        Error::InvalidArgument("cannot combine an empty set of datasets".into())
    })?;

    let mut combined = first.clone();
    for h in rest {
        combined = average_with_policy(&combined, h, n_sigma, policy)?;
    }
    Ok(combined)
}

fn check_edges(a: &Histogram, b: &Histogram) -> Result<()> {
    for (i, (&ea, &eb)) in a.edges().iter().zip(b.edges()).enumerate() {
        if (ea - eb).abs() > EDGE_TOLERANCE {
            return Err(Error::BinningMismatch(format!(
                "edge {i} differs beyond tolerance: {ea} vs {eb}"
            )));
        }
    }
    Ok(())
}

fn weighted_mean(y1: f64, e1: f64, y2: f64, e2: f64) -> (f64, f64) {
    let w1 = 1.0 / (e1 * e1);
    let w2 = 1.0 / (e2 * e2);
    let wsum = w1 + w2;
    ((w1 * y1 + w2 * y2) / wsum, (1.0 / wsum).sqrt())
}
