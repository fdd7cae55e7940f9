//! Per-bin n-sigma compatibility between binned measurements.

use rayon::prelude::*;

use xs_core::{CompatibilityReport, Error, PairReport, Result};
use xs_data::Histogram;

/// Count the bins of `a` and `b` whose measurements differ by more than
/// `n_sigma` combined standard deviations.
///
/// The combined standard deviation of one bin is
/// `sqrt(a.error(i)^2 + b.error(i)^2)`. When it is zero no tolerance window
/// exists: the bin is incompatible iff the measurements differ at all. In
/// both regimes the comparison is strict, so a difference lying exactly on
/// the threshold counts as compatible.
///
/// Fails with [`Error::SizeMismatch`] if the bin counts differ and with
/// [`Error::InvalidArgument`] unless `n_sigma > 0`. Pure: no logging, no
/// side effects.
pub fn check_compatibility(a: &Histogram, b: &Histogram, n_sigma: f64) -> Result<usize> {
    validate_pair(a, b, n_sigma)?;

    let n = a
        .values()
        .iter()
        .zip(a.uncertainties())
        .zip(b.values().iter().zip(b.uncertainties()))
        .filter(|&((&y1, &e1), (&y2, &e2))| bin_incompatible(y1, e1, y2, e2, n_sigma))
        .count();

    Ok(n)
}

/// Run the compatibility test and package the outcome, including per-bin
/// pulls, as a serializable [`CompatibilityReport`].
pub fn compare(a: &Histogram, b: &Histogram, n_sigma: f64) -> Result<CompatibilityReport> {
    validate_pair(a, b, n_sigma)?;

    let mut pulls = Vec::with_capacity(a.n_bins());
    let mut n_incompatible = 0;
    for i in 0..a.n_bins() {
        let (y1, e1) = (a.values()[i], a.uncertainties()[i]);
        let (y2, e2) = (b.values()[i], b.uncertainties()[i]);
        if bin_incompatible(y1, e1, y2, e2, n_sigma) {
            n_incompatible += 1;
        }
        let combined = (e1 * e1 + e2 * e2).sqrt();
        pulls.push((y1 - y2).abs() / combined);
    }

    Ok(CompatibilityReport { n_bins: a.n_bins(), n_incompatible, n_sigma, pulls })
}

/// Compare every unordered pair of `histograms` at the given threshold.
///
/// Pairs are evaluated in parallel; the returned table is deterministic and
/// ordered lexicographically by `(left, right)` index.
pub fn pairwise(histograms: &[Histogram], n_sigma: f64) -> Result<Vec<PairReport>> {
    let n = histograms.len();
    let pairs: Vec<(usize, usize)> =
        (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect();

    pairs
        .into_par_iter()
        .map(|(left, right)| {
            compare(&histograms[left], &histograms[right], n_sigma)
                .map(|report| PairReport { left, right, report })
        })
        .collect()
}

fn validate_pair(a: &Histogram, b: &Histogram, n_sigma: f64) -> Result<()> {
    if a.n_bins() != b.n_bins() {
        return Err(Error::SizeMismatch { left: a.n_bins(), right: b.n_bins() });
    }
    if n_sigma.is_nan() || n_sigma <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "sigma threshold must be positive, got {n_sigma}"
        )));
    }
    Ok(())
}

fn bin_incompatible(y1: f64, e1: f64, y2: f64, e2: f64, n_sigma: f64) -> bool {
    let diff = (y1 - y2).abs();
    let combined = (e1 * e1 + e2 * e2).sqrt();
    if combined <= 0.0 {
        diff > 0.0
    } else {
        diff > n_sigma * combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(values: Vec<f64>, uncertainties: Vec<f64>) -> Histogram {
        let n = values.len();
        let edges = (0..=n).map(|i| i as f64).collect();
        Histogram::from_vectors(edges, values, uncertainties).unwrap()
    }

    #[test]
    fn test_self_compatible() {
        let a = hist(vec![10.0, 20.0, 30.0], vec![1.0, 2.0, 3.0]);
        for n_sigma in [0.5, 1.0, 2.0, 10.0] {
            assert_eq!(check_compatibility(&a, &a, n_sigma).unwrap(), 0);
        }
    }

    #[test]
    fn test_symmetric() {
        let a = hist(vec![10.0, 20.0, 30.0], vec![2.0, 1.5, 3.0]);
        let b = hist(vec![16.0, 20.5, 29.0], vec![2.0, 1.5, 3.0]);
        assert_eq!(
            check_compatibility(&a, &b, 2.0).unwrap(),
            check_compatibility(&b, &a, 2.0).unwrap()
        );
    }

    #[test]
    fn test_worked_example() {
        // diff = 6, combined = sqrt(8) ~ 2.828, 2 sigma ~ 5.657 -> incompatible.
        let a = hist(vec![10.0], vec![2.0]);
        let b = hist(vec![16.0], vec![2.0]);
        assert_eq!(check_compatibility(&a, &b, 2.0).unwrap(), 1);
        // At 3 sigma the window widens past the difference.
        assert_eq!(check_compatibility(&a, &b, 3.0).unwrap(), 0);
    }

    #[test]
    fn test_boundary_is_compatible() {
        // diff = 2 exactly equals n_sigma * combined = 2 * 1.
        let a = hist(vec![10.0], vec![1.0]);
        let b = hist(vec![12.0], vec![0.0]);
        assert_eq!(check_compatibility(&a, &b, 2.0).unwrap(), 0);
    }

    #[test]
    fn test_zero_combined_sigma() {
        let a = hist(vec![5.0], vec![0.0]);
        let b = hist(vec![5.0], vec![0.0]);
        assert_eq!(check_compatibility(&a, &b, 1.0).unwrap(), 0);

        let c = hist(vec![5.000001], vec![0.0]);
        for n_sigma in [1.0, 100.0] {
            assert_eq!(check_compatibility(&a, &c, n_sigma).unwrap(), 1);
        }
    }

    #[test]
    fn test_preconditions() {
        let a = hist(vec![1.0], vec![0.5]);
        let b = hist(vec![1.0, 2.0], vec![0.5, 0.5]);
        assert!(matches!(
            check_compatibility(&a, &b, 2.0),
            Err(Error::SizeMismatch { left: 1, right: 2 })
        ));
        assert!(matches!(check_compatibility(&a, &a, 0.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(check_compatibility(&a, &a, -1.0), Err(Error::InvalidArgument(_))));
        assert!(matches!(check_compatibility(&a, &a, f64::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_compare_pulls() {
        let a = hist(vec![10.0, 5.0], vec![2.0, 0.0]);
        let b = hist(vec![16.0, 5.0], vec![2.0, 0.0]);
        let report = compare(&a, &b, 2.0).unwrap();
        assert_eq!(report.n_incompatible, 1);
        assert!((report.pulls[0] - 6.0 / 8.0_f64.sqrt()).abs() < 1e-12);
        // 0/0 pull in the exact-agreement bin.
        assert!(report.pulls[1].is_nan());
        assert!(!report.all_compatible());
    }

    #[test]
    fn test_pairwise_table() {
        let a = hist(vec![10.0], vec![2.0]);
        let b = hist(vec![16.0], vec![2.0]);
        let c = hist(vec![10.5], vec![2.0]);
        let table = pairwise(&[a, b, c], 2.0).unwrap();
        assert_eq!(table.len(), 3);
        let pairs: Vec<(usize, usize)> = table.iter().map(|p| (p.left, p.right)).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(table[0].report.n_incompatible, 1);
        assert_eq!(table[1].report.n_incompatible, 0);
    }

    #[test]
    fn test_pairwise_size_mismatch_surfaces() {
        let a = hist(vec![10.0], vec![2.0]);
        let b = hist(vec![1.0, 2.0], vec![0.5, 0.5]);
        assert!(pairwise(&[a, b], 2.0).is_err());
    }
}
