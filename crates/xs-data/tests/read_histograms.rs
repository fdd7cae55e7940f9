//! Integration tests: read measurement datasets from fixture text files.

use std::path::PathBuf;

use xs_core::Error;
use xs_data::read_histogram;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../tests/fixtures")
        .join(name)
}

#[derive(serde::Deserialize)]
struct ExpectedHist {
    n_bins: usize,
    edges: Vec<f64>,
    values: Vec<f64>,
    uncertainties: Vec<f64>,
}

#[test]
fn read_experiment_a() {
    let expected_path = fixture_path("exp_a_expected.json");
    let expected: ExpectedHist =
        serde_json::from_str(&std::fs::read_to_string(&expected_path).unwrap()).unwrap();

    let h = read_histogram(fixture_path("exp_a.txt")).expect("failed to read exp_a.txt");

    assert_eq!(h.n_bins(), expected.n_bins);
    assert_eq!(h.edges().len(), h.n_bins() + 1);
    assert_eq!(h.values().len(), h.n_bins());
    assert_eq!(h.uncertainties().len(), h.n_bins());

    for (i, (got, want)) in h.edges().iter().zip(expected.edges.iter()).enumerate() {
        assert!((got - want).abs() < 1e-10, "edges[{}] mismatch: {} vs {}", i, got, want);
    }
    for (i, (got, want)) in h.values().iter().zip(expected.values.iter()).enumerate() {
        assert!((got - want).abs() < 1e-10, "values[{}] mismatch: {} vs {}", i, got, want);
    }
    for (i, (got, want)) in h.uncertainties().iter().zip(expected.uncertainties.iter()).enumerate() {
        assert!((got - want).abs() < 1e-10, "uncertainties[{}] mismatch: {} vs {}", i, got, want);
    }
}

#[test]
fn read_single_bin_dataset() {
    let h = read_histogram(fixture_path("single_bin.txt")).unwrap();
    assert_eq!(h.n_bins(), 1);
    assert_eq!(h.bin_low(0).unwrap(), 0.0);
    assert_eq!(h.bin_high(0).unwrap(), 1.0);
    assert_eq!(h.bin_center(0).unwrap(), 0.5);
    assert_eq!(h.measurement(0).unwrap(), 10.0);
    assert_eq!(h.error(0).unwrap(), 2.0);
}

#[test]
fn shared_edges_between_adjacent_bins() {
    let h = read_histogram(fixture_path("exp_b.txt")).unwrap();
    for i in 0..h.n_bins() - 1 {
        assert_eq!(h.bin_high(i).unwrap(), h.bin_low(i + 1).unwrap());
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = read_histogram(fixture_path("no_such_experiment.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn truncated_file_is_malformed() {
    let err = read_histogram(fixture_path("truncated.txt")).unwrap_err();
    assert!(matches!(err, Error::MalformedSource(_)));
}

#[test]
fn junk_token_is_malformed() {
    let err = read_histogram(fixture_path("bad_token.txt")).unwrap_err();
    assert!(matches!(err, Error::MalformedSource(_)));
}
