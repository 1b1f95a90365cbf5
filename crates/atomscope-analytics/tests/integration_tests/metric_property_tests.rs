//! Metric properties over seeded random vectors.

use atomscope_analytics::metrics::{
    classify_quantum, kurtosis, mean, pairwise_matrix, skewness, squared_distance, variance,
};
use atomscope_analytics::{
    cosine_similarity, dot_product, euclidean_distance, magnitude, manhattan_distance,
    pearson_correlation, resonance_force, shannon_entropy, AnalyticsError, MetricConfig,
    MetricKind,
};

use crate::common::random_rows;

const EPS: f64 = 1e-9;

#[test]
fn test_reference_values() {
    let a = [1.0, 2.0, 3.0];
    let b = [4.0, 5.0, 6.0];

    assert_eq!(dot_product(&a, &b).unwrap(), 32.0);
    assert!((euclidean_distance(&a, &b).unwrap() - 27.0_f64.sqrt()).abs() < EPS);
    assert_eq!(manhattan_distance(&a, &b).unwrap(), 9.0);
    assert!((shannon_entropy(&[1.0, 1.0, 1.0, 1.0]) - 2.0).abs() < EPS);
}

#[test]
fn test_zero_vector_is_degenerate_not_an_error() {
    let zero = [0.0, 0.0, 0.0];
    assert_eq!(shannon_entropy(&zero), 0.0);
    assert_eq!(magnitude(&zero), 0.0);
    assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    assert_eq!(skewness(&zero), 0.0);
    assert_eq!(kurtosis(&zero), 0.0);
}

#[test]
fn test_cosine_self_similarity() {
    for row in random_rows(50, 8, 7) {
        let sim = cosine_similarity(&row, &row).unwrap();
        assert!((sim - 1.0).abs() < EPS, "cos(v, v) = {}", sim);
    }
}

#[test]
fn test_pearson_scaling_sign() {
    for (i, row) in random_rows(30, 6, 11).into_iter().enumerate() {
        let scale = 0.5 + i as f64;
        let up: Vec<f64> = row.iter().map(|x| x * scale).collect();
        let down: Vec<f64> = row.iter().map(|x| -x * scale).collect();

        assert!((pearson_correlation(&row, &up).unwrap() - 1.0).abs() < 1e-9);
        assert!((pearson_correlation(&row, &down).unwrap() + 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_symmetric_metrics() {
    let rows = random_rows(20, 5, 3);
    for a in &rows {
        for b in &rows {
            assert_eq!(dot_product(a, b).unwrap(), dot_product(b, a).unwrap());
            assert!(
                (euclidean_distance(a, b).unwrap() - euclidean_distance(b, a).unwrap()).abs()
                    < EPS
            );
            assert!((resonance_force(a, b).unwrap() - resonance_force(b, a).unwrap()).abs() < EPS);
        }
    }
}

#[test]
fn test_distance_identities() {
    let rows = random_rows(20, 5, 5);
    for a in &rows {
        assert_eq!(euclidean_distance(a, a).unwrap(), 0.0);
        for b in &rows {
            let d = euclidean_distance(a, b).unwrap();
            assert!((d * d - squared_distance(a, b).unwrap()).abs() < 1e-9);
            // L2 never exceeds L1
            assert!(d <= manhattan_distance(a, b).unwrap() + EPS);
            let cos = cosine_similarity(a, b).unwrap();
            assert!((-1.0..=1.0).contains(&cos));
        }
    }
}

#[test]
fn test_entropy_bounds() {
    for row in random_rows(40, 16, 13) {
        let h = shannon_entropy(&row);
        assert!(h >= 0.0);
        assert!(h <= 16.0_f64.log2() + EPS);
    }
}

#[test]
fn test_moments_of_random_rows() {
    for row in random_rows(10, 64, 17) {
        let m = mean(&row);
        assert!(m > -1.0 && m < 1.0);
        assert!(variance(&row) >= 0.0);
        // Pearson's inequality: kurtosis >= skewness^2 + 1
        let s = skewness(&row);
        assert!(kurtosis(&row) >= s * s + 1.0 - 1e-9);
    }
}

#[test]
fn test_quantum_counts_cover_every_component() {
    for row in random_rows(10, 12, 19) {
        let quantum = classify_quantum(&row, 0.5);
        assert_eq!(quantum.total(), 12);
    }
}

#[test]
fn test_every_metric_rejects_mismatch() {
    let config = MetricConfig::default();
    for kind in MetricKind::all() {
        let err = kind.evaluate(&[1.0, 2.0], &[1.0, 2.0, 3.0], &config).unwrap_err();
        assert!(
            matches!(
                err,
                AnalyticsError::DimensionMismatch {
                    expected: 2,
                    actual: 3,
                    ..
                }
            ),
            "{:?} returned {:?}",
            kind,
            err
        );
    }
}

#[test]
fn test_pairwise_matrix_matches_direct_calls() {
    let rows = random_rows(12, 4, 23);
    let config = MetricConfig::default();
    let matrix = pairwise_matrix(&rows, MetricKind::Cosine, &config).unwrap();

    assert_eq!(matrix.len(), 12);
    for (i, a) in rows.iter().enumerate() {
        assert_eq!(matrix[i].len(), 12);
        for (j, b) in rows.iter().enumerate() {
            let direct = cosine_similarity(a, b).unwrap();
            assert!((matrix[i][j] - direct).abs() < 1e-12);
        }
    }
}
