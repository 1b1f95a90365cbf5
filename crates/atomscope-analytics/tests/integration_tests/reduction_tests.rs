//! PCA behavior on seeded data.

use atomscope_analytics::reduction::{center, column_means, covariance_matrix};
use atomscope_analytics::{reduce, AnalyticsError, PcaConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::random_rows;

/// Points spread along `direction` with small isotropic noise.
fn elongated_cloud(count: usize, direction: [f64; 3], seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let t: f64 = rng.gen_range(-10.0..10.0);
            direction
                .iter()
                .map(|d| d * t + rng.gen_range(-0.05..0.05))
                .collect()
        })
        .collect()
}

/// Uniform rows with column `i` scaled by `scales[i]`, so the covariance
/// eigenvalues are well separated.
fn scaled_rows(count: usize, scales: &[f64], seed: u64) -> Vec<Vec<f64>> {
    random_rows(count, scales.len(), seed)
        .into_iter()
        .map(|row| row.iter().zip(scales).map(|(x, s)| x * s).collect())
        .collect()
}

#[test]
fn test_projection_shape_and_variance_bounds() {
    for seed in 0..5 {
        let rows = random_rows(30, 6, seed);
        let config = PcaConfig::default().with_target_dimensions(2).with_seed(seed);
        let result = reduce(&rows, &config).unwrap();

        assert_eq!(result.projected_data.len(), 30);
        assert!(result.projected_data.iter().all(|p| p.len() == 2));
        assert_eq!(result.components(), 2);
        assert_eq!(result.means.len(), 6);
        assert!((0.0..=1.0).contains(&result.explained_variance));
        assert!(result.eigenvalues.iter().all(|&ev| ev >= -1e-9));
    }
}

#[test]
fn test_dominant_direction_found() {
    let inv = 1.0 / 3.0_f64.sqrt();
    let rows = elongated_cloud(200, [inv, inv, inv], 4);
    let config = PcaConfig::default().with_target_dimensions(1).with_seed(9);
    let result = reduce(&rows, &config).unwrap();

    let v = &result.eigenvectors[0];
    for component in v {
        assert!((component.abs() - inv).abs() < 0.01, "eigenvector {:?}", v);
    }
    assert!(result.explained_variance > 0.99);
}

#[test]
fn test_deflated_components_orthonormal() {
    let rows = scaled_rows(200, &[5.0, 2.0, 0.5], 21);
    let config = PcaConfig::default()
        .with_target_dimensions(3)
        .with_deflation(true)
        .with_seed(3);
    let result = reduce(&rows, &config).unwrap();

    for (i, a) in result.eigenvectors.iter().enumerate() {
        let norm: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        for b in result.eigenvectors.iter().skip(i + 1) {
            let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
            assert!(dot.abs() < 1e-3, "components not orthogonal: {}", dot);
        }
    }
    // Eigenvalues come out in non-increasing order.
    assert!(result
        .eigenvalues
        .windows(2)
        .all(|w| w[0] + 1e-6 >= w[1]));
    // All three components together explain the whole trace.
    assert!((result.explained_variance - 1.0).abs() < 1e-3);
}

#[test]
fn test_eigenvalue_sum_matches_trace_with_full_deflation() {
    let rows = scaled_rows(100, &[4.0, 2.0, 1.0, 0.5], 8);
    let config = PcaConfig::default()
        .with_target_dimensions(4)
        .with_deflation(true)
        .with_seed(1);
    let result = reduce(&rows, &config).unwrap();

    let means = column_means(&rows);
    let centered = center(&rows, &means);
    let cov = covariance_matrix(&centered).unwrap();
    let trace: f64 = (0..4).map(|i| cov[i][i]).sum();
    let total: f64 = result.eigenvalues.iter().sum();
    assert!((total - trace).abs() / trace < 1e-3);
}

#[test]
fn test_same_seed_same_result() {
    let rows = random_rows(25, 5, 2);
    let config = PcaConfig::default().with_target_dimensions(2).with_seed(77);
    let first = reduce(&rows, &config).unwrap();
    let second = reduce(&rows, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_target_dimension_out_of_range() {
    let rows = random_rows(10, 3, 0);
    for k in [0, 4] {
        let err = reduce(&rows, &PcaConfig::default().with_target_dimensions(k)).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidParameter { .. }), "k = {}", k);
    }
}
