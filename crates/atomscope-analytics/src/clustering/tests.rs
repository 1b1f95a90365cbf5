//! Tests for the cluster engine.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::config::{CentroidInit, HierarchicalConfig, KMeansConfig, Linkage};
use crate::error::AnalyticsError;

/// Three tight blobs around (0,0), (10,0) and (0,10).
fn three_blobs(per_blob: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let centers = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
    let mut rows = Vec::new();
    for _ in 0..per_blob {
        for (cx, cy) in centers {
            rows.push(vec![
                cx + rng.gen_range(-0.5..0.5),
                cy + rng.gen_range(-0.5..0.5),
            ]);
        }
    }
    rows
}

fn assert_partition(result: &KMeansResult, count: usize) {
    assert_eq!(result.assignments.len(), count);
    let total: usize = result.clusters.iter().map(|c| c.size).sum();
    assert_eq!(total, count);
    for cluster in &result.clusters {
        assert!(cluster.size > 0, "cluster {} is empty", cluster.id);
        for &m in &cluster.members {
            assert_eq!(result.assignments[m], cluster.id);
        }
    }
}

// ----- k-means -----

#[test]
fn test_kmeans_small_example_converges() {
    let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
    let result = kmeans(&rows, &KMeansConfig::new(2)).unwrap();

    assert!(result.converged);
    assert_eq!(result.iterations, 2);
    assert_eq!(result.assignments, vec![0, 1, 0]);
    assert_eq!(result.centroids[0], vec![1.0, 0.5]);
    assert_partition(&result, 3);
}

#[test]
fn test_kmeans_separates_blobs() {
    let rows = three_blobs(10, 42);
    let result = kmeans(&rows, &KMeansConfig::new(3)).unwrap();

    assert!(result.converged);
    assert!(result.iterations <= 100);
    assert_partition(&result, rows.len());
    assert!(result.clusters.iter().all(|c| c.size == 10));
    assert!(result.silhouette_score > 0.8);
    assert!(result.clusters.iter().all(|c| c.max_distance < 1.5));
}

#[test]
fn test_kmeans_random_init_is_seeded() {
    let rows = three_blobs(5, 7);
    let config = KMeansConfig::new(3)
        .with_init(CentroidInit::Random)
        .with_seed(11);
    let a = kmeans(&rows, &config).unwrap();
    let b = kmeans(&rows, &config).unwrap();
    assert_eq!(a, b);
    assert_partition(&a, rows.len());
}

#[test]
fn test_kmeans_duplicate_points_still_fill_every_cluster() {
    let rows = vec![vec![1.0, 1.0]; 5];
    let config = KMeansConfig::new(3).with_seed(3);
    let result = kmeans(&rows, &config).unwrap();
    assert_partition(&result, 5);
    assert_eq!(result.inertia, 0.0);
    assert_eq!(result.silhouette_score, 0.0);
}

#[test]
fn test_kmeans_k_equals_count() {
    let rows = vec![vec![0.0], vec![5.0], vec![9.0]];
    let result = kmeans(&rows, &KMeansConfig::new(3)).unwrap();
    assert_partition(&result, 3);
    assert_eq!(result.inertia, 0.0);
}

#[test]
fn test_kmeans_respects_iteration_budget() {
    let rows = three_blobs(10, 1);
    let result = kmeans(&rows, &KMeansConfig::new(3).with_max_iterations(1)).unwrap();
    assert_eq!(result.iterations, 1);
    assert!(!result.converged);
    assert_partition(&result, rows.len());
}

#[test]
fn test_kmeans_k_greater_than_count_fails() {
    let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let err = kmeans(&rows, &KMeansConfig::new(3)).unwrap_err();
    match err {
        AnalyticsError::InsufficientData {
            required, actual, ..
        } => {
            assert_eq!(required, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn test_kmeans_zero_k_fails() {
    let rows = vec![vec![1.0, 2.0]];
    let err = kmeans(&rows, &KMeansConfig::new(0)).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidParameter { .. }));
}

#[test]
fn test_kmeans_run_steps() {
    let rows = three_blobs(4, 9);
    let mut run = KMeansRun::new(&rows, &KMeansConfig::new(3)).unwrap();
    assert_eq!(run.iterations(), 0);
    assert!(!run.is_finished());

    let mut steps = 0;
    while run.step() {
        steps += 1;
        assert!(steps <= run.max_iterations());
    }
    assert!(run.is_finished());
    assert!(run.is_converged());
    assert!(!run.step());

    let iterations = run.iterations();
    let result = run.finish();
    assert_eq!(result.iterations, iterations);
}

// ----- silhouette -----

#[test]
fn test_silhouette_well_separated() {
    let rows = vec![vec![0.0], vec![0.1], vec![10.0], vec![10.1]];
    let matrix = distance_matrix(&rows).unwrap();
    let score = silhouette_score(&[0, 0, 1, 1], &matrix);
    assert!(score > 0.95);
}

#[test]
fn test_silhouette_singletons_and_single_cluster() {
    let rows = vec![vec![0.0], vec![1.0], vec![5.0]];
    let matrix = distance_matrix(&rows).unwrap();
    assert_eq!(silhouette_score(&[0, 0, 0], &matrix), 0.0);
    assert_eq!(silhouette_coefficient(2, &[0, 0, 1], &matrix), 0.0);
    assert_eq!(silhouette_score(&[0, 1, 2], &matrix), 0.0);
}

#[test]
fn test_silhouette_bad_assignment_is_negative() {
    let rows = vec![vec![0.0], vec![10.0], vec![0.1], vec![10.1]];
    let matrix = distance_matrix(&rows).unwrap();
    assert!(silhouette_score(&[0, 0, 1, 1], &matrix) < 0.0);
}

// ----- hierarchical -----

#[test]
fn test_dendrogram_has_count_minus_one_merges() {
    for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
        let rows = three_blobs(3, 5);
        let result = hierarchical(&rows, &HierarchicalConfig::new(linkage)).unwrap();
        assert_eq!(result.dendrogram.leaf_count(), rows.len());
        assert_eq!(result.dendrogram.merge_count(), rows.len() - 1);
        assert_eq!(result.dendrogram.root, 2 * rows.len() - 2);

        let root = &result.dendrogram.nodes[result.dendrogram.root];
        assert_eq!(root.members(), (0..rows.len()).collect::<Vec<_>>());
    }
}

#[test]
fn test_single_linkage_merge_heights() {
    let rows = vec![vec![0.0], vec![1.0], vec![3.0], vec![7.0]];
    let result = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Single)).unwrap();
    let heights: Vec<f64> = result.dendrogram.merges().map(|m| m.height()).collect();
    assert_eq!(heights, vec![1.0, 2.0, 4.0]);
}

#[test]
fn test_complete_and_average_linkage_heights() {
    let rows = vec![vec![0.0], vec![1.0], vec![3.0]];

    let complete = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Complete)).unwrap();
    let heights: Vec<f64> = complete.dendrogram.merges().map(|m| m.height()).collect();
    assert_eq!(heights, vec![1.0, 3.0]);

    let average = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Average)).unwrap();
    let heights: Vec<f64> = average.dendrogram.merges().map(|m| m.height()).collect();
    assert_eq!(heights, vec![1.0, 2.5]);
}

#[test]
fn test_ties_merge_first_pair_in_index_order() {
    let rows = vec![vec![0.0], vec![1.0], vec![2.0]];
    let result = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Single)).unwrap();
    match &result.dendrogram.nodes[3] {
        DendrogramNode::Merge { left, right, .. } => assert_eq!((*left, *right), (0, 1)),
        other => panic!("expected merge node, got {:?}", other),
    }
}

#[test]
fn test_cluster_levels() {
    let rows = vec![vec![0.0], vec![0.5], vec![10.0], vec![10.5], vec![30.0]];
    let result = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Average)).unwrap();

    assert_eq!(result.cluster_levels.len(), 4);
    let ks: Vec<usize> = result.cluster_levels.iter().map(|l| l.k).collect();
    assert_eq!(ks, vec![2, 3, 4, 5]);

    let three = result.level(3).unwrap();
    assert_eq!(three.clusters, vec![vec![0, 1], vec![2, 3], vec![4]]);
    assert!(three.silhouette_score > 0.5);
    // Thresholds are the height of the last merge applied before the cut.
    assert_eq!(three.threshold, 0.5);
    assert_eq!(result.level(2).unwrap().threshold, 10.0);

    let five = result.level(5).unwrap();
    assert_eq!(five.threshold, 0.0);
    assert_eq!(five.clusters.len(), 5);

    for level in &result.cluster_levels {
        assert_eq!(level.clusters.len(), level.k);
        let total: usize = level.clusters.iter().map(Vec::len).sum();
        assert_eq!(total, rows.len());
    }
}

#[test]
fn test_cluster_levels_capped() {
    let rows = three_blobs(3, 2);
    let config = HierarchicalConfig::new(Linkage::Complete).with_max_levels(3);
    let result = hierarchical(&rows, &config).unwrap();
    let ks: Vec<usize> = result.cluster_levels.iter().map(|l| l.k).collect();
    assert_eq!(ks, vec![2, 3]);

    // A cap of 2 keeps only the two-cluster cut.
    let config = HierarchicalConfig::new(Linkage::Complete).with_max_levels(2);
    let result = hierarchical(&rows, &config).unwrap();
    assert_eq!(result.cluster_levels.len(), 1);
    assert_eq!(result.cluster_levels[0].k, 2);

    // A cap above the vector count stops at one cluster per vector.
    let config = HierarchicalConfig::new(Linkage::Complete).with_max_levels(100);
    let result = hierarchical(&rows, &config).unwrap();
    assert_eq!(result.cluster_levels.last().map(|l| l.k), Some(rows.len()));
}

#[test]
fn test_hierarchical_requires_two_vectors() {
    let err = hierarchical(&[vec![1.0, 2.0]], &HierarchicalConfig::default()).unwrap_err();
    assert!(matches!(err, AnalyticsError::InsufficientData { required: 2, .. }));
}

#[test]
fn test_hierarchical_serializes_node_tags() {
    let rows = vec![vec![0.0], vec![1.0]];
    let result = hierarchical(&rows, &HierarchicalConfig::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["dendrogram"]["nodes"][0]["type"], "leaf");
    assert_eq!(json["dendrogram"]["nodes"][2]["type"], "merge");
    assert!(json["distanceMatrix"].is_array());
    assert!(json["clusterLevels"].is_array());
}
