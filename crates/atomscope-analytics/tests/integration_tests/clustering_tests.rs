//! Clustering invariants on seeded data.

use std::collections::HashSet;

use atomscope_analytics::clustering::{distance_matrix, silhouette_score};
use atomscope_analytics::{
    hierarchical, kmeans, AnalyticsError, CentroidInit, HierarchicalConfig, KMeansConfig, Linkage,
};

use crate::common::{blob_dataset, blob_of, random_rows};

#[test]
fn test_kmeans_partitions_random_data() {
    for seed in 0..10 {
        let rows = random_rows(25, 4, seed);
        let config = KMeansConfig::new(3)
            .with_init(CentroidInit::Random)
            .with_seed(seed);
        let result = kmeans(&rows, &config).unwrap();

        assert!(result.iterations <= config.max_iterations);
        assert_eq!(result.assignments.len(), 25);
        assert!(result.assignments.iter().all(|&a| a < 3));

        let mut seen = HashSet::new();
        for cluster in &result.clusters {
            assert!(cluster.size > 0, "seed {}: empty cluster {}", seed, cluster.id);
            assert_eq!(cluster.size, cluster.members.len());
            for &m in &cluster.members {
                assert!(seen.insert(m), "point {} in two clusters", m);
                assert_eq!(result.assignments[m], cluster.id);
            }
        }
        assert_eq!(seen.len(), 25);
        assert!((-1.0..=1.0).contains(&result.silhouette_score));
    }
}

#[test]
fn test_kmeans_recovers_blobs() {
    let dataset = blob_dataset(10, 42);
    let rows = dataset.components();
    let result = kmeans(&rows, &KMeansConfig::new(3)).unwrap();

    assert!(result.converged);
    // First-k seeding picks one point per blob, so cluster ids follow blob ids.
    for (i, &label) in result.assignments.iter().enumerate() {
        assert_eq!(label, blob_of(i));
    }
    assert!(result.silhouette_score > 0.9);
    for cluster in &result.clusters {
        assert!(cluster.max_distance < 2.0);
    }
}

#[test]
fn test_kmeans_small_example_converges() {
    let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
    let result = kmeans(&rows, &KMeansConfig::new(2)).unwrap();

    assert!(result.converged);
    assert_eq!(result.clusters.len(), 2);
    assert!(result.clusters.iter().all(|c| !c.is_empty()));
}

#[test]
fn test_kmeans_rejects_k_above_count() {
    let rows = random_rows(4, 3, 1);
    let err = kmeans(&rows, &KMeansConfig::new(5)).unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::InsufficientData {
            required: 5,
            actual: 4,
            ..
        }
    ));
}

#[test]
fn test_dendrogram_merge_count() {
    for count in [2usize, 3, 7, 20] {
        let rows = random_rows(count, 3, count as u64);
        for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
            let result = hierarchical(&rows, &HierarchicalConfig::new(linkage)).unwrap();
            assert_eq!(result.dendrogram.merge_count(), count - 1);
            assert_eq!(result.dendrogram.leaf_count(), count);
            let root = &result.dendrogram.nodes[result.dendrogram.root];
            let mut members = root.members();
            members.sort_unstable();
            assert_eq!(members, (0..count).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_merge_heights_are_monotonic_for_standard_linkages() {
    let rows = random_rows(15, 4, 99);
    for linkage in [Linkage::Single, Linkage::Complete, Linkage::Average] {
        let result = hierarchical(&rows, &HierarchicalConfig::new(linkage)).unwrap();
        let heights: Vec<f64> = result.dendrogram.merges().map(|m| m.height()).collect();
        assert!(
            heights.windows(2).all(|w| w[0] <= w[1] + 1e-12),
            "{:?} heights not monotonic: {:?}",
            linkage,
            heights
        );
    }
}

#[test]
fn test_single_linkage_never_exceeds_complete() {
    let rows = random_rows(12, 3, 5);
    let single = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Single)).unwrap();
    let complete = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Complete)).unwrap();
    assert!(single.dendrogram.height() <= complete.dendrogram.height() + 1e-12);
}

#[test]
fn test_cut_levels_recover_blobs() {
    let dataset = blob_dataset(6, 7);
    let rows = dataset.components();
    let result = hierarchical(&rows, &HierarchicalConfig::new(Linkage::Average)).unwrap();

    let level = result.level(3).unwrap();
    assert_eq!(level.k, 3);
    assert_eq!(level.clusters.len(), 3);
    for cluster in &level.clusters {
        let blob = blob_of(cluster[0]);
        assert!(cluster.iter().all(|&m| blob_of(m) == blob));
        assert_eq!(cluster.len(), 6);
    }
    assert!(level.silhouette_score > 0.9);

    for level in &result.cluster_levels {
        let total: usize = level.clusters.iter().map(Vec::len).sum();
        assert_eq!(total, 18);
        assert_eq!(level.clusters.len(), level.k);
    }
}

#[test]
fn test_silhouette_matches_between_engines() {
    let dataset = blob_dataset(5, 3);
    let rows = dataset.components();
    let result = kmeans(&rows, &KMeansConfig::new(3)).unwrap();
    let dist = distance_matrix(&rows).unwrap();
    let recomputed = silhouette_score(&result.assignments, &dist);
    assert!((recomputed - result.silhouette_score).abs() < 1e-12);
}
