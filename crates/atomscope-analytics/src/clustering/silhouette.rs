//! Silhouette coefficient over a precomputed distance matrix.
//!
//! s(i) = (b(i) - a(i)) / max(a(i), b(i))
//!
//! where a(i) is the mean distance to the other members of i's cluster and
//! b(i) the smallest mean distance to the members of any other cluster.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Silhouette coefficient of one point.
///
/// Members of singleton clusters score 0, as does a point with no other
/// cluster to compare against.
pub fn silhouette_coefficient(
    point_idx: usize,
    cluster_labels: &[usize],
    distance_matrix: &[Vec<f64>],
) -> f64 {
    let cluster = cluster_labels[point_idx];

    let mut same_sum = 0.0;
    let mut same_count = 0usize;
    let mut other: HashMap<usize, (f64, usize)> = HashMap::new();

    for (i, &label) in cluster_labels.iter().enumerate() {
        if i == point_idx {
            continue;
        }
        let dist = distance_matrix[point_idx][i];
        if label == cluster {
            same_sum += dist;
            same_count += 1;
        } else {
            let entry = other.entry(label).or_insert((0.0, 0));
            entry.0 += dist;
            entry.1 += 1;
        }
    }

    if same_count == 0 {
        return 0.0;
    }
    let a = same_sum / same_count as f64;

    let b = match other
        .values()
        .map(|(sum, count)| sum / *count as f64)
        .min_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal))
    {
        Some(b) => b,
        None => return 0.0,
    };

    let max_ab = a.max(b);
    if max_ab < f64::EPSILON {
        0.0
    } else {
        (b - a) / max_ab
    }
}

/// Mean silhouette coefficient over all points.
///
/// Returns 0 when fewer than two distinct clusters are present.
pub fn silhouette_score(cluster_labels: &[usize], distance_matrix: &[Vec<f64>]) -> f64 {
    let distinct: HashSet<usize> = cluster_labels.iter().copied().collect();
    if distinct.len() < 2 {
        return 0.0;
    }

    let n = cluster_labels.len();
    let sum: f64 = (0..n)
        .map(|i| silhouette_coefficient(i, cluster_labels, distance_matrix))
        .sum();

    sum / n as f64
}
