//! Cluster summary shared by the clustering algorithms.

use serde::{Deserialize, Serialize};

use crate::metrics::euclidean_distance;

/// One cluster of a partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: usize,
    /// Component-wise mean of the members (or the k-means centroid).
    pub centroid: Vec<f64>,
    /// Member indices into the dataset, ascending.
    pub members: Vec<usize>,
    pub size: usize,
    pub mean_distance: f64,
    pub max_distance: f64,
    pub min_distance: f64,
}

impl Cluster {
    /// Build a cluster and its distance aggregates from member rows.
    ///
    /// An empty cluster reports zero distances.
    pub fn from_members(
        id: usize,
        centroid: Vec<f64>,
        members: Vec<usize>,
        rows: &[&[f64]],
    ) -> Self {
        // Rows come from a validated matrix so the lengths always agree
        let distances: Vec<f64> = members
            .iter()
            .filter_map(|&m| euclidean_distance(rows[m], &centroid).ok())
            .collect();

        let (mean_distance, max_distance, min_distance) = if distances.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = distances.iter().sum();
            let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
            (sum / distances.len() as f64, max, min)
        };

        Self {
            id,
            size: members.len(),
            centroid,
            members,
            mean_distance,
            max_distance,
            min_distance,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Component-wise mean of the selected rows. `None` when `members` is empty.
pub(crate) fn mean_of(
    rows: &[&[f64]],
    members: impl IntoIterator<Item = usize>,
    dimension: usize,
) -> Option<Vec<f64>> {
    let mut sum = vec![0.0; dimension];
    let mut count = 0usize;
    for m in members {
        for (s, x) in sum.iter_mut().zip(rows[m]) {
            *s += x;
        }
        count += 1;
    }
    if count == 0 {
        return None;
    }
    sum.iter_mut().for_each(|s| *s /= count as f64);
    Some(sum)
}
