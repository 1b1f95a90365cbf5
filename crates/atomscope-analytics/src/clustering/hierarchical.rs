//! Agglomerative hierarchical clustering.
//!
//! Starts from one cluster per vector and repeatedly merges the closest pair
//! under the configured [`Linkage`], updating inter-cluster distances with the
//! Lance–Williams recurrence. The merge history is kept as a dendrogram arena.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{HierarchicalConfig, Linkage, MetricConfig};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{pairwise_matrix, MetricKind};
use crate::types::validate_matrix;

use super::silhouette::silhouette_score;

/// A node of the dendrogram arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DendrogramNode {
    /// A single input vector.
    Leaf { index: usize },
    /// Union of two earlier nodes.
    Merge {
        left: usize,
        right: usize,
        /// Linkage distance at which the children were joined.
        height: f64,
        /// Leaf indices under this node, ascending.
        members: Vec<usize>,
    },
}

impl DendrogramNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, DendrogramNode::Leaf { .. })
    }

    /// Merge height; 0 for leaves.
    pub fn height(&self) -> f64 {
        match self {
            DendrogramNode::Leaf { .. } => 0.0,
            DendrogramNode::Merge { height, .. } => *height,
        }
    }

    /// Leaf indices under this node.
    pub fn members(&self) -> Vec<usize> {
        match self {
            DendrogramNode::Leaf { index } => vec![*index],
            DendrogramNode::Merge { members, .. } => members.clone(),
        }
    }
}

/// Merge tree over `n` leaves.
///
/// Nodes `0..n` are leaves in dataset order; node `n + t` is the `t`-th merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dendrogram {
    pub nodes: Vec<DendrogramNode>,
    /// Index of the final merge (or the single leaf).
    pub root: usize,
}

impl Dendrogram {
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn merge_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Merge nodes in the order they were created.
    pub fn merges(&self) -> impl Iterator<Item = &DendrogramNode> {
        self.nodes.iter().filter(|n| !n.is_leaf())
    }

    /// Height of the root merge.
    pub fn height(&self) -> f64 {
        self.nodes.get(self.root).map(DendrogramNode::height).unwrap_or(0.0)
    }
}

/// Partition obtained by cutting the dendrogram into `k` clusters.
///
/// A level is cut by merge count rather than by a height fraction: it holds
/// the clusters left after the first `count - k` merges, and `threshold` is
/// the height of the last of those merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLevel {
    pub k: usize,
    /// Height of the last merge applied before the cut; 0 when none was.
    pub threshold: f64,
    /// Member indices of each cluster, ordered by smallest member.
    pub clusters: Vec<Vec<usize>>,
    pub silhouette_score: f64,
}

/// Output of hierarchical clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalResult {
    pub linkage: Linkage,
    pub dendrogram: Dendrogram,
    /// Euclidean distances between input vectors.
    pub distance_matrix: Vec<Vec<f64>>,
    /// Cuts for `k = 2, 3, ...`, ascending in `k`.
    pub cluster_levels: Vec<ClusterLevel>,
}

impl HierarchicalResult {
    /// The cut with exactly `k` clusters, if it was computed.
    pub fn level(&self, k: usize) -> Option<&ClusterLevel> {
        self.cluster_levels.iter().find(|l| l.k == k)
    }
}

/// Full Euclidean distance matrix of a row set.
pub fn distance_matrix<R: AsRef<[f64]>>(rows: &[R]) -> AnalyticsResult<Vec<Vec<f64>>> {
    pairwise_matrix(rows, MetricKind::Euclidean, &MetricConfig::default())
}

/// Lance–Williams update of the distance from cluster `m` to the union of `i` and `j`.
#[inline]
fn lance_williams(linkage: Linkage, d_im: f64, d_jm: f64, size_i: usize, size_j: usize) -> f64 {
    match linkage {
        Linkage::Single => d_im.min(d_jm),
        Linkage::Complete => d_im.max(d_jm),
        Linkage::Average => {
            let (ni, nj) = (size_i as f64, size_j as f64);
            (ni * d_im + nj * d_jm) / (ni + nj)
        }
    }
}

/// Build the dendrogram and its cut levels.
///
/// # Errors
///
/// - [`AnalyticsError::InsufficientData`] with fewer than two vectors
/// - [`AnalyticsError::ConfigError`] for an invalid `max_levels`
pub fn hierarchical<R: AsRef<[f64]>>(
    rows: &[R],
    config: &HierarchicalConfig,
) -> AnalyticsResult<HierarchicalResult> {
    validate_matrix(rows, "hierarchical", 2)?;
    config.validate().map_err(AnalyticsError::ConfigError)?;

    let n = rows.len();
    let distances = distance_matrix(rows)?;

    let mut working = distances.clone();
    let mut active = vec![true; n];
    let mut slot_node: Vec<usize> = (0..n).collect();
    let mut slot_members: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut nodes: Vec<DendrogramNode> =
        (0..n).map(|index| DendrogramNode::Leaf { index }).collect();

    for _ in 0..(n - 1) {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..n {
            if !active[i] {
                continue;
            }
            for j in (i + 1)..n {
                if !active[j] {
                    continue;
                }
                let d = working[i][j];
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }

        let Some((i, j, height)) = best else {
            break;
        };

        let (size_i, size_j) = (slot_members[i].len(), slot_members[j].len());
        for m in 0..n {
            if !active[m] || m == i || m == j {
                continue;
            }
            let updated =
                lance_williams(config.linkage, working[i][m], working[j][m], size_i, size_j);
            working[i][m] = updated;
            working[m][i] = updated;
        }

        let moved = std::mem::take(&mut slot_members[j]);
        slot_members[i].extend(moved);
        slot_members[i].sort_unstable();
        active[j] = false;

        nodes.push(DendrogramNode::Merge {
            left: slot_node[i],
            right: slot_node[j],
            height,
            members: slot_members[i].clone(),
        });
        slot_node[i] = nodes.len() - 1;
    }

    let dendrogram = Dendrogram {
        root: nodes.len() - 1,
        nodes,
    };

    let max_k = match config.max_levels {
        Some(levels) => n.min(levels),
        None => n,
    };
    let cluster_levels = (2..=max_k)
        .map(|k| cut_level(&dendrogram, n, k, &distances))
        .collect();

    debug!(
        vectors = n,
        merges = dendrogram.merge_count(),
        linkage = ?config.linkage,
        "hierarchical clustering finished"
    );

    Ok(HierarchicalResult {
        linkage: config.linkage,
        dendrogram,
        distance_matrix: distances,
        cluster_levels,
    })
}

/// Clusters present after the first `n - k` merges.
fn cut_level(
    dendrogram: &Dendrogram,
    n: usize,
    k: usize,
    distances: &[Vec<f64>],
) -> ClusterLevel {
    let applied = n - k;
    let limit = n + applied;

    let mut covered = vec![false; limit];
    for node in &dendrogram.nodes[n..limit] {
        if let DendrogramNode::Merge { left, right, .. } = node {
            covered[*left] = true;
            covered[*right] = true;
        }
    }

    let mut clusters: Vec<Vec<usize>> = (0..limit)
        .filter(|&idx| !covered[idx])
        .map(|idx| dendrogram.nodes[idx].members())
        .collect();
    clusters.sort_by_key(|members| members.first().copied().unwrap_or(usize::MAX));

    let mut labels = vec![0usize; n];
    for (label, members) in clusters.iter().enumerate() {
        for &m in members {
            labels[m] = label;
        }
    }

    let threshold = if applied == 0 {
        0.0
    } else {
        dendrogram.nodes[limit - 1].height()
    };

    ClusterLevel {
        k,
        threshold,
        clusters,
        silhouette_score: silhouette_score(&labels, distances),
    }
}
