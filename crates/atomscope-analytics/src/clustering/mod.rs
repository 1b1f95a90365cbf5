//! Cluster engine: k-means, agglomerative hierarchical clustering and the
//! silhouette score.
//!
//! Both algorithms measure Euclidean distance and operate on borrowed rows;
//! results are built once at the end of a run.

mod hierarchical;
mod kmeans;
mod silhouette;
mod types;

#[cfg(test)]
mod tests;

pub use self::hierarchical::{
    distance_matrix, hierarchical, ClusterLevel, Dendrogram, DendrogramNode, HierarchicalResult,
};
pub use self::kmeans::{kmeans, KMeansResult, KMeansRun};
pub use self::silhouette::{silhouette_coefficient, silhouette_score};
pub use self::types::Cluster;
