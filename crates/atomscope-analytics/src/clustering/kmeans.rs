//! Lloyd's k-means with deterministic tie-breaking.
//!
//! [`KMeansRun`] exposes the loop one iteration at a time so a caller can
//! interleave other work between iterations; [`kmeans`] drives it to the end.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CentroidInit, KMeansConfig};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::squared_distance;
use crate::types::validate_matrix;

use super::hierarchical::distance_matrix;
use super::silhouette::silhouette_score;
use super::types::{mean_of, Cluster};

/// Output of a k-means analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KMeansResult {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index of every vector.
    pub assignments: Vec<usize>,
    pub clusters: Vec<Cluster>,
    pub iterations: usize,
    /// `true` when assignments stopped changing before the iteration budget ran out.
    pub converged: bool,
    pub silhouette_score: f64,
    /// Sum of squared distances from each vector to its centroid.
    pub inertia: f64,
}

impl KMeansResult {
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
}

/// An in-progress k-means computation.
pub struct KMeansRun<'a> {
    rows: Vec<&'a [f64]>,
    dimension: usize,
    k: usize,
    max_iterations: usize,
    centroids: Vec<Vec<f64>>,
    assignments: Option<Vec<usize>>,
    iterations: usize,
    converged: bool,
    rng: StdRng,
}

impl<'a> KMeansRun<'a> {
    /// Validate the input and seed the initial centroids.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::InvalidParameter`] when `k == 0` or the iteration budget is 0
    /// - [`AnalyticsError::InsufficientData`] when `k` exceeds the number of vectors
    /// - [`AnalyticsError::DimensionMismatch`] for ragged rows
    pub fn new<R: AsRef<[f64]>>(rows: &'a [R], config: &KMeansConfig) -> AnalyticsResult<Self> {
        if config.k == 0 {
            return Err(AnalyticsError::invalid_param("k", 0, "Must be >= 1"));
        }
        if config.max_iterations == 0 {
            return Err(AnalyticsError::invalid_param(
                "max_iterations",
                0,
                "Must be >= 1",
            ));
        }
        let dimension = validate_matrix(rows, "kmeans", 1)?;
        if config.k > rows.len() {
            return Err(AnalyticsError::insufficient_data("kmeans", config.k, rows.len()));
        }

        let rows: Vec<&[f64]> = rows.iter().map(|r| r.as_ref()).collect();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let centroids: Vec<Vec<f64>> = match config.init {
            CentroidInit::FirstK => rows[..config.k].iter().map(|r| r.to_vec()).collect(),
            CentroidInit::Random => sample(&mut rng, rows.len(), config.k)
                .into_iter()
                .map(|i| rows[i].to_vec())
                .collect(),
        };

        Ok(Self {
            rows,
            dimension,
            k: config.k,
            max_iterations: config.max_iterations,
            centroids,
            assignments: None,
            iterations: 0,
            converged: false,
            rng,
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// `true` once the run has converged or used its iteration budget.
    pub fn is_finished(&self) -> bool {
        self.converged || self.iterations >= self.max_iterations
    }

    /// Run one assign/update iteration. Returns `false` once the run is finished.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.iterations += 1;

        let assignments = self.assign();
        if self.assignments.as_ref() == Some(&assignments) {
            self.converged = true;
            debug!(iterations = self.iterations, k = self.k, "k-means converged");
            return false;
        }

        for cluster in 0..self.k {
            let members = assignments
                .iter()
                .enumerate()
                .filter(|(_, &a)| a == cluster)
                .map(|(i, _)| i);
            match mean_of(&self.rows, members, self.dimension) {
                Some(mean) => self.centroids[cluster] = mean,
                None => {
                    let pick = self.rng.gen_range(0..self.rows.len());
                    warn!(cluster, reseed_index = pick, "empty k-means cluster reseeded");
                    self.centroids[cluster] = self.rows[pick].to_vec();
                }
            }
        }
        self.assignments = Some(assignments);

        !self.is_finished()
    }

    /// Nearest centroid for every row; ties go to the lowest cluster index.
    fn assign(&self) -> Vec<usize> {
        self.rows
            .iter()
            .map(|row| nearest_centroid(row, &self.centroids))
            .collect()
    }

    /// Finish the run: repair empty clusters and compute the summaries.
    pub fn finish(mut self) -> KMeansResult {
        let mut assignments = match self.assignments.take() {
            Some(a) => a,
            None => self.assign(),
        };

        self.fill_empty_clusters(&mut assignments);

        let clusters: Vec<Cluster> = (0..self.k)
            .map(|id| {
                let members: Vec<usize> = assignments
                    .iter()
                    .enumerate()
                    .filter(|(_, &a)| a == id)
                    .map(|(i, _)| i)
                    .collect();
                Cluster::from_members(id, self.centroids[id].clone(), members, &self.rows)
            })
            .collect();

        let inertia: f64 = self
            .rows
            .iter()
            .zip(&assignments)
            .filter_map(|(row, &a)| squared_distance(row, &self.centroids[a]).ok())
            .sum();

        let silhouette = match distance_matrix(&self.rows) {
            Ok(matrix) => silhouette_score(&assignments, &matrix),
            Err(_) => 0.0,
        };

        debug!(
            k = self.k,
            iterations = self.iterations,
            converged = self.converged,
            inertia,
            silhouette,
            "k-means finished"
        );

        KMeansResult {
            centroids: self.centroids,
            assignments,
            clusters,
            iterations: self.iterations,
            converged: self.converged,
            silhouette_score: silhouette,
            inertia,
        }
    }

    /// Move the farthest member of a multi-member cluster into each cluster
    /// that is still empty, then refresh the affected centroids.
    fn fill_empty_clusters(&mut self, assignments: &mut [usize]) {
        loop {
            let mut sizes = vec![0usize; self.k];
            for &a in assignments.iter() {
                sizes[a] += 1;
            }
            let Some(empty) = sizes.iter().position(|&s| s == 0) else {
                return;
            };

            let farthest = assignments
                .iter()
                .enumerate()
                .filter(|(_, &a)| sizes[a] > 1)
                .map(|(i, &a)| {
                    let d = squared_distance(self.rows[i], &self.centroids[a]).unwrap_or(0.0);
                    (i, d)
                })
                .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                    Some((_, bd)) if bd >= d => best,
                    _ => Some((i, d)),
                });

            // Unreachable while k <= count: an empty cluster implies a shared one
            let Some((point, _)) = farthest else {
                return;
            };

            let donor = assignments[point];
            debug!(point, donor, empty, "moving farthest member into empty cluster");
            assignments[point] = empty;
            self.centroids[empty] = self.rows[point].to_vec();

            let members = assignments
                .iter()
                .enumerate()
                .filter(|(_, &a)| a == donor)
                .map(|(i, _)| i);
            if let Some(mean) = mean_of(&self.rows, members, self.dimension) {
                self.centroids[donor] = mean;
            }
        }
    }
}

fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(row, centroid).unwrap_or(f64::INFINITY);
        if d < best_dist {
            best = idx;
            best_dist = d;
        }
    }
    best
}

/// Cluster rows with k-means.
///
/// # Example
///
/// ```
/// use atomscope_analytics::clustering::kmeans;
/// use atomscope_analytics::config::KMeansConfig;
///
/// let rows = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
/// let result = kmeans(&rows, &KMeansConfig::new(2)).unwrap();
/// assert!(result.converged);
/// assert!(result.clusters.iter().all(|c| c.size > 0));
/// ```
pub fn kmeans<R: AsRef<[f64]>>(rows: &[R], config: &KMeansConfig) -> AnalyticsResult<KMeansResult> {
    let mut run = KMeansRun::new(rows, config)?;
    while run.step() {}
    Ok(run.finish())
}
