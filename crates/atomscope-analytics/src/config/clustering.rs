//! Clustering settings for k-means and hierarchical clustering.

use serde::{Deserialize, Serialize};

/// Default iteration budget for k-means.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How k-means picks its initial centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CentroidInit {
    /// The first `k` vectors, in dataset order. Deterministic.
    #[default]
    FirstK,
    /// `k` distinct vectors drawn uniformly at random.
    Random,
}

/// Rule for the distance between two clusters during agglomeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Linkage {
    /// Minimum pairwise distance.
    Single,
    /// Maximum pairwise distance.
    Complete,
    /// Mean pairwise distance.
    #[default]
    Average,
}

impl Linkage {
    /// Get description of this linkage.
    pub fn description(&self) -> &'static str {
        match self {
            Linkage::Single => "Single linkage - minimum pairwise distance",
            Linkage::Complete => "Complete linkage - maximum pairwise distance",
            Linkage::Average => "Average linkage - mean pairwise distance",
        }
    }
}

/// K-means settings.
///
/// # Example
///
/// ```
/// use atomscope_analytics::config::{CentroidInit, KMeansConfig};
///
/// let config = KMeansConfig::new(4).with_init(CentroidInit::Random).with_seed(42);
/// assert_eq!(config.k, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters. Must not exceed the number of vectors.
    pub k: usize,

    /// Iteration budget.
    pub max_iterations: usize,

    /// Centroid seeding policy.
    #[serde(default)]
    pub init: CentroidInit,

    /// Seed for random seeding and empty-cluster recovery. `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 3,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            init: CentroidInit::FirstK,
            seed: None,
        }
    }
}

impl KMeansConfig {
    /// Default settings with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn with_init(mut self, init: CentroidInit) -> Self {
        self.init = init;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the k-means configuration.
    ///
    /// `k` against the vector count is checked when clustering runs.
    pub fn validate(&self) -> Result<(), String> {
        if self.k == 0 {
            return Err("k must be > 0".to_string());
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        Ok(())
    }
}

/// Hierarchical clustering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HierarchicalConfig {
    /// Linkage rule.
    pub linkage: Linkage,

    /// Largest `k` for which a cut level is produced, so levels run
    /// `k = 2..=min(max_levels, count)`. `None` produces every level
    /// `k = 2..=count`.
    #[serde(default)]
    pub max_levels: Option<usize>,
}

impl HierarchicalConfig {
    pub fn new(linkage: Linkage) -> Self {
        Self {
            linkage,
            max_levels: None,
        }
    }

    #[must_use]
    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = Some(max_levels);
        self
    }

    /// Validate the hierarchical configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_levels {
            if max < 2 {
                return Err(format!("max_levels must be >= 2, got {}", max));
            }
        }
        Ok(())
    }
}
