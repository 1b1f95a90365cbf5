//! Vector analytics engine for Atomscope.
//!
//! Computes similarity metrics, descriptive statistics, principal components,
//! clusters and structural patterns over a small set of equal-length
//! numeric vectors, and runs those analyses one at a time behind an async
//! orchestrator that reports progress.
//!
//! # Modules
//!
//! - [`config`]: Settings for every subsystem, loadable from JSON
//! - [`error`]: Error types and result aliases
//! - [`types`]: Vectors, datasets, patterns and tagged analysis results
//! - [`metrics`]: Pure metric functions and pairwise similarity
//! - [`profiler`]: Per-vector and per-dataset statistics
//! - [`reduction`]: PCA by power iteration
//! - [`clustering`]: K-means, hierarchical clustering and the silhouette score
//! - [`patterns`]: Collinearity, similarity groups, dead dimensions and outliers
//! - [`orchestrator`]: Single-flight async execution with progress and history
//!
//! # Conventions
//!
//! - Every multi-vector operation rejects operands of unequal length with
//!   [`AnalyticsError::DimensionMismatch`]; nothing is truncated or padded.
//! - Zero-magnitude inputs yield `0` from cosine similarity and Pearson
//!   correlation yields `NaN` when either operand has zero variance.
//! - Randomness (PCA start vectors, random centroid seeding) is seedable
//!   through the matching config.
//!
//! # Example
//!
//! ```
//! use atomscope_analytics::{cosine_similarity, kmeans, Dataset, KMeansConfig};
//!
//! let sim = cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]).unwrap();
//! assert!((sim - 1.0).abs() < 1e-12);
//!
//! let dataset = Dataset::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
//! let result = kmeans(&dataset.components(), &KMeansConfig::new(2)).unwrap();
//! assert_eq!(result.assignments, vec![0, 1, 0]);
//! ```

pub mod clustering;
pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod patterns;
pub mod profiler;
pub mod reduction;
pub mod types;

// Re-export commonly used types from this crate
pub use config::{
    AnalyticsConfig, CentroidInit, HierarchicalConfig, KMeansConfig, Linkage, MetricConfig,
    OrchestratorConfig, PatternConfig, PcaConfig, ProfilerConfig, SimilarityConfig,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use types::{
    AnalysisKind, AnalysisPayload, AnalysisResult, AtomVector, Dataset, DatasetShape, Pattern,
    PatternKind, VectorId,
};

// Re-export the metric library for convenience
pub use metrics::{
    cosine_similarity, dot_product, euclidean_distance, magnitude, manhattan_distance,
    pearson_correlation, resonance_force, shannon_entropy, Activation, InformationQuantum,
    MetricKind,
};

// Re-export analysis entry points
pub use clustering::{hierarchical, kmeans, HierarchicalResult, KMeansResult};
pub use orchestrator::{AnalysisOrchestrator, AnalysisProgress, AnalysisRequest, OrchestratorState};
pub use patterns::{PatternDetector, PatternReport};
pub use profiler::{profile_dataset, profile_vector, DatasetStatistics, VectorStatistics};
pub use reduction::{reduce, PcaResult};
