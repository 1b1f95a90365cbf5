//! Analytics configuration types.
//!
//! Every subsystem has its own settings struct with sensible defaults and a
//! `validate()` method. [`AnalyticsConfig`] aggregates them and is what the
//! surrounding application loads from disk or builds in code.

mod clustering;
mod metric;
mod orchestrator;
mod patterns;
mod profiler;
mod reduction;


pub use self::clustering::{
    CentroidInit, HierarchicalConfig, KMeansConfig, Linkage, DEFAULT_MAX_ITERATIONS,
};
pub use self::metric::{MetricConfig, SimilarityConfig, DEFAULT_RESONANCE_EPSILON};
pub use self::orchestrator::OrchestratorConfig;
pub use self::patterns::PatternConfig;
pub use self::profiler::{ProfilerConfig, DEFAULT_SPARSITY_THRESHOLD};
pub use self::reduction::{PcaConfig, DEFAULT_POWER_ITERATIONS};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Main analytics configuration containing all subsystem settings.
///
/// # Example
///
/// ```
/// use atomscope_analytics::config::AnalyticsConfig;
///
/// let config = AnalyticsConfig::default();
/// assert_eq!(config.kmeans.max_iterations, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalyticsConfig {
    /// Metric evaluation settings.
    #[serde(default)]
    pub metric: MetricConfig,

    /// Statistical profiler settings.
    #[serde(default)]
    pub profiler: ProfilerConfig,

    /// PCA settings.
    #[serde(default)]
    pub pca: PcaConfig,

    /// K-means settings.
    #[serde(default)]
    pub kmeans: KMeansConfig,

    /// Hierarchical clustering settings.
    #[serde(default)]
    pub hierarchical: HierarchicalConfig,

    /// Pattern detection thresholds.
    #[serde(default)]
    pub patterns: PatternConfig,

    /// Pairwise similarity settings.
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Orchestrator scheduling settings.
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for exploratory sessions: random k-means seeding,
    /// orthogonal (deflated) PCA components and a third projected axis.
    pub fn exploration_preset() -> Self {
        Self {
            pca: PcaConfig {
                target_dimensions: 3,
                deflate: true,
                ..Default::default()
            },
            kmeans: KMeansConfig {
                init: CentroidInit::Random,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Configuration that only reports strong patterns.
    pub fn strict_preset() -> Self {
        Self {
            patterns: PatternConfig {
                collinearity_threshold: 0.99,
                similarity_threshold: 0.9,
                outlier_sigma: 3.0,
                ..Default::default()
            },
            profiler: ProfilerConfig {
                outlier_sigma: 3.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Validate the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.metric.validate()?;
        self.profiler.validate()?;
        self.pca.validate()?;
        self.kmeans.validate()?;
        self.hierarchical.validate()?;
        self.patterns.validate()?;
        self.similarity.validate()?;
        self.orchestrator.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing sections take their defaults.
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(AnalyticsError::ConfigError)?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
