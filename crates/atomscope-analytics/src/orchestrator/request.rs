//! Analysis requests accepted by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::config::{
    AnalyticsConfig, HierarchicalConfig, KMeansConfig, PatternConfig, PcaConfig, ProfilerConfig,
    SimilarityConfig,
};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::AnalysisKind;

/// One analysis to run, carrying its own parameters.
///
/// The request is stored verbatim in the produced
/// [`AnalysisResult`](crate::types::AnalysisResult) as its `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Pca(PcaConfig),
    #[serde(rename = "kmeans")]
    KMeans(KMeansConfig),
    Hierarchical(HierarchicalConfig),
    Statistics(ProfilerConfig),
    Patterns(PatternConfig),
    Similarity(SimilarityConfig),
}

impl AnalysisRequest {
    /// PCA down to `k` dimensions with default settings otherwise.
    pub fn pca(k: usize) -> Self {
        AnalysisRequest::Pca(PcaConfig::default().with_target_dimensions(k))
    }

    /// K-means with `k` clusters and default settings otherwise.
    pub fn kmeans(k: usize) -> Self {
        AnalysisRequest::KMeans(KMeansConfig::new(k))
    }

    /// Build the request for `kind` from the matching section of `config`.
    pub fn from_config(kind: AnalysisKind, config: &AnalyticsConfig) -> Self {
        match kind {
            AnalysisKind::Pca => AnalysisRequest::Pca(config.pca.clone()),
            AnalysisKind::KMeans => AnalysisRequest::KMeans(config.kmeans.clone()),
            AnalysisKind::Hierarchical => {
                AnalysisRequest::Hierarchical(config.hierarchical.clone())
            }
            AnalysisKind::Statistics => AnalysisRequest::Statistics(config.profiler.clone()),
            AnalysisKind::Patterns => AnalysisRequest::Patterns(config.patterns.clone()),
            AnalysisKind::Similarity => AnalysisRequest::Similarity(config.similarity.clone()),
        }
    }

    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::Pca(_) => AnalysisKind::Pca,
            AnalysisRequest::KMeans(_) => AnalysisKind::KMeans,
            AnalysisRequest::Hierarchical(_) => AnalysisKind::Hierarchical,
            AnalysisRequest::Statistics(_) => AnalysisKind::Statistics,
            AnalysisRequest::Patterns(_) => AnalysisKind::Patterns,
            AnalysisRequest::Similarity(_) => AnalysisKind::Similarity,
        }
    }

    /// Validate the embedded parameters.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let checked = match self {
            AnalysisRequest::Pca(c) => c.validate(),
            AnalysisRequest::KMeans(c) => c.validate(),
            AnalysisRequest::Hierarchical(c) => c.validate(),
            AnalysisRequest::Statistics(c) => c.validate(),
            AnalysisRequest::Patterns(c) => c.validate(),
            AnalysisRequest::Similarity(c) => c.validate(),
        };
        checked.map_err(|reason| {
            AnalyticsError::ConfigError(format!("{} request: {}", self.kind(), reason))
        })
    }
}
