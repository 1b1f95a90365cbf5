//! Tagged analysis results handed to the visualization layer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clustering::{HierarchicalResult, KMeansResult};
use crate::metrics::SimilarityReport;
use crate::orchestrator::AnalysisRequest;
use crate::patterns::PatternReport;
use crate::profiler::DatasetStatistics;
use crate::reduction::PcaResult;

use super::vector::DatasetShape;

/// Kind of analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    Pca,
    #[serde(rename = "kmeans")]
    KMeans,
    Hierarchical,
    Statistics,
    Patterns,
    Similarity,
}

impl AnalysisKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Pca => "pca",
            AnalysisKind::KMeans => "kmeans",
            AnalysisKind::Hierarchical => "hierarchical",
            AnalysisKind::Statistics => "statistics",
            AnalysisKind::Patterns => "patterns",
            AnalysisKind::Similarity => "similarity",
        }
    }

    /// Whether the analysis is iterative and may take noticeable time.
    pub fn is_long_running(&self) -> bool {
        matches!(
            self,
            AnalysisKind::Pca | AnalysisKind::KMeans | AnalysisKind::Hierarchical
        )
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload specific to each analysis kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AnalysisPayload {
    Pca(PcaResult),
    #[serde(rename = "kmeans")]
    KMeans(KMeansResult),
    Hierarchical(HierarchicalResult),
    Statistics(DatasetStatistics),
    Patterns(PatternReport),
    Similarity(SimilarityReport),
}

impl AnalysisPayload {
    /// Kind tag of this payload.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisPayload::Pca(_) => AnalysisKind::Pca,
            AnalysisPayload::KMeans(_) => AnalysisKind::KMeans,
            AnalysisPayload::Hierarchical(_) => AnalysisKind::Hierarchical,
            AnalysisPayload::Statistics(_) => AnalysisKind::Statistics,
            AnalysisPayload::Patterns(_) => AnalysisKind::Patterns,
            AnalysisPayload::Similarity(_) => AnalysisKind::Similarity,
        }
    }
}

/// Immutable, timestamped result of one analysis.
///
/// A new analysis always produces a new result; results are never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Unique result identifier.
    pub id: Uuid,

    /// Analysis kind (mirrors the payload tag).
    pub kind: AnalysisKind,

    /// Kind-specific payload.
    pub payload: AnalysisPayload,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Parameters the analysis ran with.
    pub parameters: AnalysisRequest,

    /// Size and dimension of the input dataset.
    pub shape: DatasetShape,

    /// Wall-clock duration of the analysis in milliseconds.
    pub duration_ms: u64,
}

impl AnalysisResult {
    /// Build a result stamped with a fresh id and the current time.
    pub fn new(
        payload: AnalysisPayload,
        parameters: AnalysisRequest,
        shape: DatasetShape,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: payload.kind(),
            payload,
            created_at: Utc::now(),
            parameters,
            shape,
            duration_ms,
        }
    }

    /// Serialize to JSON for the UI layer.
    pub fn to_json(&self) -> crate::error::AnalyticsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn as_pca(&self) -> Option<&PcaResult> {
        match &self.payload {
            AnalysisPayload::Pca(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_kmeans(&self) -> Option<&KMeansResult> {
        match &self.payload {
            AnalysisPayload::KMeans(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_hierarchical(&self) -> Option<&HierarchicalResult> {
        match &self.payload {
            AnalysisPayload::Hierarchical(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_statistics(&self) -> Option<&DatasetStatistics> {
        match &self.payload {
            AnalysisPayload::Statistics(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_patterns(&self) -> Option<&PatternReport> {
        match &self.payload {
            AnalysisPayload::Patterns(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_similarity(&self) -> Option<&SimilarityReport> {
        match &self.payload {
            AnalysisPayload::Similarity(r) => Some(r),
            _ => None,
        }
    }
}
