//! Pattern records emitted by the pattern detector.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vector::VectorId;

/// Kind of detected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Two vectors are nearly collinear (|cosine| above threshold).
    LinearRelationship,
    /// A group of mutually similar vectors.
    SimilarityGroup,
    /// A dimension that is zero across the whole dataset.
    ZeroDimension,
    /// A vector whose magnitude deviates strongly from the dataset mean.
    Outlier,
}

impl PatternKind {
    /// Stable snake_case name used in summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::LinearRelationship => "linear_relationship",
            PatternKind::SimilarityGroup => "similarity_group",
            PatternKind::ZeroDimension => "zero_dimension",
            PatternKind::Outlier => "outlier",
        }
    }

    /// All pattern kinds in detection order.
    pub fn all() -> [PatternKind; 4] {
        [
            PatternKind::LinearRelationship,
            PatternKind::SimilarityGroup,
            PatternKind::ZeroDimension,
            PatternKind::Outlier,
        ]
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Pattern kind.
    #[serde(rename = "type")]
    pub kind: PatternKind,

    /// Confidence in `[0, 1]`.
    pub confidence: f64,

    /// Vectors involved (empty for dimension patterns).
    pub vector_ids: Vec<VectorId>,

    /// Dimension index for dimension patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,

    /// Human-readable description.
    pub description: String,
}

impl Pattern {
    /// Create a pattern over vectors. Confidence is clamped to `[0, 1]`.
    pub fn for_vectors(
        kind: PatternKind,
        confidence: f64,
        vector_ids: Vec<VectorId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            confidence: clamp_confidence(confidence),
            vector_ids,
            dimension: None,
            description: description.into(),
        }
    }

    /// Create a pattern over a dimension. Confidence is clamped to `[0, 1]`.
    pub fn for_dimension(
        kind: PatternKind,
        confidence: f64,
        dimension: usize,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            confidence: clamp_confidence(confidence),
            vector_ids: Vec::new(),
            dimension: Some(dimension),
            description: description.into(),
        }
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
