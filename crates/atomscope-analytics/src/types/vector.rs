//! Vector and dataset types consumed by the analytics engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Identifier of a vector: either a positional index or a string tag such as `"input"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VectorId {
    /// Numeric identifier
    Index(u64),
    /// String tag
    Tag(String),
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorId::Index(i) => write!(f, "#{}", i),
            VectorId::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

impl From<u64> for VectorId {
    fn from(value: u64) -> Self {
        VectorId::Index(value)
    }
}

impl From<usize> for VectorId {
    fn from(value: usize) -> Self {
        VectorId::Index(value as u64)
    }
}

impl From<&str> for VectorId {
    fn from(value: &str) -> Self {
        VectorId::Tag(value.to_string())
    }
}

/// Display-only metadata attached by the rendering layer. Ignored by every analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    /// Scene position
    pub position: Option<[f32; 3]>,
    /// Custom color as a CSS-style string
    pub color: Option<String>,
    /// Custom scale factor
    pub scale: Option<f32>,
}

/// A single n-dimensional vector ("atom").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomVector {
    /// Vector identifier.
    pub id: VectorId,

    /// Ordered components; the length is fixed within one dataset.
    pub components: Vec<f64>,

    /// Optional display metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayMeta>,
}

impl AtomVector {
    /// Create a vector without display metadata.
    pub fn new(id: impl Into<VectorId>, components: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            components,
            display: None,
        }
    }

    /// Attach display metadata.
    #[must_use]
    pub fn with_display(mut self, display: DisplayMeta) -> Self {
        self.display = Some(display);
        self
    }

    /// Number of components.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }
}

/// Count and dimension of a dataset, recorded on every result for provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetShape {
    /// Number of vectors
    pub count: usize,
    /// Component count per vector
    pub dimension: usize,
}

/// Ordered collection of vectors plus an optional probe ("input") vector.
///
/// The engine never mutates a dataset; it is replaced wholesale by the
/// collaborator that owns vector generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Vectors in analysis order.
    pub vectors: Vec<AtomVector>,

    /// Optional distinguished probe vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<AtomVector>,
}

impl Dataset {
    /// Create a dataset from vectors.
    pub fn new(vectors: Vec<AtomVector>) -> Self {
        Self {
            vectors,
            probe: None,
        }
    }

    /// Create a dataset from raw rows, assigning positional ids.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let vectors = rows
            .into_iter()
            .enumerate()
            .map(|(i, components)| AtomVector::new(i, components))
            .collect();
        Self::new(vectors)
    }

    /// Attach a probe vector.
    #[must_use]
    pub fn with_probe(mut self, probe: AtomVector) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Number of vectors (the probe is not counted).
    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Component count of the first vector, or 0 for an empty dataset.
    pub fn dimension(&self) -> usize {
        self.vectors.first().map(AtomVector::dimension).unwrap_or(0)
    }

    /// Count and dimension.
    pub fn shape(&self) -> DatasetShape {
        DatasetShape {
            count: self.len(),
            dimension: self.dimension(),
        }
    }

    /// Borrow every vector's components as a row matrix.
    pub fn components(&self) -> Vec<&[f64]> {
        self.vectors.iter().map(|v| v.components.as_slice()).collect()
    }

    /// Identifiers in dataset order.
    pub fn ids(&self) -> Vec<VectorId> {
        self.vectors.iter().map(|v| v.id.clone()).collect()
    }

    /// Check the dataset invariants: at least one vector, uniform dimension
    /// (probe included), n >= 1 and finite components.
    ///
    /// Returns the shared dimension.
    pub fn validate(&self) -> AnalyticsResult<usize> {
        let dimension = validate_matrix(&self.components(), "dataset", 1)?;
        if let Some(probe) = &self.probe {
            if probe.dimension() != dimension {
                return Err(AnalyticsError::dimension_mismatch(
                    dimension,
                    probe.dimension(),
                    "dataset probe",
                ));
            }
            check_finite(&probe.components, "dataset probe")?;
        }
        Ok(dimension)
    }
}

/// Validate a row matrix: at least `min_rows` rows, every row the same
/// non-zero length, finite values. Returns the shared dimension.
pub(crate) fn validate_matrix<R: AsRef<[f64]>>(
    rows: &[R],
    operation: &str,
    min_rows: usize,
) -> AnalyticsResult<usize> {
    if rows.len() < min_rows.max(1) {
        return Err(AnalyticsError::insufficient_data(
            operation,
            min_rows.max(1),
            rows.len(),
        ));
    }

    let dimension = rows[0].as_ref().len();
    if dimension == 0 {
        return Err(AnalyticsError::invalid_param(
            "dimension",
            0,
            format!("{} requires vectors with at least one component", operation),
        ));
    }

    for row in rows {
        let row = row.as_ref();
        if row.len() != dimension {
            return Err(AnalyticsError::dimension_mismatch(dimension, row.len(), operation));
        }
        check_finite(row, operation)?;
    }

    Ok(dimension)
}

fn check_finite(values: &[f64], operation: &str) -> AnalyticsResult<()> {
    if let Some((idx, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnalyticsError::degeneracy(
            operation,
            format!("component {} is not finite ({})", idx, value),
        ));
    }
    Ok(())
}
