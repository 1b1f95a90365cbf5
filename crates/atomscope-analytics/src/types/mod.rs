//! Core data model: vectors, datasets, patterns and analysis results.

pub(crate) mod nan_float;
mod pattern;
mod result;
mod vector;

pub use self::pattern::{Pattern, PatternKind};
pub use self::result::{AnalysisKind, AnalysisPayload, AnalysisResult};
pub use self::vector::{AtomVector, Dataset, DatasetShape, DisplayMeta, VectorId};

pub(crate) use self::vector::validate_matrix;
