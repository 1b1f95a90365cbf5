//! Pattern detection thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds used by the pattern detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// `|cosine|` above which a pair is reported as a linear relationship.
    /// Range: `[0.0, 1.0]`
    pub collinearity_threshold: f64,

    /// Cosine similarity above which vectors join a similarity group.
    /// Range: `[-1.0, 1.0]`
    pub similarity_threshold: f64,

    /// Column max `|x|` below which a dimension is constantly zero.
    pub zero_threshold: f64,

    /// Magnitude z-score above which a vector is an outlier.
    pub outlier_sigma: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            collinearity_threshold: 0.95,
            similarity_threshold: 0.8,
            zero_threshold: 1e-10,
            outlier_sigma: 2.0,
        }
    }
}

impl PatternConfig {
    /// Validate the pattern configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.collinearity_threshold) {
            return Err(format!(
                "collinearity_threshold must be in [0, 1], got {}",
                self.collinearity_threshold
            ));
        }
        if !(-1.0..=1.0).contains(&self.similarity_threshold) {
            return Err(format!(
                "similarity_threshold must be in [-1, 1], got {}",
                self.similarity_threshold
            ));
        }
        if !(self.zero_threshold >= 0.0 && self.zero_threshold.is_finite()) {
            return Err(format!(
                "zero_threshold must be >= 0, got {}",
                self.zero_threshold
            ));
        }
        if !(self.outlier_sigma > 0.0 && self.outlier_sigma.is_finite()) {
            return Err(format!(
                "outlier_sigma must be > 0, got {}",
                self.outlier_sigma
            ));
        }
        Ok(())
    }
}
