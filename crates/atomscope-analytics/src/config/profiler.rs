//! Statistical profiler settings.

use serde::{Deserialize, Serialize};

/// Components with absolute value below this are counted as sparse.
pub const DEFAULT_SPARSITY_THRESHOLD: f64 = 1e-10;

/// Settings for per-vector and per-dataset statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Absolute-value threshold for sparsity.
    /// Must be >= 0.
    pub sparsity_threshold: f64,

    /// Magnitude z-score above which a vector is flagged as an outlier.
    /// Must be > 0.
    pub outlier_sigma: f64,

    /// Compute the pairwise correlation matrix (O(count² · n)).
    pub include_correlation: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sparsity_threshold: DEFAULT_SPARSITY_THRESHOLD,
            outlier_sigma: 2.0,
            include_correlation: true,
        }
    }
}

impl ProfilerConfig {
    /// Validate the profiler configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.sparsity_threshold >= 0.0 && self.sparsity_threshold.is_finite()) {
            return Err(format!(
                "sparsity_threshold must be >= 0, got {}",
                self.sparsity_threshold
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
