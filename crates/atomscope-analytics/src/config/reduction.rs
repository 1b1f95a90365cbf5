//! Dimensionality reduction (PCA) settings.

use serde::{Deserialize, Serialize};

/// Fixed number of power-iteration steps per component.
pub const DEFAULT_POWER_ITERATIONS: usize = 100;

/// PCA settings.
///
/// # Example
///
/// ```
/// use atomscope_analytics::config::PcaConfig;
///
/// let config = PcaConfig::default().with_target_dimensions(3).with_seed(7);
/// assert_eq!(config.target_dimensions, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaConfig {
    /// Number of principal components to extract.
    pub target_dimensions: usize,

    /// Power-iteration steps per component.
    pub iterations: usize,

    /// Seed for the random start vectors. `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Deflate the covariance matrix after each component so later components
    /// are orthogonal to earlier ones. Off by default: each component is
    /// extracted independently.
    #[serde(default)]
    pub deflate: bool,
}

impl Default for PcaConfig {
    fn default() -> Self {
        Self {
            target_dimensions: 2,
            iterations: DEFAULT_POWER_ITERATIONS,
            seed: None,
            deflate: false,
        }
    }
}

impl PcaConfig {
    #[must_use]
    pub fn with_target_dimensions(mut self, k: usize) -> Self {
        self.target_dimensions = k;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_deflation(mut self, deflate: bool) -> Self {
        self.deflate = deflate;
        self
    }

    /// Validate the PCA configuration.
    ///
    /// The upper bound on `target_dimensions` depends on the data and is
    /// checked when the reduction runs.
    pub fn validate(&self) -> Result<(), String> {
        if self.target_dimensions == 0 {
            return Err("target_dimensions must be > 0".to_string());
        }
        if self.iterations == 0 {
            return Err("iterations must be > 0".to_string());
        }
        Ok(())
    }
}
