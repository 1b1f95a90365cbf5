//! Metric and similarity settings.
//!
//! These values replace any process-wide "active metric" selector: they are
//! passed explicitly into every call that needs them.

use serde::{Deserialize, Serialize};

use crate::metrics::{Activation, MetricKind};

/// Default epsilon added to the squared distance in the resonance force.
pub const DEFAULT_RESONANCE_EPSILON: f64 = 0.01;

/// Settings threaded into metric evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Epsilon in `dot² / (dist² + ε)`.
    /// Must be > 0.
    pub resonance_epsilon: f64,

    /// Activation applied to similarity outputs where requested.
    pub activation: Activation,

    /// Threshold separating excitatory/inhibitory components from neutral ones.
    /// Must be >= 0.
    pub quantum_threshold: f64,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            resonance_epsilon: DEFAULT_RESONANCE_EPSILON,
            activation: Activation::Linear,
            quantum_threshold: 0.5,
        }
    }
}

impl MetricConfig {
    /// Set the activation.
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Validate the metric configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.resonance_epsilon > 0.0 && self.resonance_epsilon.is_finite()) {
            return Err(format!(
                "resonance_epsilon must be a positive finite number, got {}",
                self.resonance_epsilon
            ));
        }
        if !(self.quantum_threshold >= 0.0 && self.quantum_threshold.is_finite()) {
            return Err(format!(
                "quantum_threshold must be >= 0, got {}",
                self.quantum_threshold
            ));
        }
        Ok(())
    }
}

/// Settings for the pairwise similarity analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Metric evaluated for every pair.
    pub metric: MetricKind,

    /// Number of most-similar pairs reported.
    pub top_pairs: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            metric: MetricKind::Cosine,
            top_pairs: 10,
        }
    }
}

impl SimilarityConfig {
    /// Set the metric.
    #[must_use]
    pub fn with_metric(mut self, metric: MetricKind) -> Self {
        self.metric = metric;
        self
    }

    /// Validate the similarity configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.top_pairs == 0 {
            return Err("top_pairs must be > 0".to_string());
        }
        Ok(())
    }
}
