//! Metric and activation selectors.
//!
//! Metrics are chosen by enum, never by name at call time. Each variant maps
//! to one pure function through [`MetricKind::function`], so adding a variant
//! is a compile error until it is wired up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MetricConfig;
use crate::error::AnalyticsResult;

use super::distance::{
    cosine_similarity, dot_product, euclidean_distance, manhattan_distance, pearson_correlation,
    resonance_force_with_epsilon,
};

/// Signature shared by every pairwise metric.
pub type MetricFn = fn(&[f64], &[f64], &MetricConfig) -> AnalyticsResult<f64>;

/// Pairwise metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Raw dot product.
    Dot,
    /// Cosine similarity, 0 for zero vectors.
    #[default]
    Cosine,
    /// Euclidean distance.
    Euclidean,
    /// Manhattan distance.
    Manhattan,
    /// Pearson correlation, NaN for constant vectors.
    Pearson,
    /// Resonance force with the configured epsilon.
    Resonance,
}

fn eval_dot(a: &[f64], b: &[f64], _: &MetricConfig) -> AnalyticsResult<f64> {
    dot_product(a, b)
}

fn eval_cosine(a: &[f64], b: &[f64], _: &MetricConfig) -> AnalyticsResult<f64> {
    cosine_similarity(a, b)
}

fn eval_euclidean(a: &[f64], b: &[f64], _: &MetricConfig) -> AnalyticsResult<f64> {
    euclidean_distance(a, b)
}

fn eval_manhattan(a: &[f64], b: &[f64], _: &MetricConfig) -> AnalyticsResult<f64> {
    manhattan_distance(a, b)
}

fn eval_pearson(a: &[f64], b: &[f64], _: &MetricConfig) -> AnalyticsResult<f64> {
    pearson_correlation(a, b)
}

fn eval_resonance(a: &[f64], b: &[f64], config: &MetricConfig) -> AnalyticsResult<f64> {
    resonance_force_with_epsilon(a, b, config.resonance_epsilon)
}

impl MetricKind {
    /// Every metric, in declaration order.
    pub fn all() -> [MetricKind; 6] {
        [
            MetricKind::Dot,
            MetricKind::Cosine,
            MetricKind::Euclidean,
            MetricKind::Manhattan,
            MetricKind::Pearson,
            MetricKind::Resonance,
        ]
    }

    /// The pure function implementing this metric.
    pub fn function(self) -> MetricFn {
        match self {
            MetricKind::Dot => eval_dot,
            MetricKind::Cosine => eval_cosine,
            MetricKind::Euclidean => eval_euclidean,
            MetricKind::Manhattan => eval_manhattan,
            MetricKind::Pearson => eval_pearson,
            MetricKind::Resonance => eval_resonance,
        }
    }

    /// Evaluate the metric on a pair of vectors.
    pub fn evaluate(self, a: &[f64], b: &[f64], config: &MetricConfig) -> AnalyticsResult<f64> {
        (self.function())(a, b, config)
    }

    /// `true` when larger values mean "more alike", `false` for distances.
    pub fn is_similarity(self) -> bool {
        !matches!(self, MetricKind::Euclidean | MetricKind::Manhattan)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Dot => "dot",
            MetricKind::Cosine => "cosine",
            MetricKind::Euclidean => "euclidean",
            MetricKind::Manhattan => "manhattan",
            MetricKind::Pearson => "pearson",
            MetricKind::Resonance => "resonance",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar activation applied to metric outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Identity.
    #[default]
    Linear,
    /// `1 / (1 + e^-x)`
    Sigmoid,
    /// Hyperbolic tangent.
    Tanh,
    /// `max(0, x)`
    Relu,
}

impl Activation {
    /// Apply the activation to one value. NaN passes through unchanged.
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Relu => {
                if x.is_nan() {
                    x
                } else {
                    x.max(0.0)
                }
            }
        }
    }

    /// Apply the activation to every element.
    pub fn apply_all(self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.apply(x)).collect()
    }

    pub fn is_identity(self) -> bool {
        self == Activation::Linear
    }
}
