//! Per-vector descriptive statistics.

use serde::{Deserialize, Serialize};

use crate::config::{MetricConfig, ProfilerConfig};
use crate::metrics::{
    classify_quantum, kurtosis, magnitude, mean, shannon_entropy, skewness, variance,
    InformationQuantum,
};
use crate::types::{AtomVector, VectorId};

/// Descriptive statistics of a single vector's components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorStatistics {
    pub id: VectorId,
    pub dimension: usize,
    pub magnitude: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub skewness: f64,
    /// Raw fourth standardized moment (3.0 for a normal distribution).
    pub kurtosis: f64,
    /// Fraction of components with `|x|` below the sparsity threshold.
    pub sparsity: f64,
    /// Shannon entropy in bits.
    pub entropy: f64,
    /// `2^entropy`: the number of equally weighted components with the same entropy.
    pub effective_dimensionality: f64,
    /// `entropy / log2(n)`, in `[0, 1]`. 1 for a single component.
    pub information_density: f64,
    pub quantum: InformationQuantum,
}

/// Profile a single vector.
///
/// Never fails: an empty vector yields all-zero moments with
/// `information_density = 1`.
pub fn profile_vector(
    vector: &AtomVector,
    config: &ProfilerConfig,
    metric: &MetricConfig,
) -> VectorStatistics {
    let v = &vector.components;
    let n = v.len();

    let (min, max) = if n == 0 {
        (0.0, 0.0)
    } else {
        v.iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            })
    };

    let var = variance(v);
    let near_zero = v
        .iter()
        .filter(|x| x.abs() < config.sparsity_threshold)
        .count();
    let sparsity = if n == 0 {
        0.0
    } else {
        near_zero as f64 / n as f64
    };

    let entropy = shannon_entropy(v);
    let information_density = if n <= 1 {
        1.0
    } else {
        (entropy / (n as f64).log2()).clamp(0.0, 1.0)
    };

    VectorStatistics {
        id: vector.id.clone(),
        dimension: n,
        magnitude: magnitude(v),
        mean: mean(v),
        variance: var,
        std_dev: var.sqrt(),
        min,
        max,
        range: max - min,
        skewness: skewness(v),
        kurtosis: kurtosis(v),
        sparsity,
        entropy,
        effective_dimensionality: entropy.exp2(),
        information_density,
        quantum: classify_quantum(v, metric.quantum_threshold),
    }
}
