//! Dataset-level statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{MetricConfig, ProfilerConfig};
use crate::error::AnalyticsResult;
use crate::metrics::{is_degenerate_spread, max_abs, mean, pairwise_matrix, std_dev, MetricKind};
use crate::types::{Dataset, VectorId};

use super::vector_stats::{profile_vector, VectorStatistics};

/// Aggregates over every vector's statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub vector_count: usize,
    pub dimension: usize,
    pub average_magnitude: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub min_sparsity: f64,
    pub max_sparsity: f64,
    pub mean_entropy: f64,
}

/// A vector whose magnitude lies far from the dataset mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierRecord {
    pub id: VectorId,
    pub index: usize,
    pub magnitude: f64,
    /// Signed magnitude z-score.
    pub z_score: f64,
}

/// Output of the statistics analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStatistics {
    /// One entry per vector, in dataset order.
    pub vectors: Vec<VectorStatistics>,
    pub summary: DatasetSummary,

    /// Pairwise Pearson correlation of vector components. Entries involving a
    /// constant vector are NaN (serialized as `null`).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::types::nan_float::option_matrix"
    )]
    pub correlation_matrix: Option<Vec<Vec<f64>>>,

    pub outliers: Vec<OutlierRecord>,

    /// Statistics of the probe vector, when the dataset has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<VectorStatistics>,
}

/// Profile every vector of a dataset.
///
/// # Errors
///
/// Fails when the dataset is empty, ragged or contains non-finite values.
pub fn profile_dataset(
    dataset: &Dataset,
    config: &ProfilerConfig,
    metric: &MetricConfig,
) -> AnalyticsResult<DatasetStatistics> {
    let dimension = dataset.validate()?;

    let vectors: Vec<VectorStatistics> = dataset
        .vectors
        .iter()
        .map(|v| profile_vector(v, config, metric))
        .collect();

    let magnitudes: Vec<f64> = vectors.iter().map(|s| s.magnitude).collect();
    let summary = summarize(&vectors, &magnitudes, dimension);

    let correlation_matrix = if config.include_correlation {
        Some(pairwise_matrix(
            &dataset.components(),
            MetricKind::Pearson,
            metric,
        )?)
    } else {
        None
    };

    let outliers = magnitude_outliers(dataset, &magnitudes, config.outlier_sigma);

    let probe = dataset
        .probe
        .as_ref()
        .map(|p| profile_vector(p, config, metric));

    debug!(
        vectors = vectors.len(),
        dimension,
        outliers = outliers.len(),
        "dataset profiled"
    );

    Ok(DatasetStatistics {
        vectors,
        summary,
        correlation_matrix,
        outliers,
        probe,
    })
}

fn summarize(vectors: &[VectorStatistics], magnitudes: &[f64], dimension: usize) -> DatasetSummary {
    let (min_magnitude, max_magnitude) = min_max(magnitudes.iter().copied());
    let (min_sparsity, max_sparsity) = min_max(vectors.iter().map(|s| s.sparsity));
    let entropies: Vec<f64> = vectors.iter().map(|s| s.entropy).collect();

    DatasetSummary {
        vector_count: vectors.len(),
        dimension,
        average_magnitude: mean(magnitudes),
        min_magnitude,
        max_magnitude,
        min_sparsity,
        max_sparsity,
        mean_entropy: mean(&entropies),
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    })
}

/// Vectors whose magnitude z-score exceeds `sigma` in absolute value.
///
/// Uses the population standard deviation of the magnitudes; a dataset with
/// identical magnitudes has no outliers.
pub(crate) fn magnitude_outliers(
    dataset: &Dataset,
    magnitudes: &[f64],
    sigma: f64,
) -> Vec<OutlierRecord> {
    let mu = mean(magnitudes);
    let sd = std_dev(magnitudes);
    if is_degenerate_spread(sd, max_abs(magnitudes)) {
        return Vec::new();
    }

    magnitudes
        .iter()
        .enumerate()
        .filter_map(|(index, &magnitude)| {
            let z_score = (magnitude - mu) / sd;
            (z_score.abs() > sigma).then(|| OutlierRecord {
                id: dataset.vectors[index].id.clone(),
                index,
                magnitude,
                z_score,
            })
        })
        .collect()
}
