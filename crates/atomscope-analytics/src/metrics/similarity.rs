//! Pairwise similarity matrix and the similarity analysis report.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{MetricConfig, SimilarityConfig};
use crate::error::AnalyticsResult;
use crate::types::{validate_matrix, Dataset, VectorId};

use super::kind::MetricKind;

/// Full symmetric `count × count` matrix of `kind` evaluated on every pair.
///
/// Only the upper triangle is computed; the diagonal holds `kind(v, v)`.
pub fn pairwise_matrix<R: AsRef<[f64]>>(
    rows: &[R],
    kind: MetricKind,
    config: &MetricConfig,
) -> AnalyticsResult<Vec<Vec<f64>>> {
    let n = rows.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let value = kind.evaluate(rows[i].as_ref(), rows[j].as_ref(), config)?;
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    Ok(matrix)
}

/// One entry of the ranked pair list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarPair {
    pub first: VectorId,
    pub second: VectorId,
    pub first_index: usize,
    pub second_index: usize,
    pub score: f64,
}

/// Output of the similarity analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityReport {
    /// Metric the matrix was computed with.
    pub metric: MetricKind,

    /// Raw pairwise matrix.
    #[serde(with = "crate::types::nan_float::matrix")]
    pub matrix: Vec<Vec<f64>>,

    /// Matrix after the configured activation; absent for the identity activation.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::types::nan_float::option_matrix"
    )]
    pub activated: Option<Vec<Vec<f64>>>,

    /// Metric between the probe vector and every dataset vector.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::types::nan_float::option_vec"
    )]
    pub probe_scores: Option<Vec<f64>>,

    /// Most alike pairs: highest scores for similarities, lowest for distances.
    pub top_pairs: Vec<SimilarPair>,

    /// Mean off-diagonal score, NaN entries excluded.
    pub mean_score: f64,
}

/// Run the similarity analysis over a dataset. Requires at least two vectors.
pub fn similarity_report(
    dataset: &Dataset,
    config: &SimilarityConfig,
    metric_config: &MetricConfig,
) -> AnalyticsResult<SimilarityReport> {
    let rows = dataset.components();
    validate_matrix(&rows, "similarity", 2)?;

    let matrix = pairwise_matrix(&rows, config.metric, metric_config)?;

    let activated = if metric_config.activation.is_identity() {
        None
    } else {
        Some(
            matrix
                .iter()
                .map(|row| metric_config.activation.apply_all(row))
                .collect(),
        )
    };

    let probe_scores = match &dataset.probe {
        Some(probe) => Some(
            rows.iter()
                .map(|row| config.metric.evaluate(&probe.components, row, metric_config))
                .collect::<AnalyticsResult<Vec<f64>>>()?,
        ),
        None => None,
    };

    let mut pairs = Vec::new();
    let mut sum = 0.0;
    let mut counted = 0usize;
    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            let score = matrix[i][j];
            if score.is_nan() {
                continue;
            }
            sum += score;
            counted += 1;
            pairs.push(SimilarPair {
                first: dataset.vectors[i].id.clone(),
                second: dataset.vectors[j].id.clone(),
                first_index: i,
                second_index: j,
                score,
            });
        }
    }

    // Stable sort keeps index order among equal scores
    let descending = config.metric.is_similarity();
    pairs.sort_by(|a, b| {
        let ord = a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
    pairs.truncate(config.top_pairs);

    let mean_score = if counted > 0 {
        sum / counted as f64
    } else {
        0.0
    };

    debug!(
        metric = %config.metric,
        vectors = rows.len(),
        mean_score,
        "similarity matrix computed"
    );

    Ok(SimilarityReport {
        metric: config.metric,
        matrix,
        activated,
        probe_scores,
        top_pairs: pairs,
        mean_score,
    })
}
