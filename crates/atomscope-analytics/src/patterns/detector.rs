//! Rule-based pattern detection over a dataset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PatternConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::{cosine_similarity, magnitude, mean};
use crate::profiler::magnitude_outliers;
use crate::types::{Dataset, Pattern, PatternKind};

/// Aggregate view of a pattern report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub total_patterns: usize,
    /// Count per kind. Every kind is present, including those with no hits.
    pub pattern_types: BTreeMap<PatternKind, usize>,
    /// Mean confidence over all patterns; 0 when there are none.
    pub average_confidence: f64,
}

impl PatternSummary {
    fn from_patterns(patterns: &[Pattern]) -> Self {
        let mut pattern_types: BTreeMap<PatternKind, usize> =
            PatternKind::all().into_iter().map(|k| (k, 0)).collect();
        for p in patterns {
            *pattern_types.entry(p.kind).or_insert(0) += 1;
        }
        let confidences: Vec<f64> = patterns.iter().map(|p| p.confidence).collect();

        Self {
            total_patterns: patterns.len(),
            pattern_types,
            average_confidence: mean(&confidences),
        }
    }
}

/// Output of the pattern analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    /// Patterns grouped by kind in detection order.
    pub patterns: Vec<Pattern>,
    pub summary: PatternSummary,
}

impl PatternReport {
    /// Patterns of one kind.
    pub fn of_kind(&self, kind: PatternKind) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }
}

/// Detects linear relationships, similarity groups, zero dimensions and
/// magnitude outliers.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    config: PatternConfig,
}

impl PatternDetector {
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Run every detector over the dataset.
    ///
    /// # Errors
    ///
    /// Fails when the dataset is invalid or the configuration is out of range.
    pub fn detect(&self, dataset: &Dataset) -> AnalyticsResult<PatternReport> {
        self.config.validate().map_err(AnalyticsError::ConfigError)?;
        let dimension = dataset.validate()?;
        let rows = dataset.components();

        // Pairwise cosines are shared by the first two detectors
        let n = rows.len();
        let mut cosines = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let c = cosine_similarity(rows[i], rows[j])?;
                cosines[i][j] = c;
                cosines[j][i] = c;
            }
        }

        let mut patterns = Vec::new();
        patterns.extend(self.linear_relationships(dataset, &cosines));
        patterns.extend(self.similarity_groups(dataset, &cosines));
        patterns.extend(self.zero_dimensions(&rows, dimension));
        patterns.extend(self.outliers(dataset, &rows));

        let summary = PatternSummary::from_patterns(&patterns);
        debug!(
            total = summary.total_patterns,
            average_confidence = summary.average_confidence,
            "pattern detection finished"
        );

        Ok(PatternReport { patterns, summary })
    }

    fn linear_relationships(&self, dataset: &Dataset, cosines: &[Vec<f64>]) -> Vec<Pattern> {
        let n = cosines.len();
        let mut found = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let c = cosines[i][j];
                if c.abs() > self.config.collinearity_threshold {
                    let (a, b) = (&dataset.vectors[i].id, &dataset.vectors[j].id);
                    let relation = if c > 0.0 { "collinear" } else { "anti-collinear" };
                    found.push(Pattern::for_vectors(
                        PatternKind::LinearRelationship,
                        c.abs(),
                        vec![a.clone(), b.clone()],
                        format!("{} and {} are {} (cosine {:.3})", a, b, relation, c),
                    ));
                }
            }
        }
        found
    }

    /// Greedy single pass: each unassigned vector seeds a group of the later
    /// unassigned vectors similar to it.
    fn similarity_groups(&self, dataset: &Dataset, cosines: &[Vec<f64>]) -> Vec<Pattern> {
        let n = cosines.len();
        let mut assigned = vec![false; n];
        let mut found = Vec::new();

        for seed in 0..n {
            if assigned[seed] {
                continue;
            }
            let mut members = vec![seed];
            let mut similarities = Vec::new();
            for j in (seed + 1)..n {
                if !assigned[j] && cosines[seed][j] > self.config.similarity_threshold {
                    members.push(j);
                    similarities.push(cosines[seed][j]);
                }
            }
            if members.len() < 2 {
                continue;
            }
            for &m in &members {
                assigned[m] = true;
            }

            let ids = members
                .iter()
                .map(|&m| dataset.vectors[m].id.clone())
                .collect::<Vec<_>>();
            found.push(Pattern::for_vectors(
                PatternKind::SimilarityGroup,
                mean(&similarities),
                ids,
                format!(
                    "{} vectors similar to {}",
                    members.len(),
                    dataset.vectors[seed].id
                ),
            ));
        }
        found
    }

    fn zero_dimensions(&self, rows: &[&[f64]], dimension: usize) -> Vec<Pattern> {
        (0..dimension)
            .filter(|&d| {
                rows.iter()
                    .map(|row| row[d].abs())
                    .fold(0.0_f64, f64::max)
                    < self.config.zero_threshold
            })
            .map(|d| {
                Pattern::for_dimension(
                    PatternKind::ZeroDimension,
                    1.0,
                    d,
                    format!("dimension {} is zero in every vector", d),
                )
            })
            .collect()
    }

    fn outliers(&self, dataset: &Dataset, rows: &[&[f64]]) -> Vec<Pattern> {
        let magnitudes: Vec<f64> = rows.iter().map(|r| magnitude(r)).collect();
        let sigma = self.config.outlier_sigma;

        magnitude_outliers(dataset, &magnitudes, sigma)
            .into_iter()
            .map(|o| {
                Pattern::for_vectors(
                    PatternKind::Outlier,
                    (o.z_score.abs() / (2.0 * sigma)).min(1.0),
                    vec![o.id.clone()],
                    format!(
                        "{} has magnitude {:.3} (z-score {:.2})",
                        o.id, o.magnitude, o.z_score
                    ),
                )
            })
            .collect()
    }
}
