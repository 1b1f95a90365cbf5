//! Principal component analysis by power iteration.
//!
//! Components are extracted from the sample covariance matrix (divided by
//! `rows - 1`). Each component runs a fixed number of power-iteration steps
//! from a random unit start vector; its eigenvalue is the Rayleigh quotient.
//!
//! Without deflation every component converges towards the dominant
//! eigenvector, so components may coincide. Set [`PcaConfig::deflate`] for
//! orthogonal components.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PcaConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::magnitude;
use crate::types::validate_matrix;

/// Below this norm `C·v` is treated as the zero vector.
const NULL_NORM: f64 = 1e-12;

/// Output of the PCA reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PcaResult {
    /// Centred rows projected onto each eigenvector (`count × k`).
    pub projected_data: Vec<Vec<f64>>,

    /// Rayleigh quotient of each component.
    pub eigenvalues: Vec<f64>,

    /// Unit eigenvectors (`k × dimension`).
    pub eigenvectors: Vec<Vec<f64>>,

    /// Retained eigenvalues over the covariance trace, in `[0, 1]`.
    pub explained_variance: f64,

    /// Per-component share of the covariance trace.
    pub explained_variance_ratio: Vec<f64>,

    /// Column means subtracted before projection.
    pub means: Vec<f64>,

    /// Power-iteration steps run per component.
    pub iterations: Vec<usize>,
}

impl PcaResult {
    /// Number of retained components.
    pub fn components(&self) -> usize {
        self.eigenvectors.len()
    }
}

/// Column-wise means of a row matrix.
pub fn column_means<R: AsRef<[f64]>>(rows: &[R]) -> Vec<f64> {
    let dimension = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    let mut means = vec![0.0; dimension];
    if rows.is_empty() {
        return means;
    }
    for row in rows {
        for (m, x) in means.iter_mut().zip(row.as_ref()) {
            *m += x;
        }
    }
    let n = rows.len() as f64;
    means.iter_mut().for_each(|m| *m /= n);
    means
}

/// Subtract the column means from every row.
pub fn center<R: AsRef<[f64]>>(rows: &[R], means: &[f64]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.as_ref().iter().zip(means).map(|(x, m)| x - m).collect())
        .collect()
}

/// Sample covariance `Cov[i][j] = Σₖ c[k][i]·c[k][j] / (rows − 1)` of centred rows.
///
/// # Errors
///
/// [`AnalyticsError::InsufficientData`] with fewer than two rows.
pub fn covariance_matrix(centered: &[Vec<f64>]) -> AnalyticsResult<Vec<Vec<f64>>> {
    let dimension = validate_matrix(centered, "covariance_matrix", 2)?;
    let denom = (centered.len() - 1) as f64;

    let mut cov = vec![vec![0.0; dimension]; dimension];
    for i in 0..dimension {
        for j in i..dimension {
            let sum: f64 = centered.iter().map(|row| row[i] * row[j]).sum();
            cov[i][j] = sum / denom;
            cov[j][i] = cov[i][j];
        }
    }
    Ok(cov)
}

fn mat_vec(matrix: &[Vec<f64>], v: &[f64]) -> Vec<f64> {
    matrix
        .iter()
        .map(|row| row.iter().zip(v).map(|(a, b)| a * b).sum::<f64>())
        .collect()
}

fn random_unit_vector<G: Rng>(dimension: usize, rng: &mut G) -> Vec<f64> {
    let mut v: Vec<f64> = (0..dimension).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let norm = magnitude(&v);
    if norm < NULL_NORM {
        v = vec![0.0; dimension];
        v[0] = 1.0;
    } else {
        v.iter_mut().for_each(|x| *x /= norm);
    }
    v
}

/// Dominant eigenpair of a symmetric matrix by power iteration.
///
/// Returns `(eigenvalue, eigenvector, steps)`. Iteration stops early only when
/// `C·v` collapses to zero, in which case the eigenvalue is 0. The sign of the
/// eigenvector is fixed so that its largest-magnitude component is positive.
pub fn power_iteration<G: Rng>(
    matrix: &[Vec<f64>],
    iterations: usize,
    rng: &mut G,
) -> (f64, Vec<f64>, usize) {
    let dimension = matrix.len();
    if dimension == 0 {
        return (0.0, Vec::new(), 0);
    }
    let mut v = random_unit_vector(dimension, rng);
    let mut steps = 0;

    for _ in 0..iterations {
        let w = mat_vec(matrix, &v);
        let norm = magnitude(&w);
        steps += 1;
        if norm < NULL_NORM {
            break;
        }
        v = w.into_iter().map(|x| x / norm).collect();
    }

    let cv = mat_vec(matrix, &v);
    let eigenvalue: f64 = v.iter().zip(&cv).map(|(a, b)| a * b).sum();

    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.iter_mut().for_each(|x| *x = -*x);
    }

    (eigenvalue, v, steps)
}

/// Hotelling deflation: `C ← C − λ·v·vᵀ`.
fn deflate(matrix: &mut [Vec<f64>], eigenvalue: f64, v: &[f64]) {
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, c) in row.iter_mut().enumerate() {
            *c -= eigenvalue * v[i] * v[j];
        }
    }
}

/// Reduce rows to `config.target_dimensions` principal components.
///
/// # Errors
///
/// - [`AnalyticsError::InsufficientData`] with fewer than two rows
/// - [`AnalyticsError::InvalidParameter`] when the target dimension is 0 or
///   exceeds the input dimension
/// - [`AnalyticsError::DimensionMismatch`] for ragged rows
pub fn reduce<R: AsRef<[f64]>>(rows: &[R], config: &PcaConfig) -> AnalyticsResult<PcaResult> {
    let dimension = validate_matrix(rows, "pca", 2)?;
    let k = config.target_dimensions;
    if k == 0 || k > dimension {
        return Err(AnalyticsError::invalid_param(
            "target_dimensions",
            k,
            format!("must be in 1..={}", dimension),
        ));
    }
    config.validate().map_err(AnalyticsError::ConfigError)?;

    let means = column_means(rows);
    let centered = center(rows, &means);
    let mut cov = covariance_matrix(&centered)?;
    let trace: f64 = (0..dimension).map(|i| cov[i][i]).sum();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut eigenvalues = Vec::with_capacity(k);
    let mut eigenvectors = Vec::with_capacity(k);
    let mut iterations = Vec::with_capacity(k);
    for component in 0..k {
        let (eigenvalue, eigenvector, steps) = power_iteration(&cov, config.iterations, &mut rng);
        debug!(component, eigenvalue, steps, "principal component extracted");
        if config.deflate {
            deflate(&mut cov, eigenvalue, &eigenvector);
        }
        eigenvalues.push(eigenvalue);
        eigenvectors.push(eigenvector);
        iterations.push(steps);
    }

    let projected_data: Vec<Vec<f64>> = centered
        .iter()
        .map(|row| {
            eigenvectors
                .iter()
                .map(|ev| row.iter().zip(ev).map(|(a, b)| a * b).sum::<f64>())
                .collect()
        })
        .collect();

    let (explained_variance, explained_variance_ratio) = if trace > NULL_NORM {
        let ratios: Vec<f64> = eigenvalues.iter().map(|ev| ev / trace).collect();
        let total = ratios.iter().sum::<f64>().clamp(0.0, 1.0);
        (total, ratios)
    } else {
        warn!(rows = rows.len(), "covariance trace is zero; data has no variance");
        (0.0, vec![0.0; k])
    };

    Ok(PcaResult {
        projected_data,
        eigenvalues,
        eigenvectors,
        explained_variance,
        explained_variance_ratio,
        means,
        iterations,
    })
}
