//! Pairwise distance and similarity functions.
//!
//! All functions require operands of equal length and fail with
//! [`AnalyticsError::DimensionMismatch`] otherwise. Degenerate inputs are
//! handled by documented return values rather than errors.

use crate::config::DEFAULT_RESONANCE_EPSILON;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Fail fast when two operands differ in length.
#[inline]
pub(crate) fn ensure_same_len(a: &[f64], b: &[f64], operation: &str) -> AnalyticsResult<()> {
    if a.len() != b.len() {
        return Err(AnalyticsError::dimension_mismatch(a.len(), b.len(), operation));
    }
    Ok(())
}

/// Dot product `Σ aᵢ·bᵢ`.
pub fn dot_product(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "dot_product")?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Vector magnitude (L2 norm).
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Squared Euclidean distance `Σ (aᵢ − bᵢ)²`.
pub fn squared_distance(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "squared_distance")?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum())
}

/// Euclidean (L2) distance.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "euclidean_distance")?;
    Ok(a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

/// Manhattan (L1) distance.
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "manhattan_distance")?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

/// Cosine similarity `dot / (|a|·|b|)`.
///
/// Returns exactly `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "cosine_similarity")?;
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a = magnitude(a);
    let mag_b = magnitude(b);

    if mag_a == 0.0 || mag_b == 0.0 {
        return Ok(0.0);
    }

    // Rounding can push |cos| marginally past 1
    Ok((dot / (mag_a * mag_b)).clamp(-1.0, 1.0))
}

/// Pearson correlation between the components of two vectors.
///
/// Returns `NaN` when either vector is constant (0/0). Callers that need a
/// number must guard against it; the NaN is how the degenerate case is signalled.
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "pearson_correlation")?;
    if a.is_empty() {
        return Ok(f64::NAN);
    }

    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    Ok(cov / (var_a * var_b).sqrt())
}

/// Resonance force `dot(a,b)² / (‖a − b‖² + ε)` with ε = 0.01.
pub fn resonance_force(a: &[f64], b: &[f64]) -> AnalyticsResult<f64> {
    resonance_force_with_epsilon(a, b, DEFAULT_RESONANCE_EPSILON)
}

/// Resonance force with an explicit epsilon.
///
/// The epsilon keeps the force finite when `a == b`.
pub fn resonance_force_with_epsilon(a: &[f64], b: &[f64], epsilon: f64) -> AnalyticsResult<f64> {
    ensure_same_len(a, b, "resonance_force")?;
    let mut dot = 0.0;
    let mut dist_sq = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        dist_sq += (x - y) * (x - y);
    }
    Ok(dot * dot / (dist_sq + epsilon))
}
