//! Component-wise moments of a single vector.
//!
//! Variance is the population variance. Skewness and kurtosis are the third
//! and fourth standardized moments (kurtosis is not excess-adjusted) and both
//! return 0 for a constant vector instead of NaN.

/// Arithmetic mean of the components; 0 for an empty vector.
pub fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

/// Population variance; 0 for an empty or constant vector.
pub fn variance(v: &[f64]) -> f64 {
    if v.is_empty() || is_constant(v) {
        return 0.0;
    }
    let m = mean(v);
    v.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / v.len() as f64
}

/// Population standard deviation.
pub fn std_dev(v: &[f64]) -> f64 {
    variance(v).sqrt()
}

/// Third standardized moment. 0 when the standard deviation is 0.
pub fn skewness(v: &[f64]) -> f64 {
    standardized_moment(v, 3)
}

/// Fourth standardized moment. 0 when the standard deviation is 0.
pub fn kurtosis(v: &[f64]) -> f64 {
    standardized_moment(v, 4)
}

fn standardized_moment(v: &[f64], order: i32) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    let m = mean(v);
    let sd = std_dev(v);
    if is_degenerate_spread(sd, max_abs(v)) {
        return 0.0;
    }
    let n = v.len() as f64;
    let moment = v.iter().map(|x| ((x - m) / sd).powi(order)).sum::<f64>();
    moment / n
}

fn is_constant(v: &[f64]) -> bool {
    v.iter().all(|&x| x == v[0])
}

/// Largest component magnitude; 0 for an empty vector.
pub(crate) fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}

/// A spread below one ulp of the data's own scale is rounding noise.
#[inline]
pub(crate) fn is_degenerate_spread(sd: f64, scale: f64) -> bool {
    sd == 0.0 || sd <= f64::EPSILON * scale
}
