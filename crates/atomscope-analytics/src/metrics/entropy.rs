//! Information-theoretic measures over a single vector.

use serde::{Deserialize, Serialize};

/// Shannon entropy (bits) of a vector's absolute components.
///
/// `|vᵢ|` is L1-normalized into a probability distribution and
/// `-Σ p·log2(p)` is returned. The result lies in `[0, log2(n)]`; the zero
/// vector has entropy 0.
pub fn shannon_entropy(v: &[f64]) -> f64 {
    let total: f64 = v.iter().map(|x| x.abs()).sum();
    if total == 0.0 || !total.is_finite() {
        return 0.0;
    }

    let entropy: f64 = v
        .iter()
        .map(|x| x.abs() / total)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum();

    // -0.0 for a one-hot vector
    entropy.max(0.0)
}

/// Classification of a vector's components around a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationQuantum {
    /// Components strictly above `threshold`.
    pub excitatory: usize,
    /// Components strictly below `-threshold`.
    pub inhibitory: usize,
    /// Components within `[-threshold, threshold]`.
    pub neutral: usize,
}

impl InformationQuantum {
    /// Total number of classified components.
    pub fn total(&self) -> usize {
        self.excitatory + self.inhibitory + self.neutral
    }

    /// `(excitatory − inhibitory) / total`, in `[-1, 1]`; 0 for an empty vector.
    pub fn balance(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.excitatory as f64 - self.inhibitory as f64) / total as f64
    }
}

/// Bucket components into excitatory, inhibitory and neutral.
pub fn classify_quantum(v: &[f64], threshold: f64) -> InformationQuantum {
    v.iter().fold(InformationQuantum::default(), |mut q, &x| {
        if x > threshold {
            q.excitatory += 1;
        } else if x < -threshold {
            q.inhibitory += 1;
        } else {
            q.neutral += 1;
        }
        q
    })
}
