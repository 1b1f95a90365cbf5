//! Vector metric library.
//!
//! Pure, stateless functions over component slices:
//!
//! - [`distance`](self#functions): dot product, magnitude, Euclidean/Manhattan
//!   distance, cosine similarity, Pearson correlation, resonance force
//! - moments: mean, variance, skewness, kurtosis
//! - entropy: Shannon entropy and information-quantum classification
//! - [`MetricKind`] / [`Activation`]: enum dispatch over the functions above
//! - [`similarity_report`]: the pairwise similarity analysis

mod distance;
mod entropy;
mod kind;
mod moments;
mod similarity;


pub use self::distance::{
    cosine_similarity, dot_product, euclidean_distance, magnitude, manhattan_distance,
    pearson_correlation, resonance_force, resonance_force_with_epsilon, squared_distance,
};
pub use self::entropy::{classify_quantum, shannon_entropy, InformationQuantum};
pub use self::kind::{Activation, MetricFn, MetricKind};
pub use self::moments::{kurtosis, mean, skewness, std_dev, variance};
pub use self::similarity::{pairwise_matrix, similarity_report, SimilarPair, SimilarityReport};

pub(crate) use self::distance::ensure_same_len;
pub(crate) use self::moments::{is_degenerate_spread, max_abs};
