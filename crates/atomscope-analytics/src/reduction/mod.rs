//! Dimensionality reduction.

mod pca;


pub use self::pca::{center, column_means, covariance_matrix, power_iteration, reduce, PcaResult};
