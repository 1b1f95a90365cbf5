//! Statistical profiler.
//!
//! [`profile_vector`] computes descriptive statistics of one vector;
//! [`profile_dataset`] aggregates them with a correlation matrix, magnitude
//! outliers and the probe vector's profile.

mod dataset_stats;
mod vector_stats;


pub use self::dataset_stats::{profile_dataset, DatasetStatistics, DatasetSummary, OutlierRecord};
pub use self::vector_stats::{profile_vector, VectorStatistics};

pub(crate) use self::dataset_stats::magnitude_outliers;
