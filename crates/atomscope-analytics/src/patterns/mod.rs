//! Pattern detection.
//!
//! | Kind | Rule | Confidence |
//! |------|------|------------|
//! | `linear_relationship` | `\|cos\| > collinearity_threshold` per pair | `\|cos\|` |
//! | `similarity_group` | greedy groups with `cos > similarity_threshold` | mean cosine to the seed |
//! | `zero_dimension` | column max `\|x\| < zero_threshold` | 1.0 |
//! | `outlier` | magnitude z-score beyond `outlier_sigma` | `min(1, \|z\| / 2σ)` |

mod detector;


pub use self::detector::{PatternDetector, PatternReport, PatternSummary};
