//! Progress reporting for running analyses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::AnalysisKind;

/// Progress notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisProgress {
    pub kind: AnalysisKind,
    /// Percent complete, 0..=100. Never decreases within one analysis.
    pub percent: u8,
    /// Short label of the current phase.
    pub phase: String,
}

/// Callback invoked with every progress update.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use atomscope_analytics::orchestrator::ProgressCallback;
///
/// let callback: ProgressCallback = Arc::new(|progress| {
///     println!("{} {}% {}", progress.kind, progress.percent, progress.phase);
/// });
/// # let _ = callback;
/// ```
pub type ProgressCallback = Arc<dyn Fn(AnalysisProgress) + Send + Sync>;

/// Clamps and forwards progress for one analysis.
pub(crate) struct ProgressReporter {
    kind: AnalysisKind,
    callback: Option<ProgressCallback>,
    last: u8,
}

impl ProgressReporter {
    pub(crate) fn new(kind: AnalysisKind, callback: Option<ProgressCallback>) -> Self {
        Self {
            kind,
            callback,
            last: 0,
        }
    }

    /// Report `percent` for `phase`; lower values than the last report are
    /// raised to it, values above 100 are capped.
    pub(crate) fn report(&mut self, percent: u8, phase: &str) {
        let percent = percent.min(100).max(self.last);
        self.last = percent;
        debug!(kind = %self.kind, percent, phase, "analysis progress");
        if let Some(callback) = &self.callback {
            callback(AnalysisProgress {
                kind: self.kind,
                percent,
                phase: phase.to_string(),
            });
        }
    }

    pub(crate) fn last(&self) -> u8 {
        self.last
    }
}

/// Percent for k-means iteration `iteration` of `max`: spans 10..=90.
pub(crate) fn kmeans_percent(iteration: usize, max: usize) -> u8 {
    if max == 0 {
        return 90;
    }
    let fraction = iteration.min(max) as f64 / max as f64;
    (10.0 + 80.0 * fraction).round() as u8
}
