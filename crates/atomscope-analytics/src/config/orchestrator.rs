//! Orchestrator scheduling settings.

use serde::{Deserialize, Serialize};

/// Settings for the analysis orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Yield to the executor every this many k-means iterations.
    pub yield_every: usize,

    /// Number of recent results kept in the history.
    pub history_limit: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            yield_every: 5,
            history_limit: 16,
        }
    }
}

impl OrchestratorConfig {
    /// Validate the orchestrator configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.yield_every == 0 {
            return Err("yield_every must be > 0".to_string());
        }
        Ok(())
    }
}
