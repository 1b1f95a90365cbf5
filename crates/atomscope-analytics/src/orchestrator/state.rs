//! Orchestrator lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::AnalysisKind;

/// Lifecycle of the single analysis slot.
///
/// `Completed` and `Failed` accept new requests exactly like `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrchestratorState {
    /// No analysis has run yet, or the last one was abandoned.
    #[default]
    Idle,

    /// An analysis is in flight.
    Running {
        kind: AnalysisKind,
        started_at: DateTime<Utc>,
    },

    /// The last analysis produced a result.
    Completed {
        kind: AnalysisKind,
        result_id: Uuid,
        finished_at: DateTime<Utc>,
    },

    /// The last analysis failed.
    ///
    /// The slot is already free again: this state is idle in every respect
    /// except that it keeps the failure for status displays until the next
    /// request replaces it.
    Failed {
        kind: AnalysisKind,
        operation: String,
        message: String,
        failed_at: DateTime<Utc>,
    },
}

impl OrchestratorState {
    pub fn is_running(&self) -> bool {
        matches!(self, OrchestratorState::Running { .. })
    }

    /// Kind of the analysis this state refers to, if any.
    pub fn kind(&self) -> Option<AnalysisKind> {
        match self {
            OrchestratorState::Idle => None,
            OrchestratorState::Running { kind, .. }
            | OrchestratorState::Completed { kind, .. }
            | OrchestratorState::Failed { kind, .. } => Some(*kind),
        }
    }

    /// Get the state name for logging
    pub fn name(&self) -> &'static str {
        match self {
            OrchestratorState::Idle => "idle",
            OrchestratorState::Running { .. } => "running",
            OrchestratorState::Completed { .. } => "completed",
            OrchestratorState::Failed { .. } => "failed",
        }
    }
}

/// Snapshot of the orchestrator for status displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorStatus {
    pub state: OrchestratorState,
    pub completed_runs: u64,
    pub failed_runs: u64,
    /// Number of results currently kept in the history.
    pub history_len: usize,
    pub last_completed: Option<DateTime<Utc>>,
}
