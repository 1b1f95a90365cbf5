//! Single-flight analysis orchestration.
//!
//! [`AnalysisOrchestrator`] accepts one [`AnalysisRequest`] at a time, runs
//! it against a [`Dataset`](crate::types::Dataset) and keeps the produced
//! results. A request that arrives while another analysis is running is
//! rejected with [`AnalyticsError::AnalysisInProgress`](crate::error::AnalyticsError::AnalysisInProgress);
//! nothing is queued.

mod controller;
mod progress;
mod request;
mod state;


pub use self::controller::AnalysisOrchestrator;
pub use self::progress::{AnalysisProgress, ProgressCallback};
pub use self::request::AnalysisRequest;
pub use self::state::{OrchestratorState, OrchestratorStatus};
