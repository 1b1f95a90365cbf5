//! AnalysisOrchestrator - single-flight async front end of the engine
//!
//! The orchestrator owns the analysis lifecycle:
//! - State transitions (Idle -> Running -> Completed | Failed)
//! - Rejection of requests while an analysis is running
//! - Progress reporting and cooperative yielding
//! - A bounded history of produced results
//!
//! It is the only place that catches engine errors; everything below it
//! propagates them unchanged.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::clustering::{hierarchical, KMeansRun};
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::metrics::similarity_report;
use crate::patterns::PatternDetector;
use crate::profiler::profile_dataset;
use crate::reduction::reduce;
use crate::types::{AnalysisKind, AnalysisPayload, AnalysisResult, Dataset};

use super::progress::{kmeans_percent, ProgressCallback, ProgressReporter};
use super::request::AnalysisRequest;
use super::state::{OrchestratorState, OrchestratorStatus};

/// Runs one analysis at a time over a caller-owned dataset.
///
/// All methods take `&self`; share it across tasks with `Arc`.
///
/// # Example
///
/// ```
/// use atomscope_analytics::orchestrator::{AnalysisOrchestrator, AnalysisRequest};
/// use atomscope_analytics::types::Dataset;
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// rt.block_on(async {
///     let orchestrator = AnalysisOrchestrator::new();
///     let dataset = Dataset::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]);
///     let result = orchestrator.run(&dataset, AnalysisRequest::kmeans(2)).await.unwrap();
///     assert!(result.as_kmeans().is_some());
/// });
/// ```
pub struct AnalysisOrchestrator {
    /// Engine-wide settings (metric, history, yield cadence)
    config: AnalyticsConfig,

    /// Current lifecycle state
    state: Mutex<OrchestratorState>,

    /// Set while an analysis is in flight
    in_flight: AtomicBool,

    /// Most recent results, oldest first
    history: Mutex<VecDeque<Arc<AnalysisResult>>>,

    completed_runs: AtomicU64,
    failed_runs: AtomicU64,
    last_completed: Mutex<Option<DateTime<Utc>>>,
}

/// Releases the in-flight flag when an analysis ends, including when its
/// future is dropped mid-run.
struct FlightGuard<'a> {
    orchestrator: &'a AnalysisOrchestrator,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.orchestrator.state.lock();
        if state.is_running() {
            debug!("analysis abandoned before completion, returning to idle");
            *state = OrchestratorState::Idle;
        }
        self.orchestrator.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Engine error tagged with the phase that raised it.
struct PhaseError {
    operation: String,
    source: AnalyticsError,
}

impl PhaseError {
    fn wrap(phase: &str) -> impl FnOnce(AnalyticsError) -> PhaseError + '_ {
        move |source| PhaseError {
            operation: source.operation().unwrap_or(phase).to_string(),
            source,
        }
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisOrchestrator {
    /// Create an orchestrator with default settings.
    pub fn new() -> Self {
        Self::build(AnalyticsConfig::default())
    }

    /// Create an orchestrator with custom settings.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::ConfigError` if the configuration is invalid.
    pub fn with_config(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate().map_err(AnalyticsError::ConfigError)?;
        Ok(Self::build(config))
    }

    fn build(config: AnalyticsConfig) -> Self {
        Self {
            config,
            state: Mutex::new(OrchestratorState::Idle),
            in_flight: AtomicBool::new(false),
            history: Mutex::new(VecDeque::new()),
            completed_runs: AtomicU64::new(0),
            failed_runs: AtomicU64::new(0),
            last_completed: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OrchestratorState {
        self.state.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Snapshot of state and counters.
    pub fn status(&self) -> OrchestratorStatus {
        OrchestratorStatus {
            state: self.state(),
            completed_runs: self.completed_runs.load(Ordering::SeqCst),
            failed_runs: self.failed_runs.load(Ordering::SeqCst),
            history_len: self.history.lock().len(),
            last_completed: *self.last_completed.lock(),
        }
    }

    /// Recent results, oldest first.
    pub fn history(&self) -> Vec<Arc<AnalysisResult>> {
        self.history.lock().iter().cloned().collect()
    }

    /// Most recent result.
    pub fn latest(&self) -> Option<Arc<AnalysisResult>> {
        self.history.lock().back().cloned()
    }

    /// Most recent result of one kind.
    pub fn latest_of(&self, kind: AnalysisKind) -> Option<Arc<AnalysisResult>> {
        self.history
            .lock()
            .iter()
            .rev()
            .find(|r| r.kind == kind)
            .cloned()
    }

    pub fn clear_history(&self) {
        self.history.lock().clear();
    }

    /// Run one analysis.
    ///
    /// # Errors
    ///
    /// - `AnalyticsError::AnalysisInProgress` if another analysis is running
    /// - `AnalyticsError::AnalysisFailed` wrapping the engine error otherwise
    pub async fn run(
        &self,
        dataset: &Dataset,
        request: AnalysisRequest,
    ) -> AnalyticsResult<Arc<AnalysisResult>> {
        self.run_inner(dataset, request, None).await
    }

    /// Run one analysis, reporting progress through `progress`.
    pub async fn run_with_progress(
        &self,
        dataset: &Dataset,
        request: AnalysisRequest,
        progress: ProgressCallback,
    ) -> AnalyticsResult<Arc<AnalysisResult>> {
        self.run_inner(dataset, request, Some(progress)).await
    }

    /// Run the analysis of `kind` with the parameters from this orchestrator's config.
    pub async fn run_kind(
        &self,
        dataset: &Dataset,
        kind: AnalysisKind,
    ) -> AnalyticsResult<Arc<AnalysisResult>> {
        let request = AnalysisRequest::from_config(kind, &self.config);
        self.run_inner(dataset, request, None).await
    }

    /// Claim the analysis slot or report what is occupying it.
    fn acquire(&self, kind: AnalysisKind) -> AnalyticsResult<FlightGuard<'_>> {
        let mut state = self.state.lock();
        if self.in_flight.load(Ordering::SeqCst) {
            let running = state.kind().unwrap_or(kind);
            debug!(requested = %kind, running = %running, "analysis rejected, slot busy");
            return Err(AnalyticsError::AnalysisInProgress { running });
        }
        self.in_flight.store(true, Ordering::SeqCst);
        *state = OrchestratorState::Running {
            kind,
            started_at: Utc::now(),
        };
        Ok(FlightGuard { orchestrator: self })
    }

    async fn run_inner(
        &self,
        dataset: &Dataset,
        request: AnalysisRequest,
        progress: Option<ProgressCallback>,
    ) -> AnalyticsResult<Arc<AnalysisResult>> {
        let kind = request.kind();
        let _guard = self.acquire(kind)?;

        info!(kind = %kind, vectors = dataset.len(), "analysis started");
        let started = Instant::now();
        let mut reporter = ProgressReporter::new(kind, progress);
        reporter.report(0, "starting");

        match self.execute(dataset, &request, &mut reporter).await {
            Ok(payload) => {
                reporter.report(100, "complete");
                let duration_ms = started.elapsed().as_millis() as u64;
                let result = Arc::new(AnalysisResult::new(
                    payload,
                    request,
                    dataset.shape(),
                    duration_ms,
                ));
                self.record_success(&result);
                info!(kind = %kind, id = %result.id, duration_ms, "analysis completed");
                Ok(result)
            }
            Err(PhaseError { operation, source }) => {
                error!(
                    kind = %kind,
                    operation = %operation,
                    error = %source,
                    "analysis failed"
                );
                *self.state.lock() = OrchestratorState::Failed {
                    kind,
                    operation: operation.clone(),
                    message: source.to_string(),
                    failed_at: Utc::now(),
                };
                self.failed_runs.fetch_add(1, Ordering::SeqCst);
                Err(AnalyticsError::AnalysisFailed {
                    kind,
                    operation,
                    source: Box::new(source),
                })
            }
        }
    }

    fn record_success(&self, result: &Arc<AnalysisResult>) {
        let limit = self.config.orchestrator.history_limit;
        {
            let mut history = self.history.lock();
            history.push_back(Arc::clone(result));
            while history.len() > limit {
                history.pop_front();
            }
        }
        *self.last_completed.lock() = Some(result.created_at);
        self.completed_runs.fetch_add(1, Ordering::SeqCst);
        *self.state.lock() = OrchestratorState::Completed {
            kind: result.kind,
            result_id: result.id,
            finished_at: result.created_at,
        };
    }

    async fn execute(
        &self,
        dataset: &Dataset,
        request: &AnalysisRequest,
        reporter: &mut ProgressReporter,
    ) -> Result<AnalysisPayload, PhaseError> {
        request.validate().map_err(PhaseError::wrap("validation"))?;
        dataset.validate().map_err(PhaseError::wrap("validation"))?;
        reporter.report(5, "validated");
        tokio::task::yield_now().await;

        let rows = dataset.components();
        let payload = match request {
            AnalysisRequest::Pca(config) => {
                reporter.report(10, "power iteration");
                let result = reduce(&rows, config).map_err(PhaseError::wrap("pca"))?;
                AnalysisPayload::Pca(result)
            }
            AnalysisRequest::KMeans(config) => {
                let mut run = KMeansRun::new(&rows, config).map_err(PhaseError::wrap("kmeans"))?;
                reporter.report(10, "seeded centroids");
                let yield_every = self.config.orchestrator.yield_every.max(1);
                while run.step() {
                    if run.iterations() % yield_every == 0 {
                        reporter.report(
                            kmeans_percent(run.iterations(), run.max_iterations()),
                            "iterating",
                        );
                        tokio::task::yield_now().await;
                    }
                }
                reporter.report(90, "scoring clusters");
                AnalysisPayload::KMeans(run.finish())
            }
            AnalysisRequest::Hierarchical(config) => {
                reporter.report(10, "agglomerating");
                let result = hierarchical(&rows, config).map_err(PhaseError::wrap("hierarchical"))?;
                AnalysisPayload::Hierarchical(result)
            }
            AnalysisRequest::Statistics(config) => {
                reporter.report(10, "profiling");
                let result = profile_dataset(dataset, config, &self.config.metric)
                    .map_err(PhaseError::wrap("statistics"))?;
                AnalysisPayload::Statistics(result)
            }
            AnalysisRequest::Patterns(config) => {
                reporter.report(10, "detecting patterns");
                let result = PatternDetector::new(config.clone())
                    .detect(dataset)
                    .map_err(PhaseError::wrap("patterns"))?;
                AnalysisPayload::Patterns(result)
            }
            AnalysisRequest::Similarity(config) => {
                reporter.report(10, "pairwise similarity");
                let result = similarity_report(dataset, config, &self.config.metric)
                    .map_err(PhaseError::wrap("similarity"))?;
                AnalysisPayload::Similarity(result)
            }
        };

        tokio::task::yield_now().await;
        Ok(payload)
    }
}
