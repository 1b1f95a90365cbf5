//! Analytics error types.
//!
//! Every fallible operation in the engine returns [`AnalyticsResult`]. Metric
//! functions never catch errors; they propagate to the caller and the
//! [`AnalysisOrchestrator`](crate::orchestrator::AnalysisOrchestrator) is the
//! single boundary that converts them into a failed analysis.

use thiserror::Error;

use crate::types::AnalysisKind;

/// Errors that can occur during vector analysis.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Operands with unequal component counts. Never truncated or padded.
    #[error("Dimension mismatch in {operation}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected component count
        expected: usize,
        /// Actual component count
        actual: usize,
        /// Operation that detected the mismatch
        operation: String,
    },

    /// Too few vectors for the requested analysis.
    #[error("Insufficient data for {operation}: requires at least {required}, got {actual}")]
    InsufficientData {
        /// Operation that rejected the input
        operation: String,
        /// Minimum number of vectors required
        required: usize,
        /// Number of vectors supplied
        actual: usize,
    },

    /// Input that cannot be processed numerically (NaN or infinite components).
    #[error("Numeric degeneracy in {operation}: {details}")]
    NumericDegeneracy {
        /// Operation that detected the degeneracy
        operation: String,
        /// Details about the offending value
        details: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {value}. {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Parameter value as string
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A new analysis was requested while another one is running.
    #[error("Analysis rejected: a {running} analysis is already in progress")]
    AnalysisInProgress {
        /// Kind of the analysis currently running
        running: AnalysisKind,
    },

    /// An analysis failed inside the orchestrator.
    #[error("{kind} analysis failed during {operation}: {source}")]
    AnalysisFailed {
        /// Kind of the failed analysis
        kind: AnalysisKind,
        /// Phase that raised the error
        operation: String,
        /// Underlying engine error
        #[source]
        source: Box<AnalyticsError>,
    },
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::SerializationError(err.to_string())
    }
}

impl AnalyticsError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize, operation: impl Into<String>) -> Self {
        AnalyticsError::DimensionMismatch {
            expected,
            actual,
            operation: operation.into(),
        }
    }

    /// Create an InsufficientData error.
    pub fn insufficient_data(operation: impl Into<String>, required: usize, actual: usize) -> Self {
        AnalyticsError::InsufficientData {
            operation: operation.into(),
            required,
            actual,
        }
    }

    /// Create a NumericDegeneracy error.
    pub fn degeneracy(operation: impl Into<String>, details: impl Into<String>) -> Self {
        AnalyticsError::NumericDegeneracy {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_param(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AnalyticsError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the operation that raised this error, when known.
    pub fn operation(&self) -> Option<&str> {
        match self {
            AnalyticsError::DimensionMismatch { operation, .. }
            | AnalyticsError::InsufficientData { operation, .. }
            | AnalyticsError::NumericDegeneracy { operation, .. }
            | AnalyticsError::AnalysisFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Check if this error is recoverable (can be retried with different input or parameters).
    pub fn is_recoverable(&self) -> bool {
        match self {
            AnalyticsError::DimensionMismatch { .. }
            | AnalyticsError::InsufficientData { .. }
            | AnalyticsError::InvalidParameter { .. }
            | AnalyticsError::AnalysisInProgress { .. } => true,
            AnalyticsError::AnalysisFailed { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}
