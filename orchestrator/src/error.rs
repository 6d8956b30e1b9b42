//! Orchestrator-specific error types

use shared::SharedError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Instance directory not found: {}", path.display())]
    EnumerationError { path: PathBuf },

    #[error("Corrupt cache record {}: {message}", path.display())]
    CorruptCache { path: PathBuf, message: String },

    #[error("{solver} returned unknown exit code {code:?} for {}", instance.display())]
    UnknownExitCode {
        solver: String,
        instance: PathBuf,
        code: Option<i32>,
    },

    #[error("{solver} exited with {code} for {} but stdout lacks {marker:?}", instance.display())]
    AssertionViolation {
        solver: String,
        instance: PathBuf,
        code: i32,
        marker: String,
    },

    #[error("Failed to spawn {program}: {source}")]
    SolverSpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {timeout:?}")]
    SolverTimeout { program: String, timeout: Duration },

    #[error("Preprocessing {} failed: {source}", path.display())]
    PreprocessingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Worker task failed: {message}")]
    WorkerFailed { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    /// Errors raised by a solver invocation, as opposed to setup or I/O
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::UnknownExitCode { .. }
                | Self::AssertionViolation { .. }
                | Self::SolverSpawnFailed { .. }
                | Self::SolverTimeout { .. }
                | Self::PreprocessingFailed { .. }
        )
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
