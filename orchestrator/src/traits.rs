//! Trait definitions with mockall annotations for testing
//!
//! These are the seams between the dispatcher and the outside world: the
//! process runner, the solver backends built on top of it, and the on-disk
//! result cache.

use std::path::{Path, PathBuf};

use crate::error::OrchestratorResult;
use shared::{CacheRecord, Decision, Instance};

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// What a finished external command reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
}

/// Runs external programs to completion
#[mockall::automock]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Spawn the command, wait for it to exit and capture its stdout
    async fn run(&self, invocation: &Invocation) -> OrchestratorResult<ProcessOutput>;
}

/// One external decision procedure behind a uniform contract
///
/// The dispatcher only sees this trait, so new solvers plug in without
/// touching the worker pool.
#[mockall::automock]
#[async_trait::async_trait]
pub trait SolverBackend: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Solve one instance file
    ///
    /// # Errors
    /// `UnknownExitCode` when the tool exits with neither 10 nor 20, and
    /// `AssertionViolation` when the exit code and stdout disagree.
    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision>;
}

/// Durable per-instance decision store
#[mockall::automock]
#[async_trait::async_trait]
pub trait ResultCache: Send + Sync {
    /// Read the record for an instance, `None` when it was never solved
    async fn lookup(&self, instance: &Instance) -> OrchestratorResult<Option<CacheRecord>>;

    /// Persist the record for an instance
    async fn store(&self, instance: &Instance, record: &CacheRecord) -> OrchestratorResult<()>;
}
