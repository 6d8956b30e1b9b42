//! Test helpers and builder patterns for orchestrator tests

use std::path::Path;
use std::sync::Arc;

use cnf_orchestrator::services::SidecarCache;
use cnf_orchestrator::*;
use shared::{CacheRecord, Decision, SolverKind};

use super::fixtures::FakeSolver;

/// Builder for orchestrators over a real directory and sidecar cache
pub struct OrchestratorBuilder {
    config: RunConfig,
    backend: Arc<dyn SolverBackend>,
    cache: Arc<dyn ResultCache>,
}

impl OrchestratorBuilder {
    /// Single worker, stop on first SAT, unsatisfiable fake solver
    pub fn new(dir: &Path) -> Self {
        let mut config = RunConfig::new(dir, SolverKind::Kissat);
        config.jobs = 1;
        Self {
            config,
            backend: Arc::new(FakeSolver::new()),
            cache: Arc::new(SidecarCache::new()),
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    pub fn reversed(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    pub fn keep_going(mut self) -> Self {
        self.config.stop_on_first_positive = false;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.config.cancel_policy = policy;
        self
    }

    pub fn with_solver(mut self, solver: FakeSolver) -> Self {
        self.backend = Arc::new(solver);
        self
    }

    /// Use a mockall backend configured by `setup`
    pub fn with_mock_backend<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockSolverBackend),
    {
        let mut backend = MockSolverBackend::new();
        backend.expect_name().return_const("mock");
        setup(&mut backend);
        self.backend = Arc::new(backend);
        self
    }

    pub fn build(self) -> Orchestrator {
        self.try_build().expect("valid test configuration")
    }

    pub fn try_build(self) -> OrchestratorResult<Orchestrator> {
        Orchestrator::new(self.config, self.backend, self.cache)
    }
}

/// Common assertions and setup
pub struct TestHelpers;

impl TestHelpers {
    pub fn read_record(path: &Path) -> CacheRecord {
        let raw = std::fs::read_to_string(path).expect("read cache record");
        serde_json::from_str(&raw).expect("parse cache record")
    }

    pub fn assert_record(path: &Path, decision: Decision) {
        assert!(path.exists(), "missing cache record {}", path.display());
        assert_eq!(Self::read_record(path).decision, decision);
    }
}
