//! Test fixtures and data for orchestrator tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use cnf_orchestrator::{OrchestratorError, OrchestratorResult, SolverBackend};
use shared::Decision;

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    pub const CNF_BODY: &'static str = "c fixture\np cnf 2 2\n1 2 0\n-1 0\n";
    pub const SLOW_SOLVE: Duration = Duration::from_secs(5);

    /// Fresh directory holding one small instance per name
    pub fn instance_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("create temp dir");
        for name in names {
            std::fs::write(dir.path().join(name), Self::CNF_BODY).expect("write instance");
        }
        dir
    }

    pub fn done_path(dir: &TempDir, name: &str) -> PathBuf {
        dir.path().join(format!("{name}.done"))
    }
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
    Decide(Decision),
    Violate,
    Slow(Duration),
}

/// In-process stand-in for an external solver
///
/// Instances are unsatisfiable unless configured otherwise by file name.
/// Every invocation is recorded in call order.
#[derive(Clone, Default)]
pub struct FakeSolver {
    outcomes: HashMap<String, Outcome>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sat(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), Outcome::Decide(Decision::Satisfiable));
        self
    }

    /// Exit 10 without the satisfiable marker
    pub fn violating(mut self, name: &str) -> Self {
        self.outcomes.insert(name.to_string(), Outcome::Violate);
        self
    }

    pub fn slow(mut self, name: &str, delay: Duration) -> Self {
        self.outcomes.insert(name.to_string(), Outcome::Slow(delay));
        self
    }

    /// File names passed to `invoke`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn called(&self) -> HashSet<String> {
        self.calls().into_iter().collect()
    }
}

#[async_trait]
impl SolverBackend for FakeSolver {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let name = instance
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.lock().expect("calls lock").push(name.clone());

        match self.outcomes.get(&name).copied() {
            Some(Outcome::Decide(decision)) => Ok(decision),
            Some(Outcome::Violate) => Err(OrchestratorError::AssertionViolation {
                solver: "fake".to_string(),
                instance: instance.to_path_buf(),
                code: 10,
                marker: "s SATISFIABLE".to_string(),
            }),
            Some(Outcome::Slow(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(Decision::Unsatisfiable)
            }
            None => Ok(Decision::Unsatisfiable),
        }
    }
}
