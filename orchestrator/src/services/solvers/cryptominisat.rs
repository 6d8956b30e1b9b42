//! cryptominisat5 backend: `cryptominisat5 --verb 0 <cnf>`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{interpret_exit, COMPETITION_MARKERS};
use crate::error::OrchestratorResult;
use crate::traits::{CommandRunner, Invocation, SolverBackend};
use shared::Decision;

const VERBOSITY: &str = "0";

pub struct CryptoMinisatBackend {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl CryptoMinisatBackend {
    pub fn new(executable: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { executable, runner }
    }

    pub fn invocation(&self, instance: &Path) -> Invocation {
        Invocation::new(&self.executable)
            .arg("--verb")
            .arg(VERBOSITY)
            .arg(instance.to_string_lossy())
    }
}

#[async_trait]
impl SolverBackend for CryptoMinisatBackend {
    fn name(&self) -> &'static str {
        "cryptominisat"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let output = self.runner.run(&self.invocation(instance)).await?;
        interpret_exit(self.name(), instance, &output, COMPETITION_MARKERS)
    }
}
