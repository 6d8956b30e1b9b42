//! kissat backend: `kissat <cnf>`

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{interpret_exit, COMPETITION_MARKERS};
use crate::error::OrchestratorResult;
use crate::traits::{CommandRunner, Invocation, SolverBackend};
use shared::Decision;

pub struct KissatBackend {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl KissatBackend {
    pub fn new(executable: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { executable, runner }
    }

    pub fn invocation(&self, instance: &Path) -> Invocation {
        Invocation::new(&self.executable).arg(instance.to_string_lossy())
    }
}

#[async_trait]
impl SolverBackend for KissatBackend {
    fn name(&self) -> &'static str {
        "kissat"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let output = self.runner.run(&self.invocation(instance)).await?;
        interpret_exit(self.name(), instance, &output, COMPETITION_MARKERS)
    }
}
