//! mallob backend, run in mono mode from its checkout directory

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{interpret_exit, COMPETITION_MARKERS};
use crate::error::OrchestratorResult;
use crate::traits::{CommandRunner, Invocation, SolverBackend};
use shared::Decision;

const BINARY: &str = "build/mallob";
const THREADS_FLAG: &str = "-t=12";
const SOLVER_FLAG: &str = "-satsolver=k";

pub struct MallobBackend {
    install_dir: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl MallobBackend {
    pub fn new(install_dir: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { install_dir, runner }
    }

    /// mallob runs from its own directory, so the instance must be absolute
    pub fn invocation(&self, instance: &Path) -> OrchestratorResult<Invocation> {
        let absolute = if instance.is_absolute() {
            instance.to_path_buf()
        } else {
            std::env::current_dir()?.join(instance)
        };

        Ok(Invocation::new(self.install_dir.join(BINARY))
            .arg(format!("-mono={}", absolute.display()))
            .arg(THREADS_FLAG)
            .arg(SOLVER_FLAG)
            .in_dir(&self.install_dir))
    }
}

#[async_trait]
impl SolverBackend for MallobBackend {
    fn name(&self) -> &'static str {
        "mallob"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let invocation = self.invocation(instance)?;
        let output = self.runner.run(&invocation).await?;
        interpret_exit(self.name(), instance, &output, COMPETITION_MARKERS)
    }
}
