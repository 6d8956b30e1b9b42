//! Real external process runner
//!
//! Spawns one child per invocation and waits for it. Children are killed
//! when their future is dropped, which is how a timeout or a terminating
//! cancellation stops a running solver.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{CommandRunner, Invocation, ProcessOutput};
use shared::{component_debug, ComponentId};

/// Process runner backed by `tokio::process`
#[derive(Debug, Clone, Default)]
pub struct RealCommandRunner {
    timeout: Option<Duration>,
}

impl RealCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a per-invocation timeout (fluent API)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        if let Some(dir) = &invocation.working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandRunner for RealCommandRunner {
    async fn run(&self, invocation: &Invocation) -> OrchestratorResult<ProcessOutput> {
        let program = invocation.program.display().to_string();
        let child = Self::build_command(invocation)
            .spawn()
            .map_err(|source| OrchestratorError::SolverSpawnFailed {
                program: program.clone(),
                source,
            })?;

        component_debug!(
            ComponentId::Dispatcher,
            "⚙️  Spawned {} (PID: {})",
            program,
            child.id().unwrap_or(0)
        );

        let output = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| OrchestratorError::SolverTimeout {
                    program: program.clone(),
                    timeout,
                })??,
            None => child.wait_with_output().await?,
        };

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
