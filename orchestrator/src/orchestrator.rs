//! Main orchestrator implementation
//!
//! Wires the enumerator, the dispatcher and the reporter together for one
//! batch run, using injected solver and cache services.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{origin_host, RunConfig, SolverSettings};
use crate::core::{enumerate_instances, EnumerationOptions, Reporter};
use crate::dispatcher::{Dispatcher, DispatcherConfig};
use crate::error::OrchestratorResult;
use crate::services::{build_backend, RealCommandRunner, SidecarCache};
use crate::traits::{CommandRunner, ResultCache, SolverBackend};
use shared::{component_info, logging, ComponentId, RunSummary};

/// Runs one directory of instances through the configured solver
pub struct Orchestrator {
    config: RunConfig,
    dispatcher: Dispatcher,
}

impl Orchestrator {
    /// Create an orchestrator with injected dependencies
    pub fn new(
        config: RunConfig,
        backend: Arc<dyn SolverBackend>,
        cache: Arc<dyn ResultCache>,
    ) -> OrchestratorResult<Self> {
        config.validate()?;

        let dispatcher_config = DispatcherConfig {
            workers: config.jobs,
            stop_on_first_positive: config.stop_on_first_positive,
            failure_policy: config.failure_policy,
            cancel_policy: config.cancel_policy,
            origin_host: origin_host(),
        };
        let dispatcher = Dispatcher::new(backend, cache, dispatcher_config);

        Ok(Self { config, dispatcher })
    }

    /// Create an orchestrator backed by real processes and sidecar files
    pub fn with_real_services(config: RunConfig, settings: &SolverSettings) -> OrchestratorResult<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner::new().with_timeout(config.timeout));
        let backend = build_backend(config.solver, settings, runner);
        Self::new(config, backend, Arc::new(SidecarCache::new()))
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Cancelling this token stops dispatch as if a solution had been found
    pub fn shutdown_token(&self) -> CancellationToken {
        self.dispatcher.shutdown_token()
    }

    /// Enumerate, solve and summarise
    pub async fn run(&self) -> OrchestratorResult<RunSummary> {
        let options = EnumerationOptions {
            reverse: self.config.reverse,
            limit: self.config.limit,
        };
        let jobs = enumerate_instances(&self.config.cnf_dir, options)?;

        component_info!(
            ComponentId::Dispatcher,
            "Using {} workers for parallel processing",
            self.dispatcher.config().workers
        );
        logging::log_progress(
            ComponentId::Dispatcher,
            "Will solve",
            &format!("{} problems from {}", jobs.len(), self.config.cnf_dir.display()),
        );

        let mut reporter = Reporter::new(jobs.len());
        self.dispatcher.run(jobs, &mut reporter).await?;

        let summary = reporter.finish();
        logging::log_success(
            ComponentId::Dispatcher,
            &format!(
                "Processed {} problems ({} from cache)",
                summary.processed_count, summary.cache_hits
            ),
        );
        Ok(summary)
    }
}
