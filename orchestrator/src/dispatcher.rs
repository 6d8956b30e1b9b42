//! Bounded worker pool with completion-order delivery and early stop
//!
//! Workers pull instances from a shared queue in enumeration order. Each job
//! checks the cache, solves on a miss, writes the cache record and sends a
//! result over a channel. The dispatch loop feeds results to the reporter as
//! they arrive and cancels the pool on the first satisfiable result (unless
//! told to keep going) or on the first fatal failure.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::{CancelPolicy, FailurePolicy};
use crate::core::Reporter;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{ResultCache, SolverBackend};
use shared::{
    component_debug, component_info, component_warn, logging, CacheRecord, ComponentId, Instance,
    SolveResult,
};

/// Pool behaviour knobs
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub workers: usize,
    pub stop_on_first_positive: bool,
    pub failure_policy: FailurePolicy,
    pub cancel_policy: CancelPolicy,
    pub origin_host: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            workers: crate::config::default_jobs(),
            stop_on_first_positive: true,
            failure_policy: FailurePolicy::default(),
            cancel_policy: CancelPolicy::default(),
            origin_host: crate::config::origin_host(),
        }
    }
}

/// What a worker reports back for one job
#[derive(Debug)]
enum WorkerEvent {
    Solved(SolveResult),
    Failed {
        instance: Instance,
        error: OrchestratorError,
    },
}

type JobQueue = Arc<Mutex<VecDeque<Instance>>>;

pub struct Dispatcher {
    backend: Arc<dyn SolverBackend>,
    cache: Arc<dyn ResultCache>,
    config: DispatcherConfig,
    shutdown: CancellationToken,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn SolverBackend>, cache: Arc<dyn ResultCache>, config: DispatcherConfig) -> Self {
        Self {
            backend,
            cache,
            config,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that stops every run of this dispatcher when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Process `jobs` and feed every result to `reporter`
    ///
    /// Returns the first fatal error, if any. Jobs already running when the
    /// pool is cancelled either finish (`Join`) or are killed (`Terminate`).
    pub async fn run(&self, jobs: Vec<Instance>, reporter: &mut Reporter) -> OrchestratorResult<()> {
        if jobs.is_empty() {
            component_info!(ComponentId::Dispatcher, "Nothing to solve");
            return Ok(());
        }

        let cancel = self.shutdown.child_token();
        let worker_count = self.config.workers.max(1).min(jobs.len());
        let queue: JobQueue = Arc::new(Mutex::new(VecDeque::from(jobs)));
        let (tx, mut rx) = mpsc::channel(worker_count);
        let origin_host: Arc<str> = Arc::from(self.config.origin_host.as_str());

        component_debug!(
            ComponentId::Dispatcher,
            "🏭 Starting {} workers with {} backend",
            worker_count,
            self.backend.name()
        );

        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            let worker = Worker {
                id: ComponentId::Worker(id),
                backend: Arc::clone(&self.backend),
                cache: Arc::clone(&self.cache),
                cancel: cancel.clone(),
                cancel_policy: self.config.cancel_policy,
                failure_policy: self.config.failure_policy,
                stop_on_first_positive: self.config.stop_on_first_positive,
                origin_host: Arc::clone(&origin_host),
            };
            workers.spawn(worker.run(Arc::clone(&queue), tx.clone()));
        }
        drop(tx);

        let mut fatal: Option<OrchestratorError> = None;
        while let Some(event) = rx.recv().await {
            match event {
                WorkerEvent::Solved(result) => {
                    if fatal.is_some() {
                        // cached by the worker, but the run is already failing
                        continue;
                    }
                    reporter.observe(&result);
                    if result.decision.is_sat() && self.config.stop_on_first_positive && !reporter.summary().stopped_early {
                        component_info!(ComponentId::Dispatcher, "!!! SAT !!! cnf_file: {}", result.instance);
                        reporter.mark_stopped_early();
                        cancel.cancel();
                    }
                }
                WorkerEvent::Failed { instance, error } => {
                    if self.config.failure_policy.isolates(&error) {
                        reporter.record_failure(&instance, &error);
                    } else if fatal.is_none() {
                        logging::log_error(ComponentId::Dispatcher, &format!("Solving {instance}"), &error);
                        cancel.cancel();
                        fatal = Some(error);
                    } else {
                        component_warn!(ComponentId::Dispatcher, "Further failure on {}: {}", instance, error);
                    }
                }
            }
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                cancel.cancel();
                if fatal.is_none() {
                    fatal = Some(OrchestratorError::WorkerFailed { message: e.to_string() });
                }
            }
        }

        if self.shutdown.is_cancelled() && !reporter.summary().stopped_early {
            component_warn!(ComponentId::Dispatcher, "Run interrupted before all problems were checked");
            reporter.mark_interrupted();
        }

        match fatal {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// One pool slot; owns at most one running solver at a time
struct Worker {
    id: ComponentId,
    backend: Arc<dyn SolverBackend>,
    cache: Arc<dyn ResultCache>,
    cancel: CancellationToken,
    cancel_policy: CancelPolicy,
    failure_policy: FailurePolicy,
    stop_on_first_positive: bool,
    origin_host: Arc<str>,
}

impl Worker {
    async fn run(self, queue: JobQueue, tx: mpsc::Sender<WorkerEvent>) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }
            let Some(instance) = queue.lock().await.pop_front() else {
                break;
            };

            let outcome = match self.cancel_policy {
                CancelPolicy::Join => Some(self.process(&instance).await),
                CancelPolicy::Terminate => tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => None,
                    outcome = self.process(&instance) => Some(outcome),
                },
            };

            let Some(outcome) = outcome else {
                component_debug!(self.id, "🛑 Abandoned {}", instance);
                break;
            };

            // Stop the pool before reporting so no queued job starts after a
            // deciding result
            let event = match outcome {
                Ok(result) => {
                    if result.decision.is_sat() && self.stop_on_first_positive {
                        self.cancel.cancel();
                    }
                    WorkerEvent::Solved(result)
                }
                Err(error) => {
                    if !self.failure_policy.isolates(&error) {
                        self.cancel.cancel();
                    }
                    WorkerEvent::Failed { instance, error }
                }
            };
            if tx.send(event).await.is_err() {
                break;
            }
        }
        component_debug!(self.id, "Worker finished");
    }

    /// PENDING -> CACHE_CHECKED -> (hit | SOLVING -> CACHE_WRITTEN) -> DONE
    async fn process(&self, instance: &Instance) -> OrchestratorResult<SolveResult> {
        match self.cache.lookup(instance).await {
            Ok(Some(record)) => return Ok(SolveResult::cache_hit(instance.clone(), &record)),
            Ok(None) => {}
            Err(error @ OrchestratorError::CorruptCache { .. }) => {
                component_warn!(self.id, "⚠️  {}; solving again", error);
            }
            Err(error) => return Err(error),
        }

        component_debug!(self.id, "🔍 Solving {} with {}", instance, self.backend.name());
        let started = Instant::now();
        let decision = self.backend.invoke(instance.path()).await?;
        let elapsed = started.elapsed().as_secs_f64();

        let record = CacheRecord::new(decision, elapsed, &*self.origin_host);
        self.cache.store(instance, &record).await?;

        Ok(SolveResult::fresh(instance.clone(), decision, elapsed))
    }
}
