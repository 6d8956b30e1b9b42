//! Main entry point for the batch solver binary
//!
//! Parses the command line, builds the orchestrator with real process and
//! cache services, and prints the run summary.

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::signal;

use cnf_orchestrator::{
    config::default_jobs, core::render_summary, CancelPolicy, FailurePolicy, Orchestrator, OrchestratorResult,
    RunConfig, SolverSettings,
};
use shared::{component_debug, logging, ComponentId, SolverKind};

/// Solve every CNF instance in a directory in parallel, with caching
#[derive(Parser)]
#[command(name = "sat-solve")]
#[command(about = "Solves a directory of SAT problems with an external solver, stopping at the first SAT")]
pub struct Args {
    /// Directory containing *.cnf and *.cnf.gz files
    pub cnf_dir: PathBuf,

    /// Solver backend (kissat, minisat, cryptominisat, painless, mallob)
    #[arg(long, default_value = "minisat")]
    pub solver: SolverKind,

    /// Number of parallel workers (defaults to the number of CPU cores)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// The number of problems to solve (default = all)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Solve the problems in reverse order
    #[arg(long)]
    pub reverse: bool,

    /// Continue solving other problems even if a solution is found
    #[arg(long, alias = "keep_going")]
    pub keep_going: bool,

    /// Skip problems whose solver fails instead of aborting the run
    #[arg(long)]
    pub isolate_failures: bool,

    /// Give up on a single problem after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// What to do with running solvers after a solution is found (join, terminate)
    #[arg(long, default_value = "join")]
    pub on_cancel: CancelPolicy,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    fn into_config(self) -> RunConfig {
        RunConfig {
            cnf_dir: self.cnf_dir,
            solver: self.solver,
            jobs: self.jobs.unwrap_or_else(default_jobs),
            limit: self.limit,
            reverse: self.reverse,
            stop_on_first_positive: !self.keep_going,
            failure_policy: if self.isolate_failures {
                FailurePolicy::Isolate
            } else {
                FailurePolicy::Abort
            },
            cancel_policy: self.on_cancel,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[tokio::main]
async fn main() -> OrchestratorResult<()> {
    let wall_clock = Instant::now();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ComponentId::Cli, &format!("{} batch solve of {}", args.solver, args.cnf_dir.display()));

    let settings = SolverSettings::from_env();
    component_debug!(ComponentId::Cli, "Solver locations: {:?}", settings);

    let orchestrator = Orchestrator::with_real_services(args.into_config(), &settings)?;

    // Ctrl+C stops dispatch; running solvers follow the cancel policy
    let shutdown = orchestrator.shutdown_token();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(ComponentId::Cli, "Received Ctrl+C signal");
                shutdown.cancel();
            }
            Err(err) => {
                logging::log_error(ComponentId::Cli, "Signal handling", &err);
            }
        }
    });

    let summary = orchestrator.run().await?;
    println!("{}", render_summary(&summary, wall_clock.elapsed()));

    Ok(())
}
