//! Run configuration and solver executable discovery
//!
//! Solver locations are read from the environment. A `.env` file in the
//! current directory (or a parent) is loaded first; variables already set in
//! the process environment win over values from the file.
//!
//! ## Variables
//! - `KISSAT`: kissat executable (default `kissat`)
//! - `MINISAT`: minisat executable (default `minisat`)
//! - `CRYPTOMINISAT`: cryptominisat5 executable
//! - `PAINLESS`: painless release binary
//! - `MALLOB_DIR`: mallob checkout, used as the working directory

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{OrchestratorError, OrchestratorResult};
use shared::{SharedError, SolverKind};

/// What to do when a single job's solver invocation fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop dispatching and fail the whole run
    #[default]
    Abort,
    /// Log the failure, count it and keep going
    Isolate,
}

impl FailurePolicy {
    /// Whether `error` is skipped rather than failing the run
    pub fn isolates(self, error: &OrchestratorError) -> bool {
        self == Self::Isolate && error.is_backend_failure()
    }
}

/// What happens to in-flight jobs once the run is cancelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Let running solvers finish and record their results
    #[default]
    Join,
    /// Kill running solvers; their results are discarded
    Terminate,
}

impl FromStr for CancelPolicy {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "join" => Ok(CancelPolicy::Join),
            "terminate" | "kill" => Ok(CancelPolicy::Terminate),
            _ => Err(SharedError::InvalidConfig {
                field: "on-cancel".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CancelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelPolicy::Join => write!(f, "join"),
            CancelPolicy::Terminate => write!(f, "terminate"),
        }
    }
}

/// Locations of the external solver programs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverSettings {
    pub kissat: PathBuf,
    pub minisat: PathBuf,
    pub cryptominisat: PathBuf,
    pub painless: PathBuf,
    pub mallob_dir: PathBuf,
}

impl SolverSettings {
    const DEFAULT_KISSAT: &'static str = "kissat";
    const DEFAULT_MINISAT: &'static str = "minisat";
    const DEFAULT_CRYPTOMINISAT: &'static str = "~/cryptominisat5-mac-arm64/cryptominisat5";
    const DEFAULT_PAINLESS: &'static str = "~/painless/build/release/painless_release";
    const DEFAULT_MALLOB_DIR: &'static str = "~/mallob";

    /// Load `.env` if present, then read the solver variables
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("HOME");
        let resolve = |key: &str, default: &str| {
            let raw = lookup(key).filter(|v| !v.trim().is_empty());
            expand_home(raw.as_deref().unwrap_or(default), home.as_deref())
        };

        Self {
            kissat: resolve("KISSAT", Self::DEFAULT_KISSAT),
            minisat: resolve("MINISAT", Self::DEFAULT_MINISAT),
            cryptominisat: resolve("CRYPTOMINISAT", Self::DEFAULT_CRYPTOMINISAT),
            painless: resolve("PAINLESS", Self::DEFAULT_PAINLESS),
            mallob_dir: resolve("MALLOB_DIR", Self::DEFAULT_MALLOB_DIR),
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Expand a leading `~/` against the home directory
pub fn expand_home(raw: &str, home: Option<&str>) -> PathBuf {
    match (raw.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => Path::new(home).join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Name of this machine, stamped into every cache record
pub fn origin_host() -> String {
    #[cfg(unix)]
    {
        if let Ok(name) = nix::unistd::gethostname() {
            if let Some(name) = name.to_str().filter(|n| !n.is_empty()) {
                return name.to_string();
            }
        }
    }

    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Default pool size: one worker per available core
pub fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Everything one batch run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub cnf_dir: PathBuf,
    pub solver: SolverKind,
    pub jobs: usize,
    pub limit: Option<usize>,
    pub reverse: bool,
    pub stop_on_first_positive: bool,
    pub failure_policy: FailurePolicy,
    pub cancel_policy: CancelPolicy,
    pub timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(cnf_dir: impl Into<PathBuf>, solver: SolverKind) -> Self {
        Self {
            cnf_dir: cnf_dir.into(),
            solver,
            jobs: default_jobs(),
            limit: None,
            reverse: false,
            stop_on_first_positive: true,
            failure_policy: FailurePolicy::default(),
            cancel_policy: CancelPolicy::default(),
            timeout: None,
        }
    }

    pub fn validate(&self) -> OrchestratorResult<()> {
        if self.jobs == 0 {
            return Err(OrchestratorError::config("jobs must be at least 1"));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(OrchestratorError::config("timeout must be positive"));
        }
        Ok(())
    }
}
