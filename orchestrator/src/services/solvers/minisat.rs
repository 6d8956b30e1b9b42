//! minisat backend: `minisat <cnf> <solution>`
//!
//! minisat writes its model to a solution file and prints a bare
//! `SATISFIABLE`/`UNSATISFIABLE` line instead of the `s ` status line.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{interpret_exit, Markers};
use crate::error::OrchestratorResult;
use crate::traits::{CommandRunner, Invocation, SolverBackend};
use shared::Decision;

const MINISAT_MARKERS: Markers = Markers {
    satisfiable: "\nSATISFIABLE",
    unsatisfiable: "\nUNSATISFIABLE",
};

/// Instance suffixes stripped before appending `.sol`, longest first
const STRIPPED_SUFFIXES: [&str; 2] = [".cnf.gz", ".cnf"];
const SOLUTION_EXTENSION: &str = ".sol";

/// Solution file written next to the instance: `x.cnf.gz` -> `x.sol`
pub fn solution_path(instance: &Path) -> PathBuf {
    let raw = instance.to_string_lossy();
    let stem = STRIPPED_SUFFIXES
        .iter()
        .find_map(|suffix| raw.strip_suffix(suffix))
        .unwrap_or(&*raw);

    let mut solution = OsString::from(stem);
    solution.push(SOLUTION_EXTENSION);
    PathBuf::from(solution)
}

pub struct MinisatBackend {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl MinisatBackend {
    pub fn new(executable: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { executable, runner }
    }

    pub fn invocation(&self, instance: &Path) -> Invocation {
        Invocation::new(&self.executable)
            .arg(instance.to_string_lossy())
            .arg(solution_path(instance).to_string_lossy())
    }
}

#[async_trait]
impl SolverBackend for MinisatBackend {
    fn name(&self) -> &'static str {
        "minisat"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let output = self.runner.run(&self.invocation(instance)).await?;
        interpret_exit(self.name(), instance, &output, MINISAT_MARKERS)
    }
}
