//! Solver backend implementations
//!
//! Every backend follows the SAT competition convention: exit code 10 means
//! satisfiable, 20 means unsatisfiable, and stdout must carry the matching
//! status line. Backends differ only in how they are invoked and which
//! marker text they print.

pub mod cryptominisat;
pub mod kissat;
pub mod mallob;
pub mod minisat;
pub mod painless;

pub use cryptominisat::CryptoMinisatBackend;
pub use kissat::KissatBackend;
pub use mallob::MallobBackend;
pub use minisat::MinisatBackend;
pub use painless::PainlessBackend;

use std::path::Path;
use std::sync::Arc;

use crate::config::SolverSettings;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{CommandRunner, ProcessOutput, SolverBackend};
use shared::{Decision, SolverKind};

pub const SAT_EXIT_CODE: i32 = 10;
pub const UNSAT_EXIT_CODE: i32 = 20;

/// Status markers a solver prints on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub satisfiable: &'static str,
    pub unsatisfiable: &'static str,
}

/// `s SATISFIABLE` style used by the competition-format solvers
pub const COMPETITION_MARKERS: Markers = Markers {
    satisfiable: "s SATISFIABLE",
    unsatisfiable: "s UNSATISFIABLE",
};

/// Map a finished process onto a decision, checking stdout agrees
pub fn interpret_exit(
    solver: &str,
    instance: &Path,
    output: &ProcessOutput,
    markers: Markers,
) -> OrchestratorResult<Decision> {
    let (decision, marker) = match output.exit_code {
        Some(SAT_EXIT_CODE) => (Decision::Satisfiable, markers.satisfiable),
        Some(UNSAT_EXIT_CODE) => (Decision::Unsatisfiable, markers.unsatisfiable),
        code => {
            return Err(OrchestratorError::UnknownExitCode {
                solver: solver.to_string(),
                instance: instance.to_path_buf(),
                code,
            })
        }
    };

    if !output.stdout.contains(marker) {
        return Err(OrchestratorError::AssertionViolation {
            solver: solver.to_string(),
            instance: instance.to_path_buf(),
            code: output.exit_code.unwrap_or_default(),
            marker: marker.to_string(),
        });
    }

    Ok(decision)
}

/// Construct the backend selected for this run
pub fn build_backend(
    kind: SolverKind,
    settings: &SolverSettings,
    runner: Arc<dyn CommandRunner>,
) -> Arc<dyn SolverBackend> {
    match kind {
        SolverKind::Kissat => Arc::new(KissatBackend::new(settings.kissat.clone(), runner)),
        SolverKind::Minisat => Arc::new(MinisatBackend::new(settings.minisat.clone(), runner)),
        SolverKind::CryptoMinisat => {
            Arc::new(CryptoMinisatBackend::new(settings.cryptominisat.clone(), runner))
        }
        SolverKind::Painless => Arc::new(PainlessBackend::new(settings.painless.clone(), runner)),
        SolverKind::Mallob => Arc::new(MallobBackend::new(settings.mallob_dir.clone(), runner)),
    }
}
