//! Orchestrator library for solving batches of CNF instances
//!
//! Enumerates instance files in a directory, solves them in parallel with
//! one of several external SAT solvers, memoises every decision in a
//! sidecar file next to the instance, and stops dispatching on the first
//! satisfiable result unless told to keep going.

pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{enumerate_instances, EnumerationOptions, Reporter};
pub use config::{CancelPolicy, FailurePolicy, RunConfig, SolverSettings};
pub use dispatcher::{Dispatcher, DispatcherConfig};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::Orchestrator;
pub use traits::{CommandRunner, ResultCache, SolverBackend};
pub use traits::{MockCommandRunner, MockResultCache, MockSolverBackend};
