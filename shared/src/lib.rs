//! Shared types for the batch SAT orchestration system
//!
//! Holds the data model exchanged between the enumerator, the worker pool
//! and the reporter, plus the logging setup used by every binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
