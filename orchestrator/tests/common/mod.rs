//! Common test utilities and infrastructure
//!
//! Shared fixtures and builders for the orchestrator test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::{FakeSolver, TestFixtures};
pub use helpers::{OrchestratorBuilder, TestHelpers};
