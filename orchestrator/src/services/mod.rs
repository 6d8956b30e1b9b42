//! Service implementations
//!
//! Real implementations of the service traits: the process runner, the
//! solver backends and the sidecar result cache.

pub mod cache;
pub mod command_runner;
pub mod solvers;

#[cfg(test)]
mod tests;

// Re-export all service implementations
pub use cache::SidecarCache;
pub use command_runner::RealCommandRunner;
pub use solvers::build_backend;
