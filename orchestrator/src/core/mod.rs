//! Core business logic modules
//!
//! Enumeration and reporting have no dependency on solvers or the cache and
//! are tested in isolation.

pub mod enumerator;
pub mod reporter;

pub use enumerator::{enumerate_instances, EnumerationOptions};
pub use reporter::{render_summary, Reporter};
