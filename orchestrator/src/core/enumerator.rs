//! Job enumeration
//!
//! Lists the `*.cnf` and `*.cnf.gz` files directly inside a directory and
//! orders them deterministically.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{OrchestratorError, OrchestratorResult};
use shared::Instance;

/// File name suffixes recognised as instances (plain and gzipped DIMACS)
pub const INSTANCE_SUFFIXES: [&str; 2] = [".cnf", ".cnf.gz"];

/// Ordering and truncation applied after sorting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationOptions {
    pub reverse: bool,
    /// Maximum number of instances; `None` or `Some(0)` means all
    pub limit: Option<usize>,
}

/// Whether a file name looks like an instance
///
/// Compares raw name bytes, so names that are not valid UTF-8 still match.
pub fn is_instance_name(name: impl AsRef<OsStr>) -> bool {
    let bytes = name.as_ref().as_encoded_bytes();
    !bytes.starts_with(b".")
        && INSTANCE_SUFFIXES
            .iter()
            .any(|suffix| bytes.ends_with(suffix.as_bytes()))
}

/// Sort, optionally reverse, then optionally truncate
pub fn order_instances(mut paths: Vec<PathBuf>, options: EnumerationOptions) -> Vec<Instance> {
    paths.sort();
    paths.dedup();
    if options.reverse {
        paths.reverse();
    }
    if let Some(limit) = options.limit.filter(|&n| n > 0) {
        paths.truncate(limit);
    }
    paths.into_iter().map(Instance::from).collect()
}

/// Enumerate the instances in `dir`
///
/// # Errors
/// `EnumerationError` when `dir` does not exist or is not a directory. An
/// existing directory without matches yields an empty list.
pub fn enumerate_instances(dir: &Path, options: EnumerationOptions) -> OrchestratorResult<Vec<Instance>> {
    if !dir.is_dir() {
        return Err(OrchestratorError::EnumerationError {
            path: dir.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() && !entry.path().is_file() {
            continue;
        }
        if is_instance_name(entry.file_name()) {
            paths.push(entry.into_path());
        }
    }

    Ok(order_instances(paths, options))
}
