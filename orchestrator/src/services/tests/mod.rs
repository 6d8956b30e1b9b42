//! Service-specific tests
//!
//! Each service has its own test file. Tests that need a real executable
//! use small shell scripts and only run on unix.

mod cache;

// Common test utilities for services
pub mod common {
    use std::path::{Path, PathBuf};

    use crate::traits::ProcessOutput;

    /// Canned process output
    pub fn output(code: i32, stdout: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code: Some(code),
            stdout: stdout.to_string(),
        }
    }

    /// Write a small CNF file and return its path
    pub fn write_cnf(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "c test instance\np cnf 2 2\n1 2 0\n-1 0\n").expect("write cnf");
        path
    }

    /// Write an executable `/bin/sh` script standing in for a solver
    #[cfg(unix)]
    pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = std::fs::metadata(&path).expect("stat script").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod script");
        path
    }
}
