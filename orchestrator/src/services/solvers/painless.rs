//! painless backend: `painless_release -c=16 -simple <cnf>.nocmt`
//!
//! painless rejects DIMACS comment lines, so every instance is first copied
//! to a `.nocmt` sibling with lines starting with `c ` removed. Gzipped
//! instances are decompressed while copying.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{interpret_exit, COMPETITION_MARKERS};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{CommandRunner, Invocation, SolverBackend};
use shared::{component_debug, ComponentId, Decision};

pub const COMMENT_PREFIX: &str = "c ";
const STRIPPED_SUFFIX: &str = ".nocmt";
const THREADS_FLAG: &str = "-c=16";
const SIMPLE_FLAG: &str = "-simple";

/// Path of the comment-free copy: `x.cnf` -> `x.cnf.nocmt`
pub fn stripped_path(instance: &Path) -> PathBuf {
    let mut raw: OsString = instance.as_os_str().to_owned();
    raw.push(STRIPPED_SUFFIX);
    PathBuf::from(raw)
}

/// Copy `reader` to `writer` dropping comment lines; returns lines dropped
pub fn strip_comments<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<usize> {
    let mut line = String::new();
    let mut dropped = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.starts_with(COMMENT_PREFIX) {
            dropped += 1;
            continue;
        }
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()?;
    Ok(dropped)
}

/// Write the `.nocmt` copy of an instance and return its path
pub fn write_stripped_copy(instance: &Path) -> OrchestratorResult<PathBuf> {
    let failed = |source| OrchestratorError::PreprocessingFailed {
        path: instance.to_path_buf(),
        source,
    };

    let file = File::open(instance).map_err(failed)?;
    let reader: Box<dyn BufRead> = if instance.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let target = stripped_path(instance);
    let writer = BufWriter::new(File::create(&target).map_err(failed)?);
    let dropped = strip_comments(reader, writer).map_err(failed)?;

    component_debug!(
        ComponentId::Dispatcher,
        "✂️  Dropped {} comment lines from {}",
        dropped,
        instance.display()
    );
    Ok(target)
}

pub struct PainlessBackend {
    executable: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl PainlessBackend {
    pub fn new(executable: PathBuf, runner: Arc<dyn CommandRunner>) -> Self {
        Self { executable, runner }
    }

    /// Invocation against an already stripped copy
    pub fn invocation(&self, stripped: &Path) -> Invocation {
        Invocation::new(&self.executable)
            .arg(THREADS_FLAG)
            .arg(SIMPLE_FLAG)
            .arg(stripped.to_string_lossy())
    }
}

#[async_trait]
impl SolverBackend for PainlessBackend {
    fn name(&self) -> &'static str {
        "painless"
    }

    async fn invoke(&self, instance: &Path) -> OrchestratorResult<Decision> {
        let source = instance.to_path_buf();
        let stripped = tokio::task::spawn_blocking(move || write_stripped_copy(&source))
            .await
            .map_err(|e| OrchestratorError::WorkerFailed {
                message: format!("preprocessing task panicked: {e}"),
            })??;

        let output = self.runner.run(&self.invocation(&stripped)).await?;
        interpret_exit(self.name(), instance, &output, COMPETITION_MARKERS)
    }
}
