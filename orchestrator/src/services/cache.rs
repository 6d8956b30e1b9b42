//! Sidecar file result cache
//!
//! Each instance `x.cnf` gets a `x.cnf.done` JSON file next to it. A record
//! is trusted as final once it exists; nothing here checks it against the
//! instance content.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::ResultCache;
use shared::{component_debug, CacheRecord, ComponentId, Instance};

/// Suffix appended to an instance path to name its cache record
pub const DONE_SUFFIX: &str = ".done";

/// Path of the cache record for an instance
pub fn sidecar_path(instance: &Instance) -> PathBuf {
    let mut raw: OsString = instance.path().as_os_str().to_owned();
    raw.push(DONE_SUFFIX);
    PathBuf::from(raw)
}

/// Cache that stores one `.done` file beside every instance
#[derive(Debug, Clone, Default)]
pub struct SidecarCache;

impl SidecarCache {
    pub fn new() -> Self {
        Self
    }

    /// Temporary sibling used for write-then-rename
    fn staging_path(target: &Path) -> PathBuf {
        let mut raw: OsString = target.as_os_str().to_owned();
        raw.push(format!(".{}.tmp", uuid::Uuid::new_v4().simple()));
        PathBuf::from(raw)
    }
}

#[async_trait]
impl ResultCache for SidecarCache {
    async fn lookup(&self, instance: &Instance) -> OrchestratorResult<Option<CacheRecord>> {
        let path = sidecar_path(instance);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Raw bytes so that invalid UTF-8 is reported as corrupt content
        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| OrchestratorError::CorruptCache {
                path,
                message: e.to_string(),
            })
    }

    async fn store(&self, instance: &Instance, record: &CacheRecord) -> OrchestratorResult<()> {
        let target = sidecar_path(instance);
        let staging = Self::staging_path(&target);
        let content = serde_json::to_string(record)?;

        let written = match fs::write(&staging, content).await {
            Ok(()) => fs::rename(&staging, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        component_debug!(ComponentId::Dispatcher, "💾 Cached {} for {}", record.decision, instance);
        Ok(())
    }
}
