//! Tests for the sidecar result cache

use tempfile::TempDir;

use super::common::write_cnf;
use crate::error::OrchestratorError;
use crate::services::cache::{sidecar_path, SidecarCache};
use crate::traits::ResultCache;
use shared::{CacheRecord, Decision, Instance};

#[test]
fn test_sidecar_path_appends_done() {
    let instance = Instance::new("problems/p01.cnf.gz");
    assert_eq!(
        sidecar_path(&instance),
        std::path::PathBuf::from("problems/p01.cnf.gz.done")
    );
}

#[tokio::test]
async fn test_lookup_missing_record() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));

    let record = SidecarCache::new().lookup(&instance).await.unwrap();
    assert!(record.is_none());
}

#[tokio::test]
async fn test_store_then_lookup_round_trip() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    let cache = SidecarCache::new();
    let record = CacheRecord::new(Decision::Unsatisfiable, 3.2, "h1");

    cache.store(&instance, &record).await.unwrap();
    let loaded = cache.lookup(&instance).await.unwrap().unwrap();

    assert_eq!(loaded.decision, Decision::Unsatisfiable);
    assert_eq!(loaded.elapsed_seconds.to_bits(), 3.2f64.to_bits());
    assert_eq!(loaded.origin_host, "h1");
}

#[tokio::test]
async fn test_store_leaves_no_staging_files() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    let cache = SidecarCache::new();

    cache
        .store(&instance, &CacheRecord::new(Decision::Satisfiable, 1.0, "h"))
        .await
        .unwrap();
    cache
        .store(&instance, &CacheRecord::new(Decision::Satisfiable, 2.0, "h"))
        .await
        .unwrap();

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.cnf", "a.cnf.done"]);
}

#[tokio::test]
async fn test_reads_files_written_by_older_runs() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    std::fs::write(
        sidecar_path(&instance),
        r#"{"is_sat": true, "solver_time": 12.5, "hostname": "node7"}"#,
    )
    .unwrap();

    let record = SidecarCache::new().lookup(&instance).await.unwrap().unwrap();
    assert_eq!(record, CacheRecord::new(Decision::Satisfiable, 12.5, "node7"));
}

#[tokio::test]
async fn test_unparseable_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    std::fs::write(sidecar_path(&instance), "{\"is_sat\": tr").unwrap();

    let result = SidecarCache::new().lookup(&instance).await;
    assert!(matches!(result, Err(OrchestratorError::CorruptCache { .. })));
}

#[tokio::test]
async fn test_non_utf8_record_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    std::fs::write(sidecar_path(&instance), [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let result = SidecarCache::new().lookup(&instance).await;
    assert!(matches!(result, Err(OrchestratorError::CorruptCache { .. })));
}

#[tokio::test]
async fn test_failed_store_removes_staging_file() {
    let dir = TempDir::new().unwrap();
    let instance = Instance::new(write_cnf(dir.path(), "a.cnf"));
    // a non-empty directory in the way makes the final rename fail
    let blocker = sidecar_path(&instance);
    std::fs::create_dir(&blocker).unwrap();
    std::fs::write(blocker.join("keep"), "x").unwrap();

    let result = SidecarCache::new()
        .store(&instance, &CacheRecord::new(Decision::Satisfiable, 1.0, "h"))
        .await;

    assert!(result.is_err());
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["a.cnf", "a.cnf.done"]);
}
