//! Core types shared by the enumerator, dispatcher and reporter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::SharedError;

/// One decision-problem file, identified by its path
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instance(PathBuf);

impl Instance {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for Instance {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl AsRef<Path> for Instance {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Outcome of solving one instance
///
/// Persisted as a plain boolean (`true` = satisfiable) so cache files stay
/// readable by older tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Decision {
    Satisfiable,
    Unsatisfiable,
}

impl Decision {
    pub fn is_sat(self) -> bool {
        matches!(self, Decision::Satisfiable)
    }
}

impl From<bool> for Decision {
    fn from(is_sat: bool) -> Self {
        if is_sat {
            Decision::Satisfiable
        } else {
            Decision::Unsatisfiable
        }
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.is_sat()
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Satisfiable => write!(f, "SATISFIABLE"),
            Decision::Unsatisfiable => write!(f, "UNSATISFIABLE"),
        }
    }
}

/// Persisted decision for one instance
///
/// Field names on disk are `is_sat`, `solver_time` and `hostname`; the
/// descriptive names are accepted when reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    #[serde(rename = "is_sat", alias = "decision")]
    pub decision: Decision,

    #[serde(rename = "solver_time", alias = "elapsed_seconds")]
    pub elapsed_seconds: f64,

    #[serde(rename = "hostname", alias = "origin_host")]
    pub origin_host: String,
}

impl CacheRecord {
    pub fn new(decision: Decision, elapsed_seconds: f64, origin_host: impl Into<String>) -> Self {
        Self {
            decision,
            elapsed_seconds,
            origin_host: origin_host.into(),
        }
    }
}

/// Where a result came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveSource {
    CacheHit,
    Fresh,
}

impl fmt::Display for SolveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveSource::CacheHit => write!(f, "cache"),
            SolveSource::Fresh => write!(f, "fresh"),
        }
    }
}

/// Result of one finished job, delivered in completion order
#[derive(Clone, Debug, PartialEq)]
pub struct SolveResult {
    pub instance: Instance,
    pub decision: Decision,
    pub elapsed_seconds: f64,
    pub source: SolveSource,
}

impl SolveResult {
    pub fn cache_hit(instance: Instance, record: &CacheRecord) -> Self {
        Self {
            instance,
            decision: record.decision,
            elapsed_seconds: 0.0,
            source: SolveSource::CacheHit,
        }
    }

    pub fn fresh(instance: Instance, decision: Decision, elapsed_seconds: f64) -> Self {
        Self {
            instance,
            decision,
            elapsed_seconds,
            source: SolveSource::Fresh,
        }
    }
}

/// Aggregate over all results seen so far in a run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub any_satisfiable: bool,
    pub total_elapsed_seconds: f64,
    pub processed_count: usize,
    pub cache_hits: usize,
    pub failed_count: usize,
    pub first_satisfiable: Option<Instance>,
    pub stopped_early: bool,
    /// Instances enumerated for the run
    pub total_count: usize,
    /// Cancelled from outside (Ctrl+C) before every instance was decided
    pub interrupted: bool,
}

impl RunSummary {
    /// Fold one result into the summary
    pub fn record(&mut self, result: &SolveResult) {
        self.processed_count += 1;
        self.total_elapsed_seconds += result.elapsed_seconds;
        if result.source == SolveSource::CacheHit {
            self.cache_hits += 1;
        }
        if result.decision.is_sat() {
            self.any_satisfiable = true;
            if self.first_satisfiable.is_none() {
                self.first_satisfiable = Some(result.instance.clone());
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.failed_count += 1;
    }
}

/// Identity of the component emitting a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Dispatcher,
    Worker(usize),
    Reporter,
    Cli,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Dispatcher => write!(f, "dispatcher"),
            ComponentId::Worker(id) => write!(f, "worker_{id}"),
            ComponentId::Reporter => write!(f, "reporter"),
            ComponentId::Cli => write!(f, "cli"),
        }
    }
}

/// Supported solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverKind {
    Kissat,
    Minisat,
    CryptoMinisat,
    Painless,
    Mallob,
}

impl SolverKind {
    pub const ALL: [SolverKind; 5] = [
        SolverKind::Kissat,
        SolverKind::Minisat,
        SolverKind::CryptoMinisat,
        SolverKind::Painless,
        SolverKind::Mallob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Kissat => "kissat",
            SolverKind::Minisat => "minisat",
            SolverKind::CryptoMinisat => "cryptominisat",
            SolverKind::Painless => "painless",
            SolverKind::Mallob => "mallob",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        SolverKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| SharedError::UnknownSolver { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, decision: Decision, elapsed: f64, source: SolveSource) -> SolveResult {
        SolveResult {
            instance: Instance::new(name),
            decision,
            elapsed_seconds: elapsed,
            source,
        }
    }

    #[test]
    fn test_cache_record_uses_legacy_keys() {
        let record = CacheRecord::new(Decision::Unsatisfiable, 3.2, "h1");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["is_sat"], serde_json::Value::Bool(false));
        assert_eq!(json["solver_time"].as_f64(), Some(3.2));
        assert_eq!(json["hostname"], "h1");
    }

    #[test]
    fn test_cache_record_accepts_descriptive_keys() {
        let json = r#"{"decision": true, "elapsed_seconds": 1.5, "origin_host": "box"}"#;
        let record: CacheRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record, CacheRecord::new(Decision::Satisfiable, 1.5, "box"));
    }

    #[test]
    fn test_cache_record_missing_field_is_rejected() {
        let json = r#"{"is_sat": true, "hostname": "box"}"#;
        assert!(serde_json::from_str::<CacheRecord>(json).is_err());
    }

    #[test]
    fn test_summary_folds_results() {
        let mut summary = RunSummary::default();
        summary.record(&result("a.cnf", Decision::Unsatisfiable, 2.0, SolveSource::Fresh));
        summary.record(&result("b.cnf", Decision::Satisfiable, 0.0, SolveSource::CacheHit));
        summary.record(&result("c.cnf", Decision::Satisfiable, 1.5, SolveSource::Fresh));

        assert!(summary.any_satisfiable);
        assert_eq!(summary.processed_count, 3);
        assert_eq!(summary.cache_hits, 1);
        assert!((summary.total_elapsed_seconds - 3.5).abs() < f64::EPSILON);
        assert_eq!(summary.first_satisfiable, Some(Instance::new("b.cnf")));
    }

    #[test]
    fn test_summary_stays_unsat_without_positive() {
        let mut summary = RunSummary::default();
        summary.record(&result("a.cnf", Decision::Unsatisfiable, 2.0, SolveSource::Fresh));
        summary.record_failure();

        assert!(!summary.any_satisfiable);
        assert_eq!(summary.failed_count, 1);
        assert!(summary.first_satisfiable.is_none());
    }

    #[test]
    fn test_solver_kind_parsing() {
        assert_eq!("kissat".parse::<SolverKind>().unwrap(), SolverKind::Kissat);
        assert_eq!("CryptoMiniSat".parse::<SolverKind>().unwrap(), SolverKind::CryptoMinisat);
        assert!(matches!(
            "glucose".parse::<SolverKind>(),
            Err(SharedError::UnknownSolver { name }) if name == "glucose"
        ));
    }

    #[test]
    fn test_component_id_display() {
        assert_eq!(ComponentId::Worker(3).to_string(), "worker_3");
        assert_eq!(ComponentId::Dispatcher.to_string(), "dispatcher");
    }
}
