//! Result aggregation and progress reporting
//!
//! The reporter is the only owner of the run summary. It consumes results in
//! completion order and logs one progress line per result.

use std::time::Duration;

use crate::error::OrchestratorError;
use shared::{component_info, component_warn, ComponentId, Instance, RunSummary, SolveResult};

pub struct Reporter {
    total: usize,
    summary: RunSummary,
}

impl Reporter {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            summary: RunSummary {
                total_count: total,
                ..RunSummary::default()
            },
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Fold a finished job into the summary and log progress
    pub fn observe(&mut self, result: &SolveResult) {
        let position = self.summary.processed_count;
        self.summary.record(result);

        component_info!(
            ComponentId::Reporter,
            "{}/{}. cnf_file: {}, is_sat: {}, solver_time: {:.1} seconds ({})",
            position,
            self.total,
            result.instance,
            result.decision.is_sat(),
            result.elapsed_seconds,
            result.source
        );
    }

    /// Count a job whose failure was isolated rather than fatal
    pub fn record_failure(&mut self, instance: &Instance, error: &OrchestratorError) {
        self.summary.record_failure();
        component_warn!(ComponentId::Reporter, "⚠️  Skipping {}: {}", instance, error);
    }

    pub fn mark_stopped_early(&mut self) {
        self.summary.stopped_early = true;
    }

    pub fn mark_interrupted(&mut self) {
        self.summary.interrupted = true;
    }

    pub fn finish(self) -> RunSummary {
        self.summary
    }
}

/// Human-readable closing lines for a finished run
pub fn render_summary(summary: &RunSummary, wall_clock: Duration) -> String {
    let mut lines = Vec::new();
    if summary.stopped_early {
        if let Some(instance) = &summary.first_satisfiable {
            lines.push(format!("!!! SAT !!! cnf_file: {instance}"));
        }
    }
    if summary.interrupted {
        lines.push(format!(
            "Interrupted: {}/{} problems checked",
            summary.processed_count, summary.total_count
        ));
    }
    if summary.failed_count > 0 {
        lines.push(format!("Failed problems (isolated): {}", summary.failed_count));
    }
    lines.push(format!("Is SAT: {}", summary.any_satisfiable));
    lines.push(format!(
        "Total solver time (sum of all solves): {:.1} seconds",
        summary.total_elapsed_seconds
    ));
    lines.push(format!("Total wall-clock time: {:.1} seconds", wall_clock.as_secs_f64()));
    lines.join("\n")
}
