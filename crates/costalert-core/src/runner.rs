//! One complete run: load, evaluate, render

use std::path::Path;

use tracing::info;

use crate::alerting::{CostEvaluator, Evaluation};
use crate::error::Result;
use crate::loader::load_report;

/// Printed when no period exceeds the threshold
pub const NO_ALERTS_MESSAGE: &str = "No high costs detected.";

/// Result of a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Structured outcome
    pub evaluation: Evaluation,
    /// Text output: diagnostics first, then alerts or the all-clear line
    pub lines: Vec<String>,
}

/// Load the report from `file` (or the built-in sample) and evaluate it
pub fn run(file: Option<&Path>, threshold: f64) -> Result<RunOutput> {
    let report = load_report(file)?;
    let evaluation = CostEvaluator::new(threshold).evaluate(&report);

    info!(
        entries = report.len(),
        alerts = evaluation.alerts.len(),
        threshold,
        "Cost check complete"
    );

    let lines = render_lines(&evaluation);
    Ok(RunOutput { evaluation, lines })
}

/// Render an evaluation as output lines
pub fn render_lines(evaluation: &Evaluation) -> Vec<String> {
    let mut lines: Vec<String> = evaluation
        .diagnostics
        .iter()
        .map(ToString::to_string)
        .collect();

    if evaluation.has_alerts() {
        lines.extend(evaluation.alert_lines());
    } else {
        lines.push(NO_ALERTS_MESSAGE.to_string());
    }

    lines
}
