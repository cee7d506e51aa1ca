//! Cost report loading
//!
//! Reads a report from a JSON file, or falls back to a built-in sample so
//! the tool can run without any input.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::CostReport;

/// Load a report from `path`, or the built-in sample when no path is given
///
/// I/O and JSON errors are returned as-is; there is no fallback once a path
/// has been supplied.
pub fn load_report(path: Option<&Path>) -> Result<CostReport> {
    let Some(path) = path else {
        debug!("No input file given, using built-in cost data");
        return Ok(mock_report());
    };

    let file = File::open(path)?;
    let report: CostReport = serde_json::from_reader(BufReader::new(file))?;

    debug!(path = %path.display(), entries = report.len(), "Loaded cost report");

    Ok(report)
}

/// Built-in sample: one day over the default threshold, one under
pub fn mock_report() -> CostReport {
    CostReport::from_pairs([("2025-11-09", "650.00"), ("2025-11-10", "400.00")])
}
