//! # CostAlert
//!
//! Threshold alerts for daily cloud billing costs.
//!
//! CostAlert reads the `ResultsByTime` section of a Cost Explorer cost
//! report and flags every time period whose unblended cost exceeds a
//! threshold. Malformed entries are reported and skipped.
//!
//! ## Architecture
//!
//! - **Loader**: JSON file or built-in sample report
//! - **Alerting**: single pass threshold evaluation
//! - **Runner**: load, evaluate and render output lines
//!
//! ## Quick Start
//!
//! ```bash
//! # Check the built-in sample against the default threshold (500)
//! costalert
//!
//! # Check an exported report
//! costalert --file costs.json --threshold 750
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod runner;

pub use config::Config;
pub use error::{Error, RecordError, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{check_costs, CostEvaluator, Evaluation};
    pub use crate::config::Config;
    pub use crate::error::{Error, RecordError, Result};
    pub use crate::loader::{load_report, mock_report};
    pub use crate::models::*;
    pub use crate::runner::{run, RunOutput};
}
