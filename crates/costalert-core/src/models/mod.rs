//! Data models for CostAlert

mod alert;
mod report;

pub use alert::*;
pub use report::*;
