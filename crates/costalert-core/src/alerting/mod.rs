//! Alerting: threshold evaluation of cost reports

mod evaluator;

pub use evaluator::{check_costs, CostEvaluator, Evaluation};
