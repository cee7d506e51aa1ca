//! Cost threshold evaluation

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::RecordError;
use crate::models::{Alert, CostReport, Decoded, FieldError, TimePeriodEntry};

/// Outcome of one pass over a report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evaluation {
    /// Alerts in input order
    pub alerts: Vec<Alert>,
    /// Entries that were skipped, in input order
    pub diagnostics: Vec<RecordError>,
}

impl Evaluation {
    /// Whether any period exceeded the threshold
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    /// Alert messages in input order
    pub fn alert_lines(&self) -> Vec<String> {
        self.alerts.iter().map(ToString::to_string).collect()
    }
}

/// Compares each period's cost against a fixed threshold
#[derive(Debug, Clone, Copy)]
pub struct CostEvaluator {
    threshold: f64,
}

impl CostEvaluator {
    /// Create an evaluator
    ///
    /// A NaN threshold is accepted; no amount compares greater than it, so
    /// it never alerts.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check whether a cost triggers an alert
    pub fn check(&self, amount: f64) -> bool {
        amount > self.threshold
    }

    /// Evaluate every entry of a report
    ///
    /// Malformed entries are skipped and recorded as diagnostics; they
    /// never stop the pass.
    pub fn evaluate(&self, report: &CostReport) -> Evaluation {
        let mut evaluation = Evaluation::default();

        for (index, entry) in report.results_by_time.iter().enumerate() {
            let outcome = match entry {
                Decoded::Valid(entry) => self.evaluate_entry(index, entry),
                Decoded::Invalid(raw) => {
                    Err(RecordError::wrong_type(index, "ResultsByTime", raw))
                }
            };
            match outcome {
                Ok(Some(alert)) => evaluation.alerts.push(alert),
                Ok(None) => {}
                Err(e) => {
                    warn!(index, error = %e, "Skipping cost entry");
                    evaluation.diagnostics.push(e);
                }
            }
        }

        debug!(
            entries = report.len(),
            alerts = evaluation.alerts.len(),
            skipped = evaluation.diagnostics.len(),
            threshold = self.threshold,
            "Evaluated cost report"
        );

        evaluation
    }

    fn evaluate_entry(
        &self,
        index: usize,
        entry: &TimePeriodEntry,
    ) -> std::result::Result<Option<Alert>, RecordError> {
        // Amount is resolved before the date.
        let text = entry.amount().map_err(|e| field_error(index, e))?;
        let amount: f64 = text
            .trim()
            .parse()
            .map_err(|_| RecordError::invalid_number(index, text))?;
        let start_date = entry.start_date().map_err(|e| field_error(index, e))?;

        if self.check(amount) {
            Ok(Some(Alert::new(amount, start_date)))
        } else {
            Ok(None)
        }
    }
}

fn field_error(index: usize, error: FieldError<'_>) -> RecordError {
    match error {
        FieldError::Missing(key) => RecordError::missing(index, key),
        FieldError::WrongType(key, found) => RecordError::wrong_type(index, key, found),
    }
}

/// Alert messages for every period whose cost exceeds `threshold`
///
/// Diagnostics for malformed entries are logged and otherwise dropped; use
/// [`CostEvaluator::evaluate`] to keep them.
pub fn check_costs(report: &CostReport, threshold: f64) -> Vec<String> {
    CostEvaluator::new(threshold).evaluate(report).alert_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn evaluate(report: &CostReport, threshold: f64) -> Evaluation {
        CostEvaluator::new(threshold).evaluate(report)
    }

    fn report(results: serde_json::Value) -> CostReport {
        serde_json::from_value(json!({ "ResultsByTime": results })).unwrap()
    }

    #[rstest]
    #[case("500.01", true)]
    #[case("500.0", false)]
    #[case("500", false)]
    #[case("499.99", false)]
    #[case(" 650.00 ", true)]
    #[case("1e3", true)]
    fn test_strictly_greater_than_threshold(#[case] amount: &str, #[case] alerts: bool) {
        let report = CostReport::from_pairs([("2025-01-01", amount)]);
        assert_eq!(evaluate(&report, 500.0).has_alerts(), alerts);
    }

    #[test]
    fn test_alerts_keep_input_order() {
        let report = CostReport::from_pairs([
            ("2025-11-09", "650.00"),
            ("2025-11-10", "400.00"),
            ("2025-11-11", "900.25"),
            ("2025-11-12", "501"),
        ]);

        assert_eq!(
            evaluate(&report, 500.0).alert_lines(),
            vec![
                "ALERT: High cost $650.0 on 2025-11-09",
                "ALERT: High cost $900.25 on 2025-11-11",
                "ALERT: High cost $501.0 on 2025-11-12",
            ]
        );
    }

    #[test]
    fn test_missing_total_is_skipped() {
        let report = report(json!([
            {"TimePeriod": {"Start": "2025-11-08"}},
            {"TimePeriod": {"Start": "2025-11-09"}, "Total": {"UnblendedCost": {"Amount": "650.00"}}}
        ]));

        let evaluation = evaluate(&report, 500.0);

        assert_eq!(evaluation.diagnostics, vec![RecordError::missing(0, "Total")]);
        assert_eq!(
            evaluation.alert_lines(),
            vec!["ALERT: High cost $650.0 on 2025-11-09"]
        );
    }

    #[test]
    fn test_missing_start_is_skipped() {
        let report = report(json!([
            {"TimePeriod": {}, "Total": {"UnblendedCost": {"Amount": "900.00"}}}
        ]));

        let evaluation = evaluate(&report, 500.0);

        assert!(!evaluation.has_alerts());
        assert_eq!(evaluation.diagnostics, vec![RecordError::missing(0, "Start")]);
    }

    #[test]
    fn test_invalid_amount_is_skipped() {
        let report = CostReport::from_pairs([("2025-11-09", "abc"), ("2025-11-10", "700")]);

        let evaluation = evaluate(&report, 500.0);

        assert_eq!(
            evaluation.diagnostics,
            vec![RecordError::invalid_number(0, "abc")]
        );
        assert_eq!(
            evaluation.diagnostics[0].to_string(),
            "Error converting cost: could not convert string to float: 'abc'"
        );
        assert_eq!(
            evaluation.alert_lines(),
            vec!["ALERT: High cost $700.0 on 2025-11-10"]
        );
    }

    #[test]
    fn test_amount_checked_before_date() {
        let report = report(json!([
            {"Total": {"UnblendedCost": {"Amount": "n/a"}}}
        ]));

        assert_eq!(
            evaluate(&report, 500.0).diagnostics,
            vec![RecordError::invalid_number(0, "n/a")]
        );
    }

    #[test]
    fn test_wrongly_typed_fields_only_skip_their_entry() {
        let report = report(json!([
            {"TimePeriod": {"Start": "2025-03-02"}, "Total": {"UnblendedCost": {"Amount": "812.40"}}},
            {"TimePeriod": {"Start": 20250303}, "Total": {"UnblendedCost": {"Amount": "900"}}},
            {"TimePeriod": {"Start": "2025-03-04"}, "Total": {"UnblendedCost": {"Amount": false}}},
            {"TimePeriod": {"Start": "2025-03-05"}, "Total": "700"},
            42
        ]));

        let evaluation = evaluate(&report, 500.0);

        assert_eq!(
            evaluation.alert_lines(),
            vec![
                "ALERT: High cost $812.4 on 2025-03-02",
                "ALERT: High cost $900.0 on 20250303",
            ]
        );
        assert_eq!(
            evaluation.diagnostics,
            vec![
                RecordError::invalid_number(2, "false"),
                RecordError::wrong_type(3, "Total", &json!("700")),
                RecordError::wrong_type(4, "ResultsByTime", &json!(42)),
            ]
        );
        assert_eq!(
            evaluation.diagnostics[1].to_string(),
            "Error processing data: Unexpected value for key 'Total': \"700\""
        );
    }

    #[test]
    fn test_nan_threshold_never_alerts() {
        let report = CostReport::from_pairs([("2025-11-09", "650.00")]);

        assert!(check_costs(&report, f64::NAN).is_empty());
        assert!(evaluate(&report, f64::NAN).diagnostics.is_empty());
    }

    #[test]
    fn test_check_costs_returns_lines_only() {
        let report = CostReport::from_pairs([("2025-11-09", "650.00"), ("2025-11-10", "x")]);

        assert_eq!(
            check_costs(&report, 500.0),
            vec!["ALERT: High cost $650.0 on 2025-11-09"]
        );
    }

    proptest! {
        #[test]
        fn prop_alerts_are_the_entries_above_threshold(
            cents in prop::collection::vec(0u32..200_000, 0..20),
            threshold_cents in 0u32..200_000,
        ) {
            let dates: Vec<String> = (0..cents.len()).map(|i| format!("day-{i}")).collect();
            let amounts: Vec<String> = cents.iter().map(|c| format!("{}.{:02}", c / 100, c % 100)).collect();
            let report = CostReport::from_pairs(
                dates.iter().map(String::as_str).zip(amounts.iter().map(String::as_str)),
            );
            let threshold = f64::from(threshold_cents) / 100.0;

            let evaluation = evaluate(&report, threshold);

            let expected: Vec<&str> = dates
                .iter()
                .zip(&amounts)
                .filter(|(_, amount)| amount.parse::<f64>().unwrap() > threshold)
                .map(|(date, _)| date.as_str())
                .collect();
            let actual: Vec<&str> = evaluation.alerts.iter().map(|a| a.start_date.as_str()).collect();

            prop_assert!(evaluation.diagnostics.is_empty());
            prop_assert_eq!(actual, expected);
        }
    }
}
