//! Alert data models

use std::fmt;

use serde::Serialize;

/// A time period whose cost exceeded the threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// Parsed cost for the period
    pub amount: f64,

    /// Start date exactly as it appeared in the input
    pub start_date: String,
}

impl Alert {
    /// Create a new alert
    pub fn new(amount: f64, start_date: impl Into<String>) -> Self {
        Self {
            amount,
            start_date: start_date.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALERT: High cost ${} on {}",
            decimal_repr(self.amount),
            self.start_date
        )
    }
}

/// Shortest round-trip decimal form of `value`
///
/// `{:?}` already keeps a fractional part (`650.0`) and switches to an
/// exponent below 1e-4 and from 1e16 up; the exponent is then written
/// signed and at least two digits wide (`1e+16`, `1.5e-07`).
fn decimal_repr(value: f64) -> String {
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(650.0, "ALERT: High cost $650.0 on 2025-11-09")]
    #[case(1234.5, "ALERT: High cost $1234.5 on 2025-11-09")]
    #[case(500.01, "ALERT: High cost $500.01 on 2025-11-09")]
    #[case(0.0001, "ALERT: High cost $0.0001 on 2025-11-09")]
    #[case(0.00001, "ALERT: High cost $1e-05 on 2025-11-09")]
    #[case(1.5e-7, "ALERT: High cost $1.5e-07 on 2025-11-09")]
    #[case(1e15, "ALERT: High cost $1000000000000000.0 on 2025-11-09")]
    #[case(1e16, "ALERT: High cost $1e+16 on 2025-11-09")]
    #[case(1.2345e20, "ALERT: High cost $1.2345e+20 on 2025-11-09")]
    #[case(1e100, "ALERT: High cost $1e+100 on 2025-11-09")]
    #[case(f64::INFINITY, "ALERT: High cost $inf on 2025-11-09")]
    fn test_alert_message(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(Alert::new(amount, "2025-11-09").to_string(), expected);
    }
}
