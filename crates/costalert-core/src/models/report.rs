//! Cost report data models
//!
//! Mirrors the `ResultsByTime` part of a Cost Explorer `GetCostAndUsage`
//! response. Every level below `ResultsByTime` is decoded on its own: a
//! missing or wrongly typed value makes only its entry unusable, never the
//! whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A cost report: one entry per time period, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    /// Cost entries by time period
    #[serde(rename = "ResultsByTime", default)]
    pub results_by_time: Vec<Decoded<TimePeriodEntry>>,
}

impl CostReport {
    /// Build a report from `(start_date, amount)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            results_by_time: pairs
                .into_iter()
                .map(|(start, amount)| Decoded::Valid(TimePeriodEntry::new(start, amount)))
                .collect(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.results_by_time.len()
    }

    /// Whether the report has no entries
    pub fn is_empty(&self) -> bool {
        self.results_by_time.is_empty()
    }
}

/// A value that decoded into `T`, or the raw JSON that did not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded<T> {
    /// Decoded successfully
    Valid(T),
    /// Present, but not the expected shape
    Invalid(Value),
}

impl<T> Decoded<T> {
    /// The decoded value, if any
    pub fn valid(&self) -> Option<&T> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Decoded<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(match T::deserialize(&raw) {
            Ok(value) => Self::Valid(value),
            Err(_) => Self::Invalid(raw),
        })
    }
}

/// Why a value could not be read from an entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError<'a> {
    /// The key is absent (or null)
    Missing(&'static str),
    /// The key holds a value of the wrong type
    WrongType(&'static str, &'a Value),
}

/// Cost for a single time period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriodEntry {
    /// Period covered by this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<Decoded<TimePeriod>>,

    /// Aggregated cost metrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decoded<Total>>,
}

/// Period boundaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimePeriod {
    /// Calendar date the period starts on (e.g. "2025-11-09"); non-string
    /// scalars are kept as their JSON text
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<String>,
}

/// Cost metrics for a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Total {
    /// Unblended cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unblended_cost: Option<Decoded<MetricValue>>,
}

/// A single cost metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricValue {
    /// Decimal amount as text; other JSON values are kept as their JSON
    /// text and fail to parse later
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<String>,
}

impl TimePeriodEntry {
    /// Create a well-formed entry
    pub fn new(start: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            time_period: Some(Decoded::Valid(TimePeriod {
                start: Some(start.into()),
            })),
            total: Some(Decoded::Valid(Total {
                unblended_cost: Some(Decoded::Valid(MetricValue {
                    amount: Some(amount.into()),
                })),
            })),
        }
    }

    /// The amount text, or the first key on the way to it that is unusable
    pub fn amount(&self) -> Result<&str, FieldError<'_>> {
        let total = lookup(self.total.as_ref(), "Total")?;
        let cost = lookup(total.unblended_cost.as_ref(), "UnblendedCost")?;
        cost.amount.as_deref().ok_or(FieldError::Missing("Amount"))
    }

    /// The start date, or the first key on the way to it that is unusable
    pub fn start_date(&self) -> Result<&str, FieldError<'_>> {
        let period = lookup(self.time_period.as_ref(), "TimePeriod")?;
        period.start.as_deref().ok_or(FieldError::Missing("Start"))
    }
}

fn lookup<'a, T>(
    field: Option<&'a Decoded<T>>,
    key: &'static str,
) -> Result<&'a T, FieldError<'a>> {
    match field {
        None => Err(FieldError::Missing(key)),
        Some(Decoded::Valid(value)) => Ok(value),
        Some(Decoded::Invalid(raw)) => Err(FieldError::WrongType(key, raw)),
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        Value::String(text) => text,
        other => other.to_string(),
    }))
}
