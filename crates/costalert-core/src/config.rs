//! Configuration management for CostAlert
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `COSTALERT_*` environment variables (`__` separates sections, e.g.
//! `COSTALERT_ALERTING__THRESHOLD=750`).

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "COSTALERT";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Alerting configuration
    pub alerting: AlertingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Build the layered configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], reading environment overrides from `env`
    /// instead of the process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(Error::config(format!(
                "unknown log format '{other}' (expected 'pretty' or 'json')"
            ))),
        }
    }
}

/// Alerting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertingConfig {
    /// Daily cost above which an alert is raised
    pub threshold: f64,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self { threshold: 500.0 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with_env(None, env(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.alerting.threshold, 500.0);
    }

    #[test]
    fn test_file_then_env_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[alerting]\nthreshold = 750.0\n\n[logging]\nlevel = \"debug\"").unwrap();

        let from_file = Config::load_with_env(Some(file.path()), env(&[])).unwrap();
        assert_eq!(from_file.alerting.threshold, 750.0);
        assert_eq!(from_file.logging.level, "debug");
        assert_eq!(from_file.logging.format, "pretty");

        let overridden = Config::load_with_env(
            Some(file.path()),
            env(&[("COSTALERT_ALERTING__THRESHOLD", "1000")]),
        )
        .unwrap();
        assert_eq!(overridden.alerting.threshold, 1000.0);
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = Config::load_with_env(None, env(&[("COSTALERT_LOGGING__FORMAT", "xml")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
