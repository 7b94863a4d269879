//! # Client configuration.
//!
//! Provides [`Config`], the settings a [`Notificare`](crate::Notificare) context is
//! built from. It can be written in code or loaded from the services JSON document
//! shipped with an application:
//!
//! ```json
//! {
//!   "applicationKey": "...",
//!   "applicationSecret": "...",
//!   "language": "en",
//!   "teardownTimeoutMs": 5000
//! }
//! ```
//!
//! ## Sentinel values
//! - `teardown_timeout = 0s` → no timeout (each service teardown runs to completion)

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::ConfigError;

/// Configuration of a notificare context.
///
/// ## Field semantics
/// - `application_key` / `application_secret`: credentials sent with every snapshot fetch (required)
/// - `language` / `region`: preferences recorded on a newly created device identity
/// - `teardown_timeout`: per-service bound during `unlaunch()` (`0s` = unbounded)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Application key.
    pub application_key: String,

    /// Application secret.
    pub application_secret: String,

    /// Preferred language of the device.
    #[serde(default)]
    pub language: Option<String>,

    /// Preferred region of the device.
    #[serde(default)]
    pub region: Option<String>,

    /// Maximum time a single service teardown may take.
    ///
    /// A teardown exceeding it is logged and treated as a tolerated failure;
    /// the remaining teardown steps still run.
    #[serde(default, rename = "teardownTimeoutMs", deserialize_with = "millis")]
    pub teardown_timeout: Duration,
}

impl Config {
    /// Configuration with the given credentials and defaults elsewhere.
    pub fn new(application_key: impl Into<String>, application_secret: impl Into<String>) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a services document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates the services document at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks that the credentials are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_key.trim().is_empty() {
            return Err(ConfigError::MissingApplicationKey);
        }
        if self.application_secret.trim().is_empty() {
            return Err(ConfigError::MissingApplicationSecret);
        }
        Ok(())
    }

    /// Returns the per-service teardown bound as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → each teardown is bounded by `d`
    #[inline]
    pub fn teardown_timeout(&self) -> Option<Duration> {
        if self.teardown_timeout == Duration::ZERO {
            None
        } else {
            Some(self.teardown_timeout)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - empty credentials (must be set before building a context)
    /// - no language/region preference
    /// - `teardown_timeout = 0s` (no timeout)
    fn default() -> Self {
        Self {
            application_key: String::new(),
            application_secret: String::new(),
            language: None,
            region: None,
            teardown_timeout: Duration::ZERO,
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_services_document() {
        let cfg = Config::from_json_str(
            r#"{ "applicationKey": "key", "applicationSecret": "secret", "language": "pt", "teardownTimeoutMs": 250 }"#,
        )
        .unwrap();

        assert_eq!(cfg.application_key, "key");
        assert_eq!(cfg.language.as_deref(), Some("pt"));
        assert_eq!(cfg.teardown_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let cfg = Config::new("key", "secret");
        assert_eq!(cfg.teardown_timeout(), None);
    }

    #[test]
    fn rejects_missing_credentials() {
        let err = Config::from_json_str(r#"{ "applicationKey": " ", "applicationSecret": "s" }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingApplicationKey));

        let err = Config::new("key", "").validate().unwrap_err();
        assert_eq!(err.as_label(), "config_missing_application_secret");
    }

    #[test]
    fn rejects_malformed_document() {
        let err = Config::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn reports_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.as_label(), "config_read_failed");
    }
}
