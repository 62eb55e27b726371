//! Configuration types for tek-stats

use crate::error::{Error, Result};
use crate::types::BatchId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for a statistics run
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the key distribution server (default: "https://get.immuni.gov.it")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds on the wire (default: 30)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// Archive member holding the binary export (default: "export.bin")
    #[serde(default = "default_export_member")]
    pub export_member: String,

    /// Rolling period every key is expected to carry (default: 144)
    #[serde(default = "default_rolling_period")]
    pub expected_rolling_period: i32,

    /// Keys uploaded per positive report, used for the report estimate (default: 14)
    #[serde(default = "default_keys_per_report")]
    pub keys_per_report: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout: default_request_timeout(),
            export_member: default_export_member(),
            expected_rolling_period: default_rolling_period(),
            keys_per_report: default_keys_per_report(),
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_json::from_slice(&content).map_err(|e| Error::Config {
            message: format!("invalid config file '{}': {}", path.display(), e),
            key: None,
        })?;
        Ok(config)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| Error::config("base_url", format!("invalid base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                "base_url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.export_member.is_empty() {
            return Err(Error::config("export_member", "member name is empty"));
        }
        if self.keys_per_report == 0 {
            return Err(Error::config("keys_per_report", "must be greater than zero"));
        }
        Ok(())
    }

    /// URL of the batch index
    pub fn index_url(&self) -> String {
        format!("{}/v1/keys/index", self.base_url.trim_end_matches('/'))
    }

    /// URL of a single batch archive
    pub fn batch_url(&self, id: BatchId) -> String {
        format!("{}/v1/keys/{}", self.base_url.trim_end_matches('/'), id)
    }
}

fn default_base_url() -> String {
    "https://get.immuni.gov.it".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_export_member() -> String {
    "export.bin".to_string()
}

fn default_rolling_period() -> i32 {
    144
}

fn default_keys_per_report() -> u64 {
    14
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
