//! Per-key structural checks
//!
//! Validation is advisory: flagged keys are logged and still counted.

use crate::export::TemporaryExposureKey;
use crate::types::{BatchId, ValidationResult};
use tracing::warn;

/// Checks keys against the canonical one-day rolling period
#[derive(Debug, Clone, Copy)]
pub struct KeyValidator {
    expected_rolling_period: i32,
}

impl Default for KeyValidator {
    fn default() -> Self {
        Self::new(144)
    }
}

impl KeyValidator {
    /// Create a validator expecting `expected_rolling_period` intervals per key
    pub fn new(expected_rolling_period: i32) -> Self {
        Self {
            expected_rolling_period,
        }
    }

    /// Check a single key
    ///
    /// A key without an explicit rolling period takes the wire default (144).
    pub fn validate(&self, key: &TemporaryExposureKey) -> ValidationResult {
        if key.rolling_period() != self.expected_rolling_period {
            return ValidationResult::flag("unexpected rolling period");
        }
        ValidationResult::pass()
    }

    /// Check every key of a batch, logging each anomaly
    ///
    /// Returns the number of flagged keys.
    pub fn validate_all(&self, batch: BatchId, keys: &[TemporaryExposureKey]) -> u64 {
        let mut anomalies = 0;
        for (index, key) in keys.iter().enumerate() {
            let result = self.validate(key);
            if !result.ok {
                anomalies += 1;
                warn!(
                    %batch,
                    index,
                    rolling_period = key.rolling_period(),
                    expected = self.expected_rolling_period,
                    reason = result.reason.as_deref().unwrap_or_default(),
                    "!! key with rolling period != {} !!",
                    self.expected_rolling_period
                );
            }
        }
        anomalies
    }
}
