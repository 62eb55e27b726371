//! Core types for batch identifiers, run metadata and aggregated statistics

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Identifier of a published key batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub i64);

impl BatchId {
    /// Create a new BatchId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BatchId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<BatchId> for i64 {
    fn from(id: BatchId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for BatchId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BatchId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Published batch range, as served by the `/v1/keys/index` endpoint
///
/// Missing fields default to zero, so a partially filled index can still
/// describe an inverted range. Call [`Metadata::validate`] before iterating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Oldest batch still published (inclusive)
    #[serde(rename = "Oldest", default)]
    pub oldest: i64,
    /// Newest batch published (inclusive)
    #[serde(rename = "Newest", default)]
    pub newest: i64,
}

impl Metadata {
    /// Create metadata for the inclusive range `[oldest, newest]`
    pub fn new(oldest: i64, newest: i64) -> Self {
        Self { oldest, newest }
    }

    /// Reject inverted ranges
    pub fn validate(&self) -> Result<()> {
        if self.oldest > self.newest {
            return Err(Error::InvalidRange {
                oldest: self.oldest,
                newest: self.newest,
            });
        }
        Ok(())
    }

    /// Batch identifiers in strictly ascending order
    ///
    /// Empty when the range is inverted.
    pub fn batch_ids(&self) -> impl Iterator<Item = BatchId> + use<> {
        RangeInclusive::new(self.oldest, self.newest).map(BatchId)
    }

    /// Number of batches in the range (0 when inverted)
    ///
    /// Saturates at `u64::MAX` for a range spanning all of `i64`.
    pub fn batch_count(&self) -> u64 {
        if self.oldest > self.newest {
            0
        } else {
            self.newest.abs_diff(self.oldest).saturating_add(1)
        }
    }

    /// Whether `id` is the first batch of the range
    pub fn is_oldest(&self, id: BatchId) -> bool {
        id == self.oldest
    }

    /// Whether `id` is the last batch of the range
    pub fn is_newest(&self, id: BatchId) -> bool {
        id == self.newest
    }
}

/// Outcome of validating a single key
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the key satisfied every check
    pub ok: bool,
    /// Why the key was flagged
    pub reason: Option<String>,
}

impl ValidationResult {
    /// A passing result
    pub fn pass() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    /// A flagged result
    pub fn flag(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

/// Statistics for one decoded batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// The batch this report describes
    pub batch: BatchId,
    /// Start of the batch's key window
    pub start: DateTime<Utc>,
    /// End of the batch's key window
    pub end: DateTime<Utc>,
    /// Number of keys in the batch
    pub key_count: u64,
    /// Keys flagged by validation (still counted in `key_count`)
    pub anomalies: u64,
    /// Region the batch was published for
    pub region: Option<String>,
    /// Position of this export within a multi-file batch
    pub batch_num: Option<i32>,
    /// Number of exports in a multi-file batch
    pub batch_size: Option<i32>,
}

impl BatchReport {
    /// Size of the batch window in hours
    pub fn window_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// Result of one pass through the per-batch stages
///
/// Fatal outcomes are carried by the `Err` side of [`Result`].
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The export was decoded and validated
    Processed(BatchReport),
    /// Nothing to process for this batch
    Skipped {
        /// The batch that was skipped
        batch: BatchId,
        /// Why it was skipped
        reason: String,
    },
}

impl BatchOutcome {
    /// The batch this outcome belongs to
    pub fn batch(&self) -> BatchId {
        match self {
            BatchOutcome::Processed(report) => report.batch,
            BatchOutcome::Skipped { batch, .. } => *batch,
        }
    }
}

/// Whole days and remaining hours of a time span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    /// Whole days
    pub days: i64,
    /// Remaining whole hours (0..24 for positive spans)
    pub hours: i64,
}

impl From<chrono::Duration> for TimeWindow {
    fn from(span: chrono::Duration) -> Self {
        let hours = span.num_hours();
        Self {
            days: hours / 24,
            hours: hours % 24,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d {}h", self.days, self.hours)
    }
}

/// Totals accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Keys across all processed batches
    pub total_keys: u64,
    /// Start of the oldest batch, if it was processed
    pub first_timestamp: Option<DateTime<Utc>>,
    /// End of the newest batch, if it was processed
    pub last_timestamp: Option<DateTime<Utc>>,
    /// Batches whose export was decoded
    pub batches_processed: u64,
    /// Batches without an export member
    pub batches_skipped: u64,
    /// Keys flagged by validation
    pub anomalies: u64,
}

impl RunSummary {
    /// Fold one batch outcome into the totals
    ///
    /// The first timestamp only ever comes from the batch at `oldest` and the
    /// last timestamp only from the batch at `newest`.
    pub fn record(&mut self, metadata: &Metadata, outcome: &BatchOutcome) {
        match outcome {
            BatchOutcome::Processed(report) => {
                self.total_keys += report.key_count;
                self.anomalies += report.anomalies;
                self.batches_processed += 1;
                if metadata.is_oldest(report.batch) {
                    self.first_timestamp = Some(report.start);
                }
                if metadata.is_newest(report.batch) {
                    self.last_timestamp = Some(report.end);
                }
            }
            BatchOutcome::Skipped { .. } => {
                self.batches_skipped += 1;
            }
        }
    }

    /// Estimated number of distinct reports (integer division)
    pub fn estimated_reports(&self, keys_per_report: u64) -> u64 {
        self.total_keys.checked_div(keys_per_report).unwrap_or(0)
    }

    /// Span from the oldest batch's start to the newest batch's end
    ///
    /// `None` when either end of the range was skipped.
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => Some(TimeWindow::from(last - first)),
            _ => None,
        }
    }
}
