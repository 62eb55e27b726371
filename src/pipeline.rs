//! Batch aggregation pipeline
//!
//! For every batch in the published range, in ascending order and one at a
//! time: fetch → extract → decode → validate → accumulate. Any fatal error
//! ends the run without a summary; a batch without an export member is
//! skipped.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::decode_export;
use crate::extraction::ZipExtractor;
use crate::fetcher::{BatchFetcher, Transport};
use crate::types::{BatchId, BatchOutcome, BatchReport, Metadata, RunSummary};
use crate::validation::KeyValidator;
use tracing::{debug, info, warn};

/// Drives a full statistics run against one key server
pub struct Pipeline<T> {
    fetcher: BatchFetcher<T>,
    validator: KeyValidator,
}

impl<T: Transport> Pipeline<T> {
    /// Create a pipeline fetching through `transport`
    pub fn new(transport: T, config: Config) -> Self {
        let validator = KeyValidator::new(config.expected_rolling_period);
        Self {
            fetcher: BatchFetcher::new(transport, config),
            validator,
        }
    }

    /// The run configuration
    pub fn config(&self) -> &Config {
        self.fetcher.config()
    }

    /// Fetch the batch index and process every published batch
    pub async fn run(&self) -> Result<RunSummary> {
        let metadata = self.fetcher.fetch_metadata().await?;
        self.run_range(&metadata).await
    }

    /// Process the batches of an already known range
    ///
    /// An inverted range is rejected before anything is fetched.
    pub async fn run_range(&self, metadata: &Metadata) -> Result<RunSummary> {
        metadata.validate()?;

        info!(
            oldest = metadata.oldest,
            newest = metadata.newest,
            batches = metadata.batch_count(),
            "processing batch range"
        );

        let mut summary = RunSummary::default();
        for id in metadata.batch_ids() {
            let outcome = self.process_batch(id).await?;
            if let BatchOutcome::Skipped { reason, .. } = &outcome {
                debug!(batch = %outcome.batch(), %reason, "batch contributed no keys");
            }
            summary.record(metadata, &outcome);
        }

        info!(
            total_keys = summary.total_keys,
            batches_processed = summary.batches_processed,
            batches_skipped = summary.batches_skipped,
            anomalies = summary.anomalies,
            "run complete"
        );
        Ok(summary)
    }

    /// Fetch, extract, decode and validate a single batch
    pub async fn process_batch(&self, id: BatchId) -> Result<BatchOutcome> {
        let archive = self.fetcher.fetch_batch(id).await?;

        let member = &self.config().export_member;
        let payload = ZipExtractor::extract_member(&archive, member)
            .map_err(|source| Error::Archive { batch: id, source })?;
        drop(archive);

        let Some(payload) = payload else {
            warn!(batch = %id, member = %member, "no export member in batch, skipping");
            return Ok(BatchOutcome::Skipped {
                batch: id,
                reason: format!("archive has no {}", member),
            });
        };

        let record =
            decode_export(&payload).map_err(|source| Error::Decode { batch: id, source })?;
        debug!(
            batch = %id,
            keys = record.keys.len(),
            revised_keys = record.revised_keys.len(),
            signatures = record.signature_count,
            "export decoded"
        );

        let anomalies = self.validator.validate_all(id, &record.keys);

        let report = BatchReport {
            batch: id,
            start: record.start,
            end: record.end,
            key_count: record.keys.len() as u64,
            anomalies,
            region: record.region,
            batch_num: record.batch_num,
            batch_size: record.batch_size,
        };
        log_report(&report);
        Ok(BatchOutcome::Processed(report))
    }
}

fn log_report(report: &BatchReport) {
    info!("======== BEGIN Key Batch {:>4} ========", report.batch);
    info!(batch = %report.batch, "batch start timestamp: {}", report.start);
    info!(batch = %report.batch, "batch end timestamp: {}", report.end);
    info!(batch = %report.batch, "time window size: {:.1} hours", report.window_hours());
    info!(
        batch = %report.batch,
        key_count = report.key_count,
        region = report.region.as_deref().unwrap_or("-"),
        "number of keys: {}",
        report.key_count
    );
    info!("======== END Key Batch {:>4} ========", report.batch);
}
