//! # tek-stats
//!
//! Statistics over published exposure-notification key exports.
//!
//! A key server publishes numbered batches, each a ZIP archive holding a
//! binary `export.bin`. This crate fetches the published batch range, decodes
//! every export, checks each key's rolling period, and aggregates:
//! - the total number of keys
//! - an estimate of distinct reports (keys / 14)
//! - the time window from the oldest batch's start to the newest batch's end
//!
//! ## Quick Start
//!
//! ```no_run
//! use tek_stats::{Config, HttpTransport, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let transport = HttpTransport::new(&config)?;
//!     let summary = Pipeline::new(transport, config).run().await?;
//!
//!     println!("total number of keys: {}", summary.total_keys);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Binary key export wire format
pub mod export;
/// Archive extraction
pub mod extraction;
/// Index and batch retrieval
pub mod fetcher;
/// Batch aggregation pipeline
pub mod pipeline;
/// Core types and statistics
pub mod types;
/// Per-key validation
pub mod validation;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use config::Config;
pub use error::{ArchiveError, DecodeError, Error, Result};
pub use export::{EXPORT_HEADER, ExportRecord, TemporaryExposureKey, decode_export};
pub use extraction::ZipExtractor;
pub use fetcher::{BatchFetcher, HttpTransport, Transport};
pub use pipeline::Pipeline;
pub use types::{
    BatchId, BatchOutcome, BatchReport, Metadata, RunSummary, TimeWindow, ValidationResult,
};
pub use validation::KeyValidator;
