//! Error types for tek-stats
//!
//! This module provides the error handling for the library, including:
//! - Domain-specific error types (archive extraction, export decoding)
//! - Process exit code mapping for the command line entry point
//! - Context information (batch identifier, URL, offending header bytes)

use crate::types::BatchId;
use thiserror::Error;

/// Result type alias for tek-stats operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tek-stats
///
/// Every variant is fatal to a run. Advisory conditions (a missing export
/// member, an unexpected rolling period) are never represented here.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Transport failure (connection, timeout, unreadable body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("could not fetch url {url}, status code: {status}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Metadata index could not be parsed
    #[error("could not unmarshal metadata: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Metadata index describes an inverted batch range
    #[error("meta oldest cannot be > than newest (oldest {oldest}, newest {newest})")]
    InvalidRange {
        /// Oldest published batch
        oldest: i64,
        /// Newest published batch
        newest: i64,
    },

    /// Batch archive could not be read
    #[error("could not read archive for batch {batch}: {source}")]
    Archive {
        /// Batch whose archive failed
        batch: BatchId,
        /// Underlying archive failure
        #[source]
        source: ArchiveError,
    },

    /// Export payload could not be decoded
    #[error("could not decode export for batch {batch}: {source}")]
    Decode {
        /// Batch whose payload failed
        batch: BatchId,
        /// Underlying decode failure
        #[source]
        source: DecodeError,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Archive container errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The container directory or a member body is unreadable
    #[error("corrupt archive: {reason}")]
    Corrupt {
        /// The reason the archive could not be read
        reason: String,
    },
}

/// Export payload errors
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The first 16 bytes are not the export magic
    #[error("header not recognized: {}", hex::encode(.found))]
    HeaderMismatch {
        /// The leading bytes that were found (at most 16)
        found: Vec<u8>,
    },

    /// The protobuf body is malformed
    #[error("failed to unmarshal export: {0}")]
    Malformed(#[from] prost::DecodeError),

    /// A field required for aggregation is absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A timestamp does not fit a calendar instant
    #[error("timestamp {value} out of range for `{field}`")]
    TimestampOutOfRange {
        /// Which field overflowed
        field: &'static str,
        /// The raw wire value
        value: u64,
    },
}

impl Error {
    /// Create a configuration error for a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Process exit status for this error (always non-zero)
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } => 2,
            Error::Network(_) => 3,
            Error::HttpStatus { .. } => 4,
            Error::Serialization(_) => 5,
            Error::InvalidRange { .. } => 6,
            Error::Archive { .. } => 7,
            Error::Decode { .. } => 8,
            Error::Io(_) => 9,
        }
    }

    /// Machine-readable error code
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::HttpStatus { .. } => "http_status",
            Error::Serialization(_) => "metadata_malformed",
            Error::InvalidRange { .. } => "invalid_range",
            Error::Archive { source, .. } => match source {
                ArchiveError::Corrupt { .. } => "archive_corrupt",
            },
            Error::Decode { source, .. } => match source {
                DecodeError::HeaderMismatch { .. } => "header_mismatch",
                DecodeError::Malformed(_) => "decode_error",
                DecodeError::MissingField(_) => "missing_field",
                DecodeError::TimestampOutOfRange { .. } => "timestamp_out_of_range",
            },
            Error::Io(_) => "io_error",
        }
    }
}
