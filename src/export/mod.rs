//! Binary key export decoding
//!
//! A key export is the 16-byte magic header `"EK Export v1    "` followed by a
//! protobuf-encoded [`TemporaryExposureKeyExport`].

mod decoder;
#[allow(clippy::derive_partial_eq_without_eq, missing_docs)]
mod proto;

pub use decoder::{EXPORT_HEADER, ExportRecord, decode_export};
pub use proto::{ReportType, SignatureInfo, TemporaryExposureKey, TemporaryExposureKeyExport};
