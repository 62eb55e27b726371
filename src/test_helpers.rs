//! Shared test helpers: an in-memory transport and batch archive builders.

use crate::error::{Error, Result};
use crate::export::{EXPORT_HEADER, TemporaryExposureKey, TemporaryExposureKeyExport};
use crate::fetcher::Transport;
use async_trait::async_trait;
use prost::Message;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Mutex;

/// Serves fixed bodies by URL and records every request in order.
/// Unknown URLs answer with HTTP 404.
#[derive(Default)]
pub(crate) struct MemoryTransport {
    routes: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, url: &str, body: &[u8]) -> Self {
        self.routes.insert(url.to_string(), body.to_vec());
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.routes.get(url).cloned().ok_or_else(|| Error::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Header + protobuf body for an export with one key per rolling period
pub(crate) fn export_payload(start: u64, end: u64, rolling_periods: &[i32]) -> Vec<u8> {
    let export = TemporaryExposureKeyExport {
        start_timestamp: Some(start),
        end_timestamp: Some(end),
        region: Some("222".to_string()),
        batch_num: Some(1),
        batch_size: Some(1),
        keys: rolling_periods
            .iter()
            .map(|&period| TemporaryExposureKey {
                key_data: Some(vec![0x5a; 16]),
                rolling_start_interval_number: Some(2_833_200),
                rolling_period: Some(period),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    let mut bytes = EXPORT_HEADER.to_vec();
    bytes.extend(export.encode_to_vec());
    bytes
}

/// In-memory ZIP archive holding the given members
pub(crate) fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ::zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        ::zip::write::FileOptions::default().compression_method(::zip::CompressionMethod::Deflated);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A batch archive with `export.bin` and a placeholder `export.sig`
pub(crate) fn batch_archive(start: u64, end: u64, rolling_periods: &[i32]) -> Vec<u8> {
    zip_archive(&[
        ("export.bin", &export_payload(start, end, rolling_periods)),
        ("export.sig", b"signature"),
    ])
}
