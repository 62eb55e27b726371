//! Batch archive and export payload generators

use prost::Message;
use std::io::{Cursor, Write};
use tek_stats::export::{EXPORT_HEADER, TemporaryExposureKey, TemporaryExposureKeyExport};

/// Encoded export (header + protobuf) with one key per rolling period
pub fn export_payload(start: u64, end: u64, rolling_periods: &[i32]) -> Vec<u8> {
    let export = TemporaryExposureKeyExport {
        start_timestamp: Some(start),
        end_timestamp: Some(end),
        region: Some("222".to_string()),
        batch_num: Some(1),
        batch_size: Some(1),
        keys: rolling_periods
            .iter()
            .enumerate()
            .map(|(i, &period)| TemporaryExposureKey {
                key_data: Some(vec![i as u8; 16]),
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

/// ZIP archive holding the given members
pub fn zip_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Batch archive as published by a key server: `export.bin` + `export.sig`
pub fn batch_archive(start: u64, end: u64, rolling_periods: &[i32]) -> Vec<u8> {
    zip_archive(&[
        ("export.bin", &export_payload(start, end, rolling_periods)),
        ("export.sig", b"signature"),
    ])
}
