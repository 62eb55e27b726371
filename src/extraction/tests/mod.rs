use crate::error::ArchiveError;
use crate::extraction::*;
use std::io::{Cursor, Write};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build an in-memory ZIP archive from (name, content) pairs
fn build_zip(files: &[(&str, &[u8])], method: ::zip::CompressionMethod) -> Vec<u8> {
    let mut writer = ::zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = ::zip::write::FileOptions::default().compression_method(method);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn stored(files: &[(&str, &[u8])]) -> Vec<u8> {
    build_zip(files, ::zip::CompressionMethod::Stored)
}

#[test]
fn test_extract_member_found() {
    let archive = stored(&[("export.bin", b"payload bytes")]);
    let content = ZipExtractor::extract_member(&archive, "export.bin").unwrap();
    assert_eq!(content.as_deref(), Some(&b"payload bytes"[..]));
}

#[test]
fn test_extract_member_ignores_other_members() {
    let archive = stored(&[
        ("export.sig", b"signature"),
        ("export.bin", b"keys"),
        ("README", b"ignored"),
    ]);
    let content = ZipExtractor::extract_member(&archive, "export.bin").unwrap();
    assert_eq!(content.unwrap(), b"keys");
}

#[test]
fn test_extract_member_missing_is_none() {
    let archive = stored(&[("export.sig", b"signature")]);
    let content = ZipExtractor::extract_member(&archive, "export.bin").unwrap();
    assert!(content.is_none());
}

#[test]
fn test_extract_member_requires_exact_name() {
    let archive = stored(&[("EXPORT.BIN", b"a"), ("dir/export.bin", b"b")]);
    assert!(
        ZipExtractor::extract_member(&archive, "export.bin")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_extract_member_deflated() {
    let content = vec![b'k'; 4096];
    let archive = build_zip(
        &[("export.bin", &content)],
        ::zip::CompressionMethod::Deflated,
    );
    assert!(archive.len() < content.len());

    let extracted = ZipExtractor::extract_member(&archive, "export.bin")
        .unwrap()
        .unwrap();
    assert_eq!(extracted, content);
}

#[test]
fn test_extract_member_empty_member() {
    let archive = stored(&[("export.bin", b"")]);
    let content = ZipExtractor::extract_member(&archive, "export.bin").unwrap();
    assert_eq!(content, Some(Vec::new()));
}

#[test]
fn test_extract_member_corrupt_container() {
    let err = ZipExtractor::extract_member(b"this is not a zip archive", "export.bin").unwrap_err();
    match err {
        ArchiveError::Corrupt { reason } => assert!(reason.contains("failed to read ZIP archive")),
    }
}

#[test]
fn test_extract_member_empty_input_is_corrupt() {
    assert!(ZipExtractor::extract_member(&[], "export.bin").is_err());
}

#[test]
fn test_extract_member_truncated_container() {
    let archive = stored(&[("export.bin", b"some content here")]);
    let truncated = &archive[..archive.len() / 2];
    assert!(matches!(
        ZipExtractor::extract_member(truncated, "export.bin"),
        Err(ArchiveError::Corrupt { .. })
    ));
}

#[test]
fn test_member_names_lists_every_entry() {
    let archive = stored(&[("export.bin", b"a"), ("export.sig", b"b")]);
    let mut names = ZipExtractor::member_names(&archive).unwrap();
    names.sort();
    assert_eq!(names, vec!["export.bin".to_string(), "export.sig".to_string()]);
}
