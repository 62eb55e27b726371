use crate::error::ArchiveError;
use std::io::{Cursor, Read};
use tracing::debug;

/// Archive extractor for in-memory ZIP containers
pub struct ZipExtractor;

impl ZipExtractor {
    fn open(archive_bytes: &[u8]) -> Result<zip::ZipArchive<Cursor<&[u8]>>, ArchiveError> {
        zip::ZipArchive::new(Cursor::new(archive_bytes)).map_err(|e| ArchiveError::Corrupt {
            reason: format!("failed to read ZIP archive: {}", e),
        })
    }

    /// List the member names of an archive (unordered)
    pub fn member_names(archive_bytes: &[u8]) -> Result<Vec<String>, ArchiveError> {
        let archive = Self::open(archive_bytes)?;
        Ok(archive.file_names().map(str::to_string).collect())
    }

    /// Read the full content of the member named exactly `member_name`
    ///
    /// Returns `Ok(None)` when the archive is readable but has no such member.
    pub fn extract_member(
        archive_bytes: &[u8],
        member_name: &str,
    ) -> Result<Option<Vec<u8>>, ArchiveError> {
        let mut archive = Self::open(archive_bytes)?;

        debug!(
            archive_len = archive_bytes.len(),
            entries = archive.len(),
            member_name,
            "scanning archive directory"
        );

        let mut file = match archive.by_name(member_name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(ArchiveError::Corrupt {
                    reason: format!("failed to open ZIP entry '{}': {}", member_name, e),
                });
            }
        };

        // size() is only a hint from the central directory
        let mut content = Vec::with_capacity(file.size().min(64 * 1024 * 1024) as usize);
        file.read_to_end(&mut content)
            .map_err(|e| ArchiveError::Corrupt {
                reason: format!("failed to read ZIP entry '{}': {}", member_name, e),
            })?;

        debug!(member_name, member_len = content.len(), "member extracted");
        Ok(Some(content))
    }
}
