//! Zip archive listing straight from the central directory.

use std::io::Cursor;

use zip::ZipArchive;

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;

use super::content::ArchiveEntry;

/// List up to `limit` entries and return them with the archive's total
/// entry count. Entry data is never decompressed.
pub fn list_entries(bytes: &[u8], limit: usize) -> AppResult<(Vec<ArchiveEntry>, usize)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::with_source(ErrorKind::Preview, "Failed to open archive", e))?;

    let total = archive.len();
    let mut entries = Vec::with_capacity(total.min(limit));
    for index in 0..total.min(limit) {
        let entry = archive.by_index_raw(index).map_err(|e| {
            AppError::with_source(
                ErrorKind::Preview,
                format!("Failed to read archive entry {index}"),
                e,
            )
        })?;
        entries.push(ArchiveEntry {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
        });
    }

    Ok((entries, total))
}
