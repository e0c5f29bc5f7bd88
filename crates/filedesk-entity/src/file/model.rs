//! File record model.

use serde::{Deserialize, Serialize};

use filedesk_core::types::{FileId, FolderId};

use super::kind::FileKind;

/// A file stored on the backend.
///
/// Created by a successful upload, deleted by id, immutable otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique file identifier.
    pub id: FileId,
    /// Resolved byte-source URL used for download and preview.
    #[serde(rename = "file")]
    pub source_url: String,
    /// Display name (including extension).
    pub file_name: String,
    /// Declared MIME type as sent at upload time.
    #[serde(default)]
    pub file_type: String,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    /// Creation time formatted by the backend.
    #[serde(default)]
    pub created_at_human_readable: String,
    /// Size formatted by the backend.
    #[serde(default)]
    pub file_size_human_readable: String,
    /// Owning folder (null for root).
    #[serde(default)]
    pub folder: Option<FolderId>,
}

impl FileRecord {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }

    /// Icon-style category derived from the declared MIME type.
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.file_type)
    }

    /// Whether the file lives at root level.
    pub fn is_in_root(&self) -> bool {
        self.folder.is_none()
    }
}
