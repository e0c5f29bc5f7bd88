//! Upload request model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

/// One multipart upload: the local file plus the metadata fields the
/// backend expects next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    /// Local file whose bytes are streamed as the `file` part.
    pub path: PathBuf,
    /// `file_name` form field.
    pub file_name: String,
    /// `file_type` form field; never empty.
    pub file_type: String,
    /// `file_size` form field.
    pub file_size: u64,
    /// `folder` form field, omitted for root.
    pub folder: Option<FolderId>,
}
