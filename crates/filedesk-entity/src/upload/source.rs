//! What the user handed to the uploader.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A local file ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// Where the bytes are read from.
    pub path: PathBuf,
    /// Display name sent as `file_name`.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Detected MIME type; `None` when it could not be determined.
    pub mime_type: Option<String>,
}

impl LocalFile {
    /// Name of the file component of `path`, or `"upload"` if there is none.
    pub fn name_of(path: &Path) -> String {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string()
    }
}

/// One dropped item: a plain file or a traversable directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroppedItem {
    /// A single file.
    File(LocalFile),
    /// A directory whose entries are enumerated before uploading.
    Directory(PathBuf),
}

/// A file chosen through a picker, optionally tagged with the relative path
/// it had inside a picked directory (`Reports/2024/a.txt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedFile {
    /// The file itself.
    pub file: LocalFile,
    /// Relative path inside the picked directory, if any.
    pub relative_path: Option<String>,
}

impl PickedFile {
    /// Top-level directory segment of the relative path, when it has one.
    pub fn top_level_dir(&self) -> Option<&str> {
        let rel = self.relative_path.as_deref()?.trim_start_matches('/');
        let (head, rest) = rel.split_once('/')?;
        (!head.is_empty() && !rest.is_empty()).then_some(head)
    }
}

/// A complete selection handed to the upload orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadSource {
    /// Items dropped onto the drive.
    Dropped(Vec<DroppedItem>),
    /// Files chosen in a picker.
    Picked(Vec<PickedFile>),
}

impl UploadSource {
    /// Whether nothing at all was selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Dropped(items) => items.is_empty(),
            Self::Picked(files) => files.is_empty(),
        }
    }
}
