//! Classified upload batches and their outcome.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::file::FileRecord;
use crate::folder::Folder;

use super::source::LocalFile;

/// A classified selection, alive only while its upload runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBatch {
    /// Independent files uploaded into the current scope.
    Files(Vec<LocalFile>),
    /// A picked directory whose files were already resolved.
    Directory {
        /// Name of the folder to create.
        name: String,
        /// Flattened files.
        files: Vec<LocalFile>,
    },
    /// A dropped directory whose entries still have to be enumerated.
    DroppedDirectory {
        /// Name of the folder to create.
        name: String,
        /// Directory to traverse.
        root: PathBuf,
    },
}

impl UploadBatch {
    /// Name of the folder this batch creates, if it is a directory batch.
    pub fn folder_name(&self) -> Option<&str> {
        match self {
            Self::Files(_) => None,
            Self::Directory { name, .. } | Self::DroppedDirectory { name, .. } => Some(name),
        }
    }
}

/// One file that could not be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailure {
    /// The file's display name.
    pub name: String,
    /// Where it was read from.
    pub path: PathBuf,
    /// Why it failed.
    pub error: String,
}

/// Outcome of a completed upload batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadReport {
    /// The folder created for a directory batch.
    pub folder: Option<Folder>,
    /// Records created, in upload order.
    pub uploaded: Vec<FileRecord>,
    /// Files that failed, in upload order.
    pub failed: Vec<UploadFailure>,
}

impl UploadReport {
    /// Number of files attempted.
    pub fn attempted(&self) -> usize {
        self.uploaded.len() + self.failed.len()
    }

    /// Whether every attempted file made it.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}
