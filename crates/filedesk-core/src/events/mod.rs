//! Drive events emitted by mutating actions.
//!
//! Every mutation that changes what the listing shows (create, delete,
//! upload batch) publishes exactly one [`DriveEvent`]; listings refresh in
//! response.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FolderId};

/// Something changed on the remote drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DriveEvent {
    /// A folder was created.
    FolderCreated {
        /// The new folder.
        folder_id: FolderId,
        /// Its parent (`None` for root).
        parent: Option<FolderId>,
    },
    /// A folder was deleted.
    FolderDeleted {
        /// The removed folder.
        folder_id: FolderId,
    },
    /// A file was deleted.
    FileDeleted {
        /// The removed file.
        file_id: FileId,
    },
    /// An upload batch finished, successfully or partially.
    UploadBatchCompleted {
        /// Folder the files landed in (`None` for root).
        target: Option<FolderId>,
        /// Number of files uploaded.
        uploaded: usize,
        /// Number of files that failed.
        failed: usize,
    },
}

impl DriveEvent {
    /// Whether the folder list (not only the file list) may have changed.
    pub fn affects_folders(&self) -> bool {
        match self {
            Self::FolderCreated { .. } | Self::FolderDeleted { .. } => true,
            Self::FileDeleted { .. } => false,
            // A directory upload creates its folder before the batch completes.
            Self::UploadBatchCompleted { .. } => true,
        }
    }
}
