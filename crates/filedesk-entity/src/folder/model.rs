//! Folder entity model.

use serde::{Deserialize, Serialize};

use filedesk_core::types::FolderId;

/// A folder as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root-level folders).
    #[serde(default)]
    pub parent_folder: Option<FolderId>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_folder.is_none()
    }
}

/// Body of a create-folder request.
///
/// `parent_folder` is omitted entirely for root-level folders rather than
/// sent as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<FolderId>,
}

impl CreateFolder {
    /// Build a create request for `name` under `parent`.
    pub fn new(name: impl Into<String>, parent_folder: Option<FolderId>) -> Self {
        Self {
            name: name.into(),
            parent_folder,
        }
    }
}
