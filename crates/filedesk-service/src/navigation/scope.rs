//! The selected folder, shared by listings and uploads.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use filedesk_core::types::FolderId;
use filedesk_entity::folder::Folder;

/// Cloneable handle over the currently selected folder (`None` is root).
///
/// `select` is the only way to change it; every clone observes the change.
#[derive(Debug, Clone)]
pub struct FolderScope {
    tx: Arc<watch::Sender<Option<Folder>>>,
}

impl Default for FolderScope {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderScope {
    /// Starts at root.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Make `folder` the current scope; `None` returns to root.
    pub fn select(&self, folder: Option<Folder>) {
        debug!(
            folder_id = ?folder.as_ref().map(|f| f.id),
            name = folder.as_ref().map(|f| f.name.as_str()).unwrap_or("/"),
            "Folder selected"
        );
        self.tx.send_replace(folder);
    }

    /// The selected folder.
    pub fn current(&self) -> Option<Folder> {
        self.tx.borrow().clone()
    }

    /// The selected folder's id; `None` at root.
    pub fn current_id(&self) -> Option<FolderId> {
        self.tx.borrow().as_ref().map(|f| f.id)
    }

    /// Whether the scope is root.
    pub fn is_root(&self) -> bool {
        self.tx.borrow().is_none()
    }

    /// Display label for the scope.
    pub fn label(&self) -> String {
        self.tx
            .borrow()
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "Root".to_string())
    }

    /// Receive every subsequent selection.
    pub fn subscribe(&self) -> watch::Receiver<Option<Folder>> {
        self.tx.subscribe()
    }
}
