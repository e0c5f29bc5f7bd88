//! Listing state for the folder/file views and the actions they offer.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use filedesk_client::DriveApi;
use filedesk_core::error::AppError;
use filedesk_core::events::DriveEvent;
use filedesk_core::result::AppResult;
use filedesk_core::types::{FileId, FolderId};
use filedesk_entity::file::FileRecord;
use filedesk_entity::folder::{CreateFolder, Folder, FolderTree};
use filedesk_storage::transfer;

use crate::navigation::FolderScope;
use crate::session::SessionStore;

use super::refresh::RefreshSignal;

/// Folders and files of the current scope, refetched on demand.
pub struct DriveListing {
    /// Remote service.
    api: Arc<dyn DriveApi>,
    /// Credential source.
    session: Arc<SessionStore>,
    /// Selected folder.
    scope: FolderScope,
    /// Refresh notifications.
    refresh: RefreshSignal,
    /// Every folder the user owns.
    folders: RwLock<Vec<Folder>>,
    /// Files in the current scope.
    files: RwLock<Vec<FileRecord>>,
    /// Refresh generation the cached lists reflect.
    seen: AtomicU64,
}

impl std::fmt::Debug for DriveListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveListing")
            .field("scope", &self.scope.current_id())
            .finish()
    }
}

impl DriveListing {
    /// Creates an empty listing; call [`refresh`](Self::refresh) to fill it.
    pub fn new(
        api: Arc<dyn DriveApi>,
        session: Arc<SessionStore>,
        scope: FolderScope,
        refresh: RefreshSignal,
    ) -> Self {
        Self {
            api,
            session,
            scope,
            refresh,
            folders: RwLock::new(Vec::new()),
            files: RwLock::new(Vec::new()),
            seen: AtomicU64::new(0),
        }
    }

    /// The scope this listing follows.
    pub fn scope(&self) -> &FolderScope {
        &self.scope
    }

    /// Refetch folders and the files of the current scope.
    pub async fn refresh(&self) -> AppResult<()> {
        self.seen.store(self.refresh.generation(), Ordering::SeqCst);
        self.refresh_folders().await?;
        self.refresh_files().await
    }

    /// Refetch the folder list.
    pub async fn refresh_folders(&self) -> AppResult<()> {
        let auth = self.session.credentials().await?;
        let folders = self.api.list_folders(&auth).await?;
        *self.folders.write().await = folders;
        Ok(())
    }

    /// Refetch the files of the current scope.
    pub async fn refresh_files(&self) -> AppResult<()> {
        let auth = self.session.credentials().await?;
        let folder = self.scope.current_id();
        let files = self.api.list_files(&auth, folder).await?;
        debug!(folder = ?folder, count = files.len(), "File listing updated");
        *self.files.write().await = files;
        Ok(())
    }

    /// Refresh if a refresh was published since the last one; returns
    /// whether it did.
    pub async fn sync(&self) -> AppResult<bool> {
        if self.refresh.generation() == self.seen.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// Every folder, as last fetched.
    pub async fn folders(&self) -> Vec<Folder> {
        self.folders.read().await.clone()
    }

    /// Folders directly under the current scope.
    pub async fn subfolders(&self) -> Vec<Folder> {
        let current = self.scope.current_id();
        self.folders
            .read()
            .await
            .iter()
            .filter(|f| f.parent_folder == current)
            .cloned()
            .collect()
    }

    /// Files of the current scope, as last fetched.
    pub async fn files(&self) -> Vec<FileRecord> {
        self.files.read().await.clone()
    }

    /// Nested view of every folder.
    pub async fn folder_tree(&self) -> FolderTree {
        FolderTree::build(&self.folders.read().await)
    }

    /// Change scope and refetch its files.
    pub async fn select(&self, folder: Option<Folder>) -> AppResult<()> {
        self.scope.select(folder);
        self.refresh_files().await
    }

    /// Look a folder up by id, else by name: children of the current scope
    /// first, then anywhere.
    pub async fn find_folder(&self, query: &str) -> Option<Folder> {
        let query = query.trim();
        let folders = self.folders.read().await;

        if let Ok(id) = query.parse::<FolderId>() {
            if let Some(found) = folders.iter().find(|f| f.id == id) {
                return Some(found.clone());
            }
        }

        let current = self.scope.current_id();
        let named = |f: &&Folder| f.name.eq_ignore_ascii_case(query);
        folders
            .iter()
            .filter(|f| f.parent_folder == current)
            .find(named)
            .or_else(|| folders.iter().find(named))
            .cloned()
    }

    /// Parent of the current scope (`None` when that is root).
    pub async fn parent_of_current(&self) -> Option<Folder> {
        let parent = self.scope.current()?.parent_folder?;
        self.folders
            .read()
            .await
            .iter()
            .find(|f| f.id == parent)
            .cloned()
    }

    /// Create a folder inside the current scope.
    pub async fn create_folder(&self, name: &str) -> AppResult<Folder> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        let auth = self.session.credentials().await?;
        let parent = self.scope.current_id();
        let folder = self
            .api
            .create_folder(&auth, &CreateFolder::new(name, parent))
            .await?;

        info!(folder_id = %folder.id, name = %folder.name, parent = ?parent, "Folder created");
        self.refresh_folders().await?;
        self.publish(DriveEvent::FolderCreated {
            folder_id: folder.id,
            parent,
        });
        Ok(folder)
    }

    /// Delete a folder, then refetch folders and return to root.
    pub async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let auth = self.session.credentials().await?;
        if let Err(e) = self.api.delete_folder(&auth, id).await {
            warn!(folder_id = %id, error = %e, "Error deleting folder");
            return Err(e);
        }

        info!(folder_id = %id, "Folder deleted");
        self.scope.select(None);
        self.refresh_folders().await?;
        self.refresh_files().await?;
        self.publish(DriveEvent::FolderDeleted { folder_id: id });
        Ok(())
    }

    /// Delete a file; the local list only changes if the backend agreed.
    pub async fn delete_file(&self, id: FileId) -> AppResult<()> {
        let auth = self.session.credentials().await?;
        if let Err(e) = self.api.delete_file(&auth, id).await {
            warn!(file_id = %id, error = %e, "Error deleting file");
            return Err(e);
        }

        self.files.write().await.retain(|f| f.id != id);
        info!(file_id = %id, "File deleted");
        self.publish(DriveEvent::FileDeleted { file_id: id });
        Ok(())
    }

    /// Fetch one file's metadata.
    pub async fn file_info(&self, id: FileId) -> AppResult<FileRecord> {
        let auth = self.session.credentials().await?;
        self.api.file_info(&auth, id).await
    }

    /// Stream a file to disk. A directory destination receives the file
    /// under its own name. Returns the written path and byte count.
    pub async fn download(&self, file: &FileRecord, dest: &Path) -> AppResult<(PathBuf, u64)> {
        let target = if dest.is_dir() {
            dest.join(safe_file_name(file))
        } else {
            dest.to_path_buf()
        };

        let auth = self.session.credentials().await?;
        let stream = self.api.open_file(&auth, &file.source_url).await?;
        let bytes = transfer::write_stream_to_path(&target, stream).await?;

        info!(file_id = %file.id, path = %target.display(), bytes, "File downloaded");
        Ok((target, bytes))
    }

    fn publish(&self, event: DriveEvent) {
        self.refresh.notify(event);
        self.seen.store(self.refresh.generation(), Ordering::SeqCst);
    }
}

/// The record's name reduced to a single path component.
fn safe_file_name(file: &FileRecord) -> String {
    Path::new(&file.file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("download-{}", file.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeDrive, logged_in_session};
    use filedesk_core::error::ErrorKind;

    async fn listing(drive: &FakeDrive) -> (Arc<DriveListing>, RefreshSignal) {
        let session = logged_in_session(drive).await;
        let refresh = RefreshSignal::new();
        let listing = Arc::new(DriveListing::new(
            Arc::new(drive.clone()),
            session,
            FolderScope::new(),
            refresh.clone(),
        ));
        (listing, refresh)
    }

    #[tokio::test]
    async fn test_refresh_uses_scope() {
        let drive = FakeDrive::new();
        let reports = drive.add_folder(1, "Reports", None);
        drive.add_file(10, "root.txt", "text/plain", None, b"r");
        drive.add_file(11, "inner.txt", "text/plain", Some(1), b"i");
        let (listing, _) = listing(&drive).await;

        listing.refresh().await.unwrap();
        assert_eq!(listing.folders().await.len(), 1);

        listing.select(Some(reports)).await.unwrap();
        let files = listing.files().await;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "inner.txt");

        listing.select(None).await.unwrap();
        assert!(drive.calls().contains(&Call::ListFiles(Some(FolderId(1)))));
        assert_eq!(drive.calls().last(), Some(&Call::ListFiles(None)));
    }

    #[tokio::test]
    async fn test_create_folder_in_scope() {
        let drive = FakeDrive::new();
        let parent = drive.add_folder(1, "Reports", None);
        let (listing, refresh) = listing(&drive).await;
        listing.select(Some(parent)).await.unwrap();

        let created = listing.create_folder("  2024 ").await.unwrap();
        assert_eq!(created.parent_folder, Some(FolderId(1)));
        assert!(drive.calls().contains(&Call::CreateFolder("2024".to_string(), Some(FolderId(1)))));
        assert_eq!(listing.folders().await.len(), 2);
        assert_eq!(refresh.generation(), 1);

        let err = listing.create_folder("   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_delete_folder_returns_to_root() {
        let drive = FakeDrive::new();
        let folder = drive.add_folder(1, "Reports", None);
        let (listing, _) = listing(&drive).await;
        listing.refresh().await.unwrap();
        listing.select(Some(folder)).await.unwrap();

        listing.delete_folder(FolderId(1)).await.unwrap();
        assert!(listing.scope().is_root());
        assert!(listing.folders().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_file_success_and_failure() {
        let drive = FakeDrive::new();
        drive.add_file(10, "a.txt", "text/plain", None, b"a");
        drive.add_file(11, "b.txt", "text/plain", None, b"b");
        let (listing, refresh) = listing(&drive).await;
        listing.refresh().await.unwrap();

        listing.delete_file(FileId(10)).await.unwrap();
        assert_eq!(listing.files().await.len(), 1);
        assert_eq!(refresh.generation(), 1);

        drive.state.lock().unwrap().fail_delete = true;
        assert!(listing.delete_file(FileId(11)).await.is_err());
        assert_eq!(listing.files().await.len(), 1);
        assert_eq!(refresh.generation(), 1);
    }

    #[tokio::test]
    async fn test_sync_follows_foreign_notifications() {
        let drive = FakeDrive::new();
        let (listing, refresh) = listing(&drive).await;
        listing.refresh().await.unwrap();
        assert!(!listing.sync().await.unwrap());

        drive.add_file(10, "late.txt", "text/plain", None, b"x");
        refresh.notify(DriveEvent::UploadBatchCompleted {
            target: None,
            uploaded: 1,
            failed: 0,
        });
        assert!(listing.sync().await.unwrap());
        assert_eq!(listing.files().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_folder_by_id_and_name() {
        let drive = FakeDrive::new();
        drive.add_folder(1, "Reports", None);
        drive.add_folder(2, "Archive", Some(1));
        let (listing, _) = listing(&drive).await;
        listing.refresh().await.unwrap();

        assert_eq!(listing.find_folder("2").await.unwrap().name, "Archive");
        assert_eq!(listing.find_folder("reports").await.unwrap().id, FolderId(1));
        assert!(listing.find_folder("missing").await.is_none());

        let archive = listing.find_folder("archive").await;
        listing.select(archive).await.unwrap();
        assert_eq!(listing.parent_of_current().await.unwrap().id, FolderId(1));
    }

    #[tokio::test]
    async fn test_download_into_directory() {
        let drive = FakeDrive::new();
        let file = drive.add_file(10, "notes.txt", "text/plain", None, b"hello world");
        let (listing, _) = listing(&drive).await;
        let dir = tempfile::tempdir().unwrap();

        let (path, bytes) = listing.download(&file, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("notes.txt"));
        assert_eq!(bytes, 11);
        assert_eq!(std::fs::read(path).unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn test_requires_login() {
        let drive = FakeDrive::new();
        let session = Arc::new(SessionStore::new(
            Arc::new(drive.clone()),
            Arc::new(filedesk_storage::MemoryStateStore::new()),
        ));
        let listing = DriveListing::new(
            Arc::new(drive.clone()),
            session,
            FolderScope::new(),
            RefreshSignal::new(),
        );
        assert!(listing.refresh().await.unwrap_err().is_authentication());
        assert!(drive.calls().is_empty());
    }
}
