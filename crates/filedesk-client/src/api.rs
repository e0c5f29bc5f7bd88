//! The remote drive contract.

use async_trait::async_trait;

use filedesk_core::result::AppResult;
use filedesk_core::types::{ByteStream, FileId, FolderId};
use filedesk_entity::file::{FileRecord, UploadFile};
use filedesk_entity::folder::{CreateFolder, Folder};
use filedesk_entity::session::{CredentialBundle, LoginRequest, LoginResponse};
use filedesk_entity::user::{SignupRequest, User};

/// Remote folder/file service.
///
/// Every call except `login` and `signup` takes the caller's credentials and
/// sends the access token as a bearer token. Implementations never retry.
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Exchange email and password for a token pair and the user identity.
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;

    /// Register a new account.
    async fn signup(&self, request: &SignupRequest) -> AppResult<User>;

    /// List every folder the user owns.
    async fn list_folders(&self, auth: &CredentialBundle) -> AppResult<Vec<Folder>>;

    /// Create a folder, optionally under a parent.
    async fn create_folder(
        &self,
        auth: &CredentialBundle,
        request: &CreateFolder,
    ) -> AppResult<Folder>;

    /// Delete a folder.
    async fn delete_folder(&self, auth: &CredentialBundle, id: FolderId) -> AppResult<()>;

    /// List the files of one folder, or of root when `folder` is `None`.
    async fn list_files(
        &self,
        auth: &CredentialBundle,
        folder: Option<FolderId>,
    ) -> AppResult<Vec<FileRecord>>;

    /// Fetch one file's metadata.
    async fn file_info(&self, auth: &CredentialBundle, id: FileId) -> AppResult<FileRecord>;

    /// Upload one local file with its metadata.
    async fn upload_file(&self, auth: &CredentialBundle, file: &UploadFile)
    -> AppResult<FileRecord>;

    /// Delete a file.
    async fn delete_file(&self, auth: &CredentialBundle, id: FileId) -> AppResult<()>;

    /// Stream the bytes behind a file record's source URL.
    async fn open_file(&self, auth: &CredentialBundle, source_url: &str) -> AppResult<ByteStream>;
}
