//! In-memory `DriveApi` used by the service unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use filedesk_client::DriveApi;
use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_core::types::{ByteStream, FileId, FolderId};
use filedesk_entity::file::{FileRecord, UploadFile};
use filedesk_entity::folder::{CreateFolder, Folder};
use filedesk_entity::session::{
    CredentialBundle, IssuedToken, LoginRequest, LoginResponse, TokenPair,
};
use filedesk_entity::user::{SignupRequest, User};
use filedesk_storage::MemoryStateStore;

use crate::session::SessionStore;

/// One recorded remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Signup(String),
    ListFolders,
    CreateFolder(String, Option<FolderId>),
    DeleteFolder(FolderId),
    ListFiles(Option<FolderId>),
    FileInfo(FileId),
    Upload(String, String, Option<FolderId>),
    DeleteFile(FileId),
    OpenFile(String),
}

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub tokens_seen: Vec<Option<String>>,
    pub folders: Vec<Folder>,
    pub files: Vec<FileRecord>,
    pub blobs: HashMap<String, Vec<u8>>,
    pub fail_create_folder: bool,
    pub fail_delete: bool,
    pub fail_uploads: HashSet<String>,
    pub logins: u32,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct FakeDrive {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeDrive {
    pub fn new() -> Self {
        let drive = Self::default();
        drive.state.lock().unwrap().next_id = 100;
        drive
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn add_folder(&self, id: i64, name: &str, parent: Option<i64>) -> Folder {
        let folder = Folder {
            id: FolderId(id),
            name: name.to_string(),
            parent_folder: parent.map(FolderId),
        };
        self.state.lock().unwrap().folders.push(folder.clone());
        folder
    }

    pub fn add_file(&self, id: i64, name: &str, mime: &str, folder: Option<i64>, body: &[u8]) -> FileRecord {
        let record = record(id, name, mime, body.len() as u64, folder.map(FolderId));
        let mut state = self.state.lock().unwrap();
        state.blobs.insert(record.source_url.clone(), body.to_vec());
        state.files.push(record.clone());
        record
    }

    fn touch(&self, auth: Option<&CredentialBundle>, call: Call) {
        let mut state = self.state.lock().unwrap();
        state.tokens_seen.push(auth.map(|a| a.access.clone()));
        state.calls.push(call);
    }
}

pub fn record(id: i64, name: &str, mime: &str, size: u64, folder: Option<FolderId>) -> FileRecord {
    FileRecord {
        id: FileId(id),
        source_url: format!("http://files.test/media/{id}"),
        file_name: name.to_string(),
        file_type: mime.to_string(),
        file_size: size,
        created_at_human_readable: "just now".to_string(),
        file_size_human_readable: format!("{size} bytes"),
        folder,
    }
}

fn far_future() -> DateTime<Utc> {
    DateTime::from_timestamp(4_000_000_000, 0).unwrap_or_default()
}

#[async_trait]
impl DriveApi for FakeDrive {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.touch(None, Call::Login(request.email.clone()));
        if request.password != "secret" {
            return Err(AppError::authentication("Login failed"));
        }
        let n = {
            let mut state = self.state.lock().unwrap();
            state.logins += 1;
            state.logins
        };
        Ok(LoginResponse {
            user: User {
                id: None,
                email: request.email.clone(),
                first_name: "Ada".to_string(),
                last_name: String::new(),
                extra: Default::default(),
            },
            token: TokenPair {
                access_token: IssuedToken {
                    token: format!("access-{n}"),
                    exp: far_future(),
                },
                refresh_token: IssuedToken {
                    token: format!("refresh-{n}"),
                    exp: far_future(),
                },
            },
        })
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<User> {
        self.touch(None, Call::Signup(request.email.clone()));
        if request.email == "taken@example.com" {
            return Err(AppError::validation("user with this email already exists."));
        }
        Ok(User {
            id: None,
            email: request.email.clone(),
            first_name: request.first_name.clone(),
            last_name: String::new(),
            extra: Default::default(),
        })
    }

    async fn list_folders(&self, auth: &CredentialBundle) -> AppResult<Vec<Folder>> {
        self.touch(Some(auth), Call::ListFolders);
        Ok(self.state.lock().unwrap().folders.clone())
    }

    async fn create_folder(&self, auth: &CredentialBundle, request: &CreateFolder) -> AppResult<Folder> {
        self.touch(
            Some(auth),
            Call::CreateFolder(request.name.clone(), request.parent_folder),
        );
        let mut state = self.state.lock().unwrap();
        if state.fail_create_folder {
            return Err(AppError::external("Create folder failed with status 500"));
        }
        state.next_id += 1;
        let folder = Folder {
            id: FolderId(state.next_id),
            name: request.name.clone(),
            parent_folder: request.parent_folder,
        };
        state.folders.push(folder.clone());
        Ok(folder)
    }

    async fn delete_folder(&self, auth: &CredentialBundle, id: FolderId) -> AppResult<()> {
        self.touch(Some(auth), Call::DeleteFolder(id));
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            return Err(AppError::external("Delete folder failed with status 500"));
        }
        state.folders.retain(|f| f.id != id);
        Ok(())
    }

    async fn list_files(&self, auth: &CredentialBundle, folder: Option<FolderId>) -> AppResult<Vec<FileRecord>> {
        self.touch(Some(auth), Call::ListFiles(folder));
        let state = self.state.lock().unwrap();
        Ok(state
            .files
            .iter()
            .filter(|f| folder.is_none() || f.folder == folder)
            .cloned()
            .collect())
    }

    async fn file_info(&self, auth: &CredentialBundle, id: FileId) -> AppResult<FileRecord> {
        self.touch(Some(auth), Call::FileInfo(id));
        let state = self.state.lock().unwrap();
        state
            .files
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Not found."))
    }

    async fn upload_file(&self, auth: &CredentialBundle, file: &UploadFile) -> AppResult<FileRecord> {
        self.touch(
            Some(auth),
            Call::Upload(file.file_name.clone(), file.file_type.clone(), file.folder),
        );
        let body = std::fs::read(&file.path)?;
        let mut state = self.state.lock().unwrap();
        if state.fail_uploads.contains(&file.file_name) {
            return Err(AppError::external("Upload failed with status 500"));
        }
        state.next_id += 1;
        let rec = record(
            state.next_id,
            &file.file_name,
            &file.file_type,
            file.file_size,
            file.folder,
        );
        state.blobs.insert(rec.source_url.clone(), body);
        state.files.push(rec.clone());
        Ok(rec)
    }

    async fn delete_file(&self, auth: &CredentialBundle, id: FileId) -> AppResult<()> {
        self.touch(Some(auth), Call::DeleteFile(id));
        let mut state = self.state.lock().unwrap();
        if state.fail_delete {
            return Err(AppError::external("Delete file failed with status 500"));
        }
        state.files.retain(|f| f.id != id);
        Ok(())
    }

    async fn open_file(&self, auth: &CredentialBundle, source_url: &str) -> AppResult<ByteStream> {
        self.touch(Some(auth), Call::OpenFile(source_url.to_string()));
        let body = self
            .state
            .lock()
            .unwrap()
            .blobs
            .get(source_url)
            .cloned()
            .ok_or_else(|| AppError::not_found("Not found."))?;
        // Two chunks so readers exercise their accumulation loops.
        let mid = body.len() / 2;
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::copy_from_slice(&body[..mid])),
            Ok(Bytes::copy_from_slice(&body[mid..])),
        ];
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

/// A session store over `drive` that is already logged in.
pub async fn logged_in_session(drive: &FakeDrive) -> Arc<SessionStore> {
    let session = Arc::new(SessionStore::new(
        Arc::new(drive.clone()),
        Arc::new(MemoryStateStore::new()),
    ));
    session.login("ada@example.com", "secret").await.unwrap();
    session
}
