//! reqwest implementation of [`DriveApi`].

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use filedesk_core::config::ApiConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_core::types::{ByteStream, FileId, FolderId};
use filedesk_entity::file::{FileRecord, UploadFile};
use filedesk_entity::folder::{CreateFolder, Folder};
use filedesk_entity::session::{CredentialBundle, LoginRequest, LoginResponse};
use filedesk_entity::user::{SignupRequest, User};
use filedesk_storage::transfer;

use crate::api::DriveApi;
use crate::error;

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "An error occurred, please try again";

/// Talks to the REST service rooted at `base_url`.
#[derive(Clone)]
pub struct HttpDriveClient {
    /// Shared connection pool.
    http: reqwest::Client,
    /// API root, always ending in `/`.
    base_url: Url,
}

impl std::fmt::Debug for HttpDriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDriveClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpDriveClient {
    /// Build a client from the `[api]` configuration section.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.normalized_base_url()).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL: {}", config.base_url),
                e,
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self { http, base_url })
    }

    /// The API root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url.join(path).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, format!("Invalid endpoint: {path}"), e)
        })
    }

    /// Absolute source URLs are used as is; relative ones hang off the API root.
    fn resolve_source(&self, source_url: &str) -> AppResult<Url> {
        match Url::parse(source_url) {
            Ok(url) => Ok(url),
            Err(_) => self.base_url.join(source_url).map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid file URL: {source_url}"),
                    e,
                )
            }),
        }
    }

    /// Start a request carrying the bearer token.
    pub(crate) fn authorized(
        &self,
        method: Method,
        url: Url,
        auth: &CredentialBundle,
    ) -> AppResult<RequestBuilder> {
        let value = HeaderValue::from_str(&auth.bearer()).map_err(|e| {
            AppError::with_source(
                ErrorKind::Authentication,
                "Access token contains invalid characters",
                e,
            )
        })?;
        Ok(self.http.request(method, url).header(AUTHORIZATION, value))
    }

    /// Send and fail on any non-success status.
    async fn send(&self, action: &str, request: RequestBuilder) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| error::transport(action, e))?;

        let status = response.status();
        debug!(action, status = status.as_u16(), "API response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(error::from_status(action, status, &body))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        action: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let response = self.send(action, request).await?;
        decode(action, response).await
    }
}

async fn decode<T: DeserializeOwned>(action: &str, response: Response) -> AppResult<T> {
    let body = response
        .bytes()
        .await
        .map_err(|e| error::transport(action, e))?;
    serde_json::from_slice(&body).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("{action}: unexpected response from the server"),
            e,
        )
    })
}

#[async_trait]
impl DriveApi for HttpDriveClient {
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let url = self.endpoint("login/")?;
        debug!(email = %request.email, "Logging in");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| error::transport(LOGIN_FAILED, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str(&body)
                .ok()
                .and_then(|v| error::detail_message(&v));
            debug!(status = status.as_u16(), "Login rejected");
            return Err(AppError::authentication(
                detail.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ));
        }

        decode("Login", response).await
    }

    async fn signup(&self, request: &SignupRequest) -> AppResult<User> {
        let url = self.endpoint("signup/")?;
        debug!(email = %request.email, "Signing up");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| error::transport("Signup", e))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str(&body)
                .ok()
                .and_then(|v| error::first_field_error(&v))
                .unwrap_or_else(|| SIGNUP_FAILED.to_string());
            return Err(AppError::validation(message));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error::from_status("Signup", status, &body));
        }

        decode("Signup", response).await
    }

    async fn list_folders(&self, auth: &CredentialBundle) -> AppResult<Vec<Folder>> {
        let request = self.authorized(Method::GET, self.endpoint("folders/")?, auth)?;
        let folders: Vec<Folder> = self.send_json("List folders", request).await?;
        debug!(count = folders.len(), "Listed folders");
        Ok(folders)
    }

    async fn create_folder(
        &self,
        auth: &CredentialBundle,
        request: &CreateFolder,
    ) -> AppResult<Folder> {
        debug!(name = %request.name, parent = ?request.parent_folder, "Creating folder");
        let builder = self
            .authorized(Method::POST, self.endpoint("folders/")?, auth)?
            .json(request);
        self.send_json("Create folder", builder).await
    }

    async fn delete_folder(&self, auth: &CredentialBundle, id: FolderId) -> AppResult<()> {
        debug!(folder_id = %id, "Deleting folder");
        let url = self.endpoint(&format!("folders/{id}/"))?;
        let request = self.authorized(Method::DELETE, url, auth)?;
        self.send("Delete folder", request).await?;
        Ok(())
    }

    async fn list_files(
        &self,
        auth: &CredentialBundle,
        folder: Option<FolderId>,
    ) -> AppResult<Vec<FileRecord>> {
        let mut url = self.endpoint("files/")?;
        if let Some(folder) = folder {
            url.query_pairs_mut()
                .append_pair("folder", &folder.to_string());
        }
        let request = self.authorized(Method::GET, url, auth)?;
        let files: Vec<FileRecord> = self.send_json("List files", request).await?;
        debug!(folder = ?folder, count = files.len(), "Listed files");
        Ok(files)
    }

    async fn file_info(&self, auth: &CredentialBundle, id: FileId) -> AppResult<FileRecord> {
        let url = self.endpoint(&format!("files/{id}"))?;
        let request = self.authorized(Method::GET, url, auth)?;
        self.send_json("File info", request).await
    }

    async fn upload_file(
        &self,
        auth: &CredentialBundle,
        file: &UploadFile,
    ) -> AppResult<FileRecord> {
        let (stream, len) = transfer::read_stream(&file.path).await?;
        let part = Part::stream_with_length(Body::wrap_stream(stream), len)
            .file_name(file.file_name.clone());

        let mut form = Form::new()
            .part("file", part)
            .text("file_name", file.file_name.clone())
            .text("file_type", file.file_type.clone())
            .text("file_size", file.file_size.to_string());
        if let Some(folder) = file.folder {
            form = form.text("folder", folder.to_string());
        }

        debug!(
            file_name = %file.file_name,
            file_type = %file.file_type,
            size = file.file_size,
            folder = ?file.folder,
            "Uploading file"
        );
        let request = self
            .authorized(Method::POST, self.endpoint("files/")?, auth)?
            .multipart(form);
        self.send_json("Upload", request).await
    }

    async fn delete_file(&self, auth: &CredentialBundle, id: FileId) -> AppResult<()> {
        debug!(file_id = %id, "Deleting file");
        let url = self.endpoint(&format!("files/{id}/"))?;
        let request = self.authorized(Method::DELETE, url, auth)?;
        self.send("Delete file", request).await?;
        Ok(())
    }

    async fn open_file(&self, auth: &CredentialBundle, source_url: &str) -> AppResult<ByteStream> {
        let url = self.resolve_source(source_url)?;
        debug!(url = %url, "Fetching file bytes");
        let request = self.authorized(Method::GET, url, auth)?;
        let response = self.send("Download", request).await?;

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(std::io::Error::other));
        Ok(Box::pin(stream))
    }
}
