//! Shared test helpers for integration tests.
//!
//! [`TestBackend`] is an in-memory folder/file service served by axum on a
//! loopback port; [`TestApp`] is a fully wired client pointed at it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use filedesk_client::HttpDriveClient;
use filedesk_core::config::AppConfig;
use filedesk_service::DriveContext;
use filedesk_storage::FileStateStore;

/// Email accepted by the backend.
pub const EMAIL: &str = "ada@example.com";
/// Password accepted by the backend.
pub const PASSWORD: &str = "secret";
const TOKEN: &str = "access-e2e";

/// What the fake backend holds.
#[derive(Default)]
pub struct Store {
    /// Folder rows as served.
    pub folders: Vec<Value>,
    /// File rows as served.
    pub files: Vec<Value>,
    /// Uploaded bytes by file id.
    pub blobs: HashMap<i64, Vec<u8>>,
    /// Paths of every authorized request, in order.
    pub requests: Vec<String>,
    /// Folder names whose creation is rejected.
    pub reject_folders: Vec<String>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Seed a file without going through the upload endpoint.
    pub fn seed_file(&mut self, name: &str, mime: &str, bytes: &[u8], folder: Option<i64>) -> i64 {
        let id = self.next_id();
        self.files.push(file_json(id, name, mime, bytes.len(), folder));
        self.blobs.insert(id, bytes.to_vec());
        id
    }

    /// Files whose `folder` is `folder`.
    pub fn files_in(&self, folder: Option<i64>) -> Vec<&Value> {
        self.files
            .iter()
            .filter(|f| f["folder"].as_i64() == folder)
            .collect()
    }

    /// How many times `path` was requested.
    pub fn hits(&self, path: &str) -> usize {
        self.requests.iter().filter(|p| p.as_str() == path).count()
    }
}

type Shared = Arc<Mutex<Store>>;

fn file_json(id: i64, name: &str, mime: &str, size: usize, folder: Option<i64>) -> Value {
    json!({
        "id": id,
        "file": format!("/media/uploads/{id}"),
        "file_name": name,
        "file_type": mime,
        "file_size": size,
        "created_at_human_readable": "just now",
        "file_size_human_readable": format!("{size} bytes"),
        "folder": folder
    })
}

fn authorize(state: &Shared, headers: &HeaderMap, path: String) -> Result<(), Response> {
    let ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if !ok {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Authentication credentials were not provided."})),
        )
            .into_response());
    }
    state.lock().unwrap().requests.push(path);
    Ok(())
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] != EMAIL || body["password"] != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response();
    }
    Json(json!({
        "user": {"id": 1, "email": EMAIL, "first_name": "Ada", "last_name": "Lovelace"},
        "token": {
            "access_token": {"token": TOKEN, "exp": 4_000_000_000i64},
            "refresh_token": {"token": "refresh-e2e", "exp": 4_100_000_000i64}
        }
    }))
    .into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["email"] == EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"email": ["user with this email already exists."]})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"id": 2, "email": body["email"], "first_name": body["first_name"], "last_name": ""})),
    )
        .into_response()
}

async fn list_folders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(r) = authorize(&state, &headers, "GET /folders/".to_string()) {
        return r;
    }
    Json(state.lock().unwrap().folders.clone()).into_response()
}

async fn create_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(r) = authorize(&state, &headers, "POST /folders/".to_string()) {
        return r;
    }
    let mut store = state.lock().unwrap();
    let name = body["name"].as_str().unwrap_or_default().to_string();
    if store.reject_folders.contains(&name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"name": ["folder with this name already exists."]})),
        )
            .into_response();
    }
    let id = store.next_id();
    let folder = json!({
        "id": id,
        "name": name,
        "parent_folder": body.get("parent_folder").cloned().unwrap_or(Value::Null)
    });
    store.folders.push(folder.clone());
    (StatusCode::CREATED, Json(folder)).into_response()
}

async fn delete_folder(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = authorize(&state, &headers, format!("DELETE /folders/{id}/")) {
        return r;
    }
    let mut store = state.lock().unwrap();
    let before = store.folders.len();
    store.folders.retain(|f| f["id"] != id);
    if store.folders.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    }
    store.files.retain(|f| f["folder"] != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_files(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let folder = query.get("folder").and_then(|f| f.parse::<i64>().ok());
    let path = match folder {
        Some(id) => format!("GET /files/?folder={id}"),
        None => "GET /files/".to_string(),
    };
    if let Err(r) = authorize(&state, &headers, path) {
        return r;
    }
    let store = state.lock().unwrap();
    let files: Vec<Value> = store.files_in(folder).into_iter().cloned().collect();
    Json(files).into_response()
}

async fn file_info(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = authorize(&state, &headers, format!("GET /files/{id}")) {
        return r;
    }
    let store = state.lock().unwrap();
    match store.files.iter().find(|f| f["id"] == id) {
        Some(file) => Json(file.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn upload(State(state): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if let Err(r) = authorize(&state, &headers, "POST /files/".to_string()) {
        return r;
    }
    let mut fields = HashMap::new();
    let mut bytes = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let Ok(data) = field.bytes().await else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        if name == "file" {
            bytes = data.to_vec();
        } else {
            fields.insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    let name = fields.get("file_name").cloned().unwrap_or_default();
    if name.starts_with("reject") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"file": ["The submitted file is empty."]})),
        )
            .into_response();
    }
    let mime = fields.get("file_type").cloned().unwrap_or_default();
    let folder = fields.get("folder").and_then(|f| f.parse::<i64>().ok());

    let mut store = state.lock().unwrap();
    let id = store.next_id();
    let record = file_json(id, &name, &mime, bytes.len(), folder);
    store.files.push(record.clone());
    store.blobs.insert(id, bytes);
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn delete_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(r) = authorize(&state, &headers, format!("DELETE /files/{id}/")) {
        return r;
    }
    let mut store = state.lock().unwrap();
    store.files.retain(|f| f["id"] != id);
    store.blobs.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}

async fn media(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(r) = authorize(&state, &headers, format!("GET /media/uploads/{id}")) {
        return r;
    }
    let store = state.lock().unwrap();
    match store.blobs.get(&id) {
        Some(bytes) => bytes.clone().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A running fake backend.
pub struct TestBackend {
    /// Loopback address it listens on.
    pub addr: SocketAddr,
    /// Its data.
    pub store: Shared,
}

impl TestBackend {
    /// Start a backend on an ephemeral port.
    pub async fn start() -> Self {
        let store: Shared = Arc::default();
        let app = Router::new()
            .route("/api/login/", post(login))
            .route("/api/signup/", post(signup))
            .route("/api/folders/", get(list_folders).post(create_folder))
            .route("/api/folders/{id}/", delete(delete_folder))
            .route("/api/files/", get(list_files).post(upload))
            .route("/api/files/{id}", get(file_info))
            .route("/api/files/{id}/", delete(delete_file))
            .route("/media/uploads/{id}", get(media))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, store }
    }

    /// Base URL of the API.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }
}

/// A wired client plus the backend it talks to.
pub struct TestApp {
    /// Services under test.
    pub ctx: DriveContext,
    /// The fake backend.
    pub backend: TestBackend,
    /// Session state directory; kept alive for the test's duration.
    pub state_dir: TempDir,
}

impl TestApp {
    /// Start a backend and connect a client with an empty state directory.
    pub async fn new() -> Self {
        let backend = TestBackend::start().await;
        let state_dir = tempfile::tempdir().unwrap();
        let ctx = connect(&backend, &state_dir).await;
        Self {
            ctx,
            backend,
            state_dir,
        }
    }

    /// Same as [`TestApp::new`], already logged in.
    pub async fn logged_in() -> Self {
        let app = Self::new().await;
        app.ctx.session.login(EMAIL, PASSWORD).await.unwrap();
        app
    }

    /// A second client sharing this app's backend and state directory, as
    /// a later run of the CLI would.
    pub async fn reconnect(&self) -> DriveContext {
        connect(&self.backend, &self.state_dir).await
    }

    /// Lock the backend store.
    pub fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.backend.store.lock().unwrap()
    }
}

/// Client configuration pointing at `backend`, with state under `state_dir`.
pub fn config_for(backend: &TestBackend, state_dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = backend.base_url();
    config.session.state_dir = state_dir.path().to_string_lossy().into_owned();
    config
}

async fn connect(backend: &TestBackend, state_dir: &TempDir) -> DriveContext {
    let config = config_for(backend, state_dir);
    let api = Arc::new(HttpDriveClient::new(&config.api).unwrap());
    let state = Arc::new(FileStateStore::new(state_dir.path()).await.unwrap());
    DriveContext::assemble(config, api, state).await.unwrap()
}
