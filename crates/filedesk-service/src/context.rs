//! Wiring of every client service around one session and one scope.

use std::sync::Arc;

use tracing::info;

use filedesk_client::{DriveApi, HttpDriveClient};
use filedesk_core::config::AppConfig;
use filedesk_core::result::AppResult;
use filedesk_core::traits::StateStore;
use filedesk_storage::FileStateStore;

use crate::listing::{DriveListing, RefreshSignal};
use crate::navigation::FolderScope;
use crate::preview::{PreviewEngine, PreviewSession};
use crate::session::SessionStore;
use crate::upload::UploadOrchestrator;

/// Shared dependencies of a FileDesk client.
///
/// All fields are `Arc`-wrapped or cheap handles, so the context can be
/// cloned into tasks.
#[derive(Clone)]
pub struct DriveContext {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Remote data client.
    pub api: Arc<dyn DriveApi>,
    /// Credential owner.
    pub session: Arc<SessionStore>,
    /// Selected folder.
    pub scope: FolderScope,
    /// Refresh notifications.
    pub refresh: RefreshSignal,
    /// Folder and file listing.
    pub listing: Arc<DriveListing>,
    /// Upload orchestrator.
    pub uploads: Arc<UploadOrchestrator>,
    /// Preview engine.
    pub previews: Arc<PreviewEngine>,
}

impl std::fmt::Debug for DriveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveContext")
            .field("base_url", &self.config.api.base_url)
            .field("scope", &self.scope.current_id())
            .finish()
    }
}

impl DriveContext {
    /// Build the HTTP client and file-backed session state from
    /// configuration, then restore any saved session.
    pub async fn connect(config: AppConfig) -> AppResult<Self> {
        let api: Arc<dyn DriveApi> = Arc::new(HttpDriveClient::new(&config.api)?);
        let state: Arc<dyn StateStore> =
            Arc::new(FileStateStore::new(&config.session.state_dir).await?);
        info!(
            base_url = %config.api.base_url,
            state_dir = %config.session.state_dir,
            "Client configured"
        );
        Self::assemble(config, api, state).await
    }

    /// Wire services over the given client and state store, then restore
    /// any saved session.
    pub async fn assemble(
        config: AppConfig,
        api: Arc<dyn DriveApi>,
        state: Arc<dyn StateStore>,
    ) -> AppResult<Self> {
        let session = Arc::new(SessionStore::new(api.clone(), state));
        session.restore().await?;

        let scope = FolderScope::new();
        let refresh = RefreshSignal::new();

        let listing = Arc::new(DriveListing::new(
            api.clone(),
            session.clone(),
            scope.clone(),
            refresh.clone(),
        ));
        let uploads = Arc::new(UploadOrchestrator::new(
            api.clone(),
            session.clone(),
            scope.clone(),
            refresh.clone(),
            config.upload.clone(),
        ));
        let previews = Arc::new(PreviewEngine::new(
            api.clone(),
            session.clone(),
            config.preview.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            api,
            session,
            scope,
            refresh,
            listing,
            uploads,
            previews,
        })
    }

    /// A fresh, closed preview session.
    pub fn preview_session(&self) -> PreviewSession {
        PreviewSession::new(self.previews.clone())
    }
}
