//! Sequential upload of a classified selection.

use std::sync::Arc;

use tracing::{info, warn};

use filedesk_client::DriveApi;
use filedesk_core::config::UploadConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::events::DriveEvent;
use filedesk_core::result::AppResult;
use filedesk_core::types::FolderId;
use filedesk_entity::file::UploadFile;
use filedesk_entity::folder::CreateFolder;
use filedesk_entity::session::CredentialBundle;
use filedesk_entity::upload::{LocalFile, UploadBatch, UploadFailure, UploadReport, UploadSource};

use crate::listing::RefreshSignal;
use crate::navigation::FolderScope;
use crate::session::SessionStore;

use super::classify::classify;
use super::traversal::{DirectoryWalker, WalkOptions};

/// Uploads selections into the current scope, one file at a time.
#[derive(Clone)]
pub struct UploadOrchestrator {
    /// Remote service.
    api: Arc<dyn DriveApi>,
    /// Credential source.
    session: Arc<SessionStore>,
    /// Where uploads land.
    scope: FolderScope,
    /// Fired once per finished batch.
    refresh: RefreshSignal,
    /// MIME fallback and traversal limits.
    config: UploadConfig,
}

impl std::fmt::Debug for UploadOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadOrchestrator").finish()
    }
}

impl UploadOrchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        api: Arc<dyn DriveApi>,
        session: Arc<SessionStore>,
        scope: FolderScope,
        refresh: RefreshSignal,
        config: UploadConfig,
    ) -> Self {
        Self {
            api,
            session,
            scope,
            refresh,
            config,
        }
    }

    /// Upload a selection.
    ///
    /// Directory selections first create one folder under the current scope
    /// and upload every contained file into it. A failed file is recorded in
    /// the report and the rest continue. If the folder cannot be created
    /// nothing is uploaded and the error is returned.
    pub async fn upload(&self, source: UploadSource) -> AppResult<UploadReport> {
        if source.is_empty() {
            return Err(AppError::validation("Please select a file to upload"));
        }

        let auth = self.session.credentials().await?;
        let batch = classify(source);
        let parent = self.scope.current_id();

        let (folder_name, files) = self.resolve(batch).await?;

        let mut report = UploadReport::default();
        let target = match folder_name {
            Some(name) => {
                let folder = self
                    .api
                    .create_folder(&auth, &CreateFolder::new(name.clone(), parent))
                    .await
                    .map_err(|e| {
                        warn!(name = %name, error = %e, "Failed to create folder for upload");
                        AppError::with_source(
                            ErrorKind::Upload,
                            format!("Failed to create folder '{name}': {}", e.message),
                            e,
                        )
                    })?;
                info!(folder_id = %folder.id, name = %folder.name, files = files.len(), "Created upload folder");
                let id = folder.id;
                report.folder = Some(folder);
                Some(id)
            }
            None => parent,
        };

        for file in files {
            self.upload_one(&auth, file, target, &mut report).await;
        }

        info!(
            target = ?target,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            "Upload batch completed"
        );
        self.refresh.notify(DriveEvent::UploadBatchCompleted {
            target,
            uploaded: report.uploaded.len(),
            failed: report.failed.len(),
        });
        Ok(report)
    }

    /// Flatten a batch into the folder to create (if any) and its files.
    /// Directory enumeration finishes here, before any network call.
    async fn resolve(&self, batch: UploadBatch) -> AppResult<(Option<String>, Vec<LocalFile>)> {
        match batch {
            UploadBatch::Files(files) => Ok((None, files)),
            UploadBatch::Directory { name, files } => Ok((Some(name), files)),
            UploadBatch::DroppedDirectory { name, root } => {
                let options = WalkOptions {
                    max_depth: self.config.max_depth,
                    follow_symlinks: self.config.follow_symlinks,
                };
                let files = tokio::task::spawn_blocking(move || {
                    let mut walker = DirectoryWalker::new(root, options);
                    let files = walker.by_ref().collect::<AppResult<Vec<_>>>()?;
                    let stats = walker.stats();
                    info!(
                        directories = stats.directories,
                        files = stats.files,
                        depth = stats.max_depth,
                        skipped = stats.skipped,
                        "Directory enumerated"
                    );
                    Ok::<_, AppError>(files)
                })
                .await
                .map_err(|e| AppError::internal(format!("Directory traversal task failed: {e}")))??;
                Ok((Some(name), files))
            }
        }
    }

    async fn upload_one(
        &self,
        auth: &CredentialBundle,
        file: LocalFile,
        folder: Option<FolderId>,
        report: &mut UploadReport,
    ) {
        let upload = UploadFile {
            file_type: self.normalize_mime(file.mime_type.as_deref()),
            file_name: file.name.clone(),
            file_size: file.size,
            path: file.path.clone(),
            folder,
        };

        match self.api.upload_file(auth, &upload).await {
            Ok(record) => {
                info!(
                    file_id = %record.id,
                    name = %upload.file_name,
                    size = upload.file_size,
                    folder = ?folder,
                    "File uploaded"
                );
                report.uploaded.push(record);
            }
            Err(e) => {
                warn!(name = %upload.file_name, path = %upload.path.display(), error = %e, "Error uploading file");
                report.failed.push(UploadFailure {
                    name: file.name,
                    path: file.path,
                    error: e.message,
                });
            }
        }
    }

    fn normalize_mime(&self, mime: Option<&str>) -> String {
        match mime.map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.config.unknown_mime_type.clone(),
        }
    }
}
