//! Fetch and convert a single file for preview.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use tracing::{debug, warn};

use filedesk_client::DriveApi;
use filedesk_core::config::PreviewConfig;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::result::AppResult;
use filedesk_entity::file::FileRecord;

use crate::session::SessionStore;

use super::content::{MediaKind, PreviewContent};
use super::strategy::PreviewStrategy;
use super::{archive, docx, pdf};

/// Materializes previews. Every call fetches afresh; nothing is cached.
#[derive(Clone)]
pub struct PreviewEngine {
    /// Remote service.
    api: Arc<dyn DriveApi>,
    /// Credential source.
    session: Arc<SessionStore>,
    /// Size limits.
    config: PreviewConfig,
}

impl std::fmt::Debug for PreviewEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewEngine").finish()
    }
}

impl PreviewEngine {
    /// Creates a new preview engine.
    pub fn new(api: Arc<dyn DriveApi>, session: Arc<SessionStore>, config: PreviewConfig) -> Self {
        Self {
            api,
            session,
            config,
        }
    }

    /// Build the preview for `file`. Failures are logged and shown as
    /// "cannot preview", never returned.
    pub async fn materialize(&self, file: &FileRecord) -> PreviewContent {
        let strategy = PreviewStrategy::classify(&file.file_type);
        match self.try_materialize(file, strategy).await {
            Ok(content) => {
                debug!(file_id = %file.id, ?strategy, "Preview ready");
                content
            }
            Err(e) => {
                warn!(file_id = %file.id, ?strategy, error = %e, "Error loading preview");
                PreviewContent::unavailable()
            }
        }
    }

    async fn try_materialize(
        &self,
        file: &FileRecord,
        strategy: PreviewStrategy,
    ) -> AppResult<PreviewContent> {
        match strategy {
            PreviewStrategy::Image => Ok(media(MediaKind::Image, file)),
            PreviewStrategy::Audio => Ok(media(MediaKind::Audio, file)),
            PreviewStrategy::Video => Ok(media(MediaKind::Video, file)),
            PreviewStrategy::Pdf => {
                let bytes = self.fetch_whole(file).await?;
                let max_pages = self.config.max_pdf_pages;
                let (page_count, pages) =
                    blocking(move || pdf::extract_pages(&bytes, max_pages)).await?;
                Ok(PreviewContent::Pdf { page_count, pages })
            }
            PreviewStrategy::WordDocument => {
                let bytes = self.fetch_whole(file).await?;
                let html = blocking(move || docx::docx_to_html(&bytes)).await?;
                Ok(PreviewContent::Document { html })
            }
            PreviewStrategy::Archive => {
                let bytes = self.fetch_whole(file).await?;
                let max_entries = self.config.max_archive_entries;
                let (entries, total_entries) =
                    blocking(move || archive::list_entries(&bytes, max_entries)).await?;
                Ok(PreviewContent::Archive {
                    entries,
                    total_entries,
                })
            }
            PreviewStrategy::Text => {
                let (bytes, truncated) = self.fetch(file, self.config.max_text_bytes).await?;
                Ok(PreviewContent::Text {
                    text: decode_text(&bytes, truncated),
                    unsupported: false,
                    truncated,
                })
            }
            PreviewStrategy::Fallback => {
                let (bytes, truncated) = self.fetch(file, self.config.max_text_bytes).await?;
                let text = decode_text(&bytes, truncated);
                if text.is_empty() {
                    return Ok(PreviewContent::unavailable());
                }
                Ok(PreviewContent::Text {
                    text,
                    unsupported: true,
                    truncated,
                })
            }
        }
    }

    /// Download a file that must be parsed whole. Files over
    /// `max_fetch_bytes` are refused.
    async fn fetch_whole(&self, file: &FileRecord) -> AppResult<Bytes> {
        let limit = self.config.max_fetch_bytes;
        match self.fetch(file, limit).await? {
            (_, true) => Err(AppError::preview(format!(
                "File is larger than the {limit} byte preview limit"
            ))),
            (bytes, false) => Ok(bytes),
        }
    }

    /// Download the file's bytes, stopping at `limit`. Returns the bytes and
    /// whether they were cut short.
    async fn fetch(&self, file: &FileRecord, limit: usize) -> AppResult<(Bytes, bool)> {
        let auth = self.session.credentials().await?;
        let mut stream = self.api.open_file(&auth, &file.source_url).await?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Download interrupted", e)
            })?;
            buf.extend_from_slice(&chunk);
            if buf.len() > limit {
                buf.truncate(limit);
                debug!(file_id = %file.id, limit, "Preview fetch truncated");
                return Ok((buf.freeze(), true));
            }
        }
        debug!(file_id = %file.id, bytes = buf.len(), "Preview bytes fetched");
        Ok((buf.freeze(), false))
    }
}

fn media(kind: MediaKind, file: &FileRecord) -> PreviewContent {
    PreviewContent::Media {
        kind,
        source_url: file.source_url.clone(),
        mime_type: file.file_type.clone(),
    }
}

async fn blocking<T, F>(work: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AppError::internal(format!("Preview worker failed: {e}")))?
}

/// Lossy UTF-8 decode. A multi-byte character split by truncation is
/// dropped instead of becoming a replacement character.
fn decode_text(bytes: &[u8], truncated: bool) -> String {
    let end = match std::str::from_utf8(bytes) {
        Err(e) if truncated && e.error_len().is_none() => e.valid_up_to(),
        _ => bytes.len(),
    };
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
