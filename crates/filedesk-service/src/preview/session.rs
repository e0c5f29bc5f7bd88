//! The open preview: at most one file at a time.

use std::sync::Arc;

use tracing::debug;

use filedesk_entity::file::FileRecord;

use super::content::PreviewContent;
use super::engine::PreviewEngine;
use super::strategy::PreviewStrategy;

#[derive(Debug)]
struct OpenPreview {
    file: FileRecord,
    strategy: PreviewStrategy,
    content: Option<PreviewContent>,
}

/// Holds the file being previewed and, once requested, its content.
///
/// Opening another file or closing drops everything held for the previous
/// one, so reopening always fetches again.
#[derive(Debug)]
pub struct PreviewSession {
    engine: Arc<PreviewEngine>,
    open: Option<OpenPreview>,
}

impl PreviewSession {
    /// Creates a closed session.
    pub fn new(engine: Arc<PreviewEngine>) -> Self {
        Self { engine, open: None }
    }

    /// Open `file`, discarding whatever was open before. Nothing is fetched
    /// until [`content`](Self::content) is called.
    pub fn open(&mut self, file: FileRecord) {
        let strategy = PreviewStrategy::classify(&file.file_type);
        debug!(file_id = %file.id, ?strategy, "Preview opened");
        self.open = Some(OpenPreview {
            file,
            strategy,
            content: None,
        });
    }

    /// The open file.
    pub fn file(&self) -> Option<&FileRecord> {
        self.open.as_ref().map(|o| &o.file)
    }

    /// How the open file is previewed.
    pub fn strategy(&self) -> Option<PreviewStrategy> {
        self.open.as_ref().map(|o| o.strategy)
    }

    /// Whether a file is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Content of the open file, materialized on first request.
    pub async fn content(&mut self) -> Option<&PreviewContent> {
        let open = self.open.as_mut()?;
        if open.content.is_none() {
            open.content = Some(self.engine.materialize(&open.file).await);
        }
        open.content.as_ref()
    }

    /// Close the preview and drop its content.
    pub fn close(&mut self) {
        if let Some(open) = self.open.take() {
            debug!(file_id = %open.file.id, "Preview closed");
        }
    }
}
