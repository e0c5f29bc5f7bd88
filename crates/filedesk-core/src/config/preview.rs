//! Preview engine configuration.

use serde::{Deserialize, Serialize};

/// Limits applied while materializing previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Text previews longer than this many bytes are truncated.
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
    /// Archive listings stop after this many entries.
    #[serde(default = "default_max_archive_entries")]
    pub max_archive_entries: usize,
    /// PDF previews extract text for at most this many pages.
    #[serde(default = "default_max_pdf_pages")]
    pub max_pdf_pages: u32,
    /// PDF, Word and zip previews are refused above this many bytes.
    #[serde(default = "default_max_fetch_bytes")]
    pub max_fetch_bytes: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: default_max_text_bytes(),
            max_archive_entries: default_max_archive_entries(),
            max_pdf_pages: default_max_pdf_pages(),
            max_fetch_bytes: default_max_fetch_bytes(),
        }
    }
}

fn default_max_text_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_max_archive_entries() -> usize {
    10_000
}

fn default_max_pdf_pages() -> u32 {
    200
}

fn default_max_fetch_bytes() -> usize {
    64 * 1024 * 1024
}
