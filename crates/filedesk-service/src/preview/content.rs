//! Materialized preview content.

use serde::{Deserialize, Serialize};

/// Message shown when nothing can be rendered.
pub const CANNOT_PREVIEW: &str = "Cannot preview this file type.";

/// Kind of natively played or displayed media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// `<img>`.
    Image,
    /// `<audio>`.
    Audio,
    /// `<video>`.
    Video,
}

/// Text extracted from one PDF page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfPage {
    /// 1-based page number.
    pub number: u32,
    /// Extracted text, possibly empty.
    pub text: String,
}

/// One entry of a zip archive, read from the central directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// Path inside the archive.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Uncompressed size in bytes.
    pub size: u64,
}

/// What a preview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreviewContent {
    /// A parsed PDF.
    Pdf {
        /// Pages in the document.
        page_count: u32,
        /// Extracted pages, possibly fewer than `page_count`.
        pages: Vec<PdfPage>,
    },
    /// Media shown from its source URL without downloading it here.
    Media {
        /// Image, audio or video.
        kind: MediaKind,
        /// Byte-source URL.
        source_url: String,
        /// Declared MIME type.
        mime_type: String,
    },
    /// A Word document converted to sanitized HTML.
    Document {
        /// Body markup.
        html: String,
    },
    /// Zip archive listing.
    Archive {
        /// Entries in archive order, possibly capped.
        entries: Vec<ArchiveEntry>,
        /// Entries in the archive.
        total_entries: usize,
    },
    /// Text shown verbatim.
    Text {
        /// Decoded text.
        text: String,
        /// True when the type is not a known text type.
        unsupported: bool,
        /// True when the text was cut at the size limit.
        truncated: bool,
    },
    /// Nothing to show.
    Unavailable {
        /// Message for the user.
        reason: String,
    },
}

impl PreviewContent {
    /// The standard "cannot preview" content.
    pub fn unavailable() -> Self {
        Self::Unavailable {
            reason: CANNOT_PREVIEW.to_string(),
        }
    }

    /// Whether anything can be shown.
    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }
}
