//! Icon-style file categories for list views.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse category used to pick an icon in file listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// PDF documents.
    Pdf,
    /// Word-processor documents.
    Word,
    /// Spreadsheets.
    Excel,
    /// Raster images.
    Image,
    /// Video files.
    Video,
    /// Compressed archives.
    Archive,
    /// Audio files.
    Audio,
    /// Plain text and JSON.
    Code,
    /// Slide decks.
    Presentation,
    /// Everything else.
    Generic,
}

impl FileKind {
    /// Map a declared MIME type to its listing category.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "application/pdf" => Self::Pdf,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "application/msword" => Self::Word,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel" => Self::Excel,
            "image/jpeg" | "image/png" | "image/gif" => Self::Image,
            "video/mp4" | "video/webm" | "video/ogg" => Self::Video,
            "application/zip" | "application/x-7z-compressed" | "application/x-rar-compressed" => {
                Self::Archive
            }
            "audio/mpeg" | "audio/mp3" => Self::Audio,
            "application/json" | "text/plain" => Self::Code,
            "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Self::Presentation
            }
            _ => Self::Generic,
        }
    }

    /// Short label for table output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Excel => "excel",
            Self::Image => "image",
            Self::Video => "video",
            Self::Archive => "archive",
            Self::Audio => "audio",
            Self::Code => "code",
            Self::Presentation => "slides",
            Self::Generic => "file",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
