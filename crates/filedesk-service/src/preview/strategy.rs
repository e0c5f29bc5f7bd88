//! MIME type to preview strategy.

use serde::{Deserialize, Serialize};

/// How a file is previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStrategy {
    /// Paginated PDF view.
    Pdf,
    /// Inline image.
    Image,
    /// Word document converted to HTML.
    WordDocument,
    /// Audio player.
    Audio,
    /// Video player.
    Video,
    /// Zip archive entry listing.
    Archive,
    /// Verbatim text.
    Text,
    /// Best-effort text, else "cannot preview".
    Fallback,
}

impl PreviewStrategy {
    /// Classify a declared MIME type. Parameters (`; charset=...`) and case
    /// are ignored. Rules are checked in a fixed order, so anything that
    /// mentions `zip` is an archive even if it is also text-like.
    pub fn classify(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" => Self::Pdf,
            "image/jpeg" | "image/png" | "image/gif" => Self::Image,
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::WordDocument
            }
            "audio/mpeg" => Self::Audio,
            "video/mp4" | "video/webm" | "video/ogg" => Self::Video,
            m if m.contains("zip") => Self::Archive,
            "text/plain" | "text/markdown" | "application/rtf" => Self::Text,
            _ => Self::Fallback,
        }
    }

    /// Whether materializing this strategy downloads the file.
    pub fn fetches_bytes(self) -> bool {
        !matches!(self, Self::Image | Self::Audio | Self::Video)
    }
}
