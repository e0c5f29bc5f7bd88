//! File preview: classify by MIME type, fetch on demand, convert into
//! something a terminal or browser can show.

pub mod archive;
pub mod content;
pub mod docx;
pub mod engine;
pub mod pdf;
pub mod render;
pub mod session;
pub mod strategy;

pub use content::{ArchiveEntry, MediaKind, PdfPage, PreviewContent};
pub use engine::PreviewEngine;
pub use render::render_html;
pub use session::PreviewSession;
pub use strategy::PreviewStrategy;
