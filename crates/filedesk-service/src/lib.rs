//! # filedesk-service
//!
//! Client-side use cases for FileDesk. Each service holds its collaborators
//! behind `Arc` and is wired together once in [`DriveContext`].
//!
//! The session store gates every remote call, the folder scope decides
//! where listings and uploads apply, and mutations publish a refresh signal
//! that listings follow.

pub mod context;
pub mod listing;
pub mod navigation;
pub mod preview;
pub mod session;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use context::DriveContext;
pub use listing::{DriveListing, RefreshSignal};
pub use navigation::FolderScope;
pub use preview::{PreviewContent, PreviewEngine, PreviewSession, PreviewStrategy};
pub use session::SessionStore;
pub use upload::{DirectoryWalker, TraversalStats, UploadOrchestrator};
