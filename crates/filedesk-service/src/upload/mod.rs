//! Upload orchestration: classify a selection, enumerate directories, then
//! push files one at a time.

pub mod classify;
pub mod orchestrator;
pub mod traversal;

pub use classify::classify;
pub use orchestrator::UploadOrchestrator;
pub use traversal::{DirectoryWalker, TraversalStats, WalkOptions, describe_file};
