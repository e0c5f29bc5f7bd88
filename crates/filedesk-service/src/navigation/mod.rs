//! Folder navigation state.

pub mod scope;

pub use scope::FolderScope;
