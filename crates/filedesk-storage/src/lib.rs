//! # filedesk-storage
//!
//! Local persistence for FileDesk: the durable session state store (file
//! backed, plus an in-memory variant) and streamed reads/writes of local
//! files for uploads and downloads.

pub mod local;
pub mod memory;
pub mod transfer;

pub use local::FileStateStore;
pub use memory::MemoryStateStore;
