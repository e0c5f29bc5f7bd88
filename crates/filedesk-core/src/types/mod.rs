//! Shared value types.

pub mod id;
pub mod stream;

pub use id::{FileId, FolderId, UserId};
pub use stream::ByteStream;
