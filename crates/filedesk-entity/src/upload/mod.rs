//! Upload selections and batches.

pub mod batch;
pub mod source;

pub use batch::{UploadBatch, UploadFailure, UploadReport};
pub use source::{DroppedItem, LocalFile, PickedFile, UploadSource};
