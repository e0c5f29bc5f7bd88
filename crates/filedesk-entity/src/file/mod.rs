//! File domain entities.

pub mod kind;
pub mod model;
pub mod upload;

pub use kind::FileKind;
pub use model::FileRecord;
pub use upload::UploadFile;
