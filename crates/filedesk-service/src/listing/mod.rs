//! Folder and file listings for the current scope.

pub mod refresh;
pub mod service;

pub use refresh::{RefreshSignal, RefreshTick};
pub use service::DriveListing;
