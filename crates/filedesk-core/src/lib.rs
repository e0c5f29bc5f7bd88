//! # filedesk-core
//!
//! Core crate for FileDesk. Contains the client configuration schema,
//! typed identifiers, the persisted-state and byte-stream traits, drive
//! events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileDesk crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
