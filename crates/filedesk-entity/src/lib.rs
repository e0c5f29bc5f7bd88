//! # filedesk-entity
//!
//! Domain models for FileDesk. Every struct here is either a value the
//! backend sends or accepts (folders, file records, login payloads) or a
//! client-side value object (credential bundle, upload batches). All of
//! them derive `Debug`, `Clone`, and the wire types additionally derive
//! `Serialize`/`Deserialize` matching the backend's JSON field names.

pub mod file;
pub mod folder;
pub mod session;
pub mod upload;
pub mod user;
