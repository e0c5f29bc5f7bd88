//! # filedesk-client
//!
//! The remote data client: one call per resource action against the
//! folder/file REST service. [`DriveApi`] is the seam the service layer
//! depends on; [`HttpDriveClient`] is the reqwest implementation.

pub mod api;
pub mod error;
pub mod http;

pub use api::DriveApi;
pub use http::HttpDriveClient;
