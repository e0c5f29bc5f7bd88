//! Authentication state.

pub mod store;

pub use store::{ActiveSession, SessionStore};
