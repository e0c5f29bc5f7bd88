//! Trait seams implemented by the storage crate.

pub mod state;

pub use state::StateStore;
