//! Persisted client state trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Durable key/value storage for client-side state.
///
/// The session store keeps exactly two keys here: the credential bundle and
/// the user identity. Values are JSON strings written and read verbatim;
/// there is no versioning or migration.
#[async_trait]
pub trait StateStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read a value. Returns `None` if the key was never written or was removed.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
