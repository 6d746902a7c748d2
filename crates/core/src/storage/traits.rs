use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for the persistent key-value collaborator that holds
/// the journal (browser storage, a file, a remote settings service...).
///
/// The core only needs whole-value reads and writes under a single key.
/// Implementations report their own failures as `CoreError::Storage`.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Read the value under `key`, `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CoreError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key).await
    }
}
