pub mod file_store;
pub mod memory_store;

use async_trait::async_trait;
use core_types::FavoriteEntry;

/// Key under which the favorites list is stored.
pub const FAVORITES_KEY: &str = "favorites";

/// Errors that can occur when working with the key-value store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read from store: {0}")]
    Read(String),

    #[error("Failed to write to store: {0}")]
    Write(String),

    #[error("Failed to serialize/deserialize stored value: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable string-to-string store. Values are read and written whole.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load the favorites list from the store.
///
/// A missing key is an empty list.
///
/// # Errors
///
/// Returns `StorageError::Read` if the store cannot be read and
/// `StorageError::Serialization` if the stored value is not a favorites list.
pub async fn load_favorites(store: &dyn KeyValueStore) -> Result<Vec<FavoriteEntry>, StorageError> {
    match store.get(FAVORITES_KEY).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Overwrite the stored favorites list with `favorites`.
///
/// # Errors
///
/// Returns an error if the list cannot be serialized or the store rejects the write.
pub async fn store_favorites(
    store: &dyn KeyValueStore,
    favorites: &[FavoriteEntry],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(favorites)?;
    store.set(FAVORITES_KEY, &json).await
}
