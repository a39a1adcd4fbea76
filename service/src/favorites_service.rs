use std::sync::Arc;

use core_types::FavoriteEntry;
use favorites_storage::KeyValueStore;

use crate::error::Error;

/// Reads and overwrites the persisted favorites list as a whole.
#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted favorites.
    ///
    /// # Errors
    ///
    /// `Error::StorageReadFailure` if the store is unavailable,
    /// `Error::ParseFailure` if the stored value is not a favorites list.
    pub async fn load(&self) -> Result<Vec<FavoriteEntry>, Error> {
        favorites_storage::load_favorites(self.store.as_ref())
            .await
            .map_err(Error::from_storage_read)
    }

    /// Overwrite the persisted favorites with `favorites`.
    pub async fn save(&self, favorites: &[FavoriteEntry]) -> Result<(), Error> {
        favorites_storage::store_favorites(self.store.as_ref(), favorites)
            .await
            .map_err(Error::from_storage_write)?;
        tracing::info!(count = favorites.len(), "Favorites saved");
        Ok(())
    }
}
