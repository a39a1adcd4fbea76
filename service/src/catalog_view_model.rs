use std::sync::Arc;

use catalog_client::CatalogApi;
use core_types::{
    FavoriteEntry, Price, PriceRangePreset, Product, ProductId, coerce_number,
    events::Notification,
};
use favorites_storage::KeyValueStore;

use crate::{
    error::Error,
    favorites_service::FavoritesService,
    filter::{self, FilterCriteria, FilterPanel},
    item_presenter,
    navigation::Navigator,
    view_models::{ItemIntent, ProductItem},
};

/// State and behaviour of the catalog screen.
///
/// Every operation runs to completion before the next one starts (`&mut self`),
/// so there is no locking. Failures are both returned and published as
/// [`Notification`]s on the channel given to [`CatalogViewModel::new`].
///
/// Favorites are committed to memory only after the store accepted the new list:
/// when a write fails the in-memory favorites are exactly what they were before
/// the toggle, and they agree with what was last persisted.
pub struct CatalogViewModel {
    catalog_api: Arc<dyn CatalogApi>,
    favorites_service: FavoritesService,
    notifier: flume::Sender<Notification>,
    all_products: Vec<Product>,
    displayed_products: Vec<Product>,
    favorites: Vec<FavoriteEntry>,
    available_brands: Vec<String>,
    active_title: String,
    search_text: String,
    filter: FilterCriteria,
    filter_panel: FilterPanel,
}

impl CatalogViewModel {
    pub fn new(
        catalog_api: Arc<dyn CatalogApi>,
        store: Arc<dyn KeyValueStore>,
        notifier: flume::Sender<Notification>,
    ) -> Self {
        Self {
            catalog_api,
            favorites_service: FavoritesService::new(store),
            notifier,
            all_products: Vec::new(),
            displayed_products: Vec::new(),
            favorites: Vec::new(),
            available_brands: Vec::new(),
            active_title: FilterCriteria::All.title(),
            search_text: String::new(),
            filter: FilterCriteria::All,
            filter_panel: FilterPanel::Closed,
        }
    }

    /// Refresh favorites and the catalog. Meant to run on every screen focus.
    ///
    /// A failing favorites read is only logged and keeps the favorites from the
    /// previous load. A failing catalog fetch keeps the previous catalog and is
    /// reported.
    pub async fn load(&mut self) -> Result<(), Error> {
        match self.favorites_service.load().await {
            Ok(favorites) => self.favorites = favorites,
            Err(e) => tracing::warn!(error = %e, "Failed to load favorites, keeping previous"),
        }

        let products = match self.catalog_api.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                let error = Error::from(e);
                tracing::error!(error = %error, "Failed to fetch catalog");
                self.notify(Notification::error(format!("Failed to load perfumes. {}", error)));
                return Err(error);
            }
        };

        tracing::debug!(
            products = products.len(),
            favorites = self.favorites.len(),
            "Catalog loaded"
        );
        self.available_brands = filter::distinct_brands(&products);
        self.all_products = products;
        self.search_text.clear();
        self.set_filter(FilterCriteria::All);
        Ok(())
    }

    /// Show products whose name contains `text`, ignoring case. Replaces any brand
    /// or price filter.
    pub fn search(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.filter = FilterCriteria::All;
        self.active_title = self.filter.title();
        self.displayed_products = filter::search_products(&self.all_products, text);
        tracing::debug!(text, shown = self.displayed_products.len(), "Search applied");
    }

    pub fn filter_by_brand(&mut self, brand: &str) {
        self.search_text.clear();
        self.set_filter(FilterCriteria::Brand(brand.to_string()));
    }

    /// Show products priced within `min..=max`.
    pub fn filter_by_price_range(&mut self, min: Price, max: Price) {
        self.search_text.clear();
        self.set_filter(FilterCriteria::PriceRange { min, max });
    }

    /// Like [`Self::filter_by_price_range`] for raw text input. Leaves the state
    /// untouched when either bound is not a number.
    pub fn filter_by_price_input(&mut self, min: &str, max: &str) -> Result<(), Error> {
        let min = coerce_number(min)?;
        let max = coerce_number(max)?;
        self.filter_by_price_range(min, max);
        Ok(())
    }

    pub fn apply_price_preset(&mut self, preset: PriceRangePreset) {
        let (min, max) = preset.bounds();
        self.filter_by_price_range(min, max);
    }

    pub fn reset_to_all(&mut self) {
        self.search_text.clear();
        self.set_filter(FilterCriteria::All);
    }

    fn set_filter(&mut self, criteria: FilterCriteria) {
        self.displayed_products = criteria.apply(&self.all_products);
        self.active_title = criteria.title();
        self.filter = criteria;
        self.filter_panel = FilterPanel::Closed;
        tracing::debug!(
            title = %self.active_title,
            shown = self.displayed_products.len(),
            "Filter applied"
        );
    }

    pub fn toggle_filter_menu(&mut self) {
        self.filter_panel = self.filter_panel.toggle_menu();
    }

    pub fn toggle_brand_list(&mut self) {
        self.filter_panel = self.filter_panel.toggle_brands();
    }

    pub fn show_price_list(&mut self) {
        self.filter_panel = self.filter_panel.show_prices();
    }

    /// Add a snapshot of `product` to the favorites and persist the whole list.
    /// Does nothing when the product already is a favorite.
    ///
    /// The update is built from the stored list, not the in-memory one, so
    /// favorites the last [`Self::load`] failed to read are never overwritten.
    pub async fn toggle_favorite(&mut self, product: &Product) -> Result<(), Error> {
        const FAILURE: &str = "Failed to add item to favorites.";
        let stored = self.stored_favorites(FAILURE).await?;

        if stored.iter().any(|entry| entry.id() == &product.id) {
            tracing::debug!(id = %product.id, "Already a favorite");
            self.favorites = stored;
            return Ok(());
        }

        let mut updated = stored;
        updated.push(FavoriteEntry::from(product));

        match self.favorites_service.save(&updated).await {
            Ok(()) => {
                self.favorites = updated;
                self.notify(Notification::success("Item added to favorites!"));
                Ok(())
            }
            Err(e) => {
                tracing::error!(id = %product.id, error = %e, "Failed to add favorite");
                self.notify(Notification::error(FAILURE));
                Err(e)
            }
        }
    }

    /// Remove the favorite with `id` and persist the whole list. Does nothing when
    /// there is no such favorite.
    pub async fn untoggle_favorite(&mut self, id: &ProductId) -> Result<(), Error> {
        const FAILURE: &str = "Failed to remove item from favorites.";
        let stored = self.stored_favorites(FAILURE).await?;

        if !stored.iter().any(|entry| entry.id() == id) {
            tracing::debug!(%id, "Not a favorite");
            self.favorites = stored;
            return Ok(());
        }

        let updated: Vec<FavoriteEntry> = stored
            .into_iter()
            .filter(|entry| entry.id() != id)
            .collect();

        match self.favorites_service.save(&updated).await {
            Ok(()) => {
                self.favorites = updated;
                self.notify(Notification::success("Item removed from favorites!"));
                Ok(())
            }
            Err(e) => {
                tracing::error!(%id, error = %e, "Failed to remove favorite");
                self.notify(Notification::error(FAILURE));
                Err(e)
            }
        }
    }

    /// Current persisted favorites. A failed read aborts the toggle with
    /// `failure` as the error notification.
    async fn stored_favorites(&self, failure: &str) -> Result<Vec<FavoriteEntry>, Error> {
        self.favorites_service.load().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read favorites before update");
            self.notify(Notification::error(failure));
            e
        })
    }

    pub async fn handle_intent(
        &mut self,
        intent: ItemIntent,
        navigator: &dyn Navigator,
    ) -> Result<(), Error> {
        match intent {
            ItemIntent::ToggleFavorite(product) => self.toggle_favorite(&product).await,
            ItemIntent::RemoveFavorite(id) => self.untoggle_favorite(&id).await,
            ItemIntent::ShowDetail(product) => {
                navigator.show_detail(&product);
                Ok(())
            }
        }
    }

    pub fn is_favorite(&self, id: &ProductId) -> bool {
        self.favorites.iter().any(|entry| entry.id() == id)
    }

    /// Displayed products run through the item presenter.
    pub fn items(&self) -> Vec<ProductItem> {
        self.displayed_products
            .iter()
            .map(|product| item_presenter::present(product, self.is_favorite(&product.id)))
            .collect()
    }

    /// Product with `id`. Falls back to comparing the textual form, so `42` typed
    /// by a user also finds a product whose id was served as `"42"`.
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        find_by_id(&self.all_products, id, |product| &product.id)
    }

    /// Favorite with `id`, with the same fallback as [`Self::find_product`].
    pub fn find_favorite(&self, id: &ProductId) -> Option<&FavoriteEntry> {
        find_by_id(&self.favorites, id, FavoriteEntry::id)
    }

    pub fn all_products(&self) -> &[Product] {
        &self.all_products
    }

    pub fn displayed_products(&self) -> &[Product] {
        &self.displayed_products
    }

    pub fn favorites(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    pub fn distinct_brands(&self) -> &[String] {
        &self.available_brands
    }

    pub fn active_title(&self) -> &str {
        &self.active_title
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn filter_panel(&self) -> FilterPanel {
        self.filter_panel
    }

    fn notify(&self, notification: Notification) {
        if self.notifier.send(notification).is_err() {
            tracing::warn!("Notification receiver dropped");
        }
    }
}

fn find_by_id<'a, T>(
    items: &'a [T],
    id: &ProductId,
    id_of: impl Fn(&T) -> &ProductId,
) -> Option<&'a T> {
    items.iter().find(|item| id_of(item) == id).or_else(|| {
        let text = id.to_string();
        items.iter().find(|item| id_of(item).to_string() == text)
    })
}
