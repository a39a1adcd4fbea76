use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use core_types::Product;

use crate::{CatalogApi, CatalogError};

#[derive(Default)]
struct MockState {
    products: Vec<Product>,
    fail_with: Option<CatalogError>,
    fetch_count: usize,
}

/// Mock implementation of CatalogApi for testing
///
/// Serves a configurable product list, can be switched to fail, and counts fetches.
#[derive(Clone, Default)]
pub struct MockCatalogApi {
    state: Arc<Mutex<MockState>>,
}

impl MockCatalogApi {
    pub fn new(products: Vec<Product>) -> Self {
        let mock = Self::default();
        mock.set_products(products);
        mock
    }

    /// Replace the catalog served by subsequent fetches
    pub fn set_products(&self, products: Vec<Product>) {
        self.state.lock().unwrap().products = products;
    }

    /// Make subsequent fetches fail with `error`, or succeed again with `None`
    pub fn fail_with(&self, error: Option<CatalogError>) {
        self.state.lock().unwrap().fail_with = error;
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().unwrap().fetch_count
    }
}

#[async_trait]
impl CatalogApi for MockCatalogApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_count += 1;
        match &state.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(state.products.clone()),
        }
    }
}
