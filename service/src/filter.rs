use std::collections::HashSet;

use core_types::{OVER_PRICE_THRESHOLD, Price, Product};

pub const ALL_PRODUCTS_TITLE: &str = "All Perfumes";

/// Brand or price filter currently narrowing the catalog. Search text is tracked
/// separately and never combined with these.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCriteria {
    All,
    Brand(String),
    PriceRange { min: Price, max: Price },
}

impl FilterCriteria {
    pub fn title(&self) -> String {
        match self {
            FilterCriteria::All => ALL_PRODUCTS_TITLE.to_string(),
            FilterCriteria::Brand(brand) => format!("Perfumes of {}", brand),
            FilterCriteria::PriceRange { min, .. } if *min == OVER_PRICE_THRESHOLD => {
                format!("Perfumes over ${}", OVER_PRICE_THRESHOLD)
            }
            FilterCriteria::PriceRange { min, max } => {
                format!("Perfumes in price ${} and ${}", min, max)
            }
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterCriteria::All => true,
            FilterCriteria::Brand(brand) => product.company == *brand,
            FilterCriteria::PriceRange { min, max } => {
                *min <= product.price && product.price <= *max
            }
        }
    }

    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

/// Which part of the filter menu is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPanel {
    #[default]
    Closed,
    Menu,
    ShowingBrands,
    ShowingPrices,
}

impl FilterPanel {
    pub fn toggle_menu(self) -> Self {
        match self {
            FilterPanel::Closed => FilterPanel::Menu,
            _ => FilterPanel::Closed,
        }
    }

    pub fn toggle_brands(self) -> Self {
        match self {
            FilterPanel::ShowingBrands => FilterPanel::Menu,
            _ => FilterPanel::ShowingBrands,
        }
    }

    pub fn show_prices(self) -> Self {
        FilterPanel::ShowingPrices
    }

    pub fn is_open(self) -> bool {
        self != FilterPanel::Closed
    }
}

/// Case-insensitive substring match on the product name. Empty text matches all.
pub fn search_products(products: &[Product], text: &str) -> Vec<Product> {
    let needle = text.to_lowercase();
    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Distinct brand names in first-seen order.
pub fn distinct_brands(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| seen.insert(product.company.as_str()))
        .map(|product| product.company.clone())
        .collect()
}
