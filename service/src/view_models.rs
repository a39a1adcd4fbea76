use core_types::{Product, ProductId};

pub const STAR_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteIcon {
    Filled,
    Outlined,
}

/// Something the user asked for from a single catalog item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemIntent {
    ToggleFavorite(Product),
    RemoveFavorite(ProductId),
    ShowDetail(Product),
}

/// Display-ready representation of one product in the catalog grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductItem {
    pub product: Product,
    pub average_rating: f64,
    pub star_glyphs: [bool; STAR_COUNT],
    pub favorite_icon: FavoriteIcon,
    pub rating_label: String,
    pub price_label: String,
}

impl ProductItem {
    pub fn is_favorite(&self) -> bool {
        self.favorite_icon == FavoriteIcon::Filled
    }

    pub fn filled_stars(&self) -> usize {
        self.star_glyphs.iter().filter(|filled| **filled).count()
    }

    pub fn favorite_pressed(&self) -> ItemIntent {
        if self.is_favorite() {
            ItemIntent::RemoveFavorite(self.product.id.clone())
        } else {
            ItemIntent::ToggleFavorite(self.product.clone())
        }
    }

    pub fn item_pressed(&self) -> ItemIntent {
        ItemIntent::ShowDetail(self.product.clone())
    }
}
