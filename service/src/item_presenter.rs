use core_types::{Feedback, Product};

use crate::view_models::{FavoriteIcon, ProductItem, STAR_COUNT};

/// Mean of all feedback ratings, `0.0` without feedback.
pub fn average_rating(feedbacks: &[Feedback]) -> f64 {
    if feedbacks.is_empty() {
        return 0.0;
    }
    let sum: f64 = feedbacks.iter().map(|feedback| feedback.rating).sum();
    sum / feedbacks.len() as f64
}

/// Number of filled stars for `average`, rounded half up and clamped to `0..=5`.
pub fn filled_star_count(average: f64) -> usize {
    let rounded = average.round();
    if !rounded.is_finite() || rounded <= 0.0 {
        0
    } else {
        (rounded as usize).min(STAR_COUNT)
    }
}

pub fn star_glyphs(average: f64) -> [bool; STAR_COUNT] {
    let filled = filled_star_count(average);
    std::array::from_fn(|index| index < filled)
}

pub fn present(product: &Product, is_favorite: bool) -> ProductItem {
    let average = average_rating(&product.feedbacks);
    ProductItem {
        product: product.clone(),
        average_rating: average,
        star_glyphs: star_glyphs(average),
        favorite_icon: if is_favorite {
            FavoriteIcon::Filled
        } else {
            FavoriteIcon::Outlined
        },
        rating_label: format!("{:.1}", average),
        price_label: format!("${}", product.price),
    }
}
