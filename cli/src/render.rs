use core_types::{
    events::{Notification, NotificationKind},
    Product,
};
use service::view_models::ProductItem;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const FAVORITE: char = '♥';
const NOT_FAVORITE: char = '♡';

/// One catalog line, e.g. `♥ [1] Aqua (Dior) $80 ★★★★★ 4.5`.
pub fn render_item(item: &ProductItem) -> String {
    let stars: String = item
        .star_glyphs
        .iter()
        .map(|filled| if *filled { FILLED_STAR } else { EMPTY_STAR })
        .collect();
    let heart = if item.is_favorite() {
        FAVORITE
    } else {
        NOT_FAVORITE
    };

    format!(
        "{} [{}] {} ({}) {} {} {}",
        heart,
        item.product.id,
        item.product.name,
        item.product.company,
        item.price_label,
        stars,
        item.rating_label
    )
}

pub fn render_screen(title: &str, items: &[ProductItem]) -> String {
    let mut lines = vec![format!("{} ({})", title, items.len())];
    if items.is_empty() {
        lines.push("No perfumes found".to_string());
    }
    lines.extend(items.iter().map(render_item));
    lines.join("\n")
}

pub fn render_detail(product: &Product) -> String {
    let mut lines = vec![
        format!("{} by {}", product.name, product.company),
        format!("Price: ${}", product.price),
        format!("Image: {}", product.image),
        format!("Ratings: {}", product.feedbacks.len()),
    ];
    lines.extend(
        product
            .extra
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value)),
    );
    lines.join("\n")
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "✔",
        NotificationKind::Error => "✘",
    };
    format!("{} {}: {}", marker, notification.title, notification.message)
}
