pub mod events;

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

pub type Price = f64;
pub type Rating = f64;
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

pub const MIN_RATING: Rating = 1.0;
pub const MAX_RATING: Rating = 5.0;

/// Lower bound of the open-ended "over $200" price filter.
pub const OVER_PRICE_THRESHOLD: Price = 200.0;
pub const OVER_PRICE_CEILING: Price = 1_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreTypeError {
    ConversionError(String),
    ValidationError(String),
}

impl std::fmt::Display for CoreTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreTypeError::ConversionError(msg) => write!(f, "Conversion Error: {}", msg),
            CoreTypeError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for CoreTypeError {}

/// Product identifier as served by the catalog API.
///
/// The API is not consistent about the JSON type of ids, so both numbers and
/// strings are accepted and written back in the form they were read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductId::Number(id) => write!(f, "{}", id),
            ProductId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for ProductId {
    type Err = CoreTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CoreTypeError::ConversionError(
                "Product id cannot be empty".to_string(),
            ));
        }
        Ok(value
            .parse::<i64>()
            .map(ProductId::Number)
            .unwrap_or_else(|_| ProductId::Text(value.to_string())))
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        ProductId::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(deserialize_with = "deserialize_number")]
    pub rating: Rating,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Feedback {
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "perfumeName")]
    pub name: String,
    pub company: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub feedbacks: Vec<Feedback>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Product {
    pub fn ratings(&self) -> impl Iterator<Item = Rating> + '_ {
        self.feedbacks.iter().map(|feedback| feedback.rating)
    }

    /// Checks the invariants the rest of the application relies on.
    pub fn validate(&self) -> Result<(), CoreTypeError> {
        if self.name.trim().is_empty() {
            return Err(CoreTypeError::ValidationError(format!(
                "Product {} has an empty name",
                self.id
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CoreTypeError::ValidationError(format!(
                "Product {} has invalid price {}",
                self.id, self.price
            )));
        }
        if let Some(rating) = self
            .ratings()
            .find(|rating| !(MIN_RATING..=MAX_RATING).contains(rating))
        {
            return Err(CoreTypeError::ValidationError(format!(
                "Product {} has rating {} outside {}..={}",
                self.id, rating, MIN_RATING, MAX_RATING
            )));
        }
        Ok(())
    }
}

/// Validates every product and checks that ids are unique across the catalog.
pub fn validate_catalog(products: &[Product]) -> Result<(), CoreTypeError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        product.validate()?;
        if !seen.insert(&product.id) {
            return Err(CoreTypeError::ValidationError(format!(
                "Duplicate product id {}",
                product.id
            )));
        }
    }
    Ok(())
}

/// Snapshot of a product the user marked as favorite.
///
/// Serialized exactly like a [`Product`] so the stored favorites list is a plain
/// array of catalog records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteEntry(pub Product);

impl FavoriteEntry {
    pub fn id(&self) -> &ProductId {
        &self.0.id
    }

    pub fn product(&self) -> &Product {
        &self.0
    }
}

impl From<&Product> for FavoriteEntry {
    fn from(product: &Product) -> Self {
        FavoriteEntry(product.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, EnumIter, Display, EnumString)]
pub enum PriceRangePreset {
    #[strum(to_string = "$0 - $50", serialize = "0-50")]
    UpTo50,
    #[strum(to_string = "$50 - $100", serialize = "50-100")]
    From50To100,
    #[strum(to_string = "$100 - $200", serialize = "100-200")]
    From100To200,
    #[strum(to_string = "Over $200", serialize = "200+")]
    Over200,
}

impl PriceRangePreset {
    pub fn bounds(&self) -> (Price, Price) {
        match self {
            PriceRangePreset::UpTo50 => (0.0, 50.0),
            PriceRangePreset::From50To100 => (50.0, 100.0),
            PriceRangePreset::From100To200 => (100.0, 200.0),
            PriceRangePreset::Over200 => (OVER_PRICE_THRESHOLD, OVER_PRICE_CEILING),
        }
    }
}

/// Converts user or wire input into a number. Surrounding whitespace is ignored;
/// empty, non-numeric and non-finite input is rejected.
pub fn coerce_number(value: &str) -> Result<f64, CoreTypeError> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(CoreTypeError::ConversionError(format!(
            "'{}' is not a number",
            value
        ))),
    }
}

fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::Text(text) => coerce_number(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn product(id: i64, name: &str, price: Price, ratings: &[Rating]) -> Product {
        Product {
            id: ProductId::Number(id),
            name: name.to_string(),
            company: "Dior".to_string(),
            price,
            image: String::new(),
            feedbacks: ratings.iter().map(|r| Feedback::new(*r)).collect(),
            extra: ExtraFields::new(),
        }
    }

    #[test]
    fn test_deserialize_product_from_catalog_json() {
        let json = r#"{
            "id": 1,
            "perfumeName": "Aqua",
            "company": "Dior",
            "price": 80,
            "image": "https://example.com/aqua.png",
            "feedbacks": [{"rating": 4, "author": "ann"}, {"rating": 5}],
            "volume": "100ml"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::Number(1));
        assert_eq!(product.name, "Aqua");
        assert_eq!(product.price, 80.0);
        assert_eq!(product.ratings().collect::<Vec<_>>(), vec![4.0, 5.0]);
        assert_eq!(product.feedbacks[0].extra["author"], "ann");
        assert_eq!(product.extra["volume"], "100ml");
    }

    #[test]
    fn test_price_given_as_string_is_coerced() {
        let json = r#"{"id": "a1", "perfumeName": "Aqua", "company": "Dior", "price": " 79.5 "}"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::Text("a1".to_string()));
        assert_eq!(product.price, 79.5);
        assert!(product.feedbacks.is_empty());
        assert_eq!(product.image, "");
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let json = r#"{"id": 1, "perfumeName": "Aqua", "company": "Dior", "price": "cheap"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_favorite_entry_serializes_as_plain_product() {
        let original = product(7, "Sauvage", 120.0, &[3.0]);
        let entry = FavoriteEntry::from(&original);

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["perfumeName"], "Sauvage");
        let back: FavoriteEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.product(), &original);
    }

    #[test]
    fn test_validate_rejects_bad_products() {
        assert!(product(1, "Aqua", 80.0, &[1.0, 5.0]).validate().is_ok());
        assert!(product(1, "  ", 80.0, &[]).validate().is_err());
        assert!(product(1, "Aqua", -1.0, &[]).validate().is_err());
        assert!(product(1, "Aqua", f64::NAN, &[]).validate().is_err());
        assert!(product(1, "Aqua", 80.0, &[0.0]).validate().is_err());
        assert!(product(1, "Aqua", 80.0, &[5.5]).validate().is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicate_ids() {
        let catalog = vec![product(1, "Aqua", 80.0, &[]), product(1, "Sauvage", 120.0, &[])];
        assert!(matches!(
            validate_catalog(&catalog),
            Err(CoreTypeError::ValidationError(_))
        ));
    }

    #[test]
    fn test_product_id_from_str() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::Number(42));
        assert_eq!(
            "abc".parse::<ProductId>().unwrap(),
            ProductId::Text("abc".to_string())
        );
        assert!("".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("50").unwrap(), 50.0);
        assert_eq!(coerce_number(" 12.5 ").unwrap(), 12.5);
        assert!(coerce_number("").is_err());
        assert!(coerce_number("abc").is_err());
        assert!(coerce_number("inf").is_err());
    }

    #[test]
    fn test_price_presets() {
        assert_eq!(PriceRangePreset::iter().count(), 4);
        assert_eq!("200+".parse::<PriceRangePreset>().unwrap(), PriceRangePreset::Over200);
        assert_eq!(PriceRangePreset::Over200.bounds().0, OVER_PRICE_THRESHOLD);
        assert_eq!(PriceRangePreset::UpTo50.to_string(), "$0 - $50");
        for preset in PriceRangePreset::iter() {
            let (min, max) = preset.bounds();
            assert!(min <= max);
        }
    }
}
