//! Product records as served by the REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryRef;
use super::detail_tag::DetailTag;
use super::id::ProductId;
use super::price::discount_percentage;

/// A sellable catalog item.
///
/// Mirrors the API's JSON document (camelCase keys, `_id` primary key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sub_name: String,
    pub slug: String,
    #[serde(default)]
    pub category: Vec<CategoryRef>,
    #[serde(default)]
    pub detail_tags: Vec<DetailTag>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discounted_price: Decimal,
    #[serde(default)]
    pub stock_available: i64,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// The first image, used on the detail page and in the cart.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The image shown on listing cards: the second image, else the first.
    #[must_use]
    pub fn card_image(&self) -> Option<&str> {
        self.images
            .get(1)
            .or_else(|| self.images.first())
            .map(String::as_str)
    }

    /// Whole-percent discount of `discounted_price` against `price`.
    #[must_use]
    pub fn discount_percentage(&self) -> u32 {
        discount_percentage(self.price, self.discounted_price)
    }

    /// Whether any stock is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_available > 0
    }

    /// Detail tags that have a display label.
    pub fn known_detail_tags(&self) -> impl Iterator<Item = DetailTag> + '_ {
        self.detail_tags.iter().copied().filter(|tag| tag.is_known())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "_id": "650a1f",
        "name": "Snail Mucin",
        "subName": "96% power essence",
        "slug": "snail-mucin",
        "category": ["c1"],
        "detailTags": ["CRUELTY_FREE", "SOMETHING_NEW"],
        "images": ["https://cdn.example.com/1.jpg", "https://cdn.example.com/2.jpg"],
        "price": 1500,
        "discountedPrice": 1125.5,
        "stockAvailable": 4,
        "description": "Hydrating essence",
        "__v": 0
    }"#;

    #[test]
    fn test_deserialize_api_document() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();

        assert_eq!(product.id.as_str(), "650a1f");
        assert_eq!(product.sub_name, "96% power essence");
        assert_eq!(product.price, Decimal::from(1500));
        assert_eq!(product.discounted_price, "1125.5".parse().unwrap());
        assert_eq!(product.stock_available, 4);
        assert!(product.in_stock());
    }

    #[test]
    fn test_card_image_prefers_second() {
        let mut product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.card_image(), Some("https://cdn.example.com/2.jpg"));

        product.images.truncate(1);
        assert_eq!(product.card_image(), Some("https://cdn.example.com/1.jpg"));

        product.images.clear();
        assert_eq!(product.card_image(), None);
    }

    #[test]
    fn test_known_detail_tags_skips_unknown() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        let tags: Vec<_> = product.known_detail_tags().collect();
        assert_eq!(tags, vec![DetailTag::CrueltyFree]);
    }

    #[test]
    fn test_discount_percentage() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        // (1500 - 1125.5) / 1500 = 24.97%
        assert_eq!(product.discount_percentage(), 25);
    }
}
