//! Product card view used on listing pages.

use stay_young_core::{Product, format_rupees};

/// Card display data for the `partials/product_card.html` include.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub slug: String,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub discounted_price: String,
    pub discount_percentage: u32,
}

impl ProductCardView {
    /// Link to the product detail page.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/product/{}", self.slug)
    }
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            image: product.card_image().map(str::to_owned),
            price: format_rupees(product.price),
            discounted_price: format_rupees(product.discounted_price),
            discount_percentage: product.discount_percentage(),
        }
    }
}
