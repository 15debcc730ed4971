//! Session cart keyed by product slug.
//!
//! The cart is a small reducer: every mutation either succeeds and leaves
//! the cart consistent or returns a [`CartError`] and leaves it unchanged.
//! No line ever holds more than [`MAX_QUANTITY`] units and no two lines
//! share a slug.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::Product;

/// Most units of a single product a cart line may hold.
pub const MAX_QUANTITY: u32 = 15;

/// Cart mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The line would exceed [`MAX_QUANTITY`].
    #[error("Max quantity selected")]
    MaxQuantity,

    /// A line was added with zero units.
    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    /// No line with this slug.
    #[error("Item not in cart: {0}")]
    NotInCart(String),
}

/// A product snapshot plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub slug: String,
    pub name: String,
    pub sub_name: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub discounted_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product at the given quantity.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            sub_name: product.sub_name.clone(),
            image: product.primary_image().map(str::to_owned),
            price: product.price,
            discounted_price: product.discounted_price,
            quantity,
        }
    }

    /// Discounted price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.discounted_price * Decimal::from(self.quantity)
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for a slug.
    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.slug == slug)
    }

    /// Quantity the line would have after one more "add to cart".
    #[must_use]
    pub fn quantity_for_add(&self, slug: &str) -> u32 {
        self.get(slug).map_or(1, |item| item.quantity.saturating_add(1))
    }

    /// Insert or replace the line for `item.slug`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MaxQuantity`] above 15 units and
    /// [`CartError::ZeroQuantity`] for zero units.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        check_quantity(item.quantity)?;

        match self.items.iter_mut().find(|line| line.slug == item.slug) {
            Some(line) => *line = item,
            None => self.items.push(item),
        }
        Ok(())
    }

    /// Add one unit of a product.
    ///
    /// Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::MaxQuantity`] if the line already holds 15 units.
    pub fn add_product(&mut self, product: &Product) -> Result<u32, CartError> {
        let quantity = self.quantity_for_add(&product.slug);
        self.add_item(CartItem::from_product(product, quantity))?;
        Ok(quantity)
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] for an unknown slug and
    /// [`CartError::MaxQuantity`] above 15 units.
    pub fn update_quantity(&mut self, slug: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(slug).map(|_| ());
        }
        check_quantity(quantity)?;

        let line = self
            .items
            .iter_mut()
            .find(|line| line.slug == slug)
            .ok_or_else(|| CartError::NotInCart(slug.to_owned()))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] for an unknown slug.
    pub fn remove(&mut self, slug: &str) -> Result<CartItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|line| line.slug == slug)
            .ok_or_else(|| CartError::NotInCart(slug.to_owned()))?;
        Ok(self.items.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of discounted line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of `(price - discounted price) * quantity`.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| {
                (item.price - item.discounted_price).max(Decimal::ZERO)
                    * Decimal::from(item.quantity)
            })
            .sum()
    }
}

fn check_quantity(quantity: u32) -> Result<(), CartError> {
    if quantity == 0 {
        return Err(CartError::ZeroQuantity);
    }
    if quantity > MAX_QUANTITY {
        return Err(CartError::MaxQuantity);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::id::ProductId;

    fn product(slug: &str, price: i64, discounted: i64) -> Product {
        Product {
            id: ProductId::new(format!("id-{slug}")),
            name: slug.to_uppercase(),
            sub_name: String::new(),
            slug: slug.to_string(),
            category: Vec::new(),
            detail_tags: Vec::new(),
            images: vec![format!("https://cdn.example.com/{slug}.jpg")],
            price: Decimal::from(price),
            discounted_price: Decimal::from(discounted),
            stock_available: 10,
            description: String::new(),
        }
    }

    #[test]
    fn test_add_product_increments_existing_line() {
        let mut cart = Cart::default();
        let toner = product("toner", 500, 400);

        assert_eq!(cart.add_product(&toner).unwrap(), 1);
        assert_eq!(cart.add_product(&toner).unwrap(), 2);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("toner").map(|i| i.quantity), Some(2));
    }

    #[test]
    fn test_quantity_capped_at_fifteen() {
        let mut cart = Cart::default();
        let toner = product("toner", 500, 400);

        for _ in 0..MAX_QUANTITY {
            cart.add_product(&toner).unwrap();
        }
        assert_eq!(cart.add_product(&toner), Err(CartError::MaxQuantity));
        assert_eq!(cart.get("toner").map(|i| i.quantity), Some(MAX_QUANTITY));
        assert_eq!(CartError::MaxQuantity.to_string(), "Max quantity selected");
    }

    #[test]
    fn test_add_item_replaces_line_in_place() {
        let mut cart = Cart::default();
        cart.add_product(&product("a", 100, 100)).unwrap();
        cart.add_product(&product("b", 100, 100)).unwrap();

        cart.add_item(CartItem::from_product(&product("a", 100, 90), 5))
            .unwrap();

        let slugs: Vec<_> = cart.items().iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert_eq!(cart.get("a").map(|i| i.quantity), Some(5));
        assert_eq!(
            cart.get("a").map(|i| i.discounted_price),
            Some(Decimal::from(90))
        );
    }

    #[test]
    fn test_add_item_rejects_out_of_range() {
        let mut cart = Cart::default();
        let p = product("a", 100, 100);

        assert_eq!(
            cart.add_item(CartItem::from_product(&p, 16)),
            Err(CartError::MaxQuantity)
        );
        assert_eq!(
            cart.add_item(CartItem::from_product(&p, 0)),
            Err(CartError::ZeroQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        cart.add_product(&product("a", 100, 100)).unwrap();

        cart.update_quantity("a", 15).unwrap();
        assert_eq!(cart.item_count(), 15);

        assert_eq!(cart.update_quantity("a", 16), Err(CartError::MaxQuantity));
        assert_eq!(cart.item_count(), 15);

        cart.update_quantity("a", 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.update_quantity("missing", 2),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::default();
        let a = product("a", 1000, 750);
        let b = product("b", 200, 200);
        cart.add_product(&a).unwrap();
        cart.add_product(&a).unwrap();
        cart.add_product(&b).unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(1700));
        assert_eq!(cart.savings(), Decimal::from(500));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add_product(&product("a", 1, 1)).unwrap();
        cart.add_product(&product("b", 1, 1)).unwrap();

        let removed = cart.remove("a").unwrap();
        assert_eq!(removed.slug, "a");
        assert!(cart.remove("a").is_err());

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_serializes_for_session() {
        let mut cart = Cart::default();
        cart.add_product(&product("a", 100, 80)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
