//! Cache types for REST API responses.

use stay_young_core::{Category, Product};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products,
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}
