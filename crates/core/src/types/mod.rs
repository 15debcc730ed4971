//! Core types for Stay Young.
//!
//! This module provides type-safe wrappers for the storefront's domain.

pub mod cart;
pub mod category;
pub mod detail_tag;
pub mod draft;
pub mod id;
pub mod price;
pub mod product;
pub mod slug;
pub mod toast;

pub use cart::{Cart, CartError, CartItem, MAX_QUANTITY};
pub use category::{Category, CategoryRef};
pub use detail_tag::{DetailTag, DetailTagError};
pub use draft::{FieldErrors, IMAGE_FIELDS, ProductDraft, ProductFormInput};
pub use id::*;
pub use price::{RUPEE, discount_percentage, format_rupees};
pub use product::Product;
pub use slug::{Slug, SlugError};
pub use toast::{Toast, ToastLevel};
