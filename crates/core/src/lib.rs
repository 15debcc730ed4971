//! Stay Young Core - Shared domain types.
//!
//! This crate provides the types used by both Stay Young binaries:
//! - `storefront` - Public product pages and cart
//! - `admin` - Product management form
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no sessions. Products and categories are owned by the external
//! REST API; these types mirror its JSON records.
//!
//! # Modules
//!
//! - [`types`] - Product records, the product form schema, the cart reducer,
//!   price helpers, and newtype IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
