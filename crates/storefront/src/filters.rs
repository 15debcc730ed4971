//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Formats an amount as rupees.
///
/// Usage in templates: `{{ product.price|rupees }}`
#[askama::filter_fn]
pub fn rupees(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw.parse::<Decimal>().map_or_else(
        |_| format!("{}{raw}", stay_young_core::RUPEE),
        stay_young_core::format_rupees,
    ))
}
