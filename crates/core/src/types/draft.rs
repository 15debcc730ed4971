//! Product form schema.
//!
//! [`ProductFormInput`] is the raw admin form submission, every field as the
//! browser sent it. Validating it yields either a [`ProductDraft`], the JSON
//! body the REST API accepts for create and update, or [`FieldErrors`] keyed
//! by form field name for re-rendering the form.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use super::detail_tag::DetailTag;
use super::id::CategoryId;
use super::product::Product;

/// Names of the five image URL inputs, in display order.
pub const IMAGE_FIELDS: [&str; 5] = ["image1", "image2", "image3", "image4", "image5"];

const EXPECTED_NUMBER: &str = "Expected number";

/// Raw product form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFormInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Subname is required"))]
    pub sub_name: String,

    #[validate(length(min = 1, message = "At least one category must be selected"))]
    pub category: Vec<String>,

    pub detail_tags: Vec<String>,

    #[validate(custom(function = "validate_image_url"))]
    pub image1: String,
    pub image2: String,
    pub image3: String,
    pub image4: String,
    pub image5: String,

    #[validate(custom(function = "validate_price"))]
    pub price: String,

    #[validate(custom(function = "validate_discounted_price"))]
    pub discounted_price: String,

    #[validate(custom(function = "validate_stock"))]
    pub stock_available: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

/// Validated product payload sent to the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub sub_name: String,
    pub category: Vec<CategoryId>,
    pub detail_tags: Vec<DetailTag>,
    pub images: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discounted_price: Decimal,
    pub stock_available: i64,
    pub description: String,
}

/// First validation message per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Message for a form field (camelCase name), if it failed validation.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Record a message unless the field already has one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    /// Iterate `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map_or_else(|| first.code.to_string(), ToString::to_string);
                out.insert(&to_camel_case(&field.to_string()), message);
            }
        }
        out
    }
}

impl ProductFormInput {
    /// Pre-fill the form from an existing product (edit mode).
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let image = |i: usize| product.images.get(i).cloned().unwrap_or_default();

        Self {
            name: product.name.clone(),
            sub_name: product.sub_name.clone(),
            category: product
                .category
                .iter()
                .map(|c| c.id().to_string())
                .collect(),
            detail_tags: product
                .known_detail_tags()
                .map(|tag| tag.value().to_owned())
                .collect(),
            image1: image(0),
            image2: image(1),
            image3: image(2),
            image4: image(3),
            image5: image(4),
            price: product.price.normalize().to_string(),
            discounted_price: product.discounted_price.normalize().to_string(),
            stock_available: product.stock_available.to_string(),
            description: product.description.clone(),
        }
    }

    /// The five image inputs as `(field name, value)` pairs.
    #[must_use]
    pub fn image_inputs(&self) -> [(&'static str, &str); 5] {
        [
            (IMAGE_FIELDS[0], self.image1.as_str()),
            (IMAGE_FIELDS[1], self.image2.as_str()),
            (IMAGE_FIELDS[2], self.image3.as_str()),
            (IMAGE_FIELDS[3], self.image4.as_str()),
            (IMAGE_FIELDS[4], self.image5.as_str()),
        ]
    }

    /// Image URLs for the API: image 1, then each non-empty optional image.
    #[must_use]
    pub fn images(&self) -> Vec<String> {
        let mut images = vec![self.image1.clone()];
        images.extend(
            [&self.image2, &self.image3, &self.image4, &self.image5]
                .into_iter()
                .filter(|url| !url.is_empty())
                .cloned(),
        );
        images
    }

    /// Whether a category checkbox should render checked.
    #[must_use]
    pub fn has_category(&self, id: &str) -> bool {
        self.category.iter().any(|c| c == id)
    }

    /// Whether a detail tag checkbox should render checked.
    #[must_use]
    pub fn has_detail_tag(&self, value: &str) -> bool {
        self.detail_tags.iter().any(|t| t == value)
    }

    /// Validate the submission and build the API payload.
    ///
    /// # Errors
    ///
    /// Returns the first message for every failing field. The rule that
    /// price must be at least the discounted price is reported on `price`
    /// and only checked once both prices are individually valid.
    pub fn validate_draft(&self) -> Result<ProductDraft, FieldErrors> {
        let mut errors = self
            .validate()
            .err()
            .as_ref()
            .map(FieldErrors::from)
            .unwrap_or_default();

        let price = parse_positive(&self.price).ok();
        let discounted_price = parse_positive(&self.discounted_price).ok();
        if let (Some(price), Some(discounted)) = (price, discounted_price) {
            if price < discounted {
                errors.insert(
                    "price",
                    "Price must be greater than or equal to discounted price",
                );
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let (Some(price), Some(discounted_price), Ok(stock_available)) = (
            price,
            discounted_price,
            self.stock_available.trim().parse::<i64>(),
        ) else {
            // Field validators already rejected unparsable numbers.
            errors.insert("stockAvailable", EXPECTED_NUMBER);
            return Err(errors);
        };

        Ok(ProductDraft {
            name: self.name.clone(),
            sub_name: self.sub_name.clone(),
            category: self
                .category
                .iter()
                .map(|id| CategoryId::new(id.as_str()))
                .collect(),
            detail_tags: self
                .detail_tags
                .iter()
                .filter_map(|value| DetailTag::from_str(value).ok())
                .collect(),
            images: self.images(),
            price,
            discounted_price,
            stock_available,
            description: self.description.clone(),
        })
    }
}

// =============================================================================
// Field validators
// =============================================================================

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Parse a price input, requiring a number greater than zero.
fn parse_positive(input: &str) -> Result<Decimal, &'static str> {
    let value = Decimal::from_str(input.trim()).map_err(|_| EXPECTED_NUMBER)?;
    if value <= Decimal::ZERO {
        return Err("positive");
    }
    Ok(value)
}

fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Image 1 url is required"));
    }
    url::Url::parse(value).map_err(|_| error("url", "Invalid url"))?;
    Ok(())
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    match parse_positive(value) {
        Ok(_) => Ok(()),
        Err(EXPECTED_NUMBER) => Err(error("number", EXPECTED_NUMBER)),
        Err(_) => Err(error(
            "positive",
            "Price must be a positive number and cannot be zero.",
        )),
    }
}

fn validate_discounted_price(value: &str) -> Result<(), ValidationError> {
    match parse_positive(value) {
        Ok(_) => Ok(()),
        Err(EXPECTED_NUMBER) => Err(error("number", EXPECTED_NUMBER)),
        Err(_) => Err(error(
            "positive",
            "Discounted price must be a positive number and cannot be zero",
        )),
    }
}

fn validate_stock(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let stock = value.parse::<i64>().map_err(|_| {
        if Decimal::from_str(value).is_ok() {
            error("integer", "Stock available must be a whole number")
        } else {
            error("number", EXPECTED_NUMBER)
        }
    })?;
    if stock < 0 {
        return Err(error(
            "min",
            "Stock available must be a positive number or zero",
        ));
    }
    Ok(())
}

/// `sub_name` -> `subName`; names already in camelCase pass through.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> ProductFormInput {
        ProductFormInput {
            name: "Snail Mucin".to_string(),
            sub_name: "Power essence".to_string(),
            category: vec!["c1".to_string()],
            detail_tags: vec!["CRUELTY_FREE".to_string(), "VEGAN_FRIENDLY".to_string()],
            image1: "https://cdn.example.com/1.jpg".to_string(),
            image2: String::new(),
            image3: "https://cdn.example.com/3.jpg".to_string(),
            image4: String::new(),
            image5: String::new(),
            price: "1500".to_string(),
            discounted_price: "1200".to_string(),
            stock_available: "0".to_string(),
            description: "Hydrating".to_string(),
        }
    }

    #[test]
    fn test_valid_input_builds_draft() {
        let draft = valid_input().validate_draft().unwrap();

        assert_eq!(draft.name, "Snail Mucin");
        assert_eq!(draft.category, vec![CategoryId::new("c1")]);
        assert_eq!(
            draft.detail_tags,
            vec![DetailTag::CrueltyFree, DetailTag::VeganFriendly]
        );
        assert_eq!(draft.price, Decimal::from(1500));
        assert_eq!(draft.discounted_price, Decimal::from(1200));
        assert_eq!(draft.stock_available, 0);
    }

    #[test]
    fn test_images_skip_empty_optional_fields() {
        let draft = valid_input().validate_draft().unwrap();
        assert_eq!(
            draft.images,
            vec![
                "https://cdn.example.com/1.jpg".to_string(),
                "https://cdn.example.com/3.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn test_equal_prices_accepted() {
        let mut input = valid_input();
        input.discounted_price = "1500".to_string();
        assert!(input.validate_draft().is_ok());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut input = valid_input();
        input.name.clear();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_sub_name_reported_in_camel_case() {
        let mut input = valid_input();
        input.sub_name.clear();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("subName"), Some("Subname is required"));
    }

    #[test]
    fn test_no_category_rejected() {
        let mut input = valid_input();
        input.category.clear();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(
            errors.get("category"),
            Some("At least one category must be selected")
        );
    }

    #[test]
    fn test_image1_required_and_must_be_url() {
        let mut input = valid_input();
        input.image1.clear();
        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("image1"), Some("Image 1 url is required"));

        input.image1 = "not a url".to_string();
        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("image1"), Some("Invalid url"));
    }

    #[test]
    fn test_price_below_discounted_rejected_on_price() {
        let mut input = valid_input();
        input.price = "900".to_string();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(
            errors.get("price"),
            Some("Price must be greater than or equal to discounted price")
        );
        assert_eq!(errors.get("discountedPrice"), None);
    }

    #[test]
    fn test_zero_prices_rejected() {
        let mut input = valid_input();
        input.price = "0".to_string();
        input.discounted_price = "0".to_string();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(
            errors.get("price"),
            Some("Price must be a positive number and cannot be zero.")
        );
        assert_eq!(
            errors.get("discountedPrice"),
            Some("Discounted price must be a positive number and cannot be zero")
        );
    }

    #[test]
    fn test_blank_numbers_rejected() {
        let mut input = valid_input();
        input.price.clear();
        input.stock_available = "lots".to_string();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("price"), Some("Expected number"));
        assert_eq!(errors.get("stockAvailable"), Some("Expected number"));
    }

    #[test]
    fn test_fractional_stock_rejected_as_not_whole() {
        let mut input = valid_input();
        input.stock_available = "1.5".to_string();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(
            errors.get("stockAvailable"),
            Some("Stock available must be a whole number")
        );

        input.stock_available = "lots".to_string();
        let errors = input.validate_draft().unwrap_err();
        assert_eq!(errors.get("stockAvailable"), Some("Expected number"));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let mut input = valid_input();
        input.stock_available = "-1".to_string();

        let errors = input.validate_draft().unwrap_err();
        assert_eq!(
            errors.get("stockAvailable"),
            Some("Stock available must be a positive number or zero")
        );
    }

    #[test]
    fn test_unknown_detail_tags_dropped() {
        let mut input = valid_input();
        input.detail_tags = vec!["PH_RANGE".to_string(), "BOGUS".to_string()];

        let draft = input.validate_draft().unwrap();
        assert_eq!(draft.detail_tags, vec![DetailTag::PhRange]);
    }

    #[test]
    fn test_draft_serializes_for_api() {
        let draft = valid_input().validate_draft().unwrap();
        let json = serde_json::to_value(&draft).unwrap();

        assert_eq!(json["subName"], "Power essence");
        assert_eq!(json["discountedPrice"], 1200.0);
        assert_eq!(json["stockAvailable"], 0);
        assert_eq!(json["detailTags"][0], "CRUELTY_FREE");
    }

    #[test]
    fn test_from_product_prefills_form() {
        let product: Product = serde_json::from_str(
            r#"{
                "_id": "p1", "name": "Toner", "subName": "Daily", "slug": "toner",
                "category": [{"_id": "c9", "name": "toners"}],
                "detailTags": ["PLUS_THREE"],
                "images": ["https://a/1.jpg", "https://a/2.jpg"],
                "price": 499.5, "discountedPrice": 399, "stockAvailable": 12,
                "description": "Gentle"
            }"#,
        )
        .unwrap();

        let input = ProductFormInput::from_product(&product);
        assert_eq!(input.category, vec!["c9".to_string()]);
        assert!(input.has_category("c9"));
        assert!(input.has_detail_tag("PLUS_THREE"));
        assert_eq!(input.image2, "https://a/2.jpg");
        assert!(input.image3.is_empty());
        assert_eq!(input.price, "499.5");
        assert_eq!(input.discounted_price, "399");
        assert_eq!(input.stock_available, "12");
        assert!(input.validate_draft().is_ok());
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("discounted_price"), "discountedPrice");
        assert_eq!(to_camel_case("image1"), "image1");
        assert_eq!(to_camel_case("subName"), "subName");
    }
}
