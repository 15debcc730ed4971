//! Labelled input with its validation message.
//!
//! Rendered by `partials/input_field.html`: a label, the input, and an error
//! span that is empty when the field is valid. Image inputs carry their
//! preview directly underneath.

use stay_young_core::{FieldErrors, ProductFormInput};

/// One form input and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: String,
    pub value: String,
    pub error: Option<String>,
    pub preview: Option<ImagePreview>,
}

impl InputField {
    fn new(
        name: &'static str,
        label: &'static str,
        input_type: &'static str,
        placeholder: impl Into<String>,
        value: &str,
        errors: &FieldErrors,
    ) -> Self {
        Self {
            name,
            label,
            input_type,
            placeholder: placeholder.into(),
            value: value.to_owned(),
            error: errors.get(name).map(str::to_owned),
            preview: None,
        }
    }

    /// Empty string when the field is valid.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    /// Name and sub-name inputs.
    #[must_use]
    pub fn text_fields(input: &ProductFormInput, errors: &FieldErrors) -> Vec<Self> {
        vec![
            Self::new("name", "Name", "text", "Enter Product Name", &input.name, errors),
            Self::new(
                "subName",
                "Subname",
                "text",
                "Enter Product Subname",
                &input.sub_name,
                errors,
            ),
        ]
    }

    /// The five image URL inputs. Only the first carries a label.
    #[must_use]
    pub fn image_fields(input: &ProductFormInput, errors: &FieldErrors) -> Vec<Self> {
        input
            .image_inputs()
            .into_iter()
            .enumerate()
            .map(|(i, (name, value))| {
                let label = if i == 0 { "Images" } else { "" };
                Self {
                    preview: ImagePreview::new(i + 1, value),
                    ..Self::new(
                        name,
                        label,
                        "text",
                        format!("Enter Image {}", i + 1),
                        value,
                        errors,
                    )
                }
            })
            .collect()
    }

    /// Discounted price, price and stock inputs.
    #[must_use]
    pub fn number_fields(input: &ProductFormInput, errors: &FieldErrors) -> Vec<Self> {
        vec![
            Self::new(
                "discountedPrice",
                "Discounted Price",
                "number",
                "Enter Discounted Price",
                &input.discounted_price,
                errors,
            ),
            Self::new("price", "Price", "number", "Enter Price", &input.price, errors),
            Self::new(
                "stockAvailable",
                "Stock Available",
                "number",
                "Enter Stock Available",
                &input.stock_available,
                errors,
            ),
        ]
    }
}

/// A non-empty image URL to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    /// 1-based image number.
    pub number: usize,
    pub url: String,
}

impl ImagePreview {
    /// `"Image N Preview"`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Image {} Preview", self.number)
    }

    /// Preview for image `number`, if its trimmed URL is non-empty.
    #[must_use]
    pub fn new(number: usize, url: &str) -> Option<Self> {
        let url = url.trim();
        (!url.is_empty()).then(|| Self {
            number,
            url: url.to_owned(),
        })
    }
}
