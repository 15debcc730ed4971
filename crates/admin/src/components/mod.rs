//! Reusable form pieces for admin templates.

pub mod input_field;

pub use input_field::{ImagePreview, InputField};
