//! Product categories.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A category as listed by `GET /category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    pub name: String,
}

/// A product's reference to a category.
///
/// Depending on the endpoint the API either sends bare ids or populated
/// category documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(CategoryId),
    Populated(Category),
}

impl CategoryRef {
    /// The referenced category id.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        match self {
            Self::Id(id) => id,
            Self::Populated(category) => &category.id,
        }
    }

    /// The category name, when the API populated it.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Populated(category) => Some(&category.name),
        }
    }
}
