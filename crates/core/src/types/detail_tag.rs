//! Marketing detail tags shown on product pages.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known detail tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown detail tag: {0}")]
pub struct DetailTagError(pub String);

/// An enumerated marketing attribute attached to a product.
///
/// Values the API sends that this build does not know deserialize to
/// [`DetailTag::Unknown`] so one stray tag cannot break a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailTag {
    CrueltyFree,
    PhRange,
    PlusThree,
    VeganFriendly,
    #[serde(other)]
    Unknown,
}

impl DetailTag {
    /// Known tags, in the order the product form lists them.
    pub const ALL: [Self; 4] = [
        Self::CrueltyFree,
        Self::PhRange,
        Self::PlusThree,
        Self::VeganFriendly,
    ];

    /// Wire value used by the REST API and form checkboxes.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::CrueltyFree => "CRUELTY_FREE",
            Self::PhRange => "PH_RANGE",
            Self::PlusThree => "PLUS_THREE",
            Self::VeganFriendly => "VEGAN_FRIENDLY",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CrueltyFree => "Cruelty Free",
            Self::PhRange => "PH Range",
            Self::PlusThree => "Plus Three",
            Self::VeganFriendly => "Vegan Friendly",
            Self::Unknown => "",
        }
    }

    /// Whether this tag should be displayed.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for DetailTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DetailTag {
    type Err = DetailTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.value() == s)
            .ok_or_else(|| DetailTagError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values_match_serde() {
        for tag in DetailTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.value()));
        }
    }

    #[test]
    fn test_unknown_value_deserializes() {
        let tags: Vec<DetailTag> =
            serde_json::from_str(r#"["VEGAN_FRIENDLY", "GLUTEN_FREE"]"#).unwrap();
        assert_eq!(tags, vec![DetailTag::VeganFriendly, DetailTag::Unknown]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("PH_RANGE".parse::<DetailTag>(), Ok(DetailTag::PhRange));
        assert!("UNKNOWN".parse::<DetailTag>().is_err());
        assert!("cruelty free".parse::<DetailTag>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(DetailTag::PlusThree.label(), "Plus Three");
        assert_eq!(DetailTag::CrueltyFree.to_string(), "Cruelty Free");
    }
}
