//! Product categories offered by the store.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected clothing, electronics or accessories)")]
pub struct CategoryError(pub String);

/// A catalog category, as used by the `?category=` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Clothing,
    Electronics,
    Accessories,
}

impl ProductCategory {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Clothing, Self::Electronics, Self::Accessories];

    /// Wire name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clothing => "clothing",
            Self::Electronics => "electronics",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Clothing => "Clothing",
            Self::Electronics => "Electronics",
            Self::Accessories => "Accessories",
        }
    }

    /// Short description shown on the category card.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Clothing => "Latest fashion trends and comfortable wear",
            Self::Electronics => "Modern gadgets and tech accessories",
            Self::Accessories => "Stylish accessories for every occasion",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clothing" => Ok(Self::Clothing),
            "electronics" => Ok(Self::Electronics),
            "accessories" => Ok(Self::Accessories),
            _ => Err(CategoryError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "Electronics".parse::<ProductCategory>().unwrap(),
            ProductCategory::Electronics
        );
        assert!("toys".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn test_wire_name_matches_serde() {
        for category in ProductCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
