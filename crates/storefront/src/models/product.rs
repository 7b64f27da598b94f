//! Catalog product type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rk_industry_core::{Price, ProductCategory, ProductId};

/// A product as listed by `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Raw category string; see [`Product::known_category`].
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// The category, if it is one of the store's known categories.
    #[must_use]
    pub fn known_category(&self) -> Option<ProductCategory> {
        self.category.parse().ok()
    }

    /// Category label capitalised for display ("clothing" -> "Clothing").
    #[must_use]
    pub fn category_label(&self) -> String {
        let mut chars = self.category.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}
