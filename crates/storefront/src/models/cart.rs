//! Cart line types.
//!
//! The cart is owned and persisted server-side. The client reads it to derive
//! the badge count and to build orders, and only ever adds or removes lines.

use serde::{Deserialize, Serialize};

use rk_industry_core::{CartItemId, Price, ProductId};

use super::Product;

/// One line of the current user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Product details, embedded by `GET /cart` but absent from `POST /cart`.
    #[serde(default)]
    pub product: Option<Product>,
}

impl CartItem {
    /// Line total, when product details are present.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.product
            .as_ref()
            .map(|product| product.price.times(self.quantity))
    }
}

/// Request body for `POST /cart`.
#[derive(Debug, Serialize)]
pub(crate) struct AddToCartRequest<'a> {
    pub product_id: &'a ProductId,
    pub quantity: u32,
}
