//! Order types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rk_industry_core::{OrderId, PaymentMethod, Price, ProductId};

/// A single product line on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Unit price at the time the order was placed.
    pub price: Price,
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
    pub payment_method: PaymentMethod,
    pub shipping_address: String,
}

/// An order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub total_amount: Price,
    /// Stored verbatim; older orders may carry methods no longer offered.
    pub payment_method: String,
    pub shipping_address: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "super::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
