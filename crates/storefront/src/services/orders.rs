//! Checkout: turn the server-side cart into an order.

use thiserror::Error;
use tracing::{info, instrument};

use rk_industry_core::{CartItemId, PaymentMethod, Price};

use crate::api::ApiError;
use crate::models::{CartItem, Order, OrderItem, OrderRequest};
use crate::services::session::SessionStore;

/// Errors that can occur while placing or listing orders.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please login to place an order")]
    NotAuthenticated,

    #[error("Your cart is empty")]
    EmptyCart,

    /// `GET /cart` returned a line without embedded product details.
    #[error("cart item {0} has no product details")]
    MissingProductDetails(CartItemId),

    #[error("A shipping address is required")]
    NoShippingAddress,

    #[error("backend error: {0}")]
    Api(#[from] ApiError),
}

/// Build an order request from cart lines.
///
/// Unit prices are taken from the embedded product details and the total is
/// the exact decimal sum of the line totals.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart`, `CheckoutError::NoShippingAddress` or
/// `CheckoutError::MissingProductDetails`.
pub fn build_order(
    items: &[CartItem],
    payment_method: PaymentMethod,
    shipping_address: &str,
) -> Result<OrderRequest, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let shipping_address = shipping_address.trim();
    if shipping_address.is_empty() {
        return Err(CheckoutError::NoShippingAddress);
    }

    let lines = items
        .iter()
        .map(|item| {
            let product = item
                .product
                .as_ref()
                .ok_or_else(|| CheckoutError::MissingProductDetails(item.id.clone()))?;
            Ok(OrderItem {
                product_id: item.product_id.clone(),
                product_name: product.name.clone(),
                quantity: item.quantity,
                price: product.price,
            })
        })
        .collect::<Result<Vec<_>, CheckoutError>>()?;

    let total_amount: Price = lines.iter().map(|line| line.price.times(line.quantity)).sum();

    Ok(OrderRequest {
        items: lines,
        total_amount,
        payment_method,
        shipping_address: shipping_address.to_owned(),
    })
}

/// Places orders for the signed-in user.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    session: SessionStore,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Order everything currently in the cart.
    ///
    /// Without an explicit `shipping_address` the identity's stored address
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotAuthenticated` for an empty session (no
    /// request is made), a validation error from [`build_order`], or
    /// `CheckoutError::Api`.
    #[instrument(skip(self, shipping_address), fields(payment_method = %payment_method))]
    pub async fn place_order(
        &self,
        payment_method: PaymentMethod,
        shipping_address: Option<String>,
    ) -> Result<Order, CheckoutError> {
        let session = self.session.current();
        let identity = session.identity().ok_or(CheckoutError::NotAuthenticated)?;

        let address = shipping_address
            .or_else(|| identity.address.clone())
            .unwrap_or_default();

        let api = self.session.api();
        let items = api.cart().await?;
        let request = build_order(&items, payment_method, &address)?;

        let order = api.create_order(&request).await?;
        info!(order_id = %order.id, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    /// Order history of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NotAuthenticated` for an empty session and
    /// `CheckoutError::Api` on backend failure.
    #[instrument(skip(self))]
    pub async fn history(&self) -> Result<Vec<Order>, CheckoutError> {
        if !self.session.is_authenticated() {
            return Err(CheckoutError::NotAuthenticated);
        }
        Ok(self.session.api().orders().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Product;

    fn line(id: &str, cents: i64, quantity: u32) -> CartItem {
        CartItem {
            id: id.into(),
            product_id: format!("p-{id}").into(),
            quantity,
            product: Some(Product {
                id: format!("p-{id}").into(),
                name: format!("Product {id}"),
                description: String::new(),
                price: Price::from_cents(cents),
                category: "clothing".to_string(),
                image_url: String::new(),
                stock: None,
                created_at: None,
            }),
        }
    }

    #[test]
    fn test_build_order_sums_exactly() {
        let items = [line("a", 1999, 3), line("b", 10, 1)];
        let order = build_order(&items, PaymentMethod::Bkash, " 1 Road, Dhaka ").unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_name, "Product a");
        assert_eq!(order.total_amount, Price::from_cents(6007));
        assert_eq!(order.shipping_address, "1 Road, Dhaka");
    }

    #[test]
    fn test_build_order_rejects_empty_cart() {
        assert!(matches!(
            build_order(&[], PaymentMethod::Nagad, "Dhaka"),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_build_order_requires_address() {
        assert!(matches!(
            build_order(&[line("a", 100, 1)], PaymentMethod::Nagad, "  "),
            Err(CheckoutError::NoShippingAddress)
        ));
    }

    #[test]
    fn test_build_order_requires_product_details() {
        let mut item = line("a", 100, 1);
        item.product = None;
        assert!(matches!(
            build_order(&[item], PaymentMethod::Payoneer, "Dhaka"),
            Err(CheckoutError::MissingProductDetails(id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_order_request_wire_format() {
        let order =
            build_order(&[line("a", 2550, 2)], PaymentMethod::BankTransfer, "Dhaka").unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["payment_method"], "Bank Transfer");
        assert_eq!(json["total_amount"], 51.0);
        assert_eq!(json["items"][0]["price"], 25.5);
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}
