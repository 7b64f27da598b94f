//! Checkout commands.

use rk_industry_core::PaymentMethod;
use rk_industry_storefront::error::AppError;
use rk_industry_storefront::views::ViewShell;

use super::output::line;

/// # Errors
///
/// Returns `AppError::Checkout` for guests or on backend failure.
pub async fn list(shell: &ViewShell) -> Result<(), AppError> {
    let orders = shell.checkout().history().await?;
    if orders.is_empty() {
        line("No orders yet");
        return Ok(());
    }

    for order in &orders {
        let placed = order
            .created_at
            .map_or_else(String::new, |at| format!("  {}", at.format("%Y-%m-%d %H:%M")));
        let status = order.status.as_deref().unwrap_or("pending");
        line(format_args!(
            "{}  {} item(s)  {}  {}  {status}{placed}",
            order.id,
            order.unit_count(),
            order.total_amount,
            order.payment_method
        ));
    }
    Ok(())
}

/// # Errors
///
/// Returns `AppError::Checkout` if the cart is empty, no address is known,
/// or the backend rejects the order.
pub async fn place(
    shell: &ViewShell,
    payment: PaymentMethod,
    address: Option<String>,
) -> Result<(), AppError> {
    let order = shell.checkout().place_order(payment, address).await?;
    line(format_args!(
        "Order {} placed: {} via {}",
        order.id, order.total_amount, order.payment_method
    ));
    Ok(())
}
