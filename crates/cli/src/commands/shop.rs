//! Catalog and cart commands.

use rk_industry_core::{CartItemId, Price, ProductCategory, ProductId};
use rk_industry_storefront::error::AppError;
use rk_industry_storefront::views::{AddToCartOutcome, ViewShell};

use super::output::line;

/// List the catalog. An unreachable backend shows an empty catalog.
pub async fn products(shell: &ViewShell, category: Option<ProductCategory>) {
    let mut catalog = shell.catalog().with_category(category);
    catalog.mount().await;

    if catalog.products().is_empty() {
        line("No products found");
        return;
    }

    for product in catalog.products() {
        let stock = product
            .stock
            .map_or_else(String::new, |stock| format!("  ({stock} in stock)"));
        line(format_args!(
            "{}  {}  {}  [{}]{stock}",
            product.id,
            product.name,
            product.price,
            product.category_label()
        ));
    }
}

/// # Errors
///
/// Returns `AppError::Notified` when the product was not added; the
/// catalog has already told the user why.
pub async fn add_to_cart(shell: &ViewShell, product_id: &ProductId) -> Result<(), AppError> {
    let outcome = shell.catalog().add_to_cart(product_id).await;
    outcome_result(&outcome, product_id)
}

fn outcome_result(outcome: &AddToCartOutcome, product_id: &ProductId) -> Result<(), AppError> {
    match outcome {
        AddToCartOutcome::Added(_) => Ok(()),
        AddToCartOutcome::LoginRequired => Err(AppError::Notified(format!(
            "product {product_id} needs a signed-in user"
        ))),
        AddToCartOutcome::Failed => Err(AppError::Notified(format!(
            "product {product_id} was not added"
        ))),
    }
}

/// # Errors
///
/// Returns `AppError::NotAuthenticated` for guests and `AppError::Api` on
/// backend failure.
pub async fn cart(shell: &ViewShell) -> Result<(), AppError> {
    if !shell.session().is_authenticated() {
        return Err(AppError::NotAuthenticated);
    }

    let items = shell.session().api().cart().await?;
    if items.is_empty() {
        line("Your cart is empty");
        return Ok(());
    }

    for item in &items {
        let name = item
            .product
            .as_ref()
            .map_or_else(|| item.product_id.to_string(), |p| p.name.clone());
        let total = item
            .line_total()
            .map_or_else(|| "-".to_string(), |total| total.to_string());
        line(format_args!("{}  {name} x{}  {total}", item.id, item.quantity));
    }

    let total: Price = items.iter().filter_map(|item| item.line_total()).sum();
    line(format_args!("Total: {total}"));
    Ok(())
}

/// # Errors
///
/// Returns `AppError::NotAuthenticated` for guests and `AppError::Api` on
/// backend failure.
pub async fn remove(shell: &ViewShell, item_id: &CartItemId) -> Result<(), AppError> {
    if !shell.session().is_authenticated() {
        return Err(AppError::NotAuthenticated);
    }

    let reply = shell.session().api().remove_from_cart(item_id).await?;
    line(reply.message);
    Ok(())
}
